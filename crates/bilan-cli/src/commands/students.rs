//! The `bilan students` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use bilan_core::report::{format_note, ClassReport};

pub fn execute(
    scores: PathBuf,
    roster: Option<PathBuf>,
    scheme: Option<PathBuf>,
    thresholds: String,
    class: Option<String>,
) -> Result<()> {
    let session = super::load_session(&scores, roster, scheme, &thresholds, class)?;
    let report = ClassReport::build(&session);

    let mut table = Table::new();
    table.set_header(vec!["N°", "Nom", "Prénom", "Classe", "Note", "Niveau"]);
    for row in &report.results {
        table.add_row(vec![
            Cell::new(&row.numero),
            Cell::new(&row.nom),
            Cell::new(&row.prenom),
            Cell::new(&row.classe),
            Cell::new(format_note(row.note)),
            Cell::new(row.niveau),
        ]);
    }

    println!("{table}");
    println!("{} candidat(s)", report.student_count);

    Ok(())
}

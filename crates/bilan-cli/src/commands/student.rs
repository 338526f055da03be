//! The `bilan student` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use bilan_core::report::{format_note, StudentReport};

pub fn execute(
    numero: String,
    scores: PathBuf,
    roster: Option<PathBuf>,
    scheme: Option<PathBuf>,
    thresholds: String,
) -> Result<()> {
    let session = super::load_session(&scores, roster, scheme, &thresholds, None)?;

    let Some(report) = StudentReport::build(&session, &numero) else {
        anyhow::bail!("no scores found for candidate {numero}");
    };

    println!("{} {}", report.prenom, report.nom);
    println!("Candidat n°{} - {}", report.numero, report.classe);
    println!(
        "Note : {}/20 ({})\n",
        format_note(report.note),
        report.niveau.label()
    );

    let mut exercises = Table::new();
    exercises.set_header(vec!["Exercice", "Points", "Barème"]);
    for ex in &report.exercises {
        exercises.add_row(vec![
            Cell::new(&ex.exercise),
            Cell::new(format_note(ex.score)),
            Cell::new(format_note(ex.max)),
        ]);
    }
    println!("{exercises}\n");

    let mut competencies = Table::new();
    competencies.set_header(vec!["Compétence", "Points", "Maximum", "Réussite", "Niveau"]);
    for comp in &report.competencies {
        competencies.add_row(vec![
            Cell::new(&comp.competency),
            Cell::new(format_note(comp.score)),
            Cell::new(format_note(comp.max)),
            Cell::new(format!("{}%", comp.percent)),
            Cell::new(comp.niveau),
        ]);
    }
    println!("{competencies}");

    if let Some(comment) = &report.comment {
        println!("\nAppréciation : {comment}");
    }

    Ok(())
}

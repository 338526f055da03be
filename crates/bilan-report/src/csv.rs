//! CSV export of the individual result list.
//!
//! Semicolon-delimited, matching the convention of the French spreadsheet
//! exports the roster comes from, so the file re-imports cleanly.

use std::path::Path;

use anyhow::{Context, Result};
use bilan_core::report::{format_note, ClassReport};

/// Render the result rows as semicolon-delimited CSV.
pub fn generate_csv(report: &ClassReport) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer
        .write_record(["Numéro", "Nom", "Prénom", "Classe", "Note", "Niveau"])
        .context("failed to write CSV header")?;
    for row in &report.results {
        writer
            .write_record([
                row.numero.as_str(),
                row.nom.as_str(),
                row.prenom.as_str(),
                row.classe.as_str(),
                &format_note(row.note),
                &row.niveau.to_string(),
            ])
            .context("failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("failed to flush CSV")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Write the result list as CSV to a file.
pub fn write_csv_report(report: &ClassReport, path: &Path) -> Result<()> {
    let csv = generate_csv(report)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv)
        .with_context(|| format!("failed to write CSV to {}", path.display()))?;
    Ok(())
}

//! The `bilan export` command.

use std::path::PathBuf;

use anyhow::Result;

use bilan_core::report::ClassReport;
use bilan_report::{csv, markdown};

pub fn execute(
    scores: PathBuf,
    roster: Option<PathBuf>,
    scheme: Option<PathBuf>,
    thresholds: String,
    class: Option<String>,
    format: String,
    output: PathBuf,
) -> Result<()> {
    let session = super::load_session(&scores, roster, scheme, &thresholds, class)?;
    let report = ClassReport::build(&session);

    match format.as_str() {
        "markdown" | "md" => markdown::write_markdown_report(&report, &output)?,
        "csv" => csv::write_csv_report(&report, &output)?,
        "json" => report.save_json(&output)?,
        other => anyhow::bail!("unknown export format '{other}' (expected markdown, csv or json)"),
    }

    println!(
        "Exported report for {} candidate(s) to {}",
        report.student_count,
        output.display()
    );
    Ok(())
}

//! The `bilan validate` command.

use std::path::PathBuf;

use anyhow::Result;

use bilan_core::parser::{load_scheme, validate_preset};

pub fn execute(scheme_path: PathBuf) -> Result<()> {
    let preset = load_scheme(&scheme_path)?;

    let total: f64 = preset.exercises.iter().map(|(_, e)| e.total_points).sum();
    println!(
        "Barème : {} ({} exercice(s), {total} point(s))",
        preset.name,
        preset.exercises.len()
    );

    let warnings = validate_preset(&preset);
    for w in &warnings {
        let prefix = w
            .exercise
            .as_ref()
            .map(|id| format!("  [exercice {id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Barème valide.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

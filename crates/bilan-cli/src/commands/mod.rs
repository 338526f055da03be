//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::Result;

use bilan_core::model::MasteryThresholds;
use bilan_core::parser::{load_roster, load_scheme, load_score_export};
use bilan_core::session::GradingSession;

pub mod export;
pub mod stats;
pub mod student;
pub mod students;
pub mod validate;

/// Assemble a [`GradingSession`] from the common command-line inputs.
pub(crate) fn load_session(
    scores: &Path,
    roster: Option<PathBuf>,
    scheme: Option<PathBuf>,
    thresholds: &str,
    class: Option<String>,
) -> Result<GradingSession> {
    let import = load_score_export(scores)?;

    let mut session = GradingSession::new();
    session.scores = import.scores;
    session.comments = import.comments;
    session.thresholds = thresholds.parse::<MasteryThresholds>()?;
    session.class_filter = class;

    if let Some(path) = roster {
        session.roster = load_roster(&path)?;
        tracing::info!(students = session.roster.len(), "roster loaded");
    }
    if let Some(path) = scheme {
        let preset = load_scheme(&path)?;
        tracing::info!(name = %preset.name, exercises = preset.exercises.len(), "barème loaded");
        session.scheme = preset.exercises;
    }

    Ok(session)
}

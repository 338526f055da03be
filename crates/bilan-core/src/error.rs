//! Typed failures for contract violations.
//!
//! The core never fails on missing data: absent candidates, unmatched roster
//! entries, and empty cohorts all yield zero/empty results. Only programmer
//! errors (misconfigured thresholds) and unusable input files surface here.

use thiserror::Error;

/// Errors surfaced by bilan-core.
#[derive(Debug, Error)]
pub enum BilanError {
    /// Threshold cutoffs must be strictly descending: tbm > ms > mf.
    #[error("invalid mastery thresholds: expected tbm > ms > mf, got tbm={tbm}, ms={ms}, mf={mf}")]
    InvalidThresholds { tbm: f64, ms: f64, mf: f64 },

    /// Threshold string did not parse as three comma-separated numbers.
    #[error("invalid threshold syntax (expected \"tbm,ms,mf\"): {0}")]
    InvalidThresholdSyntax(String),

    /// The score JSON had neither an `appState.scores` nor a `scores` object.
    #[error("score file contains no recognizable score data")]
    UnrecognizedScoreFormat,

    /// Roster header row lacks one or more required columns.
    #[error("roster is missing required column(s): {0}")]
    MissingRosterColumns(String),

    /// Scheme files must be .json or .toml.
    #[error("unsupported scheme file extension: {0}")]
    UnsupportedSchemeFormat(String),
}

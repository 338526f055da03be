//! bilan-core — Score aggregation, mastery classification, and cohort statistics.
//!
//! This crate defines the data model and the grading computations the whole
//! bilan system builds on: barème (scoring scheme) configuration, per-student
//! score aggregation, mastery-level classification, descriptive statistics
//! over a cohort, and the view models handed to export/rendering surfaces.

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scheme;
pub mod session;
pub mod statistics;

pub(crate) mod text;

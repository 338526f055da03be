//! Export formats for bilan reports.
//!
//! Markdown for the synthesis handed to the pedagogical team, CSV for
//! re-import into a spreadsheet. JSON persistence lives on the report types
//! themselves in `bilan-core`.

pub mod csv;
pub mod markdown;

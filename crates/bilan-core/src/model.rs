//! Core data model types for bilan.
//!
//! These are the fundamental types the entire bilan system uses to represent
//! students, raw question scores, mastery thresholds, and classified results.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BilanError;

/// A roster entry imported from the administration's CSV/spreadsheet export.
///
/// `numero` is kept as a string: some exports carry plain integers, others
/// zero-padded or alphanumeric candidate numbers. Joining against score
/// entries compares numerically whenever both sides parse as integers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Candidate number (roster join key).
    pub numero: String,
    /// Family name.
    pub nom: String,
    /// Given name.
    pub prenom: String,
    /// Class label (e.g. "3A").
    pub classe: String,
}

/// Points awarded for a single question, with optional per-competency credit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionScore {
    /// Points awarded. No upper bound is enforced against the scheme;
    /// over-scoring is tolerated, not rejected.
    #[serde(default)]
    pub score: f64,
    /// Competency credit earned on this question, keyed by competency label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competences: Option<BTreeMap<String, f64>>,
}

/// Question id → awarded score, for one exercise.
pub type QuestionScores = BTreeMap<String, QuestionScore>;

/// Exercise id → question scores, for one candidate.
pub type CandidateScores = BTreeMap<String, QuestionScores>;

/// Candidate numero → that candidate's raw scores.
///
/// This is the fully-materialized in-memory shape handed over by the import
/// layer; the core never sees partially-loaded or streaming data.
pub type ScoreStore = BTreeMap<String, CandidateScores>;

/// Ordinal mastery level, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MasteryLevel {
    /// Maîtrise insuffisante.
    MI,
    /// Maîtrise fragile.
    MF,
    /// Maîtrise satisfaisante.
    MS,
    /// Très bonne maîtrise.
    TBM,
}

impl MasteryLevel {
    /// Human-readable French label, as printed on report cards.
    pub fn label(&self) -> &'static str {
        match self {
            MasteryLevel::TBM => "Très bonne maîtrise",
            MasteryLevel::MS => "Maîtrise satisfaisante",
            MasteryLevel::MF => "Maîtrise fragile",
            MasteryLevel::MI => "Maîtrise insuffisante",
        }
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MasteryLevel::MI => write!(f, "MI"),
            MasteryLevel::MF => write!(f, "MF"),
            MasteryLevel::MS => write!(f, "MS"),
            MasteryLevel::TBM => write!(f, "TBM"),
        }
    }
}

/// Ascending point cutoffs for overall mastery classification.
///
/// These apply to the raw point total (typically on a 0–20 scale). They are
/// caller-configurable, unlike the percentage bands used for per-competency
/// classification which are fixed (see [`crate::classify`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MasteryThresholds {
    /// Minimum total for TBM.
    pub tbm: f64,
    /// Minimum total for MS.
    pub ms: f64,
    /// Minimum total for MF. Anything below is MI.
    pub mf: f64,
}

impl Default for MasteryThresholds {
    fn default() -> Self {
        Self {
            tbm: 15.0,
            ms: 10.0,
            mf: 5.0,
        }
    }
}

impl MasteryThresholds {
    /// Reject misordered cutoffs. This is the one configuration mistake the
    /// core treats as a programmer error rather than tolerating silently.
    pub fn validate(&self) -> Result<(), BilanError> {
        if self.tbm > self.ms && self.ms > self.mf {
            Ok(())
        } else {
            Err(BilanError::InvalidThresholds {
                tbm: self.tbm,
                ms: self.ms,
                mf: self.mf,
            })
        }
    }
}

impl FromStr for MasteryThresholds {
    type Err = BilanError;

    /// Parse "tbm,ms,mf", e.g. "15,10,5".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| BilanError::InvalidThresholdSyntax(s.to_string()))?;
        if parts.len() != 3 {
            return Err(BilanError::InvalidThresholdSyntax(s.to_string()));
        }
        let thresholds = Self {
            tbm: parts[0],
            ms: parts[1],
            mf: parts[2],
        };
        thresholds.validate()?;
        Ok(thresholds)
    }
}

/// A scored candidate joined with roster identity and classified.
///
/// This is a pure projection recomputed on demand from the score store,
/// roster, and thresholds; it is never the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectedCandidate {
    pub numero: String,
    pub nom: String,
    pub prenom: String,
    pub classe: String,
    /// Unrounded point total.
    pub note: f64,
    pub niveau: MasteryLevel,
}

/// Accumulated earned/maximum points for one competency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetencyScore {
    pub score: f64,
    pub max: f64,
}

/// Competency name (canonicalized) → earned/max breakdown.
pub type CompetencyBreakdown = BTreeMap<String, CompetencyScore>;

/// Numeric-aware comparison of candidate numbers: "7" matches "07", and
/// "12" sorts after "7". Falls back to string comparison when either side
/// is not an integer.
pub fn numero_eq(a: &str, b: &str) -> bool {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => a.trim() == b.trim(),
    }
}

/// Sort key used wherever candidates are ordered by numero.
pub fn numero_sort_key(numero: &str) -> (i64, String) {
    match numero.trim().parse::<i64>() {
        Ok(n) => (n, String::new()),
        Err(_) => (i64::MAX, numero.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mastery_level_ordering() {
        assert!(MasteryLevel::MI < MasteryLevel::MF);
        assert!(MasteryLevel::MF < MasteryLevel::MS);
        assert!(MasteryLevel::MS < MasteryLevel::TBM);
    }

    #[test]
    fn mastery_level_display() {
        assert_eq!(MasteryLevel::TBM.to_string(), "TBM");
        assert_eq!(MasteryLevel::MI.label(), "Maîtrise insuffisante");
    }

    #[test]
    fn default_thresholds() {
        let t = MasteryThresholds::default();
        assert_eq!(t.tbm, 15.0);
        assert_eq!(t.ms, 10.0);
        assert_eq!(t.mf, 5.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn misordered_thresholds_rejected() {
        let t = MasteryThresholds {
            tbm: 5.0,
            ms: 10.0,
            mf: 15.0,
        };
        assert!(t.validate().is_err());

        let equal = MasteryThresholds {
            tbm: 10.0,
            ms: 10.0,
            mf: 5.0,
        };
        assert!(equal.validate().is_err());
    }

    #[test]
    fn thresholds_from_str() {
        let t: MasteryThresholds = "15,10,5".parse().unwrap();
        assert_eq!(t, MasteryThresholds::default());

        let spaced: MasteryThresholds = "16, 11, 6".parse().unwrap();
        assert_eq!(spaced.tbm, 16.0);

        assert!("15,10".parse::<MasteryThresholds>().is_err());
        assert!("a,b,c".parse::<MasteryThresholds>().is_err());
        assert!("5,10,15".parse::<MasteryThresholds>().is_err());
    }

    #[test]
    fn numero_matching() {
        assert!(numero_eq("7", "07"));
        assert!(numero_eq(" 12", "12"));
        assert!(!numero_eq("7", "8"));
        assert!(numero_eq("A12", "A12"));
        assert!(!numero_eq("A12", "a12"));
    }

    #[test]
    fn numero_ordering() {
        let mut nums = vec!["12", "7", "103", "2"];
        nums.sort_by_key(|n| numero_sort_key(n));
        assert_eq!(nums, vec!["2", "7", "12", "103"]);
    }

    #[test]
    fn question_score_deserializes_without_competences() {
        let q: QuestionScore = serde_json::from_str(r#"{"score": 1.5}"#).unwrap();
        assert_eq!(q.score, 1.5);
        assert!(q.competences.is_none());
    }

    #[test]
    fn question_score_deserializes_with_competences() {
        let q: QuestionScore =
            serde_json::from_str(r#"{"score": 2, "competences": {"Calculer": 1.5}}"#).unwrap();
        assert_eq!(q.competences.unwrap()["Calculer"], 1.5);
    }
}

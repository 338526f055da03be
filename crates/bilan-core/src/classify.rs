//! Mastery-level classification.
//!
//! Two deliberately distinct threshold systems coexist:
//!
//! - overall totals are classified on the raw point scale against
//!   caller-configurable [`MasteryThresholds`] (default 15/10/5 on 0–20);
//! - per-competency percentages are classified against fixed 75/50/25
//!   percent bands.
//!
//! They must not be unified; the asymmetry is part of the grading contract.

use crate::model::{MasteryLevel, MasteryThresholds};

/// Classify a point total, highest band first.
pub fn classify(score: f64, thresholds: &MasteryThresholds) -> MasteryLevel {
    if score >= thresholds.tbm {
        MasteryLevel::TBM
    } else if score >= thresholds.ms {
        MasteryLevel::MS
    } else if score >= thresholds.mf {
        MasteryLevel::MF
    } else {
        MasteryLevel::MI
    }
}

/// Classify a competency success percentage on the fixed 75/50/25 bands.
pub fn classify_percent(percent: f64) -> MasteryLevel {
    if percent >= 75.0 {
        MasteryLevel::TBM
    } else if percent >= 50.0 {
        MasteryLevel::MS
    } else if percent >= 25.0 {
        MasteryLevel::MF
    } else {
        MasteryLevel::MI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_boundaries_with_default_thresholds() {
        let t = MasteryThresholds::default();
        assert_eq!(classify(15.0, &t), MasteryLevel::TBM);
        assert_eq!(classify(14.9, &t), MasteryLevel::MS);
        assert_eq!(classify(10.0, &t), MasteryLevel::MS);
        assert_eq!(classify(9.9, &t), MasteryLevel::MF);
        assert_eq!(classify(5.0, &t), MasteryLevel::MF);
        assert_eq!(classify(4.9, &t), MasteryLevel::MI);
        assert_eq!(classify(0.0, &t), MasteryLevel::MI);
        assert_eq!(classify(20.0, &t), MasteryLevel::TBM);
    }

    #[test]
    fn classifier_respects_custom_thresholds() {
        let strict = MasteryThresholds {
            tbm: 18.0,
            ms: 14.0,
            mf: 8.0,
        };
        assert_eq!(classify(15.0, &strict), MasteryLevel::MS);
        assert_eq!(classify(7.9, &strict), MasteryLevel::MI);
    }

    #[test]
    fn percent_bands_are_fixed() {
        assert_eq!(classify_percent(75.0), MasteryLevel::TBM);
        assert_eq!(classify_percent(74.0), MasteryLevel::MS);
        assert_eq!(classify_percent(50.0), MasteryLevel::MS);
        assert_eq!(classify_percent(49.0), MasteryLevel::MF);
        assert_eq!(classify_percent(25.0), MasteryLevel::MF);
        assert_eq!(classify_percent(24.0), MasteryLevel::MI);
        assert_eq!(classify_percent(100.0), MasteryLevel::TBM);
        assert_eq!(classify_percent(0.0), MasteryLevel::MI);
    }
}

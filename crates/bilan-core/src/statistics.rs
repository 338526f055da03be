//! Cohort-level descriptive statistics.
//!
//! All functions take an already-corrected candidate list (see
//! [`crate::session::GradingSession::corrected_candidates`]) so that class
//! filtering happens exactly once, upstream.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::{competency_scores, exercise_scores, round_to_tenth};
use crate::model::{CorrectedCandidate, MasteryLevel};
use crate::scheme::default_scheme;
use crate::session::GradingSession;

/// Five-number-style summary of a cohort's totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub min: f64,
    pub max: f64,
}

/// One bar of the score histogram: notes in `[lower, upper)`, except the
/// last bucket which also absorbs notes equal to its upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Aggregate outcome for one exercise across the cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseStat {
    pub exercise: String,
    /// Mean of the per-candidate rounded exercise sums.
    pub mean: f64,
    /// Points the exercise is worth.
    pub max: f64,
    /// `round(100 * mean / max)`, or 0 when the exercise is worth nothing.
    pub success_rate: u32,
    /// Candidates with at least one scored question on this exercise.
    pub count: usize,
}

/// Aggregate outcome for one competency across the cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyStat {
    pub competency: String,
    pub earned: f64,
    pub max: f64,
    /// `round(100 * earned / max)`, or 0 when no points were allocatable.
    pub success_rate: u32,
    /// Candidates whose breakdown carries this competency.
    pub count: usize,
}

/// Exercises partitioned by cohort success rate for the action plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Below 50%: needs immediate remediation.
    pub urgent: Vec<String>,
    /// 50% to 69%: reinforce.
    pub priority: Vec<String>,
    /// 70% and above: consolidated.
    pub strengths: Vec<String>,
}

/// Summary statistics over the cohort's totals. `None` for an empty cohort;
/// there is no meaningful zero value for a median.
pub fn cohort_summary(candidates: &[CorrectedCandidate]) -> Option<CohortSummary> {
    if candidates.is_empty() {
        return None;
    }
    let mut notes: Vec<f64> = candidates.iter().map(|c| c.note).collect();
    notes.sort_by(f64::total_cmp);

    let n = notes.len();
    let mean = notes.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (notes[n / 2 - 1] + notes[n / 2]) / 2.0
    } else {
        notes[n / 2]
    };

    Some(CohortSummary {
        count: n,
        mean,
        median,
        // Nearest-rank quartiles, matching the median only approximately on
        // small cohorts. Deliberate: report cards have always shown these.
        q1: notes[n / 4],
        q3: notes[3 * n / 4],
        min: notes[0],
        max: notes[n - 1],
    })
}

/// First candidate holding the strictly greatest total. Ties go to whoever
/// appears first in candidate-number order.
pub fn champion(candidates: &[CorrectedCandidate]) -> Option<&CorrectedCandidate> {
    let mut best: Option<&CorrectedCandidate> = None;
    for candidate in candidates {
        match best {
            Some(b) if candidate.note <= b.note => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Candidates per mastery level. Levels nobody reached are present with a
/// zero count so tables always show all four rows.
pub fn mastery_counts(candidates: &[CorrectedCandidate]) -> BTreeMap<MasteryLevel, usize> {
    let mut counts: BTreeMap<MasteryLevel, usize> = [
        (MasteryLevel::MI, 0),
        (MasteryLevel::MF, 0),
        (MasteryLevel::MS, 0),
        (MasteryLevel::TBM, 0),
    ]
    .into_iter()
    .collect();
    for candidate in candidates {
        *counts.entry(candidate.niveau).or_default() += 1;
    }
    counts
}

/// Histogram of totals over `[0, 20]` in buckets of `bucket_width` points.
///
/// A note of exactly 20 lands in the last bucket; notes outside `[0, 20]`
/// are dropped, never clamped.
pub fn score_distribution(
    candidates: &[CorrectedCandidate],
    bucket_width: f64,
) -> Vec<DistributionBucket> {
    const SCALE_MAX: f64 = 20.0;
    let buckets = (SCALE_MAX / bucket_width).ceil() as usize;
    let mut result: Vec<DistributionBucket> = (0..buckets)
        .map(|i| DistributionBucket {
            lower: i as f64 * bucket_width,
            upper: ((i + 1) as f64 * bucket_width).min(SCALE_MAX),
            count: 0,
        })
        .collect();

    for candidate in candidates {
        let note = candidate.note;
        if !(0.0..=SCALE_MAX).contains(&note) {
            continue;
        }
        let index = if note == SCALE_MAX {
            buckets - 1
        } else {
            (note / bucket_width) as usize
        };
        result[index].count += 1;
    }
    result
}

/// Per-exercise cohort outcomes, in exam order.
///
/// Candidates without any score on an exercise are excluded from that
/// exercise's mean and count, so a half-corrected pile does not drag every
/// exercise toward zero.
pub fn exercise_statistics(
    session: &GradingSession,
    candidates: &[CorrectedCandidate],
) -> Vec<ExerciseStat> {
    let scheme = if session.scheme.is_empty() {
        default_scheme()
    } else {
        &session.scheme
    };

    let per_candidate: Vec<BTreeMap<String, f64>> = candidates
        .iter()
        .map(|c| exercise_scores(&session.scores, &c.numero))
        .collect();

    scheme
        .iter()
        .map(|(exercise_id, exercise)| {
            let scored: Vec<f64> = per_candidate
                .iter()
                .filter_map(|scores| scores.get(exercise_id).copied())
                .collect();
            let count = scored.len();
            let mean = if count == 0 {
                0.0
            } else {
                scored.iter().sum::<f64>() / count as f64
            };
            let max = exercise.total_points;
            let success_rate = if max > 0.0 {
                (100.0 * mean / max).round() as u32
            } else {
                0
            };
            ExerciseStat {
                exercise: exercise_id.to_string(),
                mean: round_to_tenth(mean),
                max,
                success_rate,
                count,
            }
        })
        .collect()
}

/// Per-competency cohort outcomes, sorted by competency name.
///
/// A candidate whose breakdown lacks a competency is excluded from both the
/// earned and the maximum side of that competency's rate.
pub fn competency_statistics(
    session: &GradingSession,
    candidates: &[CorrectedCandidate],
) -> Vec<CompetencyStat> {
    let mut accumulated: BTreeMap<String, (f64, f64, usize)> = BTreeMap::new();
    for candidate in candidates {
        let breakdown = competency_scores(&session.scores, &session.scheme, &candidate.numero);
        for (competency, score) in breakdown {
            let entry = accumulated.entry(competency).or_insert((0.0, 0.0, 0));
            entry.0 += score.score;
            entry.1 += score.max;
            entry.2 += 1;
        }
    }

    accumulated
        .into_iter()
        .map(|(competency, (earned, max, count))| {
            let success_rate = if max > 0.0 {
                (100.0 * earned / max).round() as u32
            } else {
                0
            };
            CompetencyStat {
                competency,
                earned,
                max,
                success_rate,
                count,
            }
        })
        .collect()
}

/// Partition exercises into the remediation action plan.
///
/// An exercise nobody attempted carries a zero success rate and lands in the
/// urgent tier, matching how a half-corrected pile reads to the teacher.
pub fn recommendations(exercises: &[ExerciseStat]) -> Recommendations {
    let mut result = Recommendations::default();
    for stat in exercises {
        if stat.success_rate < 50 {
            result.urgent.push(stat.exercise.clone());
        } else if stat.success_rate < 70 {
            result.priority.push(stat.exercise.clone());
        } else {
            result.strengths.push(stat.exercise.clone());
        }
    }
    result
}

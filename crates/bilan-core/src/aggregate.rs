//! Per-candidate score aggregation.
//!
//! Pure functions over the raw score store: per-exercise sums, the grand
//! total, and the per-competency earned/max breakdown. A candidate with no
//! raw scores yields empty maps and a zero total, never an error — partial
//! imports are the steady state of a grading workflow.

use std::collections::BTreeMap;

use crate::model::{CompetencyBreakdown, ScoreStore};
use crate::scheme::{canonical_competency_key, effective_scheme, ScoringScheme};

/// Round to one decimal, half away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Per-exercise score sums for one candidate, each rounded to 0.1.
///
/// Exercises absent from the candidate's raw scores are omitted, not
/// zero-filled.
pub fn exercise_scores(store: &ScoreStore, numero: &str) -> BTreeMap<String, f64> {
    let mut result = BTreeMap::new();
    let Some(candidate) = store.get(numero) else {
        return result;
    };
    for (exercise_id, questions) in candidate {
        let total: f64 = questions.values().map(|q| q.score).sum();
        result.insert(exercise_id.clone(), round_to_tenth(total));
    }
    result
}

/// Unrounded grand total across every exercise and question.
///
/// Note the asymmetry with [`exercise_scores`]: exercise sums are rounded to
/// 0.1 for display, the grand total is not. Display layers round only when
/// presenting, so the total never accumulates per-exercise rounding error.
pub fn total_score(store: &ScoreStore, numero: &str) -> f64 {
    store
        .get(numero)
        .map(|candidate| {
            candidate
                .values()
                .flat_map(|questions| questions.values())
                .map(|q| q.score)
                .sum()
        })
        .unwrap_or(0.0)
}

/// Per-competency earned/max breakdown for one candidate.
///
/// Two independent passes:
/// 1. maxima from the effective scheme's competency allocations;
/// 2. earned credit from the candidate's raw `competences` entries.
///
/// The passes do not cross-validate: a scheme question without competency
/// points, or an earned entry for a competency the scheme never allocates,
/// both contribute what they carry and nothing more. Competency labels are
/// canonicalized at every ingestion point.
pub fn competency_scores(
    store: &ScoreStore,
    configured: &ScoringScheme,
    numero: &str,
) -> CompetencyBreakdown {
    let mut result = CompetencyBreakdown::new();

    // An unknown candidate yields an empty map, not a map of zeroed maxima.
    let Some(candidate) = store.get(numero) else {
        return result;
    };

    // Maxima pass over the scheme.
    for (_, exercise) in effective_scheme(configured).iter() {
        for points in exercise.question_competence_points.values() {
            for (name, allocated) in points {
                let key = canonical_competency_key(name);
                result.entry(key.to_string()).or_default().max += allocated;
            }
        }
    }

    // Earned pass over the candidate's raw scores.
    for questions in candidate.values() {
        for question in questions.values() {
            let Some(competences) = &question.competences else {
                continue;
            };
            for (name, earned) in competences {
                let key = canonical_competency_key(name);
                result.entry(key.to_string()).or_default().score += earned;
            }
        }
    }

    result
}

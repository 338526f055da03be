//! Report assembly and persistence.
//!
//! Two report shapes: [`StudentReport`] for one candidate's slip and
//! [`ClassReport`] for the cohort synthesis. Both are plain serializable
//! snapshots; building one never mutates the session.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{competency_scores, exercise_scores};
use crate::classify::classify_percent;
use crate::model::{numero_eq, CorrectedCandidate, MasteryLevel};
use crate::scheme::default_scheme;
use crate::session::GradingSession;
use crate::statistics::{
    champion, cohort_summary, competency_statistics, exercise_statistics, mastery_counts,
    recommendations, score_distribution, CohortSummary, CompetencyStat, DistributionBucket,
    ExerciseStat, Recommendations,
};
use crate::text::name_sort_key;

/// Width of the histogram buckets on the class report.
const DISTRIBUTION_BUCKET_WIDTH: f64 = 5.0;

/// One exercise line on a student's slip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRow {
    pub exercise: String,
    /// Rounded to 0.1.
    pub score: f64,
    pub max: f64,
}

/// One competency line on a student's slip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyRow {
    pub competency: String,
    pub score: f64,
    pub max: f64,
    /// `round(100 * score / max)`, 0 when nothing was allocatable.
    pub percent: u32,
    pub niveau: MasteryLevel,
}

/// Individual result slip for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentReport {
    pub numero: String,
    pub nom: String,
    pub prenom: String,
    pub classe: String,
    pub note: f64,
    pub niveau: MasteryLevel,
    pub exercises: Vec<ExerciseRow>,
    pub competencies: Vec<CompetencyRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl StudentReport {
    /// Assemble the slip for one candidate. `None` when the candidate has no
    /// raw scores at all (or is excluded by the session's class filter).
    pub fn build(session: &GradingSession, numero: &str) -> Option<Self> {
        let candidate = session
            .corrected_candidates()
            .into_iter()
            .find(|c| numero_eq(&c.numero, numero))?;

        let scheme = if session.scheme.is_empty() {
            default_scheme()
        } else {
            &session.scheme
        };
        let scores = exercise_scores(&session.scores, &candidate.numero);
        let exercises = scheme
            .iter()
            .map(|(id, ex)| ExerciseRow {
                exercise: id.to_string(),
                score: scores.get(id).copied().unwrap_or(0.0),
                max: ex.total_points,
            })
            .collect();

        let breakdown = competency_scores(&session.scores, &session.scheme, &candidate.numero);
        let competencies = breakdown
            .into_iter()
            .map(|(competency, cs)| {
                let percent = if cs.max > 0.0 {
                    (100.0 * cs.score / cs.max).round() as u32
                } else {
                    0
                };
                CompetencyRow {
                    competency,
                    score: cs.score,
                    max: cs.max,
                    percent,
                    niveau: classify_percent(percent as f64),
                }
            })
            .collect();

        let comment = session.comment(&candidate.numero).map(str::to_string);
        Some(Self {
            numero: candidate.numero,
            nom: candidate.nom,
            prenom: candidate.prenom,
            classe: candidate.classe,
            note: candidate.note,
            niveau: candidate.niveau,
            exercises,
            competencies,
            comment,
        })
    }
}

/// Cohort synthesis: summary statistics, histograms, per-exercise and
/// per-competency outcomes, remediation plan, and the full result list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Class label when the session is filtered, `None` for the whole cohort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub student_count: usize,
    /// `None` for an empty cohort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<CohortSummary>,
    pub mastery: BTreeMap<MasteryLevel, usize>,
    pub distribution: Vec<DistributionBucket>,
    pub exercises: Vec<ExerciseStat>,
    pub competencies: Vec<CompetencyStat>,
    pub recommendations: Recommendations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion: Option<CorrectedCandidate>,
    /// All candidates, ordered by class then name (accent-insensitive).
    pub results: Vec<CorrectedCandidate>,
}

impl ClassReport {
    /// Assemble the cohort synthesis from the session's current state.
    pub fn build(session: &GradingSession) -> Self {
        let candidates = session.corrected_candidates();
        let exercises = exercise_statistics(session, &candidates);
        let competencies = competency_statistics(session, &candidates);
        let plan = recommendations(&exercises);

        // Champion ties resolve in candidate-number order, so pick it before
        // re-sorting the results by name.
        let best = champion(&candidates).cloned();

        let mut results = candidates.clone();
        results.sort_by(|a, b| {
            a.classe.cmp(&b.classe).then_with(|| {
                name_sort_key(&a.nom)
                    .cmp(&name_sort_key(&b.nom))
                    .then_with(|| name_sort_key(&a.prenom).cmp(&name_sort_key(&b.prenom)))
            })
        });

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            class: session.class_filter.clone(),
            student_count: candidates.len(),
            summary: cohort_summary(&candidates),
            mastery: mastery_counts(&candidates),
            distribution: score_distribution(&candidates, DISTRIBUTION_BUCKET_WIDTH),
            exercises,
            competencies,
            recommendations: plan,
            champion: best,
            results,
        }
    }

    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ClassReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// One decimal, the way notes are printed everywhere.
pub fn format_note(note: f64) -> String {
    format!("{note:.1}")
}

//! Grading session: the loaded inputs of one correction campaign.
//!
//! A [`GradingSession`] bundles the raw score store, the teacher's comments,
//! the roster, the configured scheme, and the classification thresholds. All
//! derived views (corrected candidates, statistics, reports) are recomputed
//! from it on demand; nothing here caches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::total_score;
use crate::classify::classify;
use crate::model::{
    numero_eq, numero_sort_key, CorrectedCandidate, MasteryThresholds, ScoreStore, Student,
};
use crate::scheme::ScoringScheme;

/// Everything loaded for one correction campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradingSession {
    /// Raw per-question scores, keyed by candidate numero.
    pub scores: ScoreStore,
    /// Free-text appreciation per candidate numero.
    #[serde(default)]
    pub comments: BTreeMap<String, String>,
    /// Imported class list. May be empty; candidates then keep placeholder
    /// identities.
    #[serde(default)]
    pub roster: Vec<Student>,
    /// Configured barème. May be empty; competency maxima then fall back to
    /// the embedded default.
    #[serde(default)]
    pub scheme: ScoringScheme,
    #[serde(default)]
    pub thresholds: MasteryThresholds,
    /// Restrict derived views to one class label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_filter: Option<String>,
}

impl GradingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster identity for a candidate number, numeric-aware.
    pub fn student(&self, numero: &str) -> Option<&Student> {
        self.roster.iter().find(|s| numero_eq(&s.numero, numero))
    }

    /// Teacher's appreciation for a candidate, if any.
    pub fn comment(&self, numero: &str) -> Option<&str> {
        self.comments
            .iter()
            .find(|(k, _)| numero_eq(k, numero))
            .map(|(_, v)| v.as_str())
    }

    /// Distinct class labels present in the roster, sorted.
    pub fn classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = self.roster.iter().map(|s| s.classe.clone()).collect();
        classes.sort();
        classes.dedup();
        classes
    }

    /// Every scored candidate, joined with roster identity and classified,
    /// ordered by candidate number. A candidate absent from the roster gets
    /// the placeholder identity rather than being dropped.
    ///
    /// When a class filter is set, candidates outside that class (including
    /// unmatched placeholders) are excluded.
    pub fn corrected_candidates(&self) -> Vec<CorrectedCandidate> {
        let mut numeros: Vec<&String> = self.scores.keys().collect();
        numeros.sort_by_key(|n| numero_sort_key(n));

        let mut candidates = Vec::with_capacity(numeros.len());
        for numero in numeros {
            let (nom, prenom, classe) = match self.student(numero) {
                Some(s) => (s.nom.clone(), s.prenom.clone(), s.classe.clone()),
                None => (
                    "Candidat".to_string(),
                    numero.clone(),
                    "Non attribué".to_string(),
                ),
            };
            if let Some(filter) = &self.class_filter {
                if &classe != filter {
                    continue;
                }
            }
            let note = total_score(&self.scores, numero);
            candidates.push(CorrectedCandidate {
                numero: numero.clone(),
                nom,
                prenom,
                classe,
                note,
                niveau: classify(note, &self.thresholds),
            });
        }
        candidates
    }
}

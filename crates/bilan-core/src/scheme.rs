//! Barème (scoring scheme) model.
//!
//! A scheme assigns points to exercises/questions and maps questions to
//! competencies. Exercise order is significant: preset application aligns
//! preset exercises to the caller's exercise slots by position, not by key.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Point and competency allocation for one exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExerciseScheme {
    /// Total points the exercise is worth.
    pub total_points: f64,
    /// Question id → base points.
    pub question_points: BTreeMap<String, f64>,
    /// Question id → competencies assessed, in display order.
    pub question_competences: BTreeMap<String, Vec<String>>,
    /// Question id → competency → points that question contributes to the
    /// competency. The sum per question need not equal the question's base
    /// points; the two allocations are independent.
    pub question_competence_points: BTreeMap<String, BTreeMap<String, f64>>,
}

/// An ordered mapping exercise id → [`ExerciseScheme`].
///
/// Insertion order is preserved (it is the exam order) and drives
/// [`ScoringScheme::apply_preset_by_position`]. Serialized as a plain JSON/TOML
/// map; deserialization keeps document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringScheme {
    exercises: Vec<(String, ExerciseScheme)>,
}

impl ScoringScheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an exercise slot. An existing slot with the same id is replaced
    /// in place, keeping its position.
    pub fn insert(&mut self, id: impl Into<String>, scheme: ExerciseScheme) {
        let id = id.into();
        if let Some(slot) = self.exercises.iter_mut().find(|(k, _)| *k == id) {
            slot.1 = scheme;
        } else {
            self.exercises.push((id, scheme));
        }
    }

    pub fn get(&self, id: &str) -> Option<&ExerciseScheme> {
        self.exercises.iter().find(|(k, _)| k == id).map(|(_, e)| e)
    }

    /// Exercises in exam order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExerciseScheme)> {
        self.exercises.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// True when at least one exercise carries competency-point allocations.
    /// Used to decide whether this scheme or the built-in default drives the
    /// competency maxima pass.
    pub fn has_competency_points(&self) -> bool {
        self.exercises
            .iter()
            .any(|(_, e)| !e.question_competence_points.is_empty())
    }

    /// Sequential remap by index: preset exercise N overwrites this scheme's
    /// Nth exercise slot, whatever that slot's key is. Slots beyond the
    /// preset's length (or preset exercises beyond the slot count) are left
    /// untouched.
    ///
    /// Precondition: the caller's exercise keys must already be in exam
    /// order. The core cannot detect a misordered caller; a count mismatch
    /// is at least logged.
    pub fn apply_preset_by_position(&mut self, preset: &ScoringScheme) {
        if preset.len() != self.len() {
            tracing::warn!(
                preset_exercises = preset.len(),
                scheme_slots = self.len(),
                "preset exercise count differs from configured slots; extra entries ignored"
            );
        }
        for ((_, slot), (_, preset_ex)) in self.exercises.iter_mut().zip(preset.exercises.iter()) {
            slot.total_points = preset_ex.total_points;
            slot.question_points = preset_ex.question_points.clone();
            slot.question_competences = preset_ex.question_competences.clone();
            slot.question_competence_points = preset_ex.question_competence_points.clone();
        }
    }
}

impl Serialize for ScoringScheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.exercises.len()))?;
        for (id, ex) in &self.exercises {
            map.serialize_entry(id, ex)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScoringScheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SchemeVisitor;

        impl<'de> Visitor<'de> for SchemeVisitor {
            type Value = ScoringScheme;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of exercise id to exercise scheme")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut scheme = ScoringScheme::new();
                while let Some((id, ex)) = access.next_entry::<String, ExerciseScheme>()? {
                    scheme.insert(id, ex);
                }
                Ok(scheme)
            }
        }

        deserializer.deserialize_map(SchemeVisitor)
    }
}

/// A named, shareable barème: the unit exported/imported as a subject pack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemePreset {
    pub name: String,
    /// Grand total the exam is graded out of (informational; the exercise
    /// totals are authoritative).
    #[serde(default = "default_total_max", rename = "totalMax")]
    pub total_max: f64,
    pub exercises: ScoringScheme,
}

fn default_total_max() -> f64 {
    20.0
}

/// Canonical competency key: the substring before the first space.
///
/// Applied uniformly at every ingestion point so that near-duplicate labels
/// ("Calculer" / "Calculer (fractions)") merge into one competency.
pub fn canonical_competency_key(name: &str) -> &str {
    name.split(' ').next().unwrap_or(name)
}

fn exercise(
    total: f64,
    questions: &[(&str, f64, &[(&str, f64)])],
) -> ExerciseScheme {
    let mut ex = ExerciseScheme {
        total_points: total,
        ..ExerciseScheme::default()
    };
    for (q, points, comps) in questions {
        ex.question_points.insert((*q).to_string(), *points);
        ex.question_competences.insert(
            (*q).to_string(),
            comps.iter().map(|(c, _)| (*c).to_string()).collect(),
        );
        ex.question_competence_points.insert(
            (*q).to_string(),
            comps
                .iter()
                .map(|(c, p)| ((*c).to_string(), *p))
                .collect(),
        );
    }
    ex
}

/// The embedded default barème (five exercises, 6/4/3/4/3 points), applied
/// whenever no configured scheme carries competency allocations.
pub fn default_scheme() -> &'static ScoringScheme {
    static DEFAULT: OnceLock<ScoringScheme> = OnceLock::new();
    DEFAULT.get_or_init(|| {
        let mut scheme = ScoringScheme::new();
        scheme.insert(
            "1",
            exercise(
                6.0,
                &[
                    ("q0", 2.5, &[("Modéliser", 1.0), ("Calculer", 1.5)]),
                    ("q1", 2.5, &[("Modéliser", 1.0), ("Calculer", 1.5)]),
                    ("q2", 1.0, &[("Calculer", 1.0)]),
                ],
            ),
        );
        scheme.insert(
            "2",
            exercise(
                4.0,
                &[
                    ("q0", 1.0, &[("Chercher", 1.0)]),
                    ("q1", 0.5, &[("Chercher", 0.5)]),
                    ("q2", 0.5, &[("Chercher", 0.5)]),
                    ("q3", 1.0, &[("Raisonner", 1.0)]),
                    ("q4", 1.0, &[("Raisonner", 1.0)]),
                ],
            ),
        );
        scheme.insert(
            "3",
            exercise(
                3.0,
                &[
                    ("q0", 1.5, &[("Calculer", 1.0), ("Chercher", 0.5)]),
                    ("q1", 1.5, &[("Calculer", 1.0), ("Chercher", 0.5)]),
                ],
            ),
        );
        scheme.insert(
            "4",
            exercise(
                4.0,
                &[
                    ("q0", 1.0, &[("Modéliser", 1.0)]),
                    ("q1", 1.0, &[("Modéliser", 1.0)]),
                    ("q2", 1.0, &[("Modéliser", 1.0)]),
                    ("q3", 1.0, &[("Modéliser", 1.0)]),
                ],
            ),
        );
        scheme.insert(
            "5",
            exercise(
                3.0,
                &[
                    ("q0", 1.0, &[("Chercher", 1.0)]),
                    ("q1", 2.0, &[("Communiquer", 2.0)]),
                ],
            ),
        );
        scheme
    })
}

/// The scheme driving the competency maxima pass: the configured scheme when
/// it carries competency allocations, the embedded default otherwise.
pub fn effective_scheme(configured: &ScoringScheme) -> &ScoringScheme {
    if configured.has_competency_points() {
        configured
    } else {
        default_scheme()
    }
}

//! Input file parsing: score exports, rosters, and barème files.
//!
//! Import is deliberately forgiving. Score exports come from an autosaving
//! web form and rosters from whatever the administration's spreadsheet
//! produces this year, so unknown fields are ignored, malformed candidates
//! are skipped with a warning, and header labels are matched fuzzily. The
//! only hard failures are files whose overall shape is unrecognizable.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::BilanError;
use crate::model::{CandidateScores, ScoreStore, Student};
use crate::scheme::{SchemePreset, ScoringScheme};
use crate::text::normalize_header;

/// Scores and comments recovered from one export file.
#[derive(Debug, Clone, Default)]
pub struct ScoreImport {
    pub scores: ScoreStore,
    pub comments: BTreeMap<String, String>,
}

/// Parse a score export. Two shapes are accepted: a full application dump
/// (`{"appState": {"scores": ..., "candidateComments": ...}}`) and a bare
/// payload (`{"scores": ..., "candidateComments": ...}`).
pub fn parse_score_export(content: &str) -> Result<ScoreImport> {
    let value: Value = serde_json::from_str(content).context("score file is not valid JSON")?;

    let root = match value.get("appState") {
        Some(Value::Object(_)) => &value["appState"],
        _ => &value,
    };
    let Some(Value::Object(scores)) = root.get("scores") else {
        return Err(BilanError::UnrecognizedScoreFormat.into());
    };

    let mut import = ScoreImport::default();
    for (numero, candidate) in scores {
        match serde_json::from_value::<CandidateScores>(candidate.clone()) {
            Ok(parsed) => {
                import.scores.insert(numero.clone(), parsed);
            }
            Err(err) => {
                tracing::warn!(numero = %numero, %err, "skipping malformed candidate entry");
            }
        }
    }

    if let Some(Value::Object(comments)) = root.get("candidateComments") {
        for (numero, comment) in comments {
            if let Value::String(text) = comment {
                if !text.trim().is_empty() {
                    import.comments.insert(numero.clone(), text.clone());
                }
            }
        }
    }

    Ok(import)
}

/// Load and parse a score export file.
pub fn load_score_export(path: &Path) -> Result<ScoreImport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read score file {}", path.display()))?;
    parse_score_export(&content).with_context(|| format!("in score file {}", path.display()))
}

/// Header labels accepted for each roster column, in normalized form.
/// Matching is exact first, then substring.
const NUMERO_HEADERS: &[&str] = &["n ° candidat", "n° candidat", "numero", "n°", "num", "no", "candidat"];
const NOM_HEADERS: &[&str] = &["nom"];
const PRENOM_HEADERS: &[&str] = &["prenom"];
const CLASSE_HEADERS: &[&str] = &["classe", "class", "division", "groupe"];

fn find_column(headers: &[String], accepted: &[&str]) -> Option<usize> {
    for candidate in accepted {
        if let Some(i) = headers.iter().position(|h| h == candidate) {
            return Some(i);
        }
    }
    for candidate in accepted {
        if let Some(i) = headers.iter().position(|h| h.contains(candidate)) {
            return Some(i);
        }
    }
    None
}

/// Parse a roster CSV. The delimiter (`;` or `,`) is sniffed from the header
/// line; French exports overwhelmingly use semicolons.
///
/// `numero`, `nom`, and `prenom` columns are required. `classe` is optional;
/// students without one get "Non attribué". Rows lacking a name are skipped.
pub fn parse_roster(content: &str) -> Result<Vec<Student>> {
    let first_line = content.lines().next().unwrap_or_default();
    let delimiter = if first_line.matches(';').count() >= first_line.matches(',').count() {
        b';'
    } else {
        b','
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("roster has no header row")?
        .iter()
        .map(normalize_header)
        .collect();

    let numero_col = find_column(&headers, NUMERO_HEADERS);
    let nom_col = find_column(&headers, NOM_HEADERS);
    let prenom_col = find_column(&headers, PRENOM_HEADERS);
    let classe_col = find_column(&headers, CLASSE_HEADERS);

    let mut missing = Vec::new();
    if numero_col.is_none() {
        missing.push("numéro");
    }
    if nom_col.is_none() {
        missing.push("nom");
    }
    if prenom_col.is_none() {
        missing.push("prénom");
    }
    if !missing.is_empty() {
        return Err(BilanError::MissingRosterColumns(missing.join(", ")).into());
    }
    let (numero_col, nom_col, prenom_col) = (
        numero_col.unwrap_or_default(),
        nom_col.unwrap_or_default(),
        prenom_col.unwrap_or_default(),
    );

    let mut students = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to read roster row")?;
        let field = |i: usize| record.get(i).unwrap_or_default().trim().to_string();

        let nom = field(nom_col);
        let prenom = field(prenom_col);
        if nom.is_empty() && prenom.is_empty() {
            continue;
        }
        let classe = match classe_col {
            Some(i) if !field(i).is_empty() => field(i),
            _ => "Non attribué".to_string(),
        };
        students.push(Student {
            numero: field(numero_col),
            nom,
            prenom,
            classe,
        });
    }
    Ok(students)
}

/// Load and parse a roster CSV file.
pub fn load_roster(path: &Path) -> Result<Vec<Student>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file {}", path.display()))?;
    parse_roster(&content).with_context(|| format!("in roster file {}", path.display()))
}

/// Load a barème file, `.json` or `.toml`. Both the full preset shape
/// (`{name, totalMax, exercises}`) and a bare exercise map are accepted; a
/// bare map becomes a preset named after the file.
pub fn load_scheme(path: &Path) -> Result<SchemePreset> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scheme file {}", path.display()))?;

    let fallback_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("barème")
        .to_string();

    let preset = match extension.as_str() {
        "json" => match serde_json::from_str::<SchemePreset>(&content) {
            Ok(preset) => preset,
            Err(_) => {
                let exercises: ScoringScheme = serde_json::from_str(&content)
                    .with_context(|| format!("failed to parse scheme file {}", path.display()))?;
                bare_preset(fallback_name, exercises)
            }
        },
        "toml" => match toml::from_str::<SchemePreset>(&content) {
            Ok(preset) => preset,
            Err(_) => {
                let exercises: ScoringScheme = toml::from_str(&content)
                    .with_context(|| format!("failed to parse scheme file {}", path.display()))?;
                bare_preset(fallback_name, exercises)
            }
        },
        other => return Err(BilanError::UnsupportedSchemeFormat(other.to_string()).into()),
    };
    Ok(preset)
}

fn bare_preset(name: String, exercises: ScoringScheme) -> SchemePreset {
    SchemePreset {
        name,
        total_max: 20.0,
        exercises,
    }
}

/// A warning from barème validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The exercise id (if applicable).
    pub exercise: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a barème for common issues. Warnings never block an import; a
/// teacher mid-correction is better served by a note than by a refusal.
pub fn validate_preset(preset: &SchemePreset) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if preset.exercises.is_empty() {
        warnings.push(ValidationWarning {
            exercise: None,
            message: "barème contains no exercises".into(),
        });
        return warnings;
    }

    let grand_total: f64 = preset.exercises.iter().map(|(_, e)| e.total_points).sum();
    if (grand_total - preset.total_max).abs() > 0.001 {
        warnings.push(ValidationWarning {
            exercise: None,
            message: format!(
                "exercise totals sum to {grand_total} but totalMax is {}",
                preset.total_max
            ),
        });
    }

    for (id, exercise) in preset.exercises.iter() {
        if !exercise.question_points.is_empty() {
            let question_sum: f64 = exercise.question_points.values().sum();
            if (question_sum - exercise.total_points).abs() > 0.001 {
                warnings.push(ValidationWarning {
                    exercise: Some(id.to_string()),
                    message: format!(
                        "question points sum to {question_sum} but totalPoints is {}",
                        exercise.total_points
                    ),
                });
            }
        }

        for (question, competences) in &exercise.question_competences {
            let allocated = exercise.question_competence_points.get(question);
            for competence in competences {
                if !allocated.is_some_and(|points| points.contains_key(competence)) {
                    warnings.push(ValidationWarning {
                        exercise: Some(id.to_string()),
                        message: format!(
                            "question {question} lists competency \"{competence}\" without a point allocation"
                        ),
                    });
                }
            }
        }
    }

    warnings
}

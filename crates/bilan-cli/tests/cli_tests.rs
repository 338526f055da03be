//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bilan() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("bilan").unwrap()
}

const SCORES_JSON: &str = r#"{
    "scores": {
        "7": {
            "1": {
                "q0": {"score": 4.0, "competences": {"Calculer": 2.0}}
            }
        },
        "12": {
            "1": {
                "q0": {"score": 5.5},
                "q1": {"score": 6.5}
            }
        }
    },
    "candidateComments": {
        "7": "Des progrès à faire"
    }
}"#;

const ROSTER_CSV: &str = "N° Candidat;Nom;Prénom;Classe\n7;Durand;Zoé;3A\n12;Martin;Léo;3B\n";

fn fixtures() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let scores = dir.path().join("scores.json");
    let roster = dir.path().join("roster.csv");
    std::fs::write(&scores, SCORES_JSON).unwrap();
    std::fs::write(&roster, ROSTER_CSV).unwrap();
    (dir, scores, roster)
}

#[test]
fn stats_prints_cohort_summary() {
    let (_dir, scores, roster) = fixtures();
    bilan()
        .arg("stats")
        .arg("--scores")
        .arg(&scores)
        .arg("--roster")
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 candidat(s) corrigé(s)"))
        .stdout(predicate::str::contains("Moyenne"))
        .stdout(predicate::str::contains("Plan d'action"))
        // Both candidates sit above 70% on exercise "1"; the untouched
        // default-scheme exercises land in the urgent tier.
        .stdout(predicate::str::contains("Points forts").and(predicate::str::contains("exercice 1")))
        .stdout(predicate::str::contains(
            "exercice 2, exercice 3, exercice 4, exercice 5",
        ))
        .stdout(predicate::str::contains(
            "Meilleure note : Léo Martin (3B) avec 12.0/20",
        ));
}

#[test]
fn stats_without_roster_uses_placeholders() {
    let (_dir, scores, _) = fixtures();
    bilan()
        .arg("stats")
        .arg("--scores")
        .arg(&scores)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 candidat(s) corrigé(s)"))
        .stdout(predicate::str::contains("Candidat"));
}

#[test]
fn stats_class_filter() {
    let (_dir, scores, roster) = fixtures();
    bilan()
        .arg("stats")
        .arg("--scores")
        .arg(&scores)
        .arg("--roster")
        .arg(&roster)
        .arg("--class")
        .arg("3A")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bilan - classe 3A"))
        .stdout(predicate::str::contains("1 candidat(s) corrigé(s)"));
}

#[test]
fn stats_rejects_misordered_thresholds() {
    let (_dir, scores, _) = fixtures();
    bilan()
        .arg("stats")
        .arg("--scores")
        .arg(&scores)
        .arg("--thresholds")
        .arg("5,10,15")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid mastery thresholds"));
}

#[test]
fn stats_surfaces_import_warnings_by_default() {
    let dir = TempDir::new().unwrap();
    let scores = dir.path().join("scores.json");
    std::fs::write(
        &scores,
        r#"{"scores": {"1": {"1": {"q0": {"score": 3}}}, "2": "corrupted"}}"#,
    )
    .unwrap();

    bilan()
        .arg("stats")
        .arg("--scores")
        .arg(&scores)
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::contains("skipping malformed candidate entry"))
        .stdout(predicate::str::contains("1 candidat(s) corrigé(s)"));
}

#[test]
fn stats_nonexistent_scores_file() {
    bilan()
        .arg("stats")
        .arg("--scores")
        .arg("/nonexistent/scores.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn students_lists_candidates_in_name_order() {
    let (_dir, scores, roster) = fixtures();
    bilan()
        .arg("students")
        .arg("--scores")
        .arg(&scores)
        .arg("--roster")
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("Durand"))
        .stdout(predicate::str::contains("Martin"))
        .stdout(predicate::str::contains("2 candidat(s)"));
}

#[test]
fn student_prints_slip_with_comment() {
    let (_dir, scores, roster) = fixtures();
    bilan()
        .arg("student")
        .arg("7")
        .arg("--scores")
        .arg(&scores)
        .arg("--roster")
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("Zoé Durand"))
        .stdout(predicate::str::contains("Note : 4.0/20"))
        .stdout(predicate::str::contains("Maîtrise insuffisante"))
        .stdout(predicate::str::contains("Appréciation : Des progrès à faire"));
}

#[test]
fn student_unknown_candidate_fails() {
    let (_dir, scores, _) = fixtures();
    bilan()
        .arg("student")
        .arg("99")
        .arg("--scores")
        .arg(&scores)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no scores found for candidate 99"));
}

#[test]
fn export_markdown() {
    let (dir, scores, roster) = fixtures();
    let output = dir.path().join("bilan.md");
    bilan()
        .arg("export")
        .arg("--scores")
        .arg(&scores)
        .arg("--roster")
        .arg(&roster)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported report for 2 candidate(s)"));

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("# Bilan de correction"));
    assert!(content.contains("Durand"));
}

#[test]
fn export_csv() {
    let (dir, scores, roster) = fixtures();
    let output = dir.path().join("resultats.csv");
    bilan()
        .arg("export")
        .arg("--scores")
        .arg(&scores)
        .arg("--roster")
        .arg(&roster)
        .arg("--format")
        .arg("csv")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("Numéro;Nom;Prénom;Classe;Note;Niveau"));
}

#[test]
fn export_json_roundtrips() {
    let (dir, scores, _) = fixtures();
    let output = dir.path().join("report.json");
    bilan()
        .arg("export")
        .arg("--scores")
        .arg(&scores)
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("\"student_count\": 2"));
}

#[test]
fn export_unknown_format() {
    let (dir, scores, _) = fixtures();
    bilan()
        .arg("export")
        .arg("--scores")
        .arg(&scores)
        .arg("--format")
        .arg("pdf")
        .arg("--output")
        .arg(dir.path().join("out.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format"));
}

#[test]
fn validate_clean_scheme() {
    let dir = TempDir::new().unwrap();
    let scheme = dir.path().join("bareme.json");
    std::fs::write(
        &scheme,
        r#"{
            "name": "DNB Blanc n°2",
            "totalMax": 6,
            "exercises": {
                "1": {
                    "totalPoints": 6,
                    "questionPoints": {"q0": 4, "q1": 2},
                    "questionCompetences": {"q0": ["Chercher"]},
                    "questionCompetencePoints": {"q0": {"Chercher": 4}}
                }
            }
        }"#,
    )
    .unwrap();

    bilan()
        .arg("validate")
        .arg("--scheme")
        .arg(&scheme)
        .assert()
        .success()
        .stdout(predicate::str::contains("DNB Blanc n°2"))
        .stdout(predicate::str::contains("Barème valide."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let scheme = dir.path().join("bareme.json");
    std::fs::write(
        &scheme,
        r#"{
            "name": "Cassé",
            "totalMax": 20,
            "exercises": {
                "1": {"totalPoints": 6, "questionPoints": {"q0": 2}}
            }
        }"#,
    )
    .unwrap();

    bilan()
        .arg("validate")
        .arg("--scheme")
        .arg(&scheme)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let scheme = dir.path().join("bareme.yaml");
    std::fs::write(&scheme, "exercises: {}").unwrap();

    bilan()
        .arg("validate")
        .arg("--scheme")
        .arg(&scheme)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported scheme file extension"));
}

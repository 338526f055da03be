//! Markdown rendering of class and student reports.

use std::path::Path;

use anyhow::Result;
use bilan_core::model::MasteryLevel;
use bilan_core::report::{format_note, ClassReport, StudentReport};

/// Mastery levels in display order, best first.
const DISPLAY_LEVELS: [MasteryLevel; 4] = [
    MasteryLevel::TBM,
    MasteryLevel::MS,
    MasteryLevel::MF,
    MasteryLevel::MI,
];

/// Render the cohort synthesis as a Markdown document.
pub fn generate_markdown(report: &ClassReport) -> String {
    let mut md = String::new();

    match &report.class {
        Some(class) => md.push_str(&format!("# Bilan de correction - {class}\n\n")),
        None => md.push_str("# Bilan de correction\n\n"),
    }
    md.push_str(&format!(
        "*Généré le {}*\n\n",
        report.created_at.format("%d/%m/%Y")
    ));

    md.push_str("## Synthèse\n\n");
    md.push_str("| Candidats | Moyenne | Médiane | Q1 | Q3 | Min | Max |\n");
    md.push_str("|---|---|---|---|---|---|---|\n");
    match &report.summary {
        Some(s) => md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n\n",
            s.count,
            format_note(s.mean),
            format_note(s.median),
            format_note(s.q1),
            format_note(s.q3),
            format_note(s.min),
            format_note(s.max),
        )),
        None => md.push_str("| 0 | -- | -- | -- | -- | -- | -- |\n\n"),
    }

    md.push_str("## Niveaux de maîtrise\n\n");
    md.push_str("| Niveau | Effectif |\n|---|---|\n");
    for level in DISPLAY_LEVELS {
        let count = report.mastery.get(&level).copied().unwrap_or(0);
        md.push_str(&format!("| {} | {count} |\n", level.label()));
    }
    md.push('\n');

    md.push_str("## Répartition des notes\n\n");
    md.push_str("| Tranche | Effectif |\n|---|---|\n");
    for bucket in &report.distribution {
        md.push_str(&format!(
            "| {} - {} | {} |\n",
            format_note(bucket.lower),
            format_note(bucket.upper),
            bucket.count
        ));
    }
    md.push('\n');

    md.push_str("## Résultats par exercice\n\n");
    md.push_str("| Exercice | Moyenne | Barème | Réussite | Effectif |\n|---|---|---|---|---|\n");
    for ex in &report.exercises {
        md.push_str(&format!(
            "| {} | {} | {} | {}% | {} |\n",
            ex.exercise,
            format_note(ex.mean),
            format_note(ex.max),
            ex.success_rate,
            ex.count
        ));
    }
    md.push('\n');

    md.push_str("## Résultats par compétence\n\n");
    md.push_str("| Compétence | Points | Maximum | Réussite | Effectif |\n|---|---|---|---|---|\n");
    for comp in &report.competencies {
        md.push_str(&format!(
            "| {} | {} | {} | {}% | {} |\n",
            comp.competency,
            format_note(comp.earned),
            format_note(comp.max),
            comp.success_rate,
            comp.count
        ));
    }
    md.push('\n');

    md.push_str("## Plan d'action\n\n");
    push_plan_section(&mut md, "À retravailler en priorité", &report.recommendations.urgent);
    push_plan_section(&mut md, "À renforcer", &report.recommendations.priority);
    push_plan_section(&mut md, "Points forts", &report.recommendations.strengths);

    if let Some(champion) = &report.champion {
        md.push_str("## Meilleure note\n\n");
        md.push_str(&format!(
            "{} {} ({}) : {}/20\n\n",
            champion.prenom,
            champion.nom,
            champion.classe,
            format_note(champion.note)
        ));
    }

    md.push_str("## Résultats individuels\n\n");
    md.push_str("| N° | Nom | Prénom | Classe | Note | Niveau |\n|---|---|---|---|---|---|\n");
    for row in &report.results {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            row.numero,
            row.nom,
            row.prenom,
            row.classe,
            format_note(row.note),
            row.niveau
        ));
    }

    md
}

fn push_plan_section(md: &mut String, title: &str, exercises: &[String]) {
    md.push_str(&format!("**{title}** : "));
    if exercises.is_empty() {
        md.push_str("aucun\n\n");
    } else {
        let labels: Vec<String> = exercises.iter().map(|id| format!("exercice {id}")).collect();
        md.push_str(&labels.join(", "));
        md.push_str("\n\n");
    }
}

/// Render one candidate's slip as Markdown.
pub fn generate_student_markdown(report: &StudentReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {} {}\n\n", report.prenom, report.nom));
    md.push_str(&format!(
        "Candidat n°{} - {}\n\n",
        report.numero, report.classe
    ));
    md.push_str(&format!(
        "**Note : {}/20** ({})\n\n",
        format_note(report.note),
        report.niveau.label()
    ));

    md.push_str("## Par exercice\n\n");
    md.push_str("| Exercice | Points | Barème |\n|---|---|---|\n");
    for ex in &report.exercises {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            ex.exercise,
            format_note(ex.score),
            format_note(ex.max)
        ));
    }
    md.push('\n');

    md.push_str("## Par compétence\n\n");
    md.push_str("| Compétence | Points | Maximum | Réussite | Niveau |\n|---|---|---|---|---|\n");
    for comp in &report.competencies {
        md.push_str(&format!(
            "| {} | {} | {} | {}% | {} |\n",
            comp.competency,
            format_note(comp.score),
            format_note(comp.max),
            comp.percent,
            comp.niveau
        ));
    }
    md.push('\n');

    if let Some(comment) = &report.comment {
        md.push_str("## Appréciation\n\n");
        md.push_str(comment);
        md.push('\n');
    }

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(report: &ClassReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)?;
    Ok(())
}

//! The `bilan stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use bilan_core::report::{format_note, ClassReport};

pub fn execute(
    scores: PathBuf,
    roster: Option<PathBuf>,
    scheme: Option<PathBuf>,
    thresholds: String,
    class: Option<String>,
) -> Result<()> {
    let session = super::load_session(&scores, roster, scheme, &thresholds, class)?;
    let report = ClassReport::build(&session);

    match &report.class {
        Some(class) => println!("Bilan - classe {class}"),
        None => println!("Bilan - toutes classes"),
    }
    println!("{} candidat(s) corrigé(s)\n", report.student_count);

    print_summary(&report);
    print_mastery(&report);
    print_exercises(&report);
    print_competencies(&report);
    print_plan(&report);

    if let Some(champion) = &report.champion {
        println!(
            "\nMeilleure note : {} {} ({}) avec {}/20",
            champion.prenom,
            champion.nom,
            champion.classe,
            format_note(champion.note)
        );
    }

    Ok(())
}

fn print_summary(report: &ClassReport) {
    let mut table = Table::new();
    table.set_header(vec![
        "Effectif", "Moyenne", "Médiane", "Q1", "Q3", "Min", "Max",
    ]);
    match &report.summary {
        Some(s) => {
            table.add_row(vec![
                Cell::new(s.count),
                Cell::new(format_note(s.mean)),
                Cell::new(format_note(s.median)),
                Cell::new(format_note(s.q1)),
                Cell::new(format_note(s.q3)),
                Cell::new(format_note(s.min)),
                Cell::new(format_note(s.max)),
            ]);
        }
        None => {
            table.add_row(vec!["0", "--", "--", "--", "--", "--", "--"]);
        }
    }
    println!("{table}\n");
}

fn print_mastery(report: &ClassReport) {
    use bilan_core::model::MasteryLevel;

    let mut table = Table::new();
    table.set_header(vec!["Niveau", "Effectif"]);
    for level in [
        MasteryLevel::TBM,
        MasteryLevel::MS,
        MasteryLevel::MF,
        MasteryLevel::MI,
    ] {
        table.add_row(vec![
            Cell::new(level.label()),
            Cell::new(report.mastery.get(&level).copied().unwrap_or(0)),
        ]);
    }
    println!("{table}\n");
}

fn print_exercises(report: &ClassReport) {
    let mut table = Table::new();
    table.set_header(vec!["Exercice", "Moyenne", "Barème", "Réussite", "Effectif"]);
    for ex in &report.exercises {
        table.add_row(vec![
            Cell::new(&ex.exercise),
            Cell::new(format_note(ex.mean)),
            Cell::new(format_note(ex.max)),
            Cell::new(format!("{}%", ex.success_rate)),
            Cell::new(ex.count),
        ]);
    }
    println!("{table}\n");
}

fn print_competencies(report: &ClassReport) {
    let mut table = Table::new();
    table.set_header(vec![
        "Compétence",
        "Points",
        "Maximum",
        "Réussite",
        "Effectif",
    ]);
    for comp in &report.competencies {
        table.add_row(vec![
            Cell::new(&comp.competency),
            Cell::new(format_note(comp.earned)),
            Cell::new(format_note(comp.max)),
            Cell::new(format!("{}%", comp.success_rate)),
            Cell::new(comp.count),
        ]);
    }
    println!("{table}\n");
}

fn print_plan(report: &ClassReport) {
    let plan = &report.recommendations;
    println!("Plan d'action :");
    println!("  À retravailler en priorité : {}", join_or_none(&plan.urgent));
    println!("  À renforcer                : {}", join_or_none(&plan.priority));
    println!("  Points forts               : {}", join_or_none(&plan.strengths));
}

fn join_or_none(exercises: &[String]) -> String {
    if exercises.is_empty() {
        "aucun".to_string()
    } else {
        let labels: Vec<String> = exercises.iter().map(|id| format!("exercice {id}")).collect();
        labels.join(", ")
    }
}

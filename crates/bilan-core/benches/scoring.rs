use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bilan_core::model::{CandidateScores, QuestionScore, Student};
use bilan_core::report::ClassReport;
use bilan_core::session::GradingSession;
use bilan_core::statistics::{cohort_summary, score_distribution};

fn make_session(candidates: usize) -> GradingSession {
    let mut session = GradingSession::new();
    for n in 1..=candidates {
        let numero = n.to_string();
        session.roster.push(Student {
            numero: numero.clone(),
            nom: format!("Nom{n}"),
            prenom: format!("Prenom{n}"),
            classe: if n % 2 == 0 { "3A".into() } else { "3B".into() },
        });

        let mut scores = CandidateScores::new();
        for exercise in 1..=5 {
            let questions = (0..4)
                .map(|q| {
                    (
                        format!("q{q}"),
                        QuestionScore {
                            score: ((n + q) % 3) as f64 * 0.5,
                            competences: Some(
                                [("Calculer".to_string(), 0.5)].into_iter().collect(),
                            ),
                        },
                    )
                })
                .collect();
            scores.insert(exercise.to_string(), questions);
        }
        session.scores.insert(numero, scores);
    }
    session
}

fn bench_corrected_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("corrected_candidates");

    for size in [30, 120, 500] {
        let session = make_session(size);
        group.bench_function(format!("{size}_candidates"), |b| {
            b.iter(|| black_box(&session).corrected_candidates())
        });
    }

    group.finish();
}

fn bench_cohort_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("cohort_statistics");

    let session = make_session(120);
    let cohort = session.corrected_candidates();

    group.bench_function("summary", |b| b.iter(|| cohort_summary(black_box(&cohort))));

    group.bench_function("distribution", |b| {
        b.iter(|| score_distribution(black_box(&cohort), black_box(5.0)))
    });

    group.finish();
}

fn bench_class_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("class_report");
    group.sample_size(20);

    for size in [30, 120] {
        let session = make_session(size);
        group.bench_function(format!("{size}_candidates"), |b| {
            b.iter(|| ClassReport::build(black_box(&session)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_corrected_candidates,
    bench_cohort_statistics,
    bench_class_report
);
criterion_main!(benches);

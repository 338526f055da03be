//! bilan CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bilan", version, about = "Exam score aggregation and class reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cohort statistics: summary, exercises, competencies, action plan
    Stats {
        /// Score export JSON
        #[arg(long)]
        scores: PathBuf,

        /// Roster CSV (optional; candidates keep placeholder identities without it)
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Barème file, .json or .toml
        #[arg(long)]
        scheme: Option<PathBuf>,

        /// Mastery cutoffs "tbm,ms,mf"
        #[arg(long, default_value = "15,10,5")]
        thresholds: String,

        /// Restrict to one class
        #[arg(long)]
        class: Option<String>,
    },

    /// List every corrected candidate
    Students {
        /// Score export JSON
        #[arg(long)]
        scores: PathBuf,

        /// Roster CSV
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Barème file, .json or .toml
        #[arg(long)]
        scheme: Option<PathBuf>,

        /// Mastery cutoffs "tbm,ms,mf"
        #[arg(long, default_value = "15,10,5")]
        thresholds: String,

        /// Restrict to one class
        #[arg(long)]
        class: Option<String>,
    },

    /// Individual result slip for one candidate
    Student {
        /// Candidate number
        numero: String,

        /// Score export JSON
        #[arg(long)]
        scores: PathBuf,

        /// Roster CSV
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Barème file, .json or .toml
        #[arg(long)]
        scheme: Option<PathBuf>,

        /// Mastery cutoffs "tbm,ms,mf"
        #[arg(long, default_value = "15,10,5")]
        thresholds: String,
    },

    /// Export the class report to a file
    Export {
        /// Score export JSON
        #[arg(long)]
        scores: PathBuf,

        /// Roster CSV
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Barème file, .json or .toml
        #[arg(long)]
        scheme: Option<PathBuf>,

        /// Mastery cutoffs "tbm,ms,mf"
        #[arg(long, default_value = "15,10,5")]
        thresholds: String,

        /// Restrict to one class
        #[arg(long)]
        class: Option<String>,

        /// Output format: markdown, csv, json
        #[arg(long, default_value = "markdown")]
        format: String,

        /// Output file path
        #[arg(long)]
        output: PathBuf,
    },

    /// Validate a barème file
    Validate {
        /// Barème file, .json or .toml
        #[arg(long)]
        scheme: PathBuf,
    },
}

fn main() {
    // Targets follow the crate names, so each library needs its own directive.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bilan_core=info".parse().unwrap())
                .add_directive("bilan_report=info".parse().unwrap())
                .add_directive("bilan_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Stats {
            scores,
            roster,
            scheme,
            thresholds,
            class,
        } => commands::stats::execute(scores, roster, scheme, thresholds, class),
        Commands::Students {
            scores,
            roster,
            scheme,
            thresholds,
            class,
        } => commands::students::execute(scores, roster, scheme, thresholds, class),
        Commands::Student {
            numero,
            scores,
            roster,
            scheme,
            thresholds,
        } => commands::student::execute(numero, scores, roster, scheme, thresholds),
        Commands::Export {
            scores,
            roster,
            scheme,
            thresholds,
            class,
            format,
            output,
        } => commands::export::execute(scores, roster, scheme, thresholds, class, format, output),
        Commands::Validate { scheme } => commands::validate::execute(scheme),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

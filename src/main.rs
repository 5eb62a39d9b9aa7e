use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ahp_calculator::adapters::{AhpProblem, ProblemError, ProblemFormat};
use ahp_calculator::application::PerformAhpAnalysisHandler;
use ahp_calculator::config::AppConfig;
use ahp_calculator::domain::analysis::{AhpAnalysisReport, ConsistencyMethod, ValidationMode};
use ahp_calculator::domain::foundation::DomainError;
use ahp_calculator::logging::init_tracing;

/// AHP Calculator - priority weights from pairwise comparisons
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML, YAML or JSON); environment variables override it
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute weights for a problem file
    Analyze {
        /// Problem file (.json, .yaml or .yml)
        problem: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Compute a consistency ratio for every matrix
        #[arg(long)]
        consistency: bool,

        /// Let zero-sum columns and mismatched labels through
        #[arg(long)]
        lenient: bool,

        /// Use the mean-weight consistency formula
        #[arg(long)]
        legacy_consistency: bool,
    },

    /// Print a problem file with all-ones matrices
    Template {
        /// Names of alternatives (comma separated)
        #[arg(long, default_value = "A,B,C,D")]
        alternatives: String,

        /// Criteria (comma separated)
        #[arg(long, default_value = "Price,Distance,Air Quality")]
        criteria: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

impl From<OutputFormat> for ProblemFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ProblemFormat::Json,
            OutputFormat::Yaml => ProblemFormat::Yaml,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load()?,
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    config.validate()?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Analyze {
            problem,
            json,
            consistency,
            lenient,
            legacy_consistency,
        } => {
            let mut settings = config.analysis.settings();
            if lenient {
                settings.validation = ValidationMode::Lenient;
            }
            if legacy_consistency {
                settings.consistency_method = ConsistencyMethod::Legacy;
            }

            let loaded = AhpProblem::load(&problem)
                .map_err(coded)
                .with_context(|| format!("Could not load {}", problem.display()))?;
            let report = PerformAhpAnalysisHandler::new(settings)
                .handle(loaded.into_command(consistency))
                .map_err(DomainError::from)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Template {
            alternatives,
            criteria,
            format,
        } => {
            let template = AhpProblem::from_names(&alternatives, &criteria).map_err(coded)?;
            println!("{}", template.render(format.into())?);
        }
    }

    Ok(())
}

/// Validation failures surface with their error code; I/O and parse errors pass through.
fn coded(err: ProblemError) -> anyhow::Error {
    match err {
        ProblemError::Validation(err) => DomainError::from(err).into(),
        other => other.into(),
    }
}

fn print_report(report: &AhpAnalysisReport) {
    let width = report
        .alternatives
        .iter()
        .chain(&report.criteria)
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max(8);

    println!("Weights");
    print!("{:width$}", "", width = width);
    for criterion in &report.criteria {
        print!("  {:>width$}", criterion, width = width);
    }
    println!();
    for alternative in &report.alternatives {
        print!("{:width$}", alternative, width = width);
        for criterion in &report.criteria {
            let value = report.weight_table.value(alternative, criterion).unwrap_or(f64::NAN);
            print!("  {:>width$.4}", value, width = width);
        }
        println!();
    }

    println!();
    println!("Criterion Weights");
    for (criterion, weight) in report.criterion_weights.iter() {
        println!("{:width$}  {:.4}", criterion, weight, width = width);
    }

    println!();
    println!("Final Weights");
    for ranked in &report.ranking {
        println!(
            "{:>2}. {:width$}  {:.4}",
            ranked.rank,
            ranked.alternative,
            ranked.score,
            width = width
        );
    }

    match report.best_alternative() {
        Some(best) => println!("\nBest alternative: {}", best),
        None => println!("\nNo single best alternative"),
    }

    if let Some(checks) = &report.consistency {
        println!();
        println!("Consistency Ratios");
        for check in checks {
            let verdict = if check.acceptable { "ok" } else { "inconsistent" };
            println!(
                "{:width$}  {:.4}  {}",
                check.matrix,
                check.ratio,
                verdict,
                width = width
            );
        }
        let failing = report.inconsistent_matrices();
        if !failing.is_empty() {
            println!("Revise judgments for: {}", failing.join(", "));
        }
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use perfverdict::analysis::{analyse, compare, FittedModel};
use perfverdict::cli::{Cli, Command, OutputFormat};
use perfverdict::config::{AnalysisConfig, TestSuiteConfig, TestSuiteOptions};
use perfverdict::model::default_models;
use perfverdict::samples::{subtract_baseline, Sample};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read a JSON document from disk
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Validated suite file, when one was given
fn load_suite(suite: Option<&Path>) -> Result<Option<TestSuiteConfig>> {
    suite.map(TestSuiteConfig::from_file).transpose()
}

/// Analysis settings from a suite file, or the defaults
fn analysis_config(suite: Option<&TestSuiteConfig>) -> AnalysisConfig {
    suite
        .map(|suite| suite.analysis.clone())
        .unwrap_or_default()
}

/// Program name shown in comparison reports
fn program_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn run_validate(suite: &Path) -> Result<()> {
    let options = TestSuiteOptions::from_file(suite)?;

    match options.build() {
        Ok(config) => {
            println!("✅ {} is valid", suite.display());
            for (artifact, path) in config.analysis.outputs.requested() {
                println!("  {} -> {}", artifact, path.display());
            }
            Ok(())
        }
        Err(errors) => {
            eprintln!("❌ {} is invalid", suite.display());
            for error in errors.iter() {
                eprintln!("  - {}", error);
            }
            anyhow::bail!(
                "{} configuration error(s) in {}",
                errors.len(),
                suite.display()
            );
        }
    }
}

fn run_select(fits: &Path, suite: Option<&Path>, format: OutputFormat) -> Result<()> {
    let suite = load_suite(suite)?;
    let config = analysis_config(suite.as_ref());
    let fitted: Vec<FittedModel> = read_json(fits)?;

    let analysis = analyse(fitted.into_iter().map(Into::into).collect(), &config);

    match format {
        OutputFormat::Text => print!("{}", analysis.to_report_string()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
    }

    Ok(())
}

fn run_compare(
    first: &Path,
    second: &Path,
    suite_path: Option<&Path>,
    baseline: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let suite = load_suite(suite_path)?;
    let config = analysis_config(suite.as_ref());
    let mut first_samples: Vec<Sample> = read_json(first)?;
    let mut second_samples: Vec<Sample> = read_json(second)?;

    // Subtraction requires `baseline = true` when a suite is given
    if let (Some(path), Some(suite), Some(suite_path)) = (baseline, &suite, suite_path) {
        if !suite.baseline {
            anyhow::bail!(
                "--baseline {} conflicts with `baseline = false` in {}",
                path.display(),
                suite_path.display()
            );
        }
    }

    if let Some(path) = baseline {
        let baseline: Vec<Sample> = read_json(path)?;
        first_samples = subtract_baseline(&first_samples, &baseline);
        second_samples = subtract_baseline(&second_samples, &baseline);
    }

    let comparison = compare(&first_samples, &second_samples, &config);

    match format {
        OutputFormat::Text => print!(
            "{}",
            comparison.to_report_string(&program_label(first), &program_label(second))
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
    }

    Ok(())
}

fn run_models() {
    for model in default_models() {
        println!("{:<12} {}", model.name(), model.equation());
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match args.command {
        Command::Validate { suite } => run_validate(&suite),
        Command::Select {
            fits,
            config,
            format,
        } => run_select(&fits, config.as_deref(), format),
        Command::Compare {
            first,
            second,
            config,
            baseline,
            format,
        } => run_compare(
            &first,
            &second,
            config.as_deref(),
            baseline.as_deref(),
            format,
        ),
        Command::Models => {
            run_models();
            Ok(())
        }
    }
}

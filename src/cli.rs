//! CLI argument parsing for Perfverdict

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "perfverdict")]
#[command(version)]
#[command(about = "Complexity model selection and runtime improvement verdicts", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a test-suite file and report every configuration error
    Validate {
        /// Test-suite TOML file
        suite: PathBuf,
    },

    /// Rank fitted complexity models and report the approximated complexity
    Select {
        /// JSON array of fitted models: [{"model": ..., "stats": ...}]
        fits: PathBuf,

        /// Take analysis settings from this test-suite file
        #[arg(short, long, value_name = "SUITE")]
        config: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Compare two programs from their runtime samples
    Compare {
        /// JSON array of samples for the first program
        first: PathBuf,

        /// JSON array of samples for the second program
        second: PathBuf,

        /// Take analysis settings from this test-suite file
        #[arg(short, long, value_name = "SUITE")]
        config: Option<PathBuf>,

        /// Subtract baseline runtimes (JSON samples) from both programs;
        /// a suite given with --config must enable `baseline`
        #[arg(long, value_name = "SAMPLES")]
        baseline: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the default candidate models with their names and equations
    Models,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_validate() {
        let cli = Cli::parse_from(["perfverdict", "validate", "suite.toml"]);
        match cli.command {
            Command::Validate { suite } => assert_eq!(suite, PathBuf::from("suite.toml")),
            _ => panic!("Expected validate command"),
        }
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_select_defaults() {
        let cli = Cli::parse_from(["perfverdict", "select", "fits.json"]);
        match cli.command {
            Command::Select {
                fits,
                config,
                format,
            } => {
                assert_eq!(fits, PathBuf::from("fits.json"));
                assert!(config.is_none());
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("Expected select command"),
        }
    }

    #[test]
    fn test_cli_compare_with_options() {
        let cli = Cli::parse_from([
            "perfverdict",
            "--debug",
            "compare",
            "a.json",
            "b.json",
            "-c",
            "suite.toml",
            "--baseline",
            "empty.json",
            "--format",
            "json",
        ]);
        assert!(cli.debug);
        match cli.command {
            Command::Compare {
                first,
                second,
                config,
                baseline,
                format,
            } => {
                assert_eq!(first, PathBuf::from("a.json"));
                assert_eq!(second, PathBuf::from("b.json"));
                assert_eq!(config, Some(PathBuf::from("suite.toml")));
                assert_eq!(baseline, Some(PathBuf::from("empty.json")));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("Expected compare command"),
        }
    }

    #[test]
    fn test_cli_debug_after_subcommand() {
        let cli = Cli::parse_from(["perfverdict", "models", "--debug"]);
        assert!(cli.debug);
        assert!(matches!(cli.command, Command::Models));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["perfverdict"]).is_err());
    }
}

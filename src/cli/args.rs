//! Command-line argument parsing for WisdomPath
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::flow::FlowKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// WisdomPath - Drive assessment and onboarding flows from the terminal
#[derive(Parser, Debug)]
#[command(name = "wisdompath")]
#[command(version)]
#[command(about = "Replay WisdomPath assessment flows and inspect their results", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress everything except the result)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSON input script through a flow
    Run {
        /// Script file
        script: PathBuf,

        /// Flow to drive (overrides the script's own `flow`)
        #[arg(long, value_enum)]
        flow: Option<FlowKind>,
    },

    /// List the constitutional quiz questions
    Quiz,

    /// Rank raw dosha tokens
    Classify {
        /// Answer tokens (vata, pitta, kapha); others are ignored
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Print the interaction matrix for a JSON list of interventions
    Matrix {
        /// Interventions file
        interventions: PathBuf,
    },

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Parse a configured verbosity name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Default tracing filter directive
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }

    /// Check if should show progress lines and summaries
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show per-action detail
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_verbosity_quiet() {
        let args = parse(&["wisdompath", "-q", "quiz"]);
        assert_eq!(args.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&["wisdompath", "quiz"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["wisdompath", "-v", "quiz"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["wisdompath", "-vv", "quiz"]).verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_run_with_flow_override() {
        let args = parse(&["wisdompath", "run", "script.json", "--flow", "onboarding", "--json"]);
        assert!(args.json);
        match args.command {
            Commands::Run { script, flow } => {
                assert_eq!(script, PathBuf::from("script.json"));
                assert_eq!(flow, Some(FlowKind::Onboarding));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_classify_requires_tokens() {
        assert!(Args::try_parse_from(["wisdompath", "classify"]).is_err());
    }

    #[test]
    fn test_verbosity_names_round_trip() {
        for v in [Verbosity::Quiet, Verbosity::Normal, Verbosity::Verbose, Verbosity::VeryVerbose] {
            assert_eq!(Verbosity::from_name(v.as_str()), Some(v));
        }
        assert_eq!(Verbosity::from_name("loud"), None);
    }

    #[test]
    fn test_verbosity_methods() {
        assert!(!Verbosity::Quiet.show_progress());
        assert!(Verbosity::Normal.show_progress());
        assert!(!Verbosity::Normal.show_events());
        assert!(Verbosity::Verbose.show_events());
        assert_eq!(Verbosity::VeryVerbose.log_filter(), "debug");
    }
}

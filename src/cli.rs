//! Command-line argument parsing for the grader.

use clap::{Parser, Subcommand};
use sql_grader::config::{ConfigOverrides, GraderConfig};
use sql_grader::report::OutputFormat;
use std::path::PathBuf;

/// Grades SQL exercise solutions against instructor-defined checks.
#[derive(Parser, Debug)]
#[command(name = "sql-grader")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory containing one subdirectory per exercise
    #[arg(long, global = true, value_name = "DIR", env = "SQL_GRADER_EXERCISES_DIR")]
    pub exercises_dir: Option<PathBuf>,

    /// Directory containing solution files named <exercise_id>.sql
    #[arg(long, global = true, value_name = "DIR", env = "SQL_GRADER_SOLUTIONS_DIR")]
    pub solutions_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Grade your solution for an exercise
    Grade {
        /// Exercise identifier, e.g. 01-create-table
        exercise_id: String,

        /// Report format: text or json
        #[arg(long, value_name = "FORMAT", default_value = "text")]
        format: OutputFormat,
    },

    /// List all available exercises
    List,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(GraderConfig::default_path)
    }

    /// Returns directory overrides given on the command line or in the environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            exercises_dir: self.exercises_dir.clone(),
            solutions_dir: self.solutions_dir.clone(),
        }
    }
}

//! Command-line argument definitions for the Sparkify ETL pipeline.
//!
//! Defines the CLI interface using the clap derive API.

use crate::config::EtlConfig;
use crate::error::{EtlError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the Sparkify ETL pipeline
///
/// Loads song-catalog and listening-log NDJSON data into a relational
/// star schema with bulk staging loads and reconciliation checks.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sparkify-etl",
    version,
    about = "Load Sparkify song and log JSON data into a relational star schema"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the full ETL pipeline (main command)
    Run(RunArgs),
    /// Drop and recreate the destination schema before a first run
    InitDb(InitDbArgs),
}

/// Arguments for the run command
#[derive(Debug, Clone, Parser)]
pub struct RunArgs {
    /// Root directory of the song-catalog corpus
    #[arg(
        long = "song-data",
        value_name = "PATH",
        default_value = "data/song_data"
    )]
    pub song_data: PathBuf,

    /// Root directory of the listening-log corpus
    #[arg(long = "log-data", value_name = "PATH", default_value = "data/log_data")]
    pub log_data: PathBuf,

    /// Directory for disposable CSV staging artifacts
    #[arg(
        long = "staging-dir",
        value_name = "PATH",
        default_value = "data/csv_files"
    )]
    pub staging_dir: PathBuf,

    /// Path to the destination SQLite database
    #[arg(
        short = 'd',
        long = "database",
        value_name = "FILE",
        default_value = "sparkify.db"
    )]
    pub database: PathBuf,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the init-db command
#[derive(Debug, Clone, Parser)]
pub struct InitDbArgs {
    /// Path to the destination SQLite database
    #[arg(
        short = 'd',
        long = "database",
        value_name = "FILE",
        default_value = "sparkify.db"
    )]
    pub database: PathBuf,

    /// Staging directory to create if absent
    #[arg(
        long = "staging-dir",
        value_name = "PATH",
        default_value = "data/csv_files"
    )]
    pub staging_dir: PathBuf,

    /// Increase logging verbosity
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl RunArgs {
    /// Validate the run command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        for (label, path) in [("song-data", &self.song_data), ("log-data", &self.log_data)] {
            if !path.exists() {
                return Err(EtlError::configuration(format!(
                    "{} path does not exist: {}",
                    label,
                    path.display()
                )));
            }
            if !path.is_dir() {
                return Err(EtlError::configuration(format!(
                    "{} path is not a directory: {}",
                    label,
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Build the pipeline configuration from these arguments
    pub fn to_config(&self) -> EtlConfig {
        EtlConfig::default()
            .with_song_data(&self.song_data)
            .with_log_data(&self.log_data)
            .with_staging_dir(&self.staging_dir)
            .with_database(&self.database)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl InitDbArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_args_validation() {
        let temp_dir = TempDir::new().unwrap();
        let songs = temp_dir.path().join("songs");
        let logs = temp_dir.path().join("logs");
        std::fs::create_dir_all(&songs).unwrap();
        std::fs::create_dir_all(&logs).unwrap();

        let args = RunArgs {
            song_data: songs.clone(),
            log_data: logs.clone(),
            staging_dir: temp_dir.path().join("staging"),
            database: temp_dir.path().join("test.db"),
            verbose: 0,
            quiet: false,
        };
        assert!(args.validate().is_ok());

        let mut invalid = args.clone();
        invalid.song_data = temp_dir.path().join("missing");
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_to_config_carries_paths() {
        let args = RunArgs {
            song_data: PathBuf::from("/tmp/songs"),
            log_data: PathBuf::from("/tmp/logs"),
            staging_dir: PathBuf::from("/tmp/staging"),
            database: PathBuf::from("/tmp/db.sqlite"),
            verbose: 0,
            quiet: false,
        };
        let config = args.to_config();
        assert_eq!(config.song_data, PathBuf::from("/tmp/songs"));
        assert_eq!(config.database, PathBuf::from("/tmp/db.sqlite"));
    }

    #[test]
    fn test_log_level() {
        let mut args = RunArgs {
            song_data: PathBuf::new(),
            log_data: PathBuf::new(),
            staging_dir: PathBuf::new(),
            database: PathBuf::new(),
            verbose: 0,
            quiet: false,
        };

        assert_eq!(args.get_log_level(), "warn");
        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");
        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }
}

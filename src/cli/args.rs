//! CLI argument definitions for `ba-planner`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ba_planner::config::ConfigOverrides;
use ba_planner::logger::Level;
use ba_planner::models::Season;
use ba_planner::search::SortMode;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Sort mode argument for search results
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum SortArg {
    /// Descending numeric credits
    Credits,
    /// Fixed block-priority order
    Blocks,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Credits => Self::Credits,
            SortArg::Blocks => Self::Blocks,
        }
    }
}

/// Season filter argument for search
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum SeasonArg {
    /// Fall-semester courses only
    Fall,
    /// Spring-semester courses only
    Spring,
}

impl From<SeasonArg> for Season {
    fn from(arg: SeasonArg) -> Self {
        match arg {
            SeasonArg::Fall => Self::Fall,
            SeasonArg::Spring => Self::Spring,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `file`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Search the course catalog.
    ///
    /// Runs the ranked matcher (aliases, prefixes, initials, fuzzy) over
    /// the courses not yet placed in the plan.
    Search {
        /// Free-text query; omit to list every available course
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Restrict to one offering season
        #[arg(long, value_enum)]
        season: Option<SeasonArg>,

        /// Credit-tag filters (e.g., "4" or "4 Cr"); repeatable
        #[arg(short, long, value_name = "TAG", num_args = 1..)]
        credits: Vec<String>,

        /// Sort mode for results; persisted for later runs
        #[arg(short, long, value_enum)]
        sort: Option<SortArg>,

        /// Include the extended (hors-plan) catalog
        #[arg(long)]
        extended: bool,
    },
    /// Place a course into a semester (BA3-BA6).
    ///
    /// Re-placing a course into the semester it already occupies removes it.
    Place {
        /// Course name as it appears in the catalog
        #[arg(value_name = "COURSE")]
        course: String,

        /// Target semester (3-6)
        #[arg(value_name = "SEMESTER")]
        semester: u8,
    },
    /// Remove a course from the plan.
    Remove {
        /// Course name to remove
        #[arg(value_name = "COURSE")]
        course: String,
    },
    /// Show the current plan grouped by semester with credit totals.
    Show,
    /// Auto-place every mandatory-block course into its native semester.
    ///
    /// Courses already in the plan keep their current placement.
    Auto,
    /// Reset the plan (requires confirmation).
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Print the shareable plan token (or a full link with --base).
    Share {
        /// Base URL to embed the token into
        #[arg(long, value_name = "URL")]
        base: Option<String>,
    },
    /// Load the plan from a share token or link.
    Load {
        /// Share token, or a URL carrying the plan parameter
        #[arg(value_name = "TOKEN")]
        token: String,
    },
    /// Export the plan as a JSON document.
    Export {
        /// Output file path (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Import a plan from a JSON document, replacing the current plan.
    Import {
        /// Input file path (stdin when omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "baplan",
    about = "ba-planner command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config plan data directory
    #[arg(long = "config-data-dir", value_name = "DIR")]
    pub config_data_dir: Option<PathBuf>,

    /// Override config plan data directory (short form)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides.
    ///
    /// Short-form flags (e.g., `--data-dir`) take precedence over long-form
    /// flags (e.g., `--config-data-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_data_dir
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_data_dir: None,
            data_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_sort_and_season_args_convert() {
        assert_eq!(SortMode::from(SortArg::Credits), SortMode::Credits);
        assert_eq!(SortMode::from(SortArg::Blocks), SortMode::Blocks);
        assert_eq!(Season::from(SeasonArg::Fall), Season::Fall);
        assert_eq!(Season::from(SeasonArg::Spring), Season::Spring);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = bare_cli(Command::Config { subcommand: None });
        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
    }

    #[test]
    fn test_short_form_data_dir_precedence() {
        let mut cli = bare_cli(Command::Show);
        cli.config_data_dir = Some(PathBuf::from("/long/data"));
        cli.data_dir = Some(PathBuf::from("/short/data"));

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.data_dir, Some("/short/data".to_string()));
    }

    #[test]
    fn test_long_form_data_dir_when_short_absent() {
        let mut cli = bare_cli(Command::Show);
        cli.config_data_dir = Some(PathBuf::from("/long/data"));

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.data_dir, Some("/long/data".to_string()));
    }
}

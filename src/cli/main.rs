//! Command-line interface entry point for `ba-planner`

mod args;
mod commands;

use args::{Cli, Command};
use ba_planner::config::Config;
use ba_planner::info;
use ba_planner::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use clap::Parser;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // Effective runtime log level: CLI flag overrides config; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| parse_level(&config.logging.level))
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    // Verbose: enable if CLI flag OR config has verbose=true
    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // Initialize file logging: CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Search {
            query,
            season,
            credits,
            sort,
            extended,
        } => {
            commands::search::run(query, season, &credits, sort, extended, &config);
        }
        Command::Place { course, semester } => {
            commands::plan::place(&course, semester, &config);
        }
        Command::Remove { course } => {
            commands::plan::remove(&course, &config);
        }
        Command::Show => {
            commands::plan::show(&config);
        }
        Command::Auto => {
            commands::plan::auto(&config);
        }
        Command::Clear { yes } => {
            commands::plan::clear(yes, &config);
        }
        Command::Share { base } => {
            commands::share::share(base.as_deref(), &config);
        }
        Command::Load { token } => {
            commands::share::load(&token, &config);
        }
        Command::Export { output } => {
            commands::share::export(output.as_deref(), &config);
        }
        Command::Import { input } => {
            commands::share::import(input.as_deref(), &config);
        }
    }
}

fn parse_level(val: &str) -> Option<Level> {
    match val.to_ascii_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        _ => None,
    }
}

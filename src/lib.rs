//! Shared library for `ba-planner`
//! Contains the course-placement engine used by the CLI.

pub mod core;
pub mod logger;

pub use self::core::{catalog, codec, config, models, rules, search, storage, store};

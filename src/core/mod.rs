//! Core module: the course-placement and search-matching engine

pub mod catalog;
pub mod codec;
pub mod config;
pub mod models;
pub mod rules;
pub mod search;
pub mod storage;
pub mod store;

/// Returns the current version of the `ba-planner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Command handlers for the `baplan` CLI

pub mod config;
pub mod plan;
pub mod search;
pub mod share;

use ba_planner::codec;
use ba_planner::config::Config;
use ba_planner::models::PlanState;
use ba_planner::storage::Storage;

/// Storage handle rooted at the configured data directory
pub(crate) fn storage_for(config: &Config) -> Storage {
    Storage::new(&config.paths.data_dir)
}

/// The persisted plan, or an empty one on first run
pub(crate) fn load_plan(storage: &Storage) -> PlanState {
    storage.load_plan().unwrap_or_default()
}

/// Persist the plan and reprint the refreshed share token.
///
/// Every mutating command ends here so the printed token always matches
/// the stored plan.
pub(crate) fn persist_and_report(storage: &Storage, plan: &PlanState) {
    storage.save_plan(plan);
    match codec::encode_share(plan) {
        Ok(token) if token.is_empty() => println!("Share token: (empty plan)"),
        Ok(token) => println!("Share token: {token}"),
        Err(e) => ba_planner::warn!("Could not refresh share token: {e}"),
    }
}

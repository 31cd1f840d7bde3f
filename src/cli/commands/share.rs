//! Share-link and file import/export command handlers

use std::fs;
use std::io::Read;
use std::path::Path;

use ba_planner::catalog::Catalog;
use ba_planner::codec;
use ba_planner::config::Config;
use ba_planner::rules;
use ba_planner::store::PlanStore;
use ba_planner::{info, warn};

use super::{load_plan, persist_and_report, storage_for};

/// Handle the share command: print the token, or a full link with a base URL
pub fn share(base: Option<&str>, config: &Config) {
    let storage = storage_for(config);
    let plan = load_plan(&storage);

    let printed = base.map_or_else(
        || codec::encode_share(&plan),
        |base| codec::share_url(base, &plan),
    );

    match printed {
        Ok(out) if out.is_empty() => println!("The plan is empty; nothing to share."),
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

/// Handle the load command: hydrate the plan from a share token or link.
///
/// A malformed token falls back to the durably persisted plan with a
/// notice; it never clobbers the stored state.
pub fn load(input: &str, config: &Config) {
    let catalog = Catalog::bundled();
    let storage = storage_for(config);
    let token = codec::token_from_input(input);

    match codec::decode_share(&token, &catalog) {
        Ok(plan) => {
            let count = plan.len();
            let mut store = PlanStore::from_plan(load_plan(&storage));
            store.replace(plan);
            println!(
                "✓ Loaded {count} course(s), {} Cr total",
                rules::total_credits(store.plan())
            );
            persist_and_report(&storage, store.plan());
        }
        Err(e) => {
            warn!("Share token rejected: {e}");
            let kept = load_plan(&storage);
            println!(
                "✗ Could not read the share token; keeping the stored plan ({} course(s))",
                kept.len()
            );
        }
    }
}

/// Handle the export command (stdout when no output path is given)
pub fn export(output: Option<&Path>, config: &Config) {
    let storage = storage_for(config);
    let plan = load_plan(&storage);

    let document = match codec::export_plan(&plan) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    match output {
        None => println!("{document}"),
        Some(path) => match fs::write(path, &document) {
            Ok(()) => {
                println!("✓ Plan exported to: {}", path.display());
                info!("Exported plan to: {}", path.display());
            }
            Err(e) => {
                eprintln!("✗ Failed to write {}: {e}", path.display());
                std::process::exit(1);
            }
        },
    }
}

/// Handle the import command (stdin when no input path is given).
///
/// An invalid document is reported and leaves the stored plan untouched.
pub fn import(input: Option<&Path>, config: &Config) {
    let content = match read_input(input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    match codec::import_plan(&content) {
        Ok(plan) => {
            let storage = storage_for(config);
            let mut store = PlanStore::from_plan(load_plan(&storage));
            let count = plan.len();
            store.replace(plan);
            println!("✓ Imported {count} course(s)");
            persist_and_report(&storage, store.plan());
        }
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

fn read_input(input: Option<&Path>) -> Result<String, String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display())),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            Ok(content)
        }
    }
}

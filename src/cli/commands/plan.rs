//! Plan mutation and display command handlers

use std::io::{self, Write};

use ba_planner::catalog::Catalog;
use ba_planner::config::Config;
use ba_planner::info;
use ba_planner::rules::{self, FIRST_SEMESTER, LAST_SEMESTER};
use ba_planner::store::{PlaceOutcome, PlanStore};

use super::{load_plan, persist_and_report, storage_for};

/// Handle the place command: eligibility-checked placement with toggle
/// semantics.
pub fn place(course: &str, semester: u8, config: &Config) {
    let catalog = Catalog::bundled();
    let storage = storage_for(config);
    let mut store = PlanStore::from_plan(load_plan(&storage));

    let Some(record) = catalog.get(course) else {
        eprintln!("✗ Unknown course: {course}");
        std::process::exit(1);
    };

    if !rules::can_place(record, semester) {
        // Illegal placements are a silent no-op on the plan itself
        println!(
            "✗ {course} cannot go into BA{semester} (different parity or earlier than its native semester)"
        );
        return;
    }

    match store.place(course, record, semester) {
        PlaceOutcome::Placed => println!("✓ Placed {course} in BA{semester}"),
        PlaceOutcome::Moved => println!("✓ Moved {course} to BA{semester}"),
        PlaceOutcome::Toggled => println!("✓ Removed {course} from BA{semester}"),
    }

    persist_and_report(&storage, store.plan());
}

/// Handle the remove command. Removing an absent course is not an error.
pub fn remove(course: &str, config: &Config) {
    let storage = storage_for(config);
    let mut store = PlanStore::from_plan(load_plan(&storage));

    if store.remove(course) {
        println!("✓ Removed {course} from the plan");
        persist_and_report(&storage, store.plan());
    } else {
        println!("{course} is not in the plan");
    }
}

/// Handle the show command: the plan grouped by semester with credit sums
pub fn show(config: &Config) {
    let storage = storage_for(config);
    let plan = load_plan(&storage);

    if plan.is_empty() {
        println!("The plan is empty.");
        return;
    }

    for semester in FIRST_SEMESTER..=LAST_SEMESTER {
        let mut column: Vec<(&String, &ba_planner::models::Placement)> = plan
            .iter()
            .filter(|(_, placement)| placement.semester == semester)
            .collect();
        if column.is_empty() {
            continue;
        }
        // Columns list highest-credit courses first
        column.sort_by(|a, b| {
            b.1.credits
                .partial_cmp(&a.1.credits)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        println!(
            "BA{semester}  ({} Cr)",
            rules::column_credits(&plan, semester)
        );
        for (name, placement) in column {
            let block = placement.block.as_deref().unwrap_or("-");
            println!("  {name}  {} Cr  [{block}]", placement.credits);
        }
    }

    println!("\nTotal: {} Cr", rules::total_credits(&plan));
}

/// Handle the auto command: place mandatory-block courses, skipping any
/// course already in the plan.
pub fn auto(config: &Config) {
    let catalog = Catalog::bundled();
    let storage = storage_for(config);
    let mut store = PlanStore::from_plan(load_plan(&storage));

    let before = store.plan().len();
    let placed = rules::auto_place_mandatory(&catalog, store.plan());
    let added = placed.len() - before;
    store.replace(placed);

    info!("Auto-placed {added} mandatory courses");
    println!("✓ Added {added} mandatory courses to the plan");
    persist_and_report(&storage, store.plan());
}

/// Handle the clear command (confirmation unless --yes)
pub fn clear(yes: bool, config: &Config) {
    let storage = storage_for(config);

    if !yes {
        print!("Are you sure you want to clear the plan? (y/n): ");
        io::stdout().flush().ok();

        let mut response = String::new();
        io::stdin().read_line(&mut response).ok();

        let confirmed = response.trim().eq_ignore_ascii_case("y")
            || response.trim().eq_ignore_ascii_case("yes");
        if !confirmed {
            println!("✗ Clear cancelled");
            return;
        }
    }

    storage.clear_plan();
    println!("✓ Plan cleared");
}

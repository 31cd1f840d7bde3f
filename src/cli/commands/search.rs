//! Search command handler

use ba_planner::catalog::{AliasTable, Catalog};
use ba_planner::config::Config;
use ba_planner::models::Season;
use ba_planner::search::{self, SortMode};
use ba_planner::verbose;

use crate::args::{SeasonArg, SortArg};

use super::{load_plan, storage_for};

/// Run the ranked matcher over the available catalog and print results.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    query: Option<String>,
    season: Option<SeasonArg>,
    credits: &[String],
    sort: Option<SortArg>,
    extended: bool,
    config: &Config,
) {
    let catalog = Catalog::bundled();
    let aliases = AliasTable::bundled();
    let storage = storage_for(config);
    let plan = load_plan(&storage);

    // An explicit --sort wins and is persisted; otherwise reuse the stored
    // choice, defaulting to credits.
    let sort_mode = sort.map(SortMode::from).map_or_else(
        || storage.load_sort_mode().unwrap_or_default(),
        |mode| {
            storage.save_sort_mode(mode);
            mode
        },
    );

    let mut candidates = catalog.available(&plan, extended);
    if let Some(season) = season {
        candidates = search::filter_by_season(&candidates, Season::from(season));
    }

    verbose!("{} candidate(s) before matching", candidates.len());

    let matched = search::search(query.as_deref().unwrap_or(""), &candidates, &aliases);
    let results = search::refine(matched, &plan, credits, sort_mode);

    if results.is_empty() {
        println!("No matching courses.");
        return;
    }

    for (name, record) in &results {
        let block = record.block.as_deref().unwrap_or("-");
        let category = record
            .category
            .as_deref()
            .map(|c| format!("  <{c}>"))
            .unwrap_or_default();
        let native = record
            .semester
            .map(|s| format!("  BA{s}"))
            .unwrap_or_default();
        println!(
            "{name}  {} Cr  {}  [{block}]{native}{category}",
            record.credits, record.season
        );
    }
    println!("\n{} course(s)", results.len());
}

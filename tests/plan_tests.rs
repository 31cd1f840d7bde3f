//! Integration tests for placement rules, the plan store and durable storage

use ba_planner::catalog::Catalog;
use ba_planner::models::{PlanState, Placement};
use ba_planner::rules;
use ba_planner::search::SortMode;
use ba_planner::storage::Storage;
use ba_planner::store::{PlaceOutcome, PlanStore};
use tempfile::TempDir;

#[test]
fn test_anchored_course_respects_parity() {
    let catalog = Catalog::bundled();

    // Analyse III is anchored to BA3 (fall)
    let record = catalog.get("Analyse III").expect("bundled course");
    assert!(rules::can_place(record, 3));
    assert!(rules::can_place(record, 5));
    assert!(!rules::can_place(record, 4));
    assert!(!rules::can_place(record, 6));

    // Bases de données is anchored to BA4 (spring): never earlier
    let record = catalog.get("Bases de données").expect("bundled course");
    assert!(!rules::can_place(record, 3));
    assert!(rules::can_place(record, 4));
    assert!(rules::can_place(record, 6));
}

#[test]
fn test_elective_goes_into_any_semester() {
    let catalog = Catalog::bundled();
    let record = catalog.get("Cryptographie et sécurité").expect("bundled course");

    for target in rules::FIRST_SEMESTER..=rules::LAST_SEMESTER {
        assert!(rules::can_place(record, target));
    }
    assert!(!rules::can_place(record, 2));
    assert!(!rules::can_place(record, 7));
}

#[test]
fn test_auto_place_fills_all_mandatory_blocks() {
    let catalog = Catalog::bundled();
    let placed = rules::auto_place_mandatory(&catalog, &PlanState::new());

    assert!(!placed.is_empty());
    for placement in placed.values() {
        let block = placement.block.as_deref().expect("mandatory block");
        assert!(rules::MANDATORY_BLOCKS.contains(&block));
        assert!((rules::FIRST_SEMESTER..=rules::LAST_SEMESTER).contains(&placement.semester));
    }

    // Electives never auto-place
    assert!(!placed.contains_key("Cryptographie et sécurité"));
    // Anchored courses land on their native semester
    assert_eq!(placed["Analyse III"].semester, 3);
    assert_eq!(placed["Génie logiciel"].semester, 6);
}

#[test]
fn test_auto_place_keeps_existing_placements() {
    let catalog = Catalog::bundled();

    let mut store = PlanStore::new();
    let record = catalog.get("Analyse III").expect("bundled course");
    store.place("Analyse III", record, 5);

    let placed = rules::auto_place_mandatory(&catalog, store.plan());
    assert_eq!(placed["Analyse III"].semester, 5);
}

#[test]
fn test_place_toggle_then_move() {
    let catalog = Catalog::bundled();
    let record = catalog.get("Analyse III").expect("bundled course");
    let mut store = PlanStore::new();

    assert_eq!(store.place("Analyse III", record, 3), PlaceOutcome::Placed);
    assert_eq!(store.place("Analyse III", record, 5), PlaceOutcome::Moved);
    assert_eq!(store.plan()["Analyse III"].semester, 5);

    // Re-placing into the occupied semester removes the course
    assert_eq!(store.place("Analyse III", record, 5), PlaceOutcome::Toggled);
    assert!(store.plan().is_empty());
}

#[test]
fn test_column_credits_over_bundled_plan() {
    let catalog = Catalog::bundled();
    let mut store = PlanStore::new();

    // BA3: 4 + 5 credits, BA5: 4 credits
    store.place("Analyse III", catalog.get("Analyse III").unwrap(), 3);
    store.place("Algorithmes I", catalog.get("Algorithmes I").unwrap(), 3);
    store.place(
        "Réseaux informatiques",
        catalog.get("Réseaux informatiques").unwrap(),
        5,
    );

    assert!((rules::column_credits(store.plan(), 3) - 9.0).abs() < f32::EPSILON);
    assert!((rules::column_credits(store.plan(), 5) - 4.0).abs() < f32::EPSILON);
    assert!((rules::column_credits(store.plan(), 4)).abs() < f32::EPSILON);
    assert!((rules::total_credits(store.plan()) - 13.0).abs() < f32::EPSILON);
}

#[test]
fn test_storage_plan_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = Storage::new(temp_dir.path());

    assert!(storage.load_plan().is_none());

    let catalog = Catalog::bundled();
    let mut plan = PlanState::new();
    plan.insert(
        "Analyse III".to_string(),
        Placement::from_record(catalog.get("Analyse III").unwrap(), 3),
    );
    storage.save_plan(&plan);

    let loaded = storage.load_plan().expect("saved plan should load");
    assert_eq!(loaded, plan);
}

#[test]
fn test_storage_clear_plan() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = Storage::new(temp_dir.path());

    let mut plan = PlanState::new();
    plan.insert("Analyse III".to_string(), Placement::placeholder(3));
    storage.save_plan(&plan);
    assert!(storage.load_plan().is_some());

    storage.clear_plan();
    assert!(storage.load_plan().is_none());
}

#[test]
fn test_storage_sort_mode_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = Storage::new(temp_dir.path());

    assert!(storage.load_sort_mode().is_none());

    storage.save_sort_mode(SortMode::Blocks);
    assert_eq!(storage.load_sort_mode(), Some(SortMode::Blocks));

    storage.save_sort_mode(SortMode::Credits);
    assert_eq!(storage.load_sort_mode(), Some(SortMode::Credits));
}

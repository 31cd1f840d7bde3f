//! Placement eligibility rules and credit aggregation
//!
//! A course anchored to a native semester may only move forward within the
//! same parity: odd anchors (BA3/BA5) stay on 3 or 5, even anchors (BA4/BA6)
//! stay on 4 or 6, and never earlier than the anchor. Courses without an
//! anchor go anywhere.

use crate::core::catalog::Catalog;
use crate::core::models::{CourseRecord, Placement, PlanState};
use crate::debug;

/// First placeable semester
pub const FIRST_SEMESTER: u8 = 3;

/// Last placeable semester
pub const LAST_SEMESTER: u8 = 6;

/// Blocks whose anchored courses are auto-placed as mandatory
pub const MANDATORY_BLOCKS: [&str; 4] = ["Bloc A", "Bloc B", "Bloc C", "Bloc transversal SHS"];

/// Whether a course may legally be placed in the target semester.
///
/// Violations are not errors; callers treat a `false` as a silent no-op.
#[must_use]
pub fn can_place(record: &CourseRecord, target: u8) -> bool {
    if !(FIRST_SEMESTER..=LAST_SEMESTER).contains(&target) {
        return false;
    }
    match record.semester {
        None => true,
        Some(native) => {
            let allowed = target % 2 == native % 2 && target >= native;
            if !allowed {
                debug!(
                    "Placement rejected: native semester {native} cannot move to {target} (parity or earlier semester)"
                );
            }
            allowed
        }
    }
}

/// Sum of credits over all placements assigned to the given semester
#[must_use]
pub fn column_credits(plan: &PlanState, semester: u8) -> f32 {
    plan.values()
        .filter(|placement| placement.semester == semester)
        .map(|placement| placement.credits)
        .sum()
}

/// Sum of credits over the whole plan
#[must_use]
pub fn total_credits(plan: &PlanState) -> f32 {
    plan.values().map(|placement| placement.credits).sum()
}

/// The input plan plus every mandatory-block course with a native semester.
///
/// Courses already present keep their existing placement (skip-existing);
/// only the primary catalog contributes mandatory courses.
#[must_use]
pub fn auto_place_mandatory(catalog: &Catalog, plan: &PlanState) -> PlanState {
    let mut placed = plan.clone();

    for (name, record) in catalog.primary_entries() {
        let mandatory = record
            .block
            .as_deref()
            .is_some_and(|block| MANDATORY_BLOCKS.contains(&block));
        if !mandatory {
            continue;
        }
        let Some(native) = record.semester else {
            continue;
        };
        if placed.contains_key(name) {
            continue;
        }
        placed.insert(name.clone(), Placement::from_record(record, native));
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Season;
    use std::collections::BTreeMap;

    fn anchored(native: u8) -> CourseRecord {
        CourseRecord::anchored(4.0, Season::Fall, "Bloc A", native)
    }

    #[test]
    fn test_parity_rule() {
        assert!(!can_place(&anchored(3), 4));
        assert!(can_place(&anchored(3), 5));
        assert!(can_place(&anchored(3), 3));
        assert!(!can_place(&anchored(4), 3));
        assert!(can_place(&anchored(4), 6));
        assert!(!can_place(&anchored(5), 3));
    }

    #[test]
    fn test_unanchored_goes_anywhere() {
        let free = CourseRecord::new(4.0, Season::Spring);
        for target in FIRST_SEMESTER..=LAST_SEMESTER {
            assert!(can_place(&free, target));
        }
    }

    #[test]
    fn test_target_out_of_range() {
        let free = CourseRecord::new(4.0, Season::Fall);
        assert!(!can_place(&free, 2));
        assert!(!can_place(&free, 7));
    }

    #[test]
    fn test_credit_sums() {
        let mut plan = PlanState::new();
        plan.insert(
            "A".to_string(),
            Placement::from_record(&CourseRecord::new(6.0, Season::Spring), 4),
        );
        plan.insert(
            "B".to_string(),
            Placement::from_record(&CourseRecord::new(4.0, Season::Spring), 4),
        );
        plan.insert(
            "C".to_string(),
            Placement::from_record(&CourseRecord::new(8.0, Season::Fall), 3),
        );

        assert!((column_credits(&plan, 4) - 10.0).abs() < f32::EPSILON);
        assert!((column_credits(&plan, 5)).abs() < f32::EPSILON);
        assert!((total_credits(&plan) - 18.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_auto_place_mandatory_skips_existing() {
        let mut primary = BTreeMap::new();
        primary.insert("Mandatory".to_string(), anchored(3));
        primary.insert(
            "Elective".to_string(),
            CourseRecord::new(4.0, Season::Fall),
        );
        let mut unanchored_block = CourseRecord::new(4.0, Season::Fall);
        unanchored_block.block = Some("Bloc A".to_string());
        primary.insert("No Anchor".to_string(), unanchored_block);
        let catalog = Catalog::from_tables(primary, BTreeMap::new());

        let mut plan = PlanState::new();
        plan.insert(
            "Mandatory".to_string(),
            Placement::from_record(&anchored(3), 5),
        );

        let placed = auto_place_mandatory(&catalog, &plan);

        // Existing placement kept, elective and anchor-less block skipped
        assert_eq!(placed.len(), 1);
        assert_eq!(placed["Mandatory"].semester, 5);
    }

    #[test]
    fn test_auto_place_mandatory_adds_anchored_blocks() {
        let mut primary = BTreeMap::new();
        primary.insert("Bloc A Course".to_string(), anchored(3));
        let mut shs = CourseRecord::anchored(2.0, Season::Fall, "Bloc transversal SHS", 5);
        shs.credits = 2.0;
        primary.insert("SHS Course".to_string(), shs);
        let catalog = Catalog::from_tables(primary, BTreeMap::new());

        let placed = auto_place_mandatory(&catalog, &PlanState::new());

        assert_eq!(placed.len(), 2);
        assert_eq!(placed["Bloc A Course"].semester, 3);
        assert_eq!(placed["SHS Course"].semester, 5);
    }
}

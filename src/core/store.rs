//! Mutable plan store
//!
//! Owns the placement set. All writes to the plan flow through this type:
//! placement (with toggle semantics), removal, wholesale replacement and
//! reset.

use crate::core::models::{CourseRecord, Placement, PlanState};

/// Outcome of a [`PlanStore::place`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// The course was inserted into the target semester
    Placed,
    /// The course moved from another semester into the target
    Moved,
    /// The course already sat in the target semester and was removed
    Toggled,
}

/// The single writer path for the user's plan
#[derive(Debug, Clone, Default)]
pub struct PlanStore {
    plan: PlanState,
}

impl PlanStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            plan: PlanState::new(),
        }
    }

    /// Hydrate a store from an existing plan (startup, import, link load)
    #[must_use]
    pub const fn from_plan(plan: PlanState) -> Self {
        Self { plan }
    }

    /// Read access to the current plan
    #[must_use]
    pub const fn plan(&self) -> &PlanState {
        &self.plan
    }

    /// Consume the store, yielding the plan
    #[must_use]
    pub fn into_plan(self) -> PlanState {
        self.plan
    }

    /// Place a course into a target semester.
    ///
    /// Any existing entry for the course is removed first, regardless of its
    /// previous semester. Re-placing a course into the semester it already
    /// occupies toggles it off (net removal); a different target moves it.
    /// The placement snapshots the record's current attributes.
    pub fn place(&mut self, name: &str, record: &CourseRecord, target: u8) -> PlaceOutcome {
        match self.plan.remove(name) {
            Some(previous) if previous.semester == target => PlaceOutcome::Toggled,
            Some(_) => {
                self.plan
                    .insert(name.to_string(), Placement::from_record(record, target));
                PlaceOutcome::Moved
            }
            None => {
                self.plan
                    .insert(name.to_string(), Placement::from_record(record, target));
                PlaceOutcome::Placed
            }
        }
    }

    /// Remove a course from the plan. Removing an absent course is a silent
    /// no-op, never an error. Returns whether an entry was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.plan.remove(name).is_some()
    }

    /// Wholesale substitution of the plan (import, auto-place, link load)
    pub fn replace(&mut self, plan: PlanState) {
        self.plan = plan;
    }

    /// Reset to an empty plan
    pub fn clear(&mut self) {
        self.plan.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Season;

    fn record() -> CourseRecord {
        CourseRecord::anchored(4.0, Season::Fall, "Bloc A", 3)
    }

    #[test]
    fn test_place_inserts_snapshot() {
        let mut store = PlanStore::new();
        let outcome = store.place("Analyse III", &record(), 3);

        assert_eq!(outcome, PlaceOutcome::Placed);
        let placement = &store.plan()["Analyse III"];
        assert_eq!(placement.semester, 3);
        assert!((placement.credits - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_place_twice_same_target_toggles_off() {
        let mut store = PlanStore::new();
        store.place("Analyse III", &record(), 3);
        let outcome = store.place("Analyse III", &record(), 3);

        assert_eq!(outcome, PlaceOutcome::Toggled);
        assert!(!store.plan().contains_key("Analyse III"));
    }

    #[test]
    fn test_place_different_target_moves() {
        let mut store = PlanStore::new();
        store.place("Analyse III", &record(), 3);
        let outcome = store.place("Analyse III", &record(), 5);

        assert_eq!(outcome, PlaceOutcome::Moved);
        assert_eq!(store.plan().len(), 1);
        assert_eq!(store.plan()["Analyse III"].semester, 5);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = PlanStore::new();
        store.place("Analyse III", &record(), 3);
        let before = store.plan().clone();

        assert!(!store.remove("Not There"));
        assert_eq!(store.plan(), &before);
    }

    #[test]
    fn test_replace_and_clear() {
        let mut store = PlanStore::new();
        store.place("Analyse III", &record(), 3);

        let mut other = PlanState::new();
        other.insert(
            "Bases de données".to_string(),
            Placement::from_record(&record(), 4),
        );
        store.replace(other);
        assert!(store.plan().contains_key("Bases de données"));
        assert!(!store.plan().contains_key("Analyse III"));

        store.clear();
        assert!(store.plan().is_empty());
    }
}

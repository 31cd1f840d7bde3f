//! Static course catalog and search alias table
//!
//! The catalog is read-only lookup data bundled into the binary. It is made
//! of a primary table (the BA3-BA6 study plan) and an extended "hors-plan"
//! table that is only consulted when the caller opts in.

use std::collections::BTreeMap;

use crate::core::models::{CourseRecord, PlanState};

/// Primary study-plan catalog, embedded at build time
const PRIMARY_CATALOG: &str = include_str!("../assets/courses.json");

/// Extended (hors-plan) catalog, embedded at build time
const EXTENDED_CATALOG: &str = include_str!("../assets/hors-plan-courses.json");

/// Search alias table, embedded at build time
const COURSE_ALIASES: &str = include_str!("../assets/course-aliases.json");

/// Reserved marker prefix denoting a category filter in alias expansions
pub const CATEGORY_MARKER: &str = "@CATEGORY:";

/// Immutable course attribute tables, keyed by course name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    primary: BTreeMap<String, CourseRecord>,
    extended: BTreeMap<String, CourseRecord>,
}

impl Catalog {
    /// Load the catalog bundled with the binary.
    ///
    /// # Panics
    /// Panics if the embedded catalog JSON is invalid. This should never
    /// happen in practice since the tables are compiled into the binary.
    #[must_use]
    pub fn bundled() -> Self {
        let primary = serde_json::from_str(PRIMARY_CATALOG)
            .expect("Failed to parse compiled-in course catalog");
        let extended = serde_json::from_str(EXTENDED_CATALOG)
            .expect("Failed to parse compiled-in hors-plan catalog");
        Self { primary, extended }
    }

    /// Build a catalog from explicit tables
    #[must_use]
    pub const fn from_tables(
        primary: BTreeMap<String, CourseRecord>,
        extended: BTreeMap<String, CourseRecord>,
    ) -> Self {
        Self { primary, extended }
    }

    /// Look up a course by name, primary table first
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CourseRecord> {
        self.primary.get(name).or_else(|| self.extended.get(name))
    }

    /// Iterate the primary table in name order
    pub fn primary_entries(&self) -> impl Iterator<Item = (&String, &CourseRecord)> {
        self.primary.iter()
    }

    /// All catalog entries in name order, optionally unioned with the
    /// extended table. The primary table wins on a name collision.
    #[must_use]
    pub fn entries(&self, include_extended: bool) -> Vec<(String, CourseRecord)> {
        let mut merged = if include_extended {
            self.extended.clone()
        } else {
            BTreeMap::new()
        };
        merged.extend(self.primary.clone());
        merged.into_iter().collect()
    }

    /// The search index: catalog entries not already placed in the plan.
    ///
    /// Pure function of its inputs; recomputed on every call so it can
    /// never serve a stale view of the plan.
    #[must_use]
    pub fn available(&self, plan: &PlanState, include_extended: bool) -> Vec<(String, CourseRecord)> {
        self.entries(include_extended)
            .into_iter()
            .filter(|(name, _)| !plan.contains_key(name))
            .collect()
    }
}

/// What an alias token expands to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasExpansion {
    /// Keep candidates whose category equals this value
    Category(String),
    /// Keep candidates whose name contains this value (case-insensitive)
    NameContains(String),
}

/// Query-token to expansion lookup enabling abbreviation and category search
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    map: BTreeMap<String, String>,
}

impl AliasTable {
    /// Load the alias table bundled with the binary.
    ///
    /// # Panics
    /// Panics if the embedded alias JSON is invalid.
    #[must_use]
    pub fn bundled() -> Self {
        let map = serde_json::from_str(COURSE_ALIASES)
            .expect("Failed to parse compiled-in alias table");
        Self { map }
    }

    /// Build an alias table from an explicit map
    #[must_use]
    pub const fn from_map(map: BTreeMap<String, String>) -> Self {
        Self { map }
    }

    /// Resolve a query token: exact key first, then the uppercased form.
    #[must_use]
    pub fn expand(&self, token: &str) -> Option<AliasExpansion> {
        let expansion = self
            .map
            .get(token)
            .or_else(|| self.map.get(&token.to_uppercase()))?;

        Some(expansion.strip_prefix(CATEGORY_MARKER).map_or_else(
            || AliasExpansion::NameContains(expansion.clone()),
            |category| AliasExpansion::Category(category.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Season;

    fn table(entries: &[(&str, &str)]) -> BTreeMap<String, CourseRecord> {
        entries
            .iter()
            .map(|(name, block)| {
                (
                    (*name).to_string(),
                    CourseRecord::anchored(4.0, Season::Fall, block, 3),
                )
            })
            .collect()
    }

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = Catalog::bundled();
        assert!(catalog.get("Analyse III").is_some());
        assert!(catalog.get("Apprentissage profond").is_some());
        assert!(catalog.get("No Such Course").is_none());
    }

    #[test]
    fn test_entries_excludes_extended_by_default() {
        let catalog = Catalog::bundled();
        let names: Vec<String> = catalog.entries(false).into_iter().map(|(n, _)| n).collect();
        assert!(names.contains(&"Analyse III".to_string()));
        assert!(!names.contains(&"Principes de finance".to_string()));

        let extended: Vec<String> = catalog.entries(true).into_iter().map(|(n, _)| n).collect();
        assert!(extended.contains(&"Principes de finance".to_string()));
    }

    #[test]
    fn test_primary_wins_on_collision() {
        let primary = table(&[("Shared", "Bloc A")]);
        let mut extended = table(&[("Shared", "Bloc B")]);
        extended.insert(
            "Only Extended".to_string(),
            CourseRecord::new(3.0, Season::Spring),
        );

        let catalog = Catalog::from_tables(primary, extended);
        let entries = catalog.entries(true);
        let shared = entries.iter().find(|(n, _)| n == "Shared").unwrap();
        assert_eq!(shared.1.block.as_deref(), Some("Bloc A"));
    }

    #[test]
    fn test_available_excludes_placed() {
        let catalog = Catalog::from_tables(table(&[("A", "Bloc A"), ("B", "Bloc B")]), BTreeMap::new());
        let mut plan = PlanState::new();
        plan.insert(
            "A".to_string(),
            crate::core::models::Placement::placeholder(3),
        );

        let names: Vec<String> = catalog
            .available(&plan, false)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["B".to_string()]);
    }

    #[test]
    fn test_alias_expand_category_and_name() {
        let mut map = BTreeMap::new();
        map.insert("ML".to_string(), "machine learning".to_string());
        map.insert("HEC".to_string(), "@CATEGORY:HEC".to_string());
        let aliases = AliasTable::from_map(map);

        assert_eq!(
            aliases.expand("ML"),
            Some(AliasExpansion::NameContains("machine learning".to_string()))
        );
        // Lowercase falls back to the uppercased key
        assert_eq!(
            aliases.expand("ml"),
            Some(AliasExpansion::NameContains("machine learning".to_string()))
        );
        assert_eq!(
            aliases.expand("hec"),
            Some(AliasExpansion::Category("HEC".to_string()))
        );
        assert_eq!(aliases.expand("nothing"), None);
    }
}

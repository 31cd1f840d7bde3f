//! Placement model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::course::{deserialize_credits, CourseRecord, Season};

/// The user's current placement set: course name mapped to its placement.
///
/// A course appears in at most one semester at a time; placing it elsewhere
/// removes the prior entry first (enforced by the plan store).
pub type PlanState = BTreeMap<String, Placement>;

/// A course's assigned semester plus a snapshot of its catalog attributes.
///
/// The snapshot is taken at the moment of placement and does not update if
/// the catalog later changes. Hydrating from a shared link refreshes the
/// snapshot from the current catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Assigned semester (3-6)
    pub semester: u8,

    /// Credit value snapshot
    #[serde(default, deserialize_with = "deserialize_credits")]
    pub credits: f32,

    /// Offering season snapshot
    #[serde(default)]
    pub season: Season,

    /// Curriculum block snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,

    /// Category snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Placement {
    /// Snapshot a catalog record into a placement for the given semester
    #[must_use]
    pub fn from_record(record: &CourseRecord, semester: u8) -> Self {
        Self {
            semester,
            credits: record.credits,
            season: record.season,
            block: record.block.clone(),
            category: record.category.clone(),
        }
    }

    /// Placeholder placement for a course no longer present in the catalog.
    ///
    /// Preserves the user's slot assignment: credits 0, season unknown,
    /// block "Unknown".
    #[must_use]
    pub fn placeholder(semester: u8) -> Self {
        Self {
            semester,
            credits: 0.0,
            season: Season::Unknown,
            block: Some("Unknown".to_string()),
            category: None,
        }
    }
}

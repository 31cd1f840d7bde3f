//! Course model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Offering season of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Season {
    /// Offered in the fall (odd) semesters
    Fall,
    /// Offered in the spring (even) semesters
    Spring,
    /// Season not known (placeholder records, hors-plan imports)
    #[default]
    Unknown,
}

impl Season {
    /// Parse a season label. Anything that is not "Fall" or "Spring"
    /// (case-insensitive) maps to [`Season::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "fall" => Self::Fall,
            "spring" => Self::Spring,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_str = match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Unknown => "Unknown",
        };
        write!(f, "{as_str}")
    }
}

impl<'de> Deserialize<'de> for Season {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Static attributes of a catalog course.
///
/// The course name is the catalog map key, not a field. `semester` is the
/// native semester the catalog anchors the course to (mandatory-block
/// courses); free electives carry `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Credit value; catalogs store it as a number or a numeric string
    #[serde(default, deserialize_with = "deserialize_credits")]
    pub credits: f32,

    /// Offering season
    #[serde(default)]
    pub season: Season,

    /// Curriculum block (e.g., "Bloc A"), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,

    /// Category for hors-plan courses (e.g., "HEC"), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Native semester (3-6) when the catalog anchors the course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u8>,
}

impl CourseRecord {
    /// Create a record with just credits and season (free elective)
    #[must_use]
    pub const fn new(credits: f32, season: Season) -> Self {
        Self {
            credits,
            season,
            block: None,
            category: None,
            semester: None,
        }
    }

    /// Create a record anchored to a native semester within a block
    #[must_use]
    pub fn anchored(credits: f32, season: Season, block: &str, semester: u8) -> Self {
        Self {
            credits,
            season,
            block: Some(block.to_string()),
            category: None,
            semester: Some(semester),
        }
    }

    /// The initials of a course name (first letter of each word, lowercased)
    ///
    /// Used by the abbreviation tier of the search matcher, e.g.
    /// "Bases de données" yields "bdd".
    #[must_use]
    pub fn initials(name: &str) -> String {
        name.split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_lowercase)
            .collect()
    }
}

/// Accept credits as a JSON number or a numeric string; anything else is 0.
pub(crate) fn deserialize_credits<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCredits {
        Number(f32),
        Text(String),
    }

    let raw = Option::<RawCredits>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCredits::Number(n)) => n,
        Some(RawCredits::Text(s)) => s.trim().parse().unwrap_or(0.0),
        None => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_from_label() {
        assert_eq!(Season::from_label("Fall"), Season::Fall);
        assert_eq!(Season::from_label("spring"), Season::Spring);
        assert_eq!(Season::from_label("Hors-plan"), Season::Unknown);
        assert_eq!(Season::from_label(""), Season::Unknown);
    }

    #[test]
    fn test_credits_from_string() {
        let record: CourseRecord =
            serde_json::from_str(r#"{ "credits": "4", "season": "Fall" }"#).unwrap();
        assert!((record.credits - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_credits_from_number() {
        let record: CourseRecord =
            serde_json::from_str(r#"{ "credits": 2.5, "season": "Spring" }"#).unwrap();
        assert!((record.credits - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_non_numeric_credits_are_zero() {
        let record: CourseRecord =
            serde_json::from_str(r#"{ "credits": "variable", "season": "Fall" }"#).unwrap();
        assert!(record.credits.abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_fields_default() {
        let record: CourseRecord = serde_json::from_str("{}").unwrap();
        assert!(record.credits.abs() < f32::EPSILON);
        assert_eq!(record.season, Season::Unknown);
        assert!(record.block.is_none());
        assert!(record.category.is_none());
        assert!(record.semester.is_none());
    }

    #[test]
    fn test_initials() {
        assert_eq!(CourseRecord::initials("Bases de données"), "bdd");
        assert_eq!(CourseRecord::initials("Analyse III"), "ai");
        assert_eq!(CourseRecord::initials(""), "");
    }
}

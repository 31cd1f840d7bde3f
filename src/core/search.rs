//! Ranked multi-strategy course search
//!
//! Matching runs four tiers in strict precedence: alias exact match
//! (short-circuits), name prefix, word initials, then fuzzy similarity.
//! A separate refinement pass drops already-placed courses, applies
//! credit-tag filters and sorts by the active mode.

use std::cmp::Ordering;
use std::fmt;

use crate::core::catalog::{AliasExpansion, AliasTable};
use crate::core::models::{CourseRecord, PlanState, Season};

/// A named catalog entry flowing through the matcher
pub type Candidate = (String, CourseRecord);

/// Minimum query length for the fuzzy tier
const FUZZY_MIN_QUERY: usize = 2;

/// Similarity floor for accepting a fuzzy match
const FUZZY_THRESHOLD: f64 = 0.7;

/// Rank of a block in the fixed display order; unlisted blocks sort last
fn block_rank(block: Option<&str>) -> u32 {
    match block {
        Some("Bloc A") => 1,
        Some("Bloc B") => 2,
        Some("Bloc C") => 3,
        Some("Bloc transversal SHS") => 4,
        Some("Groupe \"Cours à option\"") => 5,
        Some("Groupe \"Physique/Bio\"") => 6,
        Some("Groupe I \"projet\"") => 7,
        _ => 99,
    }
}

/// Active sort mode for refined search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Descending numeric credits
    #[default]
    Credits,
    /// Ascending fixed block-priority order
    Blocks,
}

impl SortMode {
    /// Parse the persisted label form ("Sort by Credits" / "Sort by Blocks")
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Sort by Credits" => Some(Self::Credits),
            "Sort by Blocks" => Some(Self::Blocks),
            _ => None,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Credits => "Sort by Credits",
            Self::Blocks => "Sort by Blocks",
        };
        write!(f, "{label}")
    }
}

/// Narrow candidates to one offering season before matching.
///
/// [`Season::Unknown`] keeps everything (the hors-plan list has no season
/// split).
#[must_use]
pub fn filter_by_season(candidates: &[Candidate], season: Season) -> Vec<Candidate> {
    if season == Season::Unknown {
        return candidates.to_vec();
    }
    candidates
        .iter()
        .filter(|(_, record)| record.season == season)
        .cloned()
        .collect()
}

/// Match a free-text query against an ordered candidate set.
///
/// Deterministic for fixed inputs and never fails; an empty or whitespace
/// query returns the candidates unfiltered in input order.
///
/// An alias hit is exclusive: its filter is the final result and the
/// prefix/initials/fuzzy tiers do not run. Otherwise the result is prefix
/// matches (candidate order), then initials matches not already selected,
/// then fuzzy matches ordered by descending similarity.
#[must_use]
pub fn search(query: &str, candidates: &[Candidate], aliases: &AliasTable) -> Vec<Candidate> {
    let term = query.trim();
    if term.is_empty() {
        return candidates.to_vec();
    }

    if let Some(expansion) = aliases.expand(term) {
        return match expansion {
            AliasExpansion::Category(category) => candidates
                .iter()
                .filter(|(_, record)| record.category.as_deref() == Some(category.as_str()))
                .cloned()
                .collect(),
            AliasExpansion::NameContains(needle) => {
                let needle = needle.to_lowercase();
                candidates
                    .iter()
                    .filter(|(name, _)| name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
        };
    }

    let term_lower = term.to_lowercase();

    let prefix: Vec<Candidate> = candidates
        .iter()
        .filter(|(name, _)| name.to_lowercase().starts_with(&term_lower))
        .cloned()
        .collect();

    let initials: Vec<Candidate> = candidates
        .iter()
        .filter(|(name, _)| {
            CourseRecord::initials(name).starts_with(&term_lower)
                && !prefix.iter().any(|(selected, _)| selected == name)
        })
        .cloned()
        .collect();

    let mut fuzzy: Vec<(f64, Candidate)> = Vec::new();
    if term.chars().count() >= FUZZY_MIN_QUERY {
        for (name, record) in candidates {
            let already = prefix.iter().chain(&initials).any(|(selected, _)| selected == name);
            if already {
                continue;
            }
            let score = fuzzy_score(&term_lower, name);
            if score >= FUZZY_THRESHOLD {
                fuzzy.push((score, (name.clone(), record.clone())));
            }
        }
        // Stable sort: ties keep candidate order
        fuzzy.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    }

    prefix
        .into_iter()
        .chain(initials)
        .chain(fuzzy.into_iter().map(|(_, candidate)| candidate))
        .collect()
}

/// Best Jaro-Winkler similarity of the query against the full name and
/// against each word of the name. Matching per-word keeps mid-name tokens
/// reachable ("machine" still finds "Introduction au machine learning").
fn fuzzy_score(term_lower: &str, name: &str) -> f64 {
    let name_lower = name.to_lowercase();
    let mut best = strsim::jaro_winkler(term_lower, &name_lower);
    for word in name_lower.split_whitespace() {
        best = best.max(strsim::jaro_winkler(term_lower, word));
    }
    best
}

/// Numeric portion of a credit-tag label ("4 Cr" -> 4.0)
fn credit_value(tag: &str) -> Option<f32> {
    let numeric: String = tag
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse().ok()
}

/// Post-search refinement applied regardless of the matched tier.
///
/// Drops courses already placed in the plan, applies active credit-tag
/// filters (a course's credit value must be in the active set), then sorts
/// by the requested mode. Both sorts are stable.
#[must_use]
pub fn refine(
    results: Vec<Candidate>,
    plan: &PlanState,
    credit_filters: &[String],
    sort: SortMode,
) -> Vec<Candidate> {
    let active: Vec<f32> = credit_filters.iter().filter_map(|t| credit_value(t)).collect();

    let mut refined: Vec<Candidate> = results
        .into_iter()
        .filter(|(name, _)| !plan.contains_key(name))
        .filter(|(_, record)| {
            active.is_empty()
                || active
                    .iter()
                    .any(|value| (record.credits - value).abs() < f32::EPSILON)
        })
        .collect();

    match sort {
        SortMode::Credits => refined.sort_by(|a, b| {
            b.1.credits
                .partial_cmp(&a.1.credits)
                .unwrap_or(Ordering::Equal)
        }),
        SortMode::Blocks => refined.sort_by_key(|(_, record)| block_rank(record.block.as_deref())),
    }

    refined
}

//! Data models for `ba-planner`

pub mod course;
pub mod placement;

pub use course::{CourseRecord, Season};
pub use placement::{Placement, PlanState};

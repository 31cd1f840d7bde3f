//! Durable plan storage
//!
//! Two JSON files under the configured data directory: the full plan
//! (written after every mutation, read once at startup) and the active
//! sort-mode label. Reads return `None` on any failure; writes are
//! best-effort and never propagate errors.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::PlanState;
use crate::core::search::SortMode;
use crate::warn;

/// File holding the serialized plan
const PLAN_FILE: &str = "shared_courses.json";

/// File holding the sort-mode label
const SORT_FILE: &str = "sort_by.json";

/// JSON-file-backed durable storage rooted at the configured data directory
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create a storage handle rooted at the given directory
    #[must_use]
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn plan_path(&self) -> PathBuf {
        self.root.join(PLAN_FILE)
    }

    fn sort_path(&self) -> PathBuf {
        self.root.join(SORT_FILE)
    }

    /// Load the persisted plan; `None` when missing or unreadable
    #[must_use]
    pub fn load_plan(&self) -> Option<PlanState> {
        let content = fs::read_to_string(self.plan_path()).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Persist the plan. Best-effort: failures are logged, not raised.
    pub fn save_plan(&self, plan: &PlanState) {
        let Ok(json) = serde_json::to_string(plan) else {
            warn!("Failed to serialize plan for storage");
            return;
        };
        if let Err(e) = self.write(&self.plan_path(), &json) {
            warn!("Failed to persist plan: {e}");
        }
    }

    /// Remove the persisted plan (explicit reset)
    pub fn clear_plan(&self) {
        let path = self.plan_path();
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                warn!("Failed to clear persisted plan: {e}");
            }
        }
    }

    /// Load the persisted sort mode; `None` when missing or unreadable
    #[must_use]
    pub fn load_sort_mode(&self) -> Option<SortMode> {
        let content = fs::read_to_string(self.sort_path()).ok()?;
        let label: String = serde_json::from_str(&content).ok()?;
        SortMode::from_label(&label)
    }

    /// Persist the sort-mode label. Best-effort.
    pub fn save_sort_mode(&self, mode: SortMode) {
        let Ok(json) = serde_json::to_string(&mode.to_string()) else {
            return;
        };
        if let Err(e) = self.write(&self.sort_path(), &json) {
            warn!("Failed to persist sort mode: {e}");
        }
    }

    fn write(&self, path: &Path, content: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(path, content)
    }
}

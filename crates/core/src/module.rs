//! Course modules and the lock/continue derivations used by the
//! learner course overview.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::course::Course;
use crate::types::{EntityId, ObjectOrId};

/// A module within a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: EntityId,
    #[serde(default)]
    pub course: Option<ObjectOrId<Course>>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// 1-based position within the course. Uniqueness is a backend
    /// concern; manual edits are last-write-wins here.
    pub order: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The learner's module-level progress for one course, as returned by
/// the module-progress endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleProgress {
    #[serde(default)]
    pub completed_modules: Vec<EntityId>,
}

impl ModuleProgress {
    pub fn completed_set(&self) -> HashSet<&str> {
        self.completed_modules.iter().map(String::as_str).collect()
    }
}

// ---------------------------------------------------------------------------
// Derived state
// ---------------------------------------------------------------------------

/// Whether a module is locked for the learner.
///
/// The first module (order 1) is always unlocked. Any other module is
/// locked until the module with the preceding order appears in the
/// completed set. A gap in the order sequence (no predecessor in the
/// list at all) leaves the module unlocked.
pub fn is_module_locked(module: &Module, modules: &[Module], progress: &ModuleProgress) -> bool {
    if module.order == 1 {
        return false;
    }

    let prev = modules.iter().find(|m| m.order == module.order - 1);
    match prev {
        Some(prev) => !progress.completed_set().contains(prev.id.as_str()),
        None => false,
    }
}

/// The module the "start/continue course" button should open: the first
/// incomplete module in list order, else the first module.
pub fn continue_target<'a>(modules: &'a [Module], progress: &ModuleProgress) -> Option<&'a Module> {
    let completed = progress.completed_set();
    modules
        .iter()
        .find(|m| !completed.contains(m.id.as_str()))
        .or_else(|| modules.first())
}

/// Completed/total counts and rounded percentage across a module list.
pub fn completion_summary(modules: &[Module], progress: &ModuleProgress) -> (usize, usize, u8) {
    let completed_set = progress.completed_set();
    let completed = modules
        .iter()
        .filter(|m| completed_set.contains(m.id.as_str()))
        .count();
    (
        completed,
        modules.len(),
        crate::progress::percentage(completed, modules.len()),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

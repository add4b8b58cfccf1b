//! Per-lesson completion records and percentage aggregation.

use serde::{Deserialize, Serialize};

use crate::lesson::Lesson;
use crate::types::{EntityId, ObjectOrId};
use crate::user::User;

/// One (user, lesson) completion record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    pub id: EntityId,
    #[serde(default)]
    pub user: Option<ObjectOrId<User>>,
    pub lesson: ObjectOrId<Lesson>,
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub last_accessed: Option<String>,
}

/// Course-level rollup returned by `/courses/user/progress/course/{id}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseProgress {
    pub completed: usize,
    pub total: usize,
    /// Passed through as sent; may be fractional.
    pub percentage: f64,
}

/// Rounded completion percentage, clamped to 100. Returns 0 when
/// `total` is 0.
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed as f64 / total as f64 * 100.0).round() as u8;
    pct.min(100)
}

/// Count of completed lessons among a set of progress records.
pub fn completed_lessons(records: &[UserProgress]) -> usize {
    records.iter().filter(|r| r.is_completed).count()
}

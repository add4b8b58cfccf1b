//! Courses, categories, and the derived admin-table state.
//!
//! Pure evaluation only: the caller pre-loads courses, module counts,
//! and categories through the client crate and passes them in.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, ObjectOrId};
use crate::user::User;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "DRAFT";
pub const STATUS_PENDING_REVIEW: &str = "PENDING_REVIEW";
pub const STATUS_PUBLISHED: &str = "PUBLISHED";
pub const STATUS_ARCHIVED: &str = "ARCHIVED";

/// All valid course status strings.
pub const VALID_COURSE_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_PENDING_REVIEW,
    STATUS_PUBLISHED,
    STATUS_ARCHIVED,
];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Course publication workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    Draft,
    PendingReview,
    Published,
    Archived,
}

impl CourseStatus {
    /// Convert from the backend string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_PENDING_REVIEW => Ok(Self::PendingReview),
            STATUS_PUBLISHED => Ok(Self::Published),
            STATUS_ARCHIVED => Ok(Self::Archived),
            _ => Err(format!(
                "Invalid course status '{s}'. Must be one of: {}",
                VALID_COURSE_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the backend string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::PendingReview => STATUS_PENDING_REVIEW,
            Self::Published => STATUS_PUBLISHED,
            Self::Archived => STATUS_ARCHIVED,
        }
    }

    /// Badge variant shown next to the status in admin tables.
    pub fn badge_variant(&self) -> &'static str {
        match self {
            Self::Draft => "secondary",
            Self::PendingReview => "warning",
            Self::Published => "success",
            Self::Archived => "dark",
        }
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// A course category. Deleting one with linked courses requires a
/// forced confirmation; see [`linked_courses`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A course as returned by `/courses/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<ObjectOrId<Category>>,
    pub status: CourseStatus,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub created_by: Option<ObjectOrId<User>>,
    #[serde(default)]
    pub duration_hours: Option<f64>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Course {
    /// Id of the linked category, whichever shape the backend sent.
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.id(|cat| cat.id.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Derived state
// ---------------------------------------------------------------------------

/// Whether the publish action is available for a course.
///
/// The backend rejects publishing a course with zero modules; the admin
/// table mirrors that by disabling the button.
pub fn can_publish(module_count: usize) -> bool {
    module_count > 0
}

/// Courses still linked to a category, for the delete guard.
///
/// Matches on the category reference in either representation
/// (populated object or bare id). A non-empty result must block
/// deletion until the user explicitly confirms a forced delete.
pub fn linked_courses<'a>(courses: &'a [Course], category_id: &str) -> Vec<&'a Course> {
    courses
        .iter()
        .filter(|course| course.category_id() == Some(category_id))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, category: Option<ObjectOrId<Category>>) -> Course {
        Course {
            id: id.to_string(),
            title: format!("Course {id}"),
            description: String::new(),
            category,
            status: CourseStatus::Draft,
            thumbnail: None,
            created_by: None,
            duration_hours: None,
            is_featured: false,
            created_at: None,
            published_at: None,
        }
    }

    // -- CourseStatus ---------------------------------------------------------

    #[test]
    fn status_round_trip() {
        for status in &[
            CourseStatus::Draft,
            CourseStatus::PendingReview,
            CourseStatus::Published,
            CourseStatus::Archived,
        ] {
            assert_eq!(
                CourseStatus::from_str_value(status.as_str()).unwrap(),
                *status
            );
        }
    }

    #[test]
    fn status_from_str_invalid() {
        assert!(CourseStatus::from_str_value("LIVE").is_err());
    }

    #[test]
    fn badge_variants() {
        assert_eq!(CourseStatus::Draft.badge_variant(), "secondary");
        assert_eq!(CourseStatus::PendingReview.badge_variant(), "warning");
        assert_eq!(CourseStatus::Published.badge_variant(), "success");
        assert_eq!(CourseStatus::Archived.badge_variant(), "dark");
    }

    // -- can_publish ----------------------------------------------------------

    #[test]
    fn cannot_publish_with_zero_modules() {
        assert!(!can_publish(0));
    }

    #[test]
    fn can_publish_with_modules() {
        assert!(can_publish(1));
        assert!(can_publish(12));
    }

    // -- linked_courses -------------------------------------------------------

    #[test]
    fn linked_courses_matches_bare_id_reference() {
        let courses = vec![
            course("x", Some(ObjectOrId::Id("c1".into()))),
            course("y", Some(ObjectOrId::Id("c1".into()))),
            course("z", Some(ObjectOrId::Id("c2".into()))),
        ];
        let linked = linked_courses(&courses, "c1");
        let ids: Vec<&str> = linked.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn linked_courses_matches_populated_reference() {
        let cat = Category {
            id: "c1".into(),
            name: "Python".into(),
            description: String::new(),
            created_at: None,
        };
        let courses = vec![course("x", Some(ObjectOrId::Object(cat)))];
        assert_eq!(linked_courses(&courses, "c1").len(), 1);
    }

    #[test]
    fn linked_courses_ignores_uncategorized() {
        let courses = vec![course("x", None)];
        assert!(linked_courses(&courses, "c1").is_empty());
    }
}

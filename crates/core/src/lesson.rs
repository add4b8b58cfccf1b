//! Lessons, sections, and the two-level section tree.
//!
//! Sections nest exactly one level: a section is either top-level
//! (`is_subsection == false`) or a child referencing `parent_section`.
//! The tree builder tolerates parent references in both backend shapes.

use serde::{Deserialize, Serialize};

use crate::module::Module;
use crate::types::{EntityId, ObjectOrId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CONTENT_VIDEO: &str = "VIDEO";
pub const CONTENT_PDF: &str = "PDF";
pub const CONTENT_TEXT: &str = "TEXT";
pub const CONTENT_QUIZ: &str = "QUIZ";

/// All valid lesson content types.
pub const VALID_CONTENT_TYPES: &[&str] =
    &[CONTENT_VIDEO, CONTENT_PDF, CONTENT_TEXT, CONTENT_QUIZ];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What a lesson's `content` payload holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Video,
    Pdf,
    Text,
    Quiz,
}

impl ContentType {
    /// Convert from the backend string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            CONTENT_VIDEO => Ok(Self::Video),
            CONTENT_PDF => Ok(Self::Pdf),
            CONTENT_TEXT => Ok(Self::Text),
            CONTENT_QUIZ => Ok(Self::Quiz),
            _ => Err(format!(
                "Invalid content type '{s}'. Must be one of: {}",
                VALID_CONTENT_TYPES.join(", ")
            )),
        }
    }

    /// Convert to the backend string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => CONTENT_VIDEO,
            Self::Pdf => CONTENT_PDF,
            Self::Text => CONTENT_TEXT,
            Self::Quiz => CONTENT_QUIZ,
        }
    }

    /// Badge variant for the lesson card content-type chip.
    pub fn badge_variant(&self) -> &'static str {
        match self {
            Self::Video => "primary",
            Self::Pdf => "danger",
            Self::Text => "secondary",
            Self::Quiz => "warning",
        }
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// A lesson within a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: EntityId,
    #[serde(default)]
    pub module: Option<ObjectOrId<Module>>,
    pub title: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_required: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Lesson {
    /// Synchronous quiz check: the lesson is quiz-bearing by content
    /// type. Whether it has authored questions is a separate async
    /// patch ([`LessonView::has_quiz`]).
    pub fn is_quiz(&self) -> bool {
        self.content_type == ContentType::Quiz
    }
}

/// A content section within a lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: EntityId,
    #[serde(default)]
    pub lesson: Option<ObjectOrId<Lesson>>,
    pub title: String,
    /// TEXT or VIDEO; older backends omit it, so it stays optional.
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub content: String,
    pub order: i64,
    #[serde(default)]
    pub is_subsection: bool,
    // Boxed to break the Section -> parent -> Section size recursion.
    #[serde(default)]
    pub parent_section: Option<Box<ObjectOrId<Section>>>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Section {
    /// Id of the parent section, whichever shape was sent.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_section.as_ref().map(|p| p.id(|s| s.id.as_str()))
    }
}

/// A top-level section with its nested subsections, ready to render.
#[derive(Debug, Clone)]
pub struct SectionNode {
    pub section: Section,
    pub subsections: Vec<Section>,
}

/// A lesson enriched with its section tree and the async quiz flag.
#[derive(Debug, Clone)]
pub struct LessonView {
    pub lesson: Lesson,
    pub sections: Vec<SectionNode>,
    /// Whether the quiz actually has authored questions. Starts false
    /// and is patched in after the question-count fan-out resolves.
    pub has_quiz: bool,
}

// ---------------------------------------------------------------------------
// Derived state
// ---------------------------------------------------------------------------

/// Build the two-level section tree.
///
/// Top-level sections are ordered by `order`; each child list is too.
/// A subsection whose parent is missing from the list is dropped (it
/// cannot be rendered under anything).
pub fn build_section_tree(sections: &[Section]) -> Vec<SectionNode> {
    let mut top: Vec<&Section> = sections.iter().filter(|s| !s.is_subsection).collect();
    top.sort_by_key(|s| s.order);

    top.iter()
        .map(|parent| {
            let mut children: Vec<Section> = sections
                .iter()
                .filter(|s| s.is_subsection && s.parent_id() == Some(parent.id.as_str()))
                .cloned()
                .collect();
            children.sort_by_key(|s| s.order);
            SectionNode {
                section: (*parent).clone(),
                subsections: children,
            }
        })
        .collect()
}

/// Candidates for the parent-section dropdown: top-level sections only.
pub fn parent_candidates(sections: &[Section]) -> Vec<&Section> {
    sections.iter().filter(|s| !s.is_subsection).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

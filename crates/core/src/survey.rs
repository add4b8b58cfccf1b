//! Module-scoped surveys: questions, choices, and polymorphic answers.

use serde::{Deserialize, Serialize};

use crate::module::Module;
use crate::types::{EntityId, ObjectOrId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const QUESTION_MCQ: &str = "MCQ";
pub const QUESTION_TEXT: &str = "TEXT";
pub const QUESTION_SCALE: &str = "SCALE";

/// All valid survey question types.
pub const VALID_QUESTION_TYPES: &[&str] = &[QUESTION_MCQ, QUESTION_TEXT, QUESTION_SCALE];

/// Inclusive bounds for scale answers.
pub const SCALE_MIN: i64 = 1;
pub const SCALE_MAX: i64 = 5;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Survey question type. Determines which answer field is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Mcq,
    Text,
    Scale,
}

impl QuestionType {
    /// Convert from the backend string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            QUESTION_MCQ => Ok(Self::Mcq),
            QUESTION_TEXT => Ok(Self::Text),
            QUESTION_SCALE => Ok(Self::Scale),
            _ => Err(format!(
                "Invalid question type '{s}'. Must be one of: {}",
                VALID_QUESTION_TYPES.join(", ")
            )),
        }
    }

    /// Convert to the backend string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mcq => QUESTION_MCQ,
            Self::Text => QUESTION_TEXT,
            Self::Scale => QUESTION_SCALE,
        }
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// A survey attached to a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    pub id: EntityId,
    #[serde(default)]
    pub module: Option<ObjectOrId<Module>>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub questions: Option<Vec<SurveyQuestion>>,
}

fn default_true() -> bool {
    true
}

/// One question within a survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyQuestion {
    pub id: EntityId,
    #[serde(default)]
    pub survey: Option<ObjectOrId<Survey>>,
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub is_required: bool,
    pub order: i64,
    #[serde(default)]
    pub choices: Option<Vec<SurveyChoice>>,
}

/// An ordered choice under an MCQ question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyChoice {
    pub id: EntityId,
    pub choice_text: String,
    pub order: i64,
}

/// A learner's answer to one question, polymorphic over the question
/// type: exactly one of the three fields is meaningful.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyAnswer {
    pub question: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_answer: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_answer: Option<i64>,
}

/// A submitted survey response, as read back by the admin views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: EntityId,
    pub survey: serde_json::Value,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub answers: Option<Vec<SurveyAnswer>>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an answer against its question's type before submission.
///
/// Required questions must carry the matching field; scale answers must
/// fall within [`SCALE_MIN`]..=[`SCALE_MAX`].
pub fn validate_answer(question: &SurveyQuestion, answer: &SurveyAnswer) -> Result<(), String> {
    match question.question_type {
        QuestionType::Text => {
            let empty = answer
                .text_answer
                .as_deref()
                .map(|t| t.trim().is_empty())
                .unwrap_or(true);
            if question.is_required && empty {
                return Err(format!(
                    "'{}' requires a text answer",
                    question.question_text
                ));
            }
        }
        QuestionType::Mcq => {
            if question.is_required && answer.choice_answer.is_none() {
                return Err(format!("'{}' requires a choice", question.question_text));
            }
        }
        QuestionType::Scale => match answer.scale_answer {
            Some(v) if (SCALE_MIN..=SCALE_MAX).contains(&v) => {}
            Some(v) => {
                return Err(format!(
                    "'{}' scale answer {v} out of range {SCALE_MIN}-{SCALE_MAX}",
                    question.question_text
                ));
            }
            None if question.is_required => {
                return Err(format!(
                    "'{}' requires a scale answer",
                    question.question_text
                ));
            }
            None => {}
        },
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn question(qtype: QuestionType, required: bool) -> SurveyQuestion {
        SurveyQuestion {
            id: "q1".into(),
            survey: None,
            question_text: "How was the module?".into(),
            question_type: qtype,
            is_required: required,
            order: 1,
            choices: None,
        }
    }

    #[test]
    fn question_type_round_trip() {
        for qt in &[QuestionType::Mcq, QuestionType::Text, QuestionType::Scale] {
            assert_eq!(QuestionType::from_str_value(qt.as_str()).unwrap(), *qt);
        }
    }

    #[test]
    fn required_text_answer_must_be_non_empty() {
        let q = question(QuestionType::Text, true);
        let missing = SurveyAnswer {
            question: "q1".into(),
            ..Default::default()
        };
        assert!(validate_answer(&q, &missing).is_err());

        let blank = SurveyAnswer {
            question: "q1".into(),
            text_answer: Some("   ".into()),
            ..Default::default()
        };
        assert!(validate_answer(&q, &blank).is_err());

        let ok = SurveyAnswer {
            question: "q1".into(),
            text_answer: Some("Great".into()),
            ..Default::default()
        };
        assert!(validate_answer(&q, &ok).is_ok());
    }

    #[test]
    fn optional_question_accepts_empty_answer() {
        let q = question(QuestionType::Text, false);
        let empty = SurveyAnswer {
            question: "q1".into(),
            ..Default::default()
        };
        assert!(validate_answer(&q, &empty).is_ok());
    }

    #[test]
    fn required_mcq_needs_choice() {
        let q = question(QuestionType::Mcq, true);
        let none = SurveyAnswer {
            question: "q1".into(),
            ..Default::default()
        };
        assert!(validate_answer(&q, &none).is_err());

        let picked = SurveyAnswer {
            question: "q1".into(),
            choice_answer: Some("ch2".into()),
            ..Default::default()
        };
        assert!(validate_answer(&q, &picked).is_ok());
    }

    #[test]
    fn scale_answer_bounds() {
        let q = question(QuestionType::Scale, true);
        for v in SCALE_MIN..=SCALE_MAX {
            let a = SurveyAnswer {
                question: "q1".into(),
                scale_answer: Some(v),
                ..Default::default()
            };
            assert!(validate_answer(&q, &a).is_ok());
        }
        for v in [0, 6, -1] {
            let a = SurveyAnswer {
                question: "q1".into(),
                scale_answer: Some(v),
                ..Default::default()
            };
            assert!(validate_answer(&q, &a).is_err());
        }
    }

    #[test]
    fn answer_serializes_only_populated_field() {
        let a = SurveyAnswer {
            question: "q1".into(),
            scale_answer: Some(4),
            ..Default::default()
        };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["scale_answer"], 4);
        assert!(json.get("text_answer").is_none());
        assert!(json.get("choice_answer").is_none());
    }
}

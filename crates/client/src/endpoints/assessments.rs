//! Assessment endpoints (`/assessments/...`): quiz questions and
//! answers, quiz taking, and module surveys.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use whitebox_core::survey::{Survey, SurveyAnswer, SurveyChoice, SurveyQuestion, SurveyResponse};
use whitebox_core::types::{EntityId, ObjectOrId, Timestamp};

use crate::error::ApiError;
use crate::http::ApiClient;

pub struct AssessmentsApi<'a> {
    pub(crate) client: &'a ApiClient,
}

/// A quiz question under a lesson.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: EntityId,
    pub question_text: String,
    pub question_type: String,
    pub points: i64,
    pub order: i64,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// An answer option under a quiz question.
#[derive(Debug, Clone, Deserialize)]
pub struct Answer {
    pub id: EntityId,
    pub answer_text: String,
    pub is_correct: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A lesson with its questions, ready to take.
#[derive(Debug, Deserialize)]
pub struct Quiz {
    pub lesson: Value,
    pub questions: Vec<Question>,
}

/// Selected answers keyed by question id. Multi-select questions send
/// an array of answer ids.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SelectedAnswer {
    One(EntityId),
    Many(Vec<EntityId>),
}

/// Grading result returned by quiz submission.
#[derive(Debug, Deserialize)]
pub struct QuizAttempt {
    pub attempt_id: EntityId,
    pub score: f64,
    pub passed: bool,
    pub correct_answers: u32,
    pub total_questions: u32,
}

/// One row of the user's past attempts, with the owning lesson,
/// module, and course summarized as nested objects.
#[derive(Debug, Deserialize)]
pub struct UserAttempt {
    pub id: EntityId,
    pub lesson: Value,
    pub score: f64,
    pub passed: bool,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

/// The user-attempts route wraps its map in a status envelope.
#[derive(Debug, Deserialize)]
pub struct UserAttemptsResponse {
    pub status: String,
    pub data: HashMap<String, UserAttempt>,
    pub count: u64,
}

/// A recorded answer within a past attempt.
#[derive(Debug, Deserialize)]
pub struct AttemptResponse {
    pub id: EntityId,
    pub question: ObjectOrId<Question>,
    #[serde(default)]
    pub selected_answer: Option<Value>,
    #[serde(default)]
    pub is_correct: Option<bool>,
}

impl AssessmentsApi<'_> {
    // ---- quiz authoring ----

    pub async fn list_questions(&self, lesson_id: &str) -> Result<Vec<Question>, ApiError> {
        self.client
            .get_list(&format!("/assessments/lessons/{lesson_id}/questions/"))
            .await
    }

    pub async fn create_question(
        &self,
        lesson_id: &str,
        payload: &Value,
    ) -> Result<Question, ApiError> {
        self.client
            .post_json(&format!("/assessments/lessons/{lesson_id}/questions/"), payload)
            .await
    }

    pub async fn update_question(
        &self,
        lesson_id: &str,
        question_id: &str,
        payload: &Value,
    ) -> Result<Question, ApiError> {
        self.client
            .put_json(
                &format!("/assessments/lessons/{lesson_id}/questions/{question_id}/"),
                payload,
            )
            .await
    }

    pub async fn delete_question(&self, lesson_id: &str, question_id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&format!(
                "/assessments/lessons/{lesson_id}/questions/{question_id}/"
            ))
            .await
    }

    pub async fn list_answers(&self, question_id: &str) -> Result<Vec<Answer>, ApiError> {
        self.client
            .get_list(&format!("/assessments/questions/{question_id}/answers/"))
            .await
    }

    pub async fn create_answer(
        &self,
        question_id: &str,
        payload: &Value,
    ) -> Result<Answer, ApiError> {
        self.client
            .post_json(&format!("/assessments/questions/{question_id}/answers/"), payload)
            .await
    }

    pub async fn update_answer(
        &self,
        question_id: &str,
        answer_id: &str,
        payload: &Value,
    ) -> Result<Answer, ApiError> {
        self.client
            .put_json(
                &format!("/assessments/questions/{question_id}/answers/{answer_id}/"),
                payload,
            )
            .await
    }

    pub async fn delete_answer(&self, question_id: &str, answer_id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&format!(
                "/assessments/questions/{question_id}/answers/{answer_id}/"
            ))
            .await
    }

    // ---- quiz taking ----

    pub async fn get_quiz(&self, lesson_id: &str) -> Result<Quiz, ApiError> {
        self.client
            .get_json(&format!("/assessments/lessons/{lesson_id}/quiz/"))
            .await
    }

    pub async fn submit_quiz(
        &self,
        lesson_id: &str,
        answers: &HashMap<EntityId, SelectedAnswer>,
    ) -> Result<QuizAttempt, ApiError> {
        let body = serde_json::json!({ "answers": { "answers": answers } });
        self.client
            .post_json(&format!("/assessments/lessons/{lesson_id}/quiz/"), &body)
            .await
    }

    pub async fn get_user_attempts(&self) -> Result<UserAttemptsResponse, ApiError> {
        self.client.get_json("/assessments/user-attempts/").await
    }

    pub async fn get_attempt_responses(
        &self,
        attempt_id: &str,
    ) -> Result<Vec<AttemptResponse>, ApiError> {
        self.client
            .get_list(&format!("/assessments/user-attempts/{attempt_id}/responses/"))
            .await
    }

    // ---- surveys ----

    pub async fn list_module_surveys(
        &self,
        course_id: &str,
        module_id: &str,
    ) -> Result<Vec<Survey>, ApiError> {
        self.client
            .get_list(&format!("/assessments/{course_id}/modules/{module_id}/survey/"))
            .await
    }

    pub async fn create_module_survey(
        &self,
        course_id: &str,
        module_id: &str,
        payload: &Value,
    ) -> Result<Survey, ApiError> {
        self.client
            .post_json(
                &format!("/assessments/{course_id}/modules/{module_id}/survey/"),
                payload,
            )
            .await
    }

    pub async fn delete_module_survey(
        &self,
        course_id: &str,
        module_id: &str,
        survey_id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&format!(
                "/assessments/{course_id}/modules/{module_id}/survey/{survey_id}/"
            ))
            .await
    }

    pub async fn get_survey(&self, survey_id: &str) -> Result<Survey, ApiError> {
        self.client
            .get_json(&format!("/assessments/surveys/{survey_id}/"))
            .await
    }

    pub async fn list_surveys(&self) -> Result<Vec<Survey>, ApiError> {
        self.client.get_list("/assessments/surveys/").await
    }

    pub async fn list_survey_questions(
        &self,
        survey_id: &str,
    ) -> Result<Vec<SurveyQuestion>, ApiError> {
        self.client
            .get_list(&format!("/assessments/surveys/{survey_id}/questions/"))
            .await
    }

    pub async fn create_survey_question(
        &self,
        survey_id: &str,
        payload: &Value,
    ) -> Result<SurveyQuestion, ApiError> {
        self.client
            .post_json(&format!("/assessments/surveys/{survey_id}/questions/"), payload)
            .await
    }

    pub async fn update_survey_question(
        &self,
        survey_id: &str,
        question_id: &str,
        payload: &Value,
    ) -> Result<SurveyQuestion, ApiError> {
        self.client
            .put_json(
                &format!("/assessments/surveys/{survey_id}/questions/{question_id}/"),
                payload,
            )
            .await
    }

    pub async fn delete_survey_question(
        &self,
        survey_id: &str,
        question_id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&format!(
                "/assessments/surveys/{survey_id}/questions/{question_id}/"
            ))
            .await
    }

    pub async fn create_survey_choice(
        &self,
        question_id: &str,
        payload: &Value,
    ) -> Result<SurveyChoice, ApiError> {
        self.client
            .post_json(
                &format!("/assessments/survey-questions/{question_id}/choices/"),
                payload,
            )
            .await
    }

    pub async fn update_survey_choice(
        &self,
        question_id: &str,
        choice_id: &str,
        payload: &Value,
    ) -> Result<SurveyChoice, ApiError> {
        self.client
            .put_json(
                &format!("/assessments/survey-questions/{question_id}/choices/{choice_id}/"),
                payload,
            )
            .await
    }

    pub async fn delete_survey_choice(
        &self,
        question_id: &str,
        choice_id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&format!(
                "/assessments/survey-questions/{question_id}/choices/{choice_id}/"
            ))
            .await
    }

    /// Submit a full survey response. Each answer serializes only the
    /// field matching its question type
    /// (`whitebox_core::survey::SurveyAnswer`).
    pub async fn submit_survey_response(
        &self,
        survey_id: &str,
        answers: &[SurveyAnswer],
    ) -> Result<SurveyResponse, ApiError> {
        let body = serde_json::json!({ "survey_id": survey_id, "answers": answers });
        self.client
            .post_json("/assessments/survey-responses/", &body)
            .await
    }

    pub async fn list_survey_responses(
        &self,
        survey_id: &str,
    ) -> Result<Vec<SurveyResponse>, ApiError> {
        self.client
            .get_list(&format!("/assessments/surveys/{survey_id}/responses/"))
            .await
    }

    pub async fn get_survey_response(
        &self,
        response_id: &str,
    ) -> Result<SurveyResponse, ApiError> {
        self.client
            .get_json(&format!("/assessments/survey-responses/{response_id}/"))
            .await
    }

    pub async fn list_module_survey_responses(
        &self,
        module_id: &str,
        survey_id: &str,
    ) -> Result<Vec<SurveyResponse>, ApiError> {
        self.client
            .get_list(&format!(
                "/assessments/modules/{module_id}/survey/{survey_id}/responses/"
            ))
            .await
    }
}

//! Survey authoring and learner submission for one module survey.

use whitebox_core::survey::{validate_answer, Survey, SurveyAnswer, SurveyQuestion};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::pages::note_error;

/// State behind the survey manager and the learner survey form.
#[derive(Debug, Default)]
pub struct SurveyManagerPage {
    pub survey: Option<Survey>,
    pub questions: Vec<SurveyQuestion>,
    pub error: Option<String>,
}

impl SurveyManagerPage {
    /// Load the survey and its questions (choices arrive nested under
    /// each MCQ question) in parallel.
    pub async fn load(client: &ApiClient, survey_id: &str) -> Self {
        let assessments = client.assessments();
        let (survey, questions) = tokio::join!(
            assessments.get_survey(survey_id),
            assessments.list_survey_questions(survey_id),
        );

        let mut error = None;
        let survey = note_error(&mut error, survey);
        let mut questions = note_error(&mut error, questions).unwrap_or_default();
        questions.sort_by_key(|q| q.order);

        Self {
            survey,
            questions,
            error,
        }
    }

    pub async fn save_question(
        &mut self,
        client: &ApiClient,
        survey_id: &str,
        question_id: Option<&str>,
        payload: &serde_json::Value,
    ) -> Result<(), ApiError> {
        match question_id {
            Some(id) => {
                client
                    .assessments()
                    .update_survey_question(survey_id, id, payload)
                    .await?;
            }
            None => {
                client
                    .assessments()
                    .create_survey_question(survey_id, payload)
                    .await?;
            }
        }
        self.reload(client, survey_id).await;
        Ok(())
    }

    pub async fn delete_question(
        &mut self,
        client: &ApiClient,
        survey_id: &str,
        question_id: &str,
    ) -> Result<(), ApiError> {
        client
            .assessments()
            .delete_survey_question(survey_id, question_id)
            .await?;
        self.reload(client, survey_id).await;
        Ok(())
    }

    pub async fn save_choice(
        &mut self,
        client: &ApiClient,
        survey_id: &str,
        question_id: &str,
        choice_id: Option<&str>,
        payload: &serde_json::Value,
    ) -> Result<(), ApiError> {
        match choice_id {
            Some(id) => {
                client
                    .assessments()
                    .update_survey_choice(question_id, id, payload)
                    .await?;
            }
            None => {
                client
                    .assessments()
                    .create_survey_choice(question_id, payload)
                    .await?;
            }
        }
        self.reload(client, survey_id).await;
        Ok(())
    }

    pub async fn delete_choice(
        &mut self,
        client: &ApiClient,
        survey_id: &str,
        question_id: &str,
        choice_id: &str,
    ) -> Result<(), ApiError> {
        client
            .assessments()
            .delete_survey_choice(question_id, choice_id)
            .await?;
        self.reload(client, survey_id).await;
        Ok(())
    }

    /// Learner submission: validate every answer against its question
    /// client-side, then submit the whole response in one call.
    pub async fn submit_answers(
        &self,
        client: &ApiClient,
        survey_id: &str,
        answers: &[SurveyAnswer],
    ) -> Result<(), ApiError> {
        validate_answers(&self.questions, answers).map_err(ApiError::Validation)?;
        client
            .assessments()
            .submit_survey_response(survey_id, answers)
            .await?;
        Ok(())
    }

    async fn reload(&mut self, client: &ApiClient, survey_id: &str) {
        let fresh = Self::load(client, survey_id).await;
        self.survey = fresh.survey;
        self.questions = fresh.questions;
        if fresh.error.is_some() {
            self.error = fresh.error;
        }
    }
}

/// Check every answer against its question; required questions must
/// have an answer row. The first failure is the whole message.
pub fn validate_answers(
    questions: &[SurveyQuestion],
    answers: &[SurveyAnswer],
) -> Result<(), String> {
    for question in questions {
        let answer = answers.iter().find(|a| a.question == question.id);
        match answer {
            Some(answer) => validate_answer(question, answer)?,
            None if question.is_required => {
                return Err(format!("Question \"{}\" is required", question.question_text));
            }
            None => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use whitebox_core::survey::QuestionType;

    fn question(id: &str, question_type: QuestionType, is_required: bool) -> SurveyQuestion {
        SurveyQuestion {
            id: id.into(),
            survey: None,
            question_text: format!("Q {id}"),
            question_type,
            is_required,
            order: 1,
            choices: None,
        }
    }

    #[test]
    fn missing_required_answer_is_rejected() {
        let questions = vec![question("q1", QuestionType::Text, true)];
        let result = validate_answers(&questions, &[]);
        assert!(result.unwrap_err().contains("required"));
    }

    #[test]
    fn optional_question_may_be_skipped() {
        let questions = vec![question("q1", QuestionType::Text, false)];
        assert!(validate_answers(&questions, &[]).is_ok());
    }

    #[test]
    fn scale_answer_out_of_range_is_rejected() {
        let questions = vec![question("q1", QuestionType::Scale, true)];
        let answers = vec![SurveyAnswer {
            question: "q1".into(),
            scale_answer: Some(6),
            ..Default::default()
        }];
        assert!(validate_answers(&questions, &answers).is_err());
    }

    #[test]
    fn valid_answers_pass() {
        let questions = vec![
            question("q1", QuestionType::Text, true),
            question("q2", QuestionType::Scale, true),
        ];
        let answers = vec![
            SurveyAnswer {
                question: "q1".into(),
                text_answer: Some("fine".into()),
                ..Default::default()
            },
            SurveyAnswer {
                question: "q2".into(),
                scale_answer: Some(4),
                ..Default::default()
            },
        ];
        assert!(validate_answers(&questions, &answers).is_ok());
    }
}

//! Course catalog endpoints (`/courses/...`): courses, modules,
//! lessons, sections, progress, enrollments, and categories.

use serde::Deserialize;
use serde_json::Value;

use whitebox_core::course::{Category, Course};
use whitebox_core::lesson::{Lesson, Section};
use whitebox_core::module::Module;
use whitebox_core::progress::{CourseProgress, UserProgress};

use crate::error::ApiError;
use crate::http::{ApiClient, FilePart};

pub struct CoursesApi<'a> {
    pub(crate) client: &'a ApiClient,
}

/// A lesson with its sections inlined, as returned by the
/// `lessons-with-sections` route.
#[derive(Debug, Deserialize)]
pub struct LessonWithSections {
    #[serde(flatten)]
    pub lesson: Lesson,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub has_quiz: bool,
}

#[derive(Debug, Deserialize)]
pub struct ModuleCompletion {
    pub is_completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct EnrollmentStatus {
    pub enrolled: bool,
}

#[derive(Debug, Deserialize)]
pub struct EnrollResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserEnrollment {
    pub course_id: String,
    pub course_title: String,
}

#[derive(Debug, Deserialize)]
pub struct TotalEnrollments {
    pub total_enrollments: u64,
}

#[derive(Debug, Deserialize)]
pub struct CourseEnrollments {
    pub course_id: String,
    pub course_title: String,
    pub enrollment_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct CourseCompletionRate {
    pub course_id: String,
    pub course_title: String,
    pub enrollments: u64,
    pub completions: u64,
    pub completion_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct CompletionRates {
    pub overall_completion_rate: f64,
    pub courses: Vec<CourseCompletionRate>,
}

impl CoursesApi<'_> {
    // ---- courses ----

    pub async fn list(&self) -> Result<Vec<Course>, ApiError> {
        self.client.get_list("/courses/").await
    }

    pub async fn get(&self, id: &str) -> Result<Course, ApiError> {
        self.client.get_json(&format!("/courses/{id}/")).await
    }

    pub async fn create(&self, payload: &Value) -> Result<Course, ApiError> {
        self.client.post_json("/courses/", payload).await
    }

    pub async fn update(&self, id: &str, payload: &Value) -> Result<Course, ApiError> {
        self.client
            .put_json(&format!("/courses/{id}/"), payload)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/courses/{id}/")).await
    }

    // ---- review workflow ----

    pub async fn approve(&self, id: &str) -> Result<Course, ApiError> {
        self.client
            .post_empty_json(&format!("/courses/approve/{id}/"))
            .await
    }

    pub async fn reject(&self, id: &str, reason: &str) -> Result<Course, ApiError> {
        let body = serde_json::json!({ "reason": reason });
        self.client
            .post_json(&format!("/courses/reject/{id}/"), &body)
            .await
    }

    pub async fn publish(&self, id: &str) -> Result<Course, ApiError> {
        self.client
            .post_empty_json(&format!("/courses/publish/{id}/"))
            .await
    }

    // ---- modules ----

    pub async fn list_modules(&self, course_id: &str) -> Result<Vec<Module>, ApiError> {
        self.client
            .get_list(&format!("/courses/{course_id}/modules/"))
            .await
    }

    pub async fn get_module(&self, course_id: &str, module_id: &str) -> Result<Module, ApiError> {
        self.client
            .get_json(&format!("/courses/{course_id}/modules/{module_id}/"))
            .await
    }

    pub async fn create_module(
        &self,
        course_id: &str,
        payload: &Value,
    ) -> Result<Module, ApiError> {
        self.client
            .post_json(&format!("/courses/{course_id}/modules/"), payload)
            .await
    }

    pub async fn update_module(
        &self,
        course_id: &str,
        module_id: &str,
        payload: &Value,
    ) -> Result<Module, ApiError> {
        self.client
            .put_json(
                &format!("/courses/{course_id}/modules/{module_id}/"),
                payload,
            )
            .await
    }

    pub async fn delete_module(&self, course_id: &str, module_id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/courses/{course_id}/modules/{module_id}/"))
            .await
    }

    // ---- lessons ----

    pub async fn list_lessons(
        &self,
        course_id: &str,
        module_id: &str,
    ) -> Result<Vec<Lesson>, ApiError> {
        self.client
            .get_list(&format!(
                "/courses/{course_id}/modules/{module_id}/lessons/"
            ))
            .await
    }

    pub async fn get_lesson(
        &self,
        course_id: &str,
        module_id: &str,
        lesson_id: &str,
    ) -> Result<Lesson, ApiError> {
        self.client
            .get_json(&format!(
                "/courses/{course_id}/modules/{module_id}/lessons/{lesson_id}/"
            ))
            .await
    }

    /// Lesson create. File-bearing lessons go over multipart; the
    /// field list comes from `whitebox_core::forms::multipart_fields`.
    pub async fn create_lesson(
        &self,
        course_id: &str,
        module_id: &str,
        fields: Vec<(String, String)>,
        file: Option<FilePart>,
    ) -> Result<Lesson, ApiError> {
        self.client
            .post_multipart(
                &format!("/courses/{course_id}/modules/{module_id}/lessons/"),
                fields,
                file,
            )
            .await
    }

    pub async fn update_lesson(
        &self,
        course_id: &str,
        module_id: &str,
        lesson_id: &str,
        fields: Vec<(String, String)>,
        file: Option<FilePart>,
    ) -> Result<Lesson, ApiError> {
        self.client
            .put_multipart(
                &format!("/courses/{course_id}/modules/{module_id}/lessons/{lesson_id}/"),
                fields,
                file,
            )
            .await
    }

    pub async fn delete_lesson(
        &self,
        course_id: &str,
        module_id: &str,
        lesson_id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&format!(
                "/courses/{course_id}/modules/{module_id}/lessons/{lesson_id}/"
            ))
            .await
    }

    // ---- sections ----

    pub async fn list_lessons_with_sections(
        &self,
        course_id: &str,
        module_id: &str,
    ) -> Result<Vec<LessonWithSections>, ApiError> {
        self.client
            .get_list(&format!(
                "/courses/{course_id}/modules/{module_id}/lessons-with-sections/"
            ))
            .await
    }

    pub async fn list_sections(
        &self,
        course_id: &str,
        module_id: &str,
        lesson_id: &str,
    ) -> Result<Vec<Section>, ApiError> {
        self.client
            .get_list(&format!(
                "/courses/{course_id}/modules/{module_id}/lessons/{lesson_id}/sections/"
            ))
            .await
    }

    pub async fn create_section(
        &self,
        course_id: &str,
        module_id: &str,
        lesson_id: &str,
        payload: &Value,
    ) -> Result<Section, ApiError> {
        self.client
            .post_json(
                &format!("/courses/{course_id}/modules/{module_id}/lessons/{lesson_id}/sections/"),
                payload,
            )
            .await
    }

    pub async fn update_section(
        &self,
        course_id: &str,
        module_id: &str,
        lesson_id: &str,
        section_id: &str,
        payload: &Value,
    ) -> Result<Section, ApiError> {
        self.client
            .put_json(
                &format!(
                    "/courses/{course_id}/modules/{module_id}/lessons/{lesson_id}/sections/{section_id}/"
                ),
                payload,
            )
            .await
    }

    pub async fn delete_section(
        &self,
        course_id: &str,
        module_id: &str,
        lesson_id: &str,
        section_id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&format!(
                "/courses/{course_id}/modules/{module_id}/lessons/{lesson_id}/sections/{section_id}/"
            ))
            .await
    }

    // ---- progress ----

    pub async fn get_module_progress(
        &self,
        module_id: &str,
    ) -> Result<ModuleCompletion, ApiError> {
        self.client
            .get_json(&format!(
                "/courses/module-progress/get_progress/?module_id={module_id}"
            ))
            .await
    }

    pub async fn mark_module_completed(
        &self,
        module_id: &str,
    ) -> Result<ModuleCompletion, ApiError> {
        let body = serde_json::json!({ "module_id": module_id });
        self.client
            .post_json("/courses/module-progress/mark-completed/", &body)
            .await
    }

    pub async fn get_user_progress(&self) -> Result<Vec<UserProgress>, ApiError> {
        self.client.get_list("/courses/user/progress/all/").await
    }

    pub async fn toggle_lesson_completion(
        &self,
        lesson_id: &str,
    ) -> Result<UserProgress, ApiError> {
        let body = serde_json::json!({ "lesson": lesson_id });
        self.client
            .post_json("/courses/user/progress/toggle/", &body)
            .await
    }

    pub async fn get_course_progress(
        &self,
        course_id: &str,
    ) -> Result<CourseProgress, ApiError> {
        self.client
            .get_json(&format!("/courses/user/progress/course/{course_id}/"))
            .await
    }

    // ---- enrollment ----

    pub async fn check_enrollment(&self, course_id: &str) -> Result<EnrollmentStatus, ApiError> {
        self.client
            .get_json(&format!("/courses/{course_id}/enrollment/"))
            .await
    }

    pub async fn enroll(&self, course_id: &str) -> Result<EnrollResponse, ApiError> {
        self.client
            .post_empty_json(&format!("/courses/{course_id}/enroll/"))
            .await
    }

    pub async fn get_user_enrollments(&self) -> Result<Vec<UserEnrollment>, ApiError> {
        self.client.get_list("/courses/user/enrollments/").await
    }

    pub async fn get_total_enrollments(&self) -> Result<TotalEnrollments, ApiError> {
        self.client.get_json("/courses/enrollments/total/").await
    }

    pub async fn get_course_enrollments(
        &self,
        course_id: &str,
    ) -> Result<CourseEnrollments, ApiError> {
        self.client
            .get_json(&format!("/courses/{course_id}/enrollments/"))
            .await
    }

    pub async fn get_completion_rates(&self) -> Result<CompletionRates, ApiError> {
        self.client.get_json("/courses/completion-rates/").await
    }

    // ---- categories ----

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client.get_list("/courses/categories/").await
    }

    pub async fn get_category(&self, id: &str) -> Result<Category, ApiError> {
        self.client
            .get_json(&format!("/courses/categories/{id}/"))
            .await
    }

    pub async fn create_category(&self, payload: &Value) -> Result<Category, ApiError> {
        self.client.post_json("/courses/categories/", payload).await
    }

    pub async fn update_category(&self, id: &str, payload: &Value) -> Result<Category, ApiError> {
        self.client
            .put_json(&format!("/courses/categories/{id}/"), payload)
            .await
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/courses/categories/{id}/"))
            .await
    }
}

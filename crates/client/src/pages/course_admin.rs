//! Admin course table: listing with per-course module counts, the
//! publish guard, the review workflow actions, and course CRUD.

use std::collections::HashMap;

use futures::future::join_all;

use whitebox_core::course::{can_publish, Course};
use whitebox_core::forms::{course_create_payload, course_update_payload, CourseDraft};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::pages::note_error;

/// State behind the admin course table.
#[derive(Debug, Default)]
pub struct CourseAdminPage {
    pub courses: Vec<Course>,
    /// Module count per course id, for the publish guard.
    pub module_counts: HashMap<String, usize>,
    pub error: Option<String>,
}

impl CourseAdminPage {
    /// Load the table: the course list, then a module-count fan-out
    /// per course. A failed count reads as zero, which keeps the
    /// publish button disabled for that course.
    pub async fn load(client: &ApiClient) -> Self {
        let mut error = None;
        let courses = note_error(&mut error, client.courses().list().await).unwrap_or_default();

        let counts = join_all(courses.iter().map(|course| async move {
            let count = match client.courses().list_modules(&course.id).await {
                Ok(modules) => modules.len(),
                Err(error) => {
                    tracing::warn!(course_id = %course.id, %error, "module count failed");
                    0
                }
            };
            (course.id.clone(), count)
        }))
        .await;

        Self {
            courses,
            module_counts: counts.into_iter().collect(),
            error,
        }
    }

    /// Whether the publish action is enabled for a course.
    pub fn can_publish(&self, course_id: &str) -> bool {
        can_publish(self.module_counts.get(course_id).copied().unwrap_or(0))
    }

    /// Create a course. Status is forced to DRAFT by the payload
    /// shaping; the table is reloaded on success.
    pub async fn create_course(
        &mut self,
        client: &ApiClient,
        draft: &CourseDraft,
    ) -> Result<(), ApiError> {
        let payload = course_create_payload(draft);
        client.courses().create(&payload).await?;
        self.reload(client).await;
        Ok(())
    }

    pub async fn update_course(
        &mut self,
        client: &ApiClient,
        course_id: &str,
        draft: &CourseDraft,
    ) -> Result<(), ApiError> {
        let payload = course_update_payload(draft);
        client.courses().update(course_id, &payload).await?;
        self.reload(client).await;
        Ok(())
    }

    /// Delete a course. The row is removed locally on success; no
    /// refetch (the rest of the table is unaffected).
    pub async fn delete_course(
        &mut self,
        client: &ApiClient,
        course_id: &str,
    ) -> Result<(), ApiError> {
        client.courses().delete(course_id).await?;
        self.courses.retain(|c| c.id != course_id);
        self.module_counts.remove(course_id);
        Ok(())
    }

    pub async fn publish_course(
        &mut self,
        client: &ApiClient,
        course_id: &str,
    ) -> Result<(), ApiError> {
        client.courses().publish(course_id).await?;
        self.reload(client).await;
        Ok(())
    }

    pub async fn approve_course(
        &mut self,
        client: &ApiClient,
        course_id: &str,
    ) -> Result<(), ApiError> {
        client.courses().approve(course_id).await?;
        self.reload(client).await;
        Ok(())
    }

    pub async fn reject_course(
        &mut self,
        client: &ApiClient,
        course_id: &str,
        reason: &str,
    ) -> Result<(), ApiError> {
        client.courses().reject(course_id, reason).await?;
        self.reload(client).await;
        Ok(())
    }

    async fn reload(&mut self, client: &ApiClient) {
        let fresh = Self::load(client).await;
        self.courses = fresh.courses;
        self.module_counts = fresh.module_counts;
        // A reload error replaces the page error only if one occurred.
        if fresh.error.is_some() {
            self.error = fresh.error;
        }
    }
}

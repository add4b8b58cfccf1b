//! Learner course overview: module list with locks, progress bar,
//! and the continue target.

use futures::future::join_all;

use whitebox_core::course::Course;
use whitebox_core::module::{
    completion_summary, continue_target, is_module_locked, Module, ModuleProgress,
};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::pages::note_error;

/// Everything the course overview renders.
#[derive(Debug, Default)]
pub struct CourseOverview {
    pub course: Option<Course>,
    pub modules: Vec<Module>,
    pub progress: ModuleProgress,
    pub enrolled: bool,
    pub error: Option<String>,
}

impl CourseOverview {
    /// Load the page: course, modules, and enrollment in parallel,
    /// then per-module completion fan-out once the module list is in.
    pub async fn load(client: &ApiClient, course_id: &str) -> Self {
        let courses = client.courses();
        let (course, modules, enrollment) = tokio::join!(
            courses.get(course_id),
            courses.list_modules(course_id),
            courses.check_enrollment(course_id),
        );

        let mut error = None;
        let course = note_error(&mut error, course);
        let modules = note_error(&mut error, modules).unwrap_or_default();
        let enrolled = note_error(&mut error, enrollment)
            .map(|e| e.enrolled)
            .unwrap_or(false);

        let progress = fetch_module_progress(client, &modules).await;

        Self {
            course,
            modules,
            progress,
            enrolled,
            error,
        }
    }

    /// Whether a module is locked for this learner.
    pub fn is_locked(&self, module: &Module) -> bool {
        is_module_locked(module, &self.modules, &self.progress)
    }

    /// Module the "continue" button should open.
    pub fn continue_module(&self) -> Option<&Module> {
        continue_target(&self.modules, &self.progress)
    }

    /// (completed, total, percentage) for the progress bar.
    pub fn completion(&self) -> (usize, usize, u8) {
        completion_summary(&self.modules, &self.progress)
    }

    /// Enroll, then re-check enrollment state.
    pub async fn enroll(&mut self, client: &ApiClient, course_id: &str) -> Result<(), ApiError> {
        client.courses().enroll(course_id).await?;
        self.enrolled = client.courses().check_enrollment(course_id).await?.enrolled;
        Ok(())
    }

    /// Mark a module completed and refresh the per-module progress.
    pub async fn mark_module_completed(
        &mut self,
        client: &ApiClient,
        module_id: &str,
    ) -> Result<(), ApiError> {
        client.courses().mark_module_completed(module_id).await?;
        self.progress = fetch_module_progress(client, &self.modules).await;
        Ok(())
    }
}

/// Per-module completion fan-out. A failed check reads as incomplete;
/// the module stays locked rather than failing the page.
async fn fetch_module_progress(client: &ApiClient, modules: &[Module]) -> ModuleProgress {
    let checks = join_all(
        modules
            .iter()
            .map(|m| async move { (m.id.clone(), client.courses().get_module_progress(&m.id).await) }),
    )
    .await;

    let mut completed_modules = Vec::new();
    for (module_id, result) in checks {
        match result {
            Ok(completion) if completion.is_completed => completed_modules.push(module_id),
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(%module_id, %error, "module progress check failed");
            }
        }
    }
    ModuleProgress { completed_modules }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whitebox_core::course::CourseStatus;

    fn module(id: &str, order: i64) -> Module {
        Module {
            id: id.into(),
            course: None,
            title: format!("Module {order}"),
            description: String::new(),
            order,
            created_at: None,
        }
    }

    fn overview(modules: Vec<Module>, completed: &[&str]) -> CourseOverview {
        CourseOverview {
            course: Some(Course {
                id: "c1".into(),
                title: "Course".into(),
                description: String::new(),
                category: None,
                status: CourseStatus::Published,
                thumbnail: None,
                created_by: None,
                duration_hours: None,
                is_featured: false,
                created_at: None,
                published_at: None,
            }),
            modules,
            progress: ModuleProgress {
                completed_modules: completed.iter().map(|s| s.to_string()).collect(),
            },
            enrolled: true,
            error: None,
        }
    }

    #[test]
    fn first_module_is_open_rest_follow_completion() {
        let page = overview(
            vec![module("m1", 1), module("m2", 2), module("m3", 3)],
            &["m1"],
        );
        assert!(!page.is_locked(&page.modules[0]));
        assert!(!page.is_locked(&page.modules[1]));
        assert!(page.is_locked(&page.modules[2]));
    }

    #[test]
    fn continue_button_targets_first_incomplete() {
        let page = overview(vec![module("m1", 1), module("m2", 2)], &["m1"]);
        assert_eq!(page.continue_module().map(|m| m.id.as_str()), Some("m2"));
    }

    #[test]
    fn completion_summary_feeds_progress_bar() {
        let page = overview(vec![module("m1", 1), module("m2", 2)], &["m1"]);
        assert_eq!(page.completion(), (1, 2, 50));
    }
}

//! Typed wrappers around the REST surface, one module per backend
//! app. Each group is reached through an accessor on
//! [`ApiClient`](crate::ApiClient), e.g. `client.courses().list()`.
//!
//! Methods map one-to-one onto backend routes and stay thin: payload
//! shaping happens in `whitebox_core::forms`, multi-request assembly
//! in [`crate::pages`].

pub mod assessments;
pub mod certificates;
pub mod courses;
pub mod notifications;
pub mod users;

pub use assessments::AssessmentsApi;
pub use certificates::CertificatesApi;
pub use courses::CoursesApi;
pub use notifications::NotificationsApi;
pub use users::UsersApi;

use crate::http::ApiClient;

impl ApiClient {
    /// Auth and user management endpoints.
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }

    /// Courses, modules, lessons, sections, progress, enrollments,
    /// and categories.
    pub fn courses(&self) -> CoursesApi<'_> {
        CoursesApi { client: self }
    }

    /// Quizzes and surveys.
    pub fn assessments(&self) -> AssessmentsApi<'_> {
        AssessmentsApi { client: self }
    }

    /// Completion certificates.
    pub fn certificates(&self) -> CertificatesApi<'_> {
        CertificatesApi { client: self }
    }

    /// Notifications and notification preferences.
    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi { client: self }
    }
}

//! Page-level read models and the mutations that refresh them.
//!
//! Each module here backs one UI surface: it fans out the initial
//! reads (parallel where independent, per-item after a parent list),
//! folds the results into a renderable state struct, and wraps the
//! page's mutations with their refetch rules. Derived computations
//! stay in `whitebox-core`; these modules only sequence I/O.
//!
//! Error policy: the first failure is kept as the page error, but data
//! that did resolve still populates the state.

pub mod category_admin;
pub mod certificate_list;
pub mod course_admin;
pub mod course_overview;
pub mod lesson_manager;
pub mod survey_manager;

use crate::error::ApiError;

/// Fold one fetch result into a page: keep the value, or record the
/// first error seen.
pub(crate) fn note_error<T>(error: &mut Option<String>, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            if error.is_none() {
                *error = Some(e.to_string());
            }
            None
        }
    }
}

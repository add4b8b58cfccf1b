//! Category administration, including the linked-course delete guard.

use whitebox_core::course::{linked_courses, Category};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::pages::note_error;

/// State behind the category table.
#[derive(Debug, Default)]
pub struct CategoryAdminPage {
    pub categories: Vec<Category>,
    pub error: Option<String>,
}

/// Outcome of a non-forced delete attempt.
#[derive(Debug)]
pub enum CategoryDeleteOutcome {
    Deleted,
    /// Courses still reference the category; nothing was deleted.
    /// The titles feed the warning dialog.
    Blocked { linked_titles: Vec<String> },
}

impl CategoryAdminPage {
    pub async fn load(client: &ApiClient) -> Self {
        let mut error = None;
        let categories =
            note_error(&mut error, client.courses().list_categories().await).unwrap_or_default();
        Self { categories, error }
    }

    pub async fn create_category(
        &mut self,
        client: &ApiClient,
        payload: &serde_json::Value,
    ) -> Result<(), ApiError> {
        client.courses().create_category(payload).await?;
        self.reload(client).await;
        Ok(())
    }

    pub async fn update_category(
        &mut self,
        client: &ApiClient,
        category_id: &str,
        payload: &serde_json::Value,
    ) -> Result<(), ApiError> {
        client.courses().update_category(category_id, payload).await?;
        self.reload(client).await;
        Ok(())
    }

    /// Guarded delete: fetch the full course list and block when any
    /// course still references the category, returning the linked
    /// titles for the warning. Only an empty match list proceeds.
    pub async fn delete_category(
        &mut self,
        client: &ApiClient,
        category_id: &str,
    ) -> Result<CategoryDeleteOutcome, ApiError> {
        let courses = client.courses().list().await?;
        let linked = linked_courses(&courses, category_id);
        if !linked.is_empty() {
            tracing::info!(
                %category_id,
                linked = linked.len(),
                "category delete blocked by linked courses"
            );
            return Ok(CategoryDeleteOutcome::Blocked {
                linked_titles: linked.iter().map(|c| c.title.clone()).collect(),
            });
        }
        client.courses().delete_category(category_id).await?;
        self.reload(client).await;
        Ok(CategoryDeleteOutcome::Deleted)
    }

    /// Forced delete after the user confirmed the cascade warning.
    /// Issues exactly the delete call.
    pub async fn force_delete_category(
        &mut self,
        client: &ApiClient,
        category_id: &str,
    ) -> Result<(), ApiError> {
        client.courses().delete_category(category_id).await?;
        self.reload(client).await;
        Ok(())
    }

    async fn reload(&mut self, client: &ApiClient) {
        let fresh = Self::load(client).await;
        self.categories = fresh.categories;
        if fresh.error.is_some() {
            self.error = fresh.error;
        }
    }
}

/// Warning text listing every course still linked to the category.
pub fn category_delete_warning(category_name: &str, linked_titles: &[String]) -> String {
    let mut lines = vec![format!(
        "\"{category_name}\" is still used by {} course(s):",
        linked_titles.len()
    )];
    for title in linked_titles {
        lines.push(format!("  - {title}"));
    }
    lines.push("Deleting it will leave those courses uncategorized.".to_string());
    lines.join("\n")
}

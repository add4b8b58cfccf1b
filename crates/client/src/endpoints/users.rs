//! Auth and user management endpoints (`/auth/...`).

use serde::Deserialize;
use serde_json::{json, Value};

use whitebox_core::user::User;

use crate::error::ApiError;
use crate::http::{ApiClient, FilePart, ListEnvelope};

pub struct UsersApi<'a> {
    pub(crate) client: &'a ApiClient,
}

/// Tokens and profile returned by login and registration.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub access: String,
    pub refresh: String,
    /// Set for provisioned accounts that must rotate their initial
    /// password before proceeding.
    #[serde(default)]
    pub requires_password_change: bool,
}

/// Response from the refresh-token exchange.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct ProfileImageResponse {
    pub profile_image_url: String,
}

impl UsersApi<'_> {
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = json!({ "email": email, "password": password });
        self.client.post_json("/auth/login/", &body).await
    }

    pub async fn register(&self, payload: &Value) -> Result<AuthResponse, ApiError> {
        self.client.post_json("/auth/register/", payload).await
    }

    /// Profile of the authenticated user. A 401 here is the signal
    /// that the access token has expired.
    pub async fn get_profile(&self) -> Result<User, ApiError> {
        self.client.get_json("/auth/profile/").await
    }

    pub async fn refresh_token(&self, refresh: &str) -> Result<RefreshResponse, ApiError> {
        let body = json!({ "refresh": refresh });
        self.client.post_json("/auth/token/refresh/", &body).await
    }

    pub async fn verify_email(&self, token: &str) -> Result<MessageResponse, ApiError> {
        self.client
            .get_json(&format!("/auth/verify-email/{token}/"))
            .await
    }

    pub async fn resend_verification_email(&self) -> Result<MessageResponse, ApiError> {
        self.client
            .post_empty_json("/auth/resend-verification-email/")
            .await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let body = json!({ "email": email });
        self.client
            .post_json("/auth/request-password-reset/", &body)
            .await
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = json!({ "new_password": new_password });
        self.client
            .post_json(&format!("/auth/reset-password/{token}/"), &body)
            .await
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = json!({ "old_password": old_password, "new_password": new_password });
        self.client.put_json("/auth/change-password/", &body).await
    }

    pub async fn upload_profile_image(
        &self,
        file: FilePart,
    ) -> Result<ProfileImageResponse, ApiError> {
        self.client
            .post_multipart("/auth/profile/image/", Vec::new(), Some(file))
            .await
    }

    // ---- admin user management ----

    pub async fn get_all_users(&self) -> Result<Vec<User>, ApiError> {
        self.client.get_list("/auth/users/").await
    }

    /// Paginated learner listing with server-side search.
    pub async fn get_learners(
        &self,
        page: u32,
        page_size: u32,
        search: &str,
    ) -> Result<ListEnvelope<User>, ApiError> {
        let body = self
            .client
            .get_json(&format!(
                "/auth/users/learners/?page={page}&page_size={page_size}&search={search}"
            ))
            .await?;
        Ok(ListEnvelope::from_value(body)?)
    }

    pub async fn get_non_learners(&self) -> Result<Vec<User>, ApiError> {
        self.client.get_list("/auth/users/non-learners/").await
    }

    pub async fn get_learners_count(&self) -> Result<CountResponse, ApiError> {
        self.client.get_json("/auth/learners/count/").await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        self.client.get_json(&format!("/auth/users/{id}/")).await
    }

    pub async fn update_user(&self, id: &str, payload: &Value) -> Result<User, ApiError> {
        self.client
            .put_json(&format!("/auth/users/update/{id}/"), payload)
            .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/auth/users/delete/{id}/"))
            .await
    }
}

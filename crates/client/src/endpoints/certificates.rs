//! Certificate endpoints (`/certificates/...`).

use serde::Deserialize;

use whitebox_core::certificate::Certificate;

use crate::error::ApiError;
use crate::http::ApiClient;

pub struct CertificatesApi<'a> {
    pub(crate) client: &'a ApiClient,
}

#[derive(Debug, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(default)]
    pub certificate: Option<Certificate>,
}

impl CertificatesApi<'_> {
    pub async fn list_user_certificates(&self) -> Result<Vec<Certificate>, ApiError> {
        self.client.get_list("/certificates/user/").await
    }

    pub async fn list_for_course(&self, course_id: &str) -> Result<Vec<Certificate>, ApiError> {
        self.client
            .get_list(&format!("/certificates/user/?course_id={course_id}"))
            .await
    }

    /// Ask the backend to issue a certificate for a completed course.
    pub async fn generate(&self, course_id: &str) -> Result<Certificate, ApiError> {
        self.client
            .post_empty_json(&format!("/certificates/generate/{course_id}/"))
            .await
    }

    /// Public verification by certificate number.
    pub async fn verify(&self, certificate_number: &str) -> Result<VerifyResponse, ApiError> {
        self.client
            .get_json(&format!("/certificates/verify/{certificate_number}/"))
            .await
    }
}

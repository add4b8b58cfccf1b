//! Learner certificate list and public verification lookup.

use whitebox_core::certificate::{validate_certificate_number, Certificate};

use crate::endpoints::certificates::VerifyResponse;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::pages::note_error;

#[derive(Debug, Default)]
pub struct CertificateListPage {
    pub certificates: Vec<Certificate>,
    pub error: Option<String>,
}

impl CertificateListPage {
    pub async fn load(client: &ApiClient) -> Self {
        let mut error = None;
        let certificates = note_error(
            &mut error,
            client.certificates().list_user_certificates().await,
        )
        .unwrap_or_default();
        Self {
            certificates,
            error,
        }
    }

    /// Request a certificate for a completed course, then reload.
    pub async fn generate(&mut self, client: &ApiClient, course_id: &str) -> Result<(), ApiError> {
        client.certificates().generate(course_id).await?;
        let fresh = Self::load(client).await;
        self.certificates = fresh.certificates;
        if fresh.error.is_some() {
            self.error = fresh.error;
        }
        Ok(())
    }
}

/// Public verification: the number is validated client-side before
/// the lookup goes out.
pub async fn verify_certificate(
    client: &ApiClient,
    certificate_number: &str,
) -> Result<VerifyResponse, ApiError> {
    validate_certificate_number(certificate_number).map_err(ApiError::Validation)?;
    client.certificates().verify(certificate_number).await
}

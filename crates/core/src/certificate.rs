//! Course-completion certificates.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// A certificate issued for completing a course. `user` and `course`
/// arrive as nested summary objects; the client only reads from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: EntityId,
    pub user: serde_json::Value,
    pub course: serde_json::Value,
    /// Verification key printed on the PDF.
    pub certificate_number: String,
    #[serde(default)]
    pub issued_date: Option<String>,
    #[serde(default)]
    pub pdf_file: Option<String>,
    #[serde(default)]
    pub verification_url: Option<String>,
}

impl Certificate {
    /// Title of the certified course, when the summary carries one.
    pub fn course_title(&self) -> Option<&str> {
        self.course.get("title").and_then(|v| v.as_str())
    }
}

/// Validate a certificate number before hitting the verify endpoint.
pub fn validate_certificate_number(number: &str) -> Result<(), String> {
    let trimmed = number.trim();
    if trimmed.is_empty() {
        return Err("Certificate number must not be empty".to_string());
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(format!("Invalid certificate number '{trimmed}'"));
    }
    Ok(())
}

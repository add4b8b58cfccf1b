//! Low-level HTTP plumbing shared by every endpoint group.
//!
//! [`ApiClient`] owns the [`reqwest::Client`], the base URL, and the
//! token store. Endpoint methods (see [`crate::endpoints`]) build on
//! the verb helpers here; all of them funnel responses through the
//! same success check and error-message extraction.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{extract_error_message, ApiError};
use crate::token::TokenStore;

/// HTTP client for the Whitebox API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

/// List responses arrive either paginated (`{count, results: [...]}`)
/// or as a bare array, depending on the endpoint. Decode both and
/// normalize with [`into_items`](Self::into_items).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Paginated {
        #[serde(default)]
        count: Option<u64>,
        results: Vec<T>,
    },
    Plain(Vec<T>),
}

impl<T: DeserializeOwned> ListEnvelope<T> {
    /// Decode a list body of either shape. Bodies that are not
    /// list-shaped at all (null, an empty body, an object without
    /// `results`) normalize to an empty list; a recognizable list
    /// whose items fail to decode is still an error.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let list_shaped = value.is_array()
            || value
                .as_object()
                .is_some_and(|body| body.contains_key("results"));
        if !list_shaped {
            return Ok(ListEnvelope::Plain(Vec::new()));
        }
        serde_json::from_value(value)
    }
}

impl<T> ListEnvelope<T> {
    /// The items, regardless of which shape the backend chose.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Paginated { results, .. } => results,
            ListEnvelope::Plain(items) => items,
        }
    }

    /// Total count reported by a paginated response, when present.
    pub fn count(&self) -> Option<u64> {
        match self {
            ListEnvelope::Paginated { count, .. } => *count,
            ListEnvelope::Plain(_) => None,
        }
    }
}

impl ApiClient {
    /// Create a new client from configuration.
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
            tokens,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: String,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            client,
            base_url,
            tokens,
        }
    }

    /// Base API URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token store backing this client.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    // ---- verb helpers ----

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.client.get(self.url(path))).await?;
        Self::parse_response(response).await
    }

    /// GET a list endpoint and normalize the envelope.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, ApiError> {
        let body: Value = self.get_json(path).await?;
        Ok(ListEnvelope::from_value(body)?.into_items())
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.client.post(self.url(path)).json(body))
            .await?;
        Self::parse_response(response).await
    }

    /// POST with no request body, returning the decoded response.
    pub(crate) async fn post_empty_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(self.client.post(self.url(path))).await?;
        Self::parse_response(response).await
    }

    /// POST with no request body, discarding the response body.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.post(self.url(path))).await?;
        Self::check_status(response).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.client.put(self.url(path)).json(body))
            .await?;
        Self::parse_response(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.delete(self.url(path))).await?;
        Self::check_status(response).await
    }

    /// POST a multipart form: text fields from the payload shaping
    /// layer plus an optional file part.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        file: Option<FilePart>,
    ) -> Result<T, ApiError> {
        let form = Self::build_form(fields, file)?;
        let response = self
            .send(self.client.post(self.url(path)).multipart(form))
            .await?;
        Self::parse_response(response).await
    }

    pub(crate) async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        file: Option<FilePart>,
    ) -> Result<T, ApiError> {
        let form = Self::build_form(fields, file)?;
        let response = self
            .send(self.client.put(self.url(path)).multipart(form))
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn build_form(
        fields: Vec<(String, String)>,
        file: Option<FilePart>,
    ) -> Result<reqwest::multipart::Form, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for (key, value) in fields {
            form = form.text(key, value);
        }
        if let Some(file) = file {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime_type)?;
            form = form.part(file.field_name, part);
        }
        Ok(form)
    }

    /// Attach the bearer token (when present) and send.
    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let builder = match self.tokens.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        Ok(builder.send().await?)
    }

    /// Ensure the response has a success status code. On failure, read
    /// the body and extract a display message from it.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body: Value = match response.text().await {
                Ok(text) => serde_json::from_str(&text).unwrap_or(Value::Null),
                Err(_) => Value::Null,
            };
            let message = extract_error_message(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), %message, "API request rejected");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    /// Empty bodies (204, or 200 with no content) decode as JSON null
    /// so endpoints returning `()` or `Option<_>` still succeed.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        if text.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// A file to attach to a multipart submission.
pub struct FilePart {
    /// Form field name, e.g. `video_file`.
    pub field_name: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn list_envelope_decodes_paginated_shape() {
        let value = json!({ "count": 2, "results": [{ "id": "a" }, { "id": "b" }] });
        let envelope: ListEnvelope<Item> = serde_json::from_value(value).unwrap();
        assert_eq!(envelope.count(), Some(2));
        let items = envelope.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "a");
    }

    #[test]
    fn list_envelope_decodes_bare_array() {
        let value = json!([{ "id": "x" }]);
        let envelope: ListEnvelope<Item> = serde_json::from_value(value).unwrap();
        assert_eq!(envelope.count(), None);
        assert_eq!(envelope.into_items()[0].id, "x");
    }

    #[test]
    fn empty_results_still_decode() {
        let value = json!({ "count": 0, "results": [] });
        let envelope: ListEnvelope<Item> = serde_json::from_value(value).unwrap();
        assert!(envelope.into_items().is_empty());
    }

    #[test]
    fn null_body_normalizes_to_empty_list() {
        let envelope = ListEnvelope::<Item>::from_value(Value::Null).unwrap();
        assert!(envelope.into_items().is_empty());
    }

    #[test]
    fn object_without_results_normalizes_to_empty_list() {
        let value = json!({ "detail": "maintenance" });
        let envelope = ListEnvelope::<Item>::from_value(value).unwrap();
        assert!(envelope.into_items().is_empty());
    }

    #[test]
    fn malformed_items_still_error() {
        let value = json!({ "results": [{ "id": 7 }] });
        assert!(ListEnvelope::<Item>::from_value(value).is_err());
    }
}

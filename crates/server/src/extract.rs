//! Request envelope checks shared by the write endpoints.
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
};
use serde_json::Value;

use crate::errors::JsonApiError;

/// Raw body of a request that declared a JSON content type.
///
/// Rejects with 415 when `Content-Type` does not contain `application/json`.
/// Parsing is deferred to [`JsonBody::parse`] so handlers can check that the
/// target exists first.
pub struct JsonBody(pub Bytes);

impl JsonBody {
    /// Parse the body; an empty or malformed body is a 400.
    pub fn parse(&self) -> Result<Value, JsonApiError> {
        if self.0.is_empty() {
            return Err(JsonApiError::bad_request("request body is empty"));
        }
        serde_json::from_slice(&self.0)
            .map_err(|e| JsonApiError::bad_request(format!("request body is not valid JSON: {e}")))
    }
}

pub fn is_json_content_type(value: Option<&str>) -> bool {
    value.is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        if !is_json_content_type(content_type) {
            let got = content_type.unwrap_or("none").to_string();
            return Err(JsonApiError::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Content-Type must be application/json, got {got}"),
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| JsonApiError::bad_request(e.body_text()))?;
        Ok(Self(bytes))
    }
}

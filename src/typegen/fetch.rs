//! Fetch a JSON payload and pick the inference sample.

use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::error::TypegenError;

/// GET `url` and parse the body as JSON.
///
/// A non-success status fails with the status text before the body is read.
pub async fn fetch_json(client: &reqwest::Client, url: &Url) -> Result<Value, TypegenError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| TypegenError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        let status_text = status
            .canonical_reason()
            .map(String::from)
            .unwrap_or_else(|| status.as_u16().to_string());
        return Err(TypegenError::Network {
            status: status.as_u16(),
            status_text,
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| TypegenError::Request {
            url: url.to_string(),
            source,
        })?;
    debug!("Fetched {} bytes from {}", body.len(), url);

    serde_json::from_slice(&body).map_err(|e| TypegenError::InvalidJson(e.to_string()))
}

/// The value to infer from: first element of an array, otherwise the value.
///
/// Returns `None` for an empty array.
pub fn select_sample(value: Value) -> Option<Value> {
    match value {
        Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    }
}

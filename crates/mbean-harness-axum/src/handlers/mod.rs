//! HTTP request handlers.
//!
//! Handlers are thin wrappers that decode the request and delegate to
//! `CatService`.

pub mod beans;
pub mod cats;

use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// Fixed acknowledgement body returned by every successful mutation.
pub const ACK: &str = "ok!";

/// Decode a JSON request body regardless of its `Content-Type`.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, HttpError> {
    serde_json::from_slice(body)
        .map_err(|e| HttpError::BadRequest(format!("Invalid request body: {e}")))
}

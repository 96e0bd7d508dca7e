//! Cat handlers - registration and cleanup.

use axum::body::Bytes;
use axum::extract::State;
use tracing::debug;

use super::{ACK, decode};
use crate::error::HttpError;
use crate::state::AppState;
use mbean_harness_core::{Cat, CustomCat, ExceptionalCat};

/// Register a cat (`POST /cat`).
pub async fn register(State(state): State<AppState>, body: Bytes) -> Result<&'static str, HttpError> {
    let cat: Cat = decode(&body)?;
    state.cats.register_cat(cat)?;
    Ok(ACK)
}

/// Register a JSON array of cats (`POST /cat_batch`).
pub async fn register_batch(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, HttpError> {
    let cats: Vec<Cat> = decode(&body)?;
    state.cats.register_cat_batch(cats)?;
    Ok(ACK)
}

/// Register a cat as a composite-data bean (`POST /composite_data_cat`).
pub async fn register_composite(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, HttpError> {
    let cat: Cat = decode(&body)?;
    state.cats.register_composite_cat(cat)?;
    Ok(ACK)
}

/// Register a cat with an unreadable attribute (`POST /exceptional_cat`).
pub async fn register_exceptional(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, HttpError> {
    let cat: ExceptionalCat = decode(&body)?;
    state.cats.register_exceptional_cat(cat)?;
    Ok(ACK)
}

/// Register a cat under a caller-chosen name (`POST /custom_cat`).
pub async fn register_custom(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, HttpError> {
    let cat: CustomCat = decode(&body)?;
    state.cats.register_custom_cat(cat)?;
    Ok(ACK)
}

/// Remove every registered cat (`PUT /clear`).
pub async fn clear(State(state): State<AppState>) -> Result<&'static str, HttpError> {
    let summary = state.cats.clear_cats()?;
    debug!(
        removed = summary.removed,
        failed = summary.failed,
        "cleared cats"
    );
    Ok(ACK)
}

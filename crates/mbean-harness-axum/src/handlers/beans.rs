//! Bean introspection handler.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::error::HttpError;
use crate::state::AppState;
use mbean_harness_core::BeanSnapshot;

/// Pattern used when the request has no `query` parameter.
pub const DEFAULT_QUERY: &str = "*:*";

#[derive(Debug, Deserialize)]
pub struct BeansQuery {
    /// Object-name pattern such as `test:type=Cat,*`.
    pub query: Option<String>,
}

/// Snapshot every bean matching the query pattern (`GET /beans`).
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BeansQuery>,
) -> Result<Json<Vec<BeanSnapshot>>, HttpError> {
    let pattern = params.query.as_deref().unwrap_or(DEFAULT_QUERY);
    Ok(Json(state.cats.describe(pattern)?))
}

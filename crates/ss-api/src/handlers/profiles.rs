//! Profile handlers

use axum::{
    extract::{Path, State},
    Json,
};
use ss_core::types::Record;

use crate::error::ApiResult;
use crate::extractors::{AppState, JsonRecord};
use crate::response::Envelope;

/// PUT /api/profiles/:employeeId
///
/// Creates the profile if the employee has none yet.
pub async fn upsert_profile(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    JsonRecord(body): JsonRecord,
) -> ApiResult<Json<Envelope<Record>>> {
    let profile = state.records.upsert_profile(&employee_id, body).await?;
    Ok(Json(Envelope::ok(profile)))
}

//! Generic table handlers
//!
//! The table a route serves is attached to its router as an `Extension<Table>`,
//! so one set of handlers covers every resource group.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use ss_core::types::Record;
use ss_store::Table;
use tracing::info;

use crate::error::ApiResult;
use crate::extractors::{AppState, JsonRecord};
use crate::response::{Deleted, Envelope};

/// GET /api/{collection}
pub async fn list_records(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
) -> ApiResult<Json<Envelope<Vec<Record>>>> {
    let records = state.records.list(table).await?;
    Ok(Json(Envelope::ok(records)))
}

/// GET /api/{collection}/:parentKey
///
/// e.g. all skills of one employee
pub async fn list_by_parent(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
    Path(parent): Path<String>,
) -> ApiResult<Json<Envelope<Vec<Record>>>> {
    let records = state.records.list_by_parent(table, &parent).await?;
    Ok(Json(Envelope::ok(records)))
}

/// GET /api/{collection}/:id
pub async fn get_record(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Record>>> {
    let record = state.records.find(table, &id).await?;
    Ok(Json(Envelope::ok(record)))
}

/// POST /api/{collection}
pub async fn create_record(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
    JsonRecord(body): JsonRecord,
) -> ApiResult<Json<Envelope<Record>>> {
    let created = state.records.create(table, body).await?;
    info!(table = %table, "Created record");
    Ok(Json(Envelope::ok(created)))
}

/// PUT /api/{collection}/:id
pub async fn update_record(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
    Path(id): Path<String>,
    JsonRecord(patch): JsonRecord,
) -> ApiResult<Json<Envelope<Record>>> {
    let updated = state.records.update(table, &id, patch).await?;
    Ok(Json(Envelope::ok(updated)))
}

/// DELETE /api/{collection}/:id
pub async fn delete_record(
    State(state): State<AppState>,
    Extension(table): Extension<Table>,
    Path(id): Path<String>,
) -> ApiResult<Json<Deleted>> {
    let outcome = state.records.delete(table, &id).await?;
    Ok(Json(Deleted::from(outcome)))
}

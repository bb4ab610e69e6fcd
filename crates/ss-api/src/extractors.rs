//! Axum extractors for API handlers

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;
use ss_core::types::Record;
use ss_services::RecordService;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub records: RecordService,
}

impl AppState {
    pub fn new(records: RecordService) -> Self {
        Self { records }
    }
}

/// JSON request body that must be an object.
///
/// Rejections are rendered through the envelope instead of axum's plain-text bodies.
pub struct JsonRecord(pub Record);

#[async_trait]
impl<S> FromRequest<S> for JsonRecord
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        match value {
            Value::Object(record) => Ok(JsonRecord(record)),
            _ => Err(ApiError::bad_request("Request body must be a JSON object")),
        }
    }
}

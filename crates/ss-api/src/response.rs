//! Response envelopes

use serde::Serialize;
use ss_store::DeleteOutcome;

/// `{"success": true, "data": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{"success": false, "error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// `{"success": true, "deletedId": "..."}`
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: DeleteOutcome,
}

impl From<DeleteOutcome> for Deleted {
    fn from(outcome: DeleteOutcome) -> Self {
        Self {
            success: true,
            outcome,
        }
    }
}

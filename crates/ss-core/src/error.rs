//! Core error types for SkillSphere

use thiserror::Error;

/// Standard Result type for SkillSphere operations
pub type SsResult<T> = Result<T, SsError>;

/// Core error type for all SkillSphere operations
#[derive(Error, Debug)]
pub enum SsError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{entity} not found")]
    NotFound { entity: &'static str, key: String },

    /// Anything the record store reported: missing update/delete target, I/O, malformed rows
    #[error("{0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::config::ConfigError> for SsError {
    fn from(err: crate::config::ConfigError) -> Self {
        SsError::Config(err.to_string())
    }
}

impl SsError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        SsError::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            SsError::Validation(_) => 400,
            SsError::NotFound { .. } => 404,
            SsError::Storage(_) | SsError::Config(_) => 500,
        }
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of validation failures.
///
/// Order is insertion order, so the first entry is the first rule that failed.
#[derive(Error, Debug, Default, Clone)]
#[error("{}", self.first_message().unwrap_or("Validation failed"))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

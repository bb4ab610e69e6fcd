//! Base contract system

use ss_core::error::ValidationErrors;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;
}

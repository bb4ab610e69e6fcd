//! # ss-api
//!
//! REST API for SkillSphere.
//!
//! One resource group per table under `/api`. Every response is wrapped in the
//! `{success, data | error}` envelope.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;

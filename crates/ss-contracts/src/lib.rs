//! # ss-contracts
//!
//! Contract validation for SkillSphere.
//!
//! Contracts check a record before it is handed to the record store.

pub mod base;
pub mod create;
pub mod single_line;

pub use base::*;
pub use create::CreateRecordContract;
pub use single_line::SingleLineContract;

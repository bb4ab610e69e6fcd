//! API request handlers

pub mod health;
pub mod profiles;
pub mod records;

//! # ss-core
//!
//! Core types and utilities for SkillSphere.
//!
//! This crate provides the building blocks used across the other crates:
//! - The error taxonomy (`SsError`, `ValidationErrors`)
//! - The `Record` type shared by the store and the facade
//! - Application configuration

pub mod config;
pub mod error;
pub mod types;

pub use error::*;
pub use types::*;

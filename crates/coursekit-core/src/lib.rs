//! coursekit-core - Core library for coursekit
//!
//! This crate provides the notebook pipeline of the course tooling:
//! template lookup and materialization, canonical notebook paths, and
//! export through an external document converter.

pub mod config;
pub mod error;
pub mod export;
pub mod paths;
pub mod process;
pub mod template;
pub mod types;

pub use error::{CourseKitError, Result};
pub use types::*;

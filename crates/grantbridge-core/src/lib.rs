//! Grantbridge Core Library
//!
//! Shared functionality for grantbridge components:
//! - Permission result record and grant code conventions
//! - JSON sequence encoding for the stored payload
//! - Configuration resolution and hierarchy
//! - Database pool helpers
//! - Common error types

pub mod config;
pub mod db;
pub mod encoding;
pub mod error;
pub mod result;
pub mod tracing_init;

pub use config::Config;
pub use error::{Error, Result};
pub use result::{GrantStatus, PERMISSION_GRANTED, PermissionResult};

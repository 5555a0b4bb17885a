//! `SQLite` storage for the permission result slot.
//!
//! Provides persistence for exactly one record: the latest permission
//! result. Every publish atomically replaces the whole record.

mod db;
mod models;
mod queries;

pub use db::{Database, DatabaseError};
pub use models::ResultRow;

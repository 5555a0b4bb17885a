//! JSON encoding of the stored permission and grant-code sequences.
//!
//! Each sequence is stored as one JSON array in a TEXT column. Order and
//! length are preserved exactly, including host-supplied length mismatches
//! between the two sequences, and identifiers may contain any character
//! (a naive separator-joined format cannot guarantee that).

use crate::error::{Error, Result};

/// Encode permission identifiers for storage.
pub fn encode_permissions(permissions: &[String]) -> Result<String> {
    Ok(serde_json::to_string(permissions)?)
}

/// Decode a stored permission sequence.
pub fn decode_permissions(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| Error::Encoding(format!("invalid permissions payload {raw:?}: {e}")))
}

/// Encode grant codes for storage.
pub fn encode_grant_results(grant_results: &[i32]) -> Result<String> {
    Ok(serde_json::to_string(grant_results)?)
}

/// Decode a stored grant-code sequence.
pub fn decode_grant_results(raw: &str) -> Result<Vec<i32>> {
    serde_json::from_str(raw)
        .map_err(|e| Error::Encoding(format!("invalid grant_results payload {raw:?}: {e}")))
}

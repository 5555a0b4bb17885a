//! Database models for the result store.

use serde::{Deserialize, Serialize};

use grantbridge_core::encoding;
use grantbridge_core::{PermissionResult, Result};

/// Result slot row from the database, sequences still encoded.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResultRow {
    pub request_code: i32,
    pub permissions: String,
    pub grant_results: String,
    pub timestamp_ms: i64,
}

impl ResultRow {
    /// Decode the stored sequences into a [`PermissionResult`].
    pub fn decode(&self) -> Result<PermissionResult> {
        Ok(PermissionResult {
            request_code: self.request_code,
            permissions: encoding::decode_permissions(&self.permissions)?,
            grant_results: encoding::decode_grant_results(&self.grant_results)?,
            timestamp_ms: self.timestamp_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reconstructs_sequences() {
        let row = ResultRow {
            request_code: 100,
            permissions: r#"["CAMERA","RECORD_AUDIO"]"#.to_string(),
            grant_results: "[0,-1]".to_string(),
            timestamp_ms: 42,
        };

        let result = row.decode().unwrap();
        assert_eq!(result.request_code, 100);
        assert_eq!(result.permissions, vec!["CAMERA", "RECORD_AUDIO"]);
        assert_eq!(result.grant_results, vec![0, -1]);
        assert_eq!(result.timestamp_ms, 42);
    }

    #[test]
    fn decode_rejects_corrupt_payload() {
        let row = ResultRow {
            request_code: 100,
            permissions: "CAMERA,".to_string(),
            grant_results: "[0]".to_string(),
            timestamp_ms: 42,
        };

        assert!(row.decode().is_err());
    }
}

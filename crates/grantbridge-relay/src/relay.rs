//! Permission result relay.
//!
//! Receives the host's permission-result callback and persists the payload
//! as the new content of the result slot. The relay is stateless; the
//! record lives entirely in the store.

use tracing::info;

use grantbridge_core::db::unix_timestamp_millis;
use grantbridge_core::encoding;

use crate::storage::{Database, DatabaseError};

/// Relay errors.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Failed to encode result payload: {0}")]
    Encoding(String),

    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),
}

/// Writer half of the bridge, invoked once per completed permission flow.
#[derive(Clone)]
pub struct ResultRelay {
    db: Database,
}

impl ResultRelay {
    /// Create a relay over an opened store.
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist one host-delivered permission result.
    ///
    /// The sequences are stored verbatim: host order is preserved and a
    /// length mismatch between `permissions` and `grant_results` is not
    /// validated here, because the host contract is not this component's
    /// to enforce. The record is durably committed before this returns.
    ///
    /// Returns the committed timestamp. A storage failure is returned
    /// untouched; no retry is attempted inside the host callback.
    pub async fn on_permission_result(
        &self,
        request_code: i32,
        permissions: &[String],
        grant_results: &[i32],
    ) -> Result<i64, RelayError> {
        let permissions_json =
            encoding::encode_permissions(permissions).map_err(|e| RelayError::Encoding(e.to_string()))?;
        let grant_results_json = encoding::encode_grant_results(grant_results)
            .map_err(|e| RelayError::Encoding(e.to_string()))?;

        let committed = self
            .db
            .publish_result(
                request_code,
                &permissions_json,
                &grant_results_json,
                unix_timestamp_millis(),
            )
            .await?;

        info!(request_code, timestamp_ms = committed, "Permission results stored");

        Ok(committed)
    }

    /// The underlying store.
    pub const fn database(&self) -> &Database {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn relay() -> ResultRelay {
        ResultRelay::new(Database::open_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn stores_payload_verbatim() {
        let relay = relay().await;

        relay
            .on_permission_result(
                100,
                &["CAMERA".to_string(), "RECORD_AUDIO".to_string()],
                &[0, -1],
            )
            .await
            .unwrap();

        let result = relay
            .database()
            .latest_result()
            .await
            .unwrap()
            .unwrap()
            .decode()
            .unwrap();
        assert_eq!(result.request_code, 100);
        assert_eq!(result.permissions, vec!["CAMERA", "RECORD_AUDIO"]);
        assert_eq!(result.grant_results, vec![0, -1]);
    }

    #[tokio::test]
    async fn mismatched_lengths_are_not_rejected() {
        let relay = relay().await;

        relay
            .on_permission_result(7, &["CAMERA".to_string()], &[0, 0, 0])
            .await
            .unwrap();

        let result = relay
            .database()
            .latest_result()
            .await
            .unwrap()
            .unwrap()
            .decode()
            .unwrap();
        assert_eq!(result.permissions.len(), 1);
        assert_eq!(result.grant_results.len(), 3);
        assert!(!result.is_aligned());
    }

    #[tokio::test]
    async fn repeated_input_bumps_timestamp_only() {
        let relay = relay().await;
        let permissions = ["CAMERA".to_string()];

        let first = relay
            .on_permission_result(100, &permissions, &[0])
            .await
            .unwrap();
        let second = relay
            .on_permission_result(100, &permissions, &[0])
            .await
            .unwrap();

        assert!(second > first);

        let result = relay
            .database()
            .latest_result()
            .await
            .unwrap()
            .unwrap()
            .decode()
            .unwrap();
        assert_eq!(result.request_code, 100);
        assert_eq!(result.timestamp_ms, second);
    }
}

//! Polling watcher for the result slot.
//!
//! The store provides no notification mechanism; consumers poll and use
//! the record timestamp as a novelty watermark. The watcher's watermark
//! starts at whatever is currently stored, so only results published
//! after the watcher was created count as new.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use grantbridge_core::PermissionResult;

use crate::storage::{Database, DatabaseError};

/// Default delay between store checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Watcher errors.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Timed out waiting for permission result: request code {request_code}")]
    Timeout { request_code: i32 },

    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),

    #[error("Failed to decode stored result: {0}")]
    Decode(String),
}

/// Reader half of the bridge: watermark-based polling over the slot.
pub struct ResultWatcher {
    db: Database,
    last_seen_ms: i64,
    poll_interval: Duration,
}

impl ResultWatcher {
    /// Create a watcher whose watermark is the currently stored timestamp
    /// (zero when nothing has been published yet).
    pub async fn new(db: Database) -> Result<Self, WatchError> {
        let last_seen_ms = db.latest_result().await?.map_or(0, |row| row.timestamp_ms);
        Ok(Self {
            db,
            last_seen_ms,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Override the delay between checks in [`wait_for`](Self::wait_for).
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// The timestamp of the newest record this watcher has consumed.
    pub const fn watermark(&self) -> i64 {
        self.last_seen_ms
    }

    /// Read the slot unconditionally; the watermark is untouched.
    pub async fn latest(&self) -> Result<Option<PermissionResult>, WatchError> {
        match self.db.latest_result().await? {
            Some(row) => row
                .decode()
                .map(Some)
                .map_err(|e| WatchError::Decode(e.to_string())),
            None => Ok(None),
        }
    }

    /// One non-blocking check: returns the stored record and advances the
    /// watermark iff the record is newer than the watermark.
    pub async fn poll_new(&mut self) -> Result<Option<PermissionResult>, WatchError> {
        let Some(row) = self.db.latest_result().await? else {
            return Ok(None);
        };
        if row.timestamp_ms <= self.last_seen_ms {
            return Ok(None);
        }

        let result = row.decode().map_err(|e| WatchError::Decode(e.to_string()))?;
        self.last_seen_ms = result.timestamp_ms;
        debug!(
            request_code = result.request_code,
            timestamp_ms = result.timestamp_ms,
            "New permission result observed"
        );
        Ok(Some(result))
    }

    /// Poll until a new record for `request_code` arrives or `timeout`
    /// elapses.
    ///
    /// A new record carrying a different request code is consumed (the
    /// watermark advances past it) and waiting continues.
    pub async fn wait_for(
        &mut self,
        request_code: i32,
        timeout: Duration,
    ) -> Result<PermissionResult, WatchError> {
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(result) = self.poll_new().await? {
                if result.request_code == request_code {
                    return Ok(result);
                }
                debug!(
                    expected = request_code,
                    got = result.request_code,
                    "Ignoring result for a different request"
                );
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(request_code, "Permission result wait timed out");
                return Err(WatchError::Timeout { request_code });
            }
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn empty_store_yields_nothing() {
        let db = store().await;
        let mut watcher = ResultWatcher::new(db).await.unwrap();

        assert_eq!(watcher.watermark(), 0);
        assert!(watcher.poll_new().await.unwrap().is_none());
        assert!(watcher.latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pre_existing_record_is_not_new() {
        let db = store().await;
        db.publish_result(1, r#"["CAMERA"]"#, "[0]", 1_000)
            .await
            .unwrap();

        let mut watcher = ResultWatcher::new(db).await.unwrap();
        assert_eq!(watcher.watermark(), 1_000);
        assert!(watcher.poll_new().await.unwrap().is_none());
        // latest() still sees it
        assert!(watcher.latest().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn poll_new_consumes_once() {
        let db = store().await;
        let mut watcher = ResultWatcher::new(db.clone()).await.unwrap();

        db.publish_result(2, r#"["CAMERA"]"#, "[0]", 1_000)
            .await
            .unwrap();

        let result = watcher.poll_new().await.unwrap().unwrap();
        assert_eq!(result.request_code, 2);
        assert_eq!(watcher.watermark(), 1_000);
        assert!(watcher.poll_new().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn wait_for_times_out_without_result() {
        let db = store().await;
        let mut watcher = ResultWatcher::new(db)
            .await
            .unwrap()
            .with_poll_interval(Duration::from_millis(5));

        let err = watcher
            .wait_for(1, Duration::from_millis(30))
            .await
            .unwrap_err();
        assert!(matches!(err, WatchError::Timeout { request_code: 1 }));
    }

    #[tokio::test]
    async fn wait_for_skips_other_request_codes() {
        let db = store().await;
        let mut watcher = ResultWatcher::new(db.clone())
            .await
            .unwrap()
            .with_poll_interval(Duration::from_millis(5));

        db.publish_result(1, r#"["CAMERA"]"#, "[0]", 1_000)
            .await
            .unwrap();

        let writer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            db.publish_result(2, r#"["RECORD_AUDIO"]"#, "[0]", 2_000)
                .await
                .unwrap();
        });

        let result = watcher
            .wait_for(2, Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(result.request_code, 2);
        assert_eq!(result.permissions, vec!["RECORD_AUDIO"]);

        writer.await.unwrap();
    }
}

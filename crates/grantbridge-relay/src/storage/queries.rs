//! Database queries for the result store.

use super::db::{Database, DatabaseError};
use super::models::ResultRow;

impl Database {
    /// Replace the result slot with a new record.
    ///
    /// All four fields commit in a single statement, so a reader in another
    /// process never observes a mix of old and new values. The committed
    /// timestamp is clamped to `max(now_ms, previous + 1)`: the watermark
    /// contract requires strictly increasing timestamps even when two
    /// writes land within the same wall-clock millisecond.
    ///
    /// Returns the committed timestamp.
    pub async fn publish_result(
        &self,
        request_code: i32,
        permissions_json: &str,
        grant_results_json: &str,
        now_ms: i64,
    ) -> Result<i64, DatabaseError> {
        sqlx::query(
            r"
            INSERT INTO result_slot (id, request_code, permissions, grant_results, timestamp_ms)
            VALUES (1, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                request_code = excluded.request_code,
                permissions = excluded.permissions,
                grant_results = excluded.grant_results,
                timestamp_ms = MAX(excluded.timestamp_ms, result_slot.timestamp_ms + 1)
            ",
        )
        .bind(request_code)
        .bind(permissions_json)
        .bind(grant_results_json)
        .bind(now_ms)
        .execute(self.pool())
        .await?;

        let row = self
            .latest_result()
            .await?
            .ok_or_else(|| DatabaseError::Query("result slot empty after publish".to_string()))?;

        Ok(row.timestamp_ms)
    }

    /// Read the result slot, if a record has ever been published.
    pub async fn latest_result(&self) -> Result<Option<ResultRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ResultRow>(
            "SELECT request_code, permissions, grant_results, timestamp_ms FROM result_slot WHERE id = 1",
        )
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }
}

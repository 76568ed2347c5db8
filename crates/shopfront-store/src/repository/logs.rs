//! # Log Repository
//!
//! Append-only lines under the `logs` key, e.g.
//! `Session started at 2026-03-01T12:00:00+00:00`.

use chrono::{DateTime, Utc};

use crate::error::StoreResult;
use crate::keys::StoreKey;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct LogRepository {
    storage: Storage,
}

impl LogRepository {
    pub fn new(storage: Storage) -> Self {
        LogRepository { storage }
    }

    pub async fn list(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .storage
            .get::<Vec<String>>(StoreKey::Logs)
            .await?
            .unwrap_or_default())
    }

    pub async fn append(&self, line: impl Into<String>) -> StoreResult<()> {
        let mut lines = self.list().await?;
        lines.push(line.into());
        self.storage.set(StoreKey::Logs, &lines).await
    }

    /// Appends `"<event> at <RFC 3339 timestamp>"`.
    pub async fn record(&self, event: &str, at: DateTime<Utc>) -> StoreResult<()> {
        self.append(format!("{} at {}", event, at.to_rfc3339())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_record_appends_in_order() {
        let repo = Storage::memory().logs();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

        repo.record("Session started", at).await.unwrap();
        repo.record("User logged in", at).await.unwrap();

        assert_eq!(
            repo.list().await.unwrap(),
            vec![
                "Session started at 2026-03-01T12:00:00+00:00",
                "User logged in at 2026-03-01T12:00:00+00:00",
            ]
        );
    }
}

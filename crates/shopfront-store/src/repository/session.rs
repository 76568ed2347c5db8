//! # Session Repository
//!
//! The logged-in session under the `user` key.

use shopfront_core::Session;

use crate::error::StoreResult;
use crate::keys::StoreKey;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct SessionRepository {
    storage: Storage,
}

impl SessionRepository {
    pub fn new(storage: Storage) -> Self {
        SessionRepository { storage }
    }

    pub async fn load(&self) -> StoreResult<Option<Session>> {
        self.storage.get(StoreKey::User).await
    }

    pub async fn save(&self, session: &Session) -> StoreResult<()> {
        self.storage.set(StoreKey::User, session).await
    }

    pub async fn clear(&self) -> StoreResult<()> {
        self.storage.remove(StoreKey::User).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shopfront_core::User;

    #[tokio::test]
    async fn test_save_load_clear() {
        let repo = Storage::memory().session();
        assert!(repo.load().await.unwrap().is_none());

        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let session = Session::start(&User::new("a@gmail.com", "12345678"), at);
        repo.save(&session).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(session));

        repo.clear().await.unwrap();
        assert!(repo.load().await.unwrap().is_none());
    }
}

//! # User Repository
//!
//! The registered-user list under the `users` key.

use shopfront_core::User;
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::keys::StoreKey;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct UserRepository {
    storage: Storage,
}

impl UserRepository {
    pub fn new(storage: Storage) -> Self {
        UserRepository { storage }
    }

    /// All users in registration order; empty if none are stored.
    pub async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self
            .storage
            .get::<Vec<User>>(StoreKey::Users)
            .await?
            .unwrap_or_default())
    }

    /// Appends a user.
    ///
    /// ## Returns
    /// * `Err(StoreError::UniqueViolation)` - Email already stored; nothing written
    pub async fn add(&self, user: &User) -> StoreResult<()> {
        let mut users = self.list().await?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::duplicate("email", &user.email));
        }

        users.push(user.clone());
        self.storage.set(StoreKey::Users, &users).await?;

        info!(email = %user.email, total = users.len(), "User registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_preserves_order() {
        let repo = Storage::memory().users();

        repo.add(&User::new("a@gmail.com", "11111111")).await.unwrap();
        repo.add(&User::new("b@gmail.com", "22222222")).await.unwrap();

        let emails: Vec<String> = repo.list().await.unwrap().into_iter().map(|u| u.email).collect();
        assert_eq!(emails, vec!["a@gmail.com", "b@gmail.com"]);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = Storage::memory().users();
        repo.add(&User::new("a@gmail.com", "11111111")).await.unwrap();

        let err = repo
            .add(&User::new("a@gmail.com", "99999999"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));

        let users = repo.list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].password, "11111111");
    }
}

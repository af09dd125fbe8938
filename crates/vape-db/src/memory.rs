//! In-memory [`UserDirectory`] for tests.
//!
//! Follows the same empty-string policy as the PostgreSQL directory and
//! records every call so tests can assert which operations ran, and with
//! what arguments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use vape_models::{User, UserUpdate};

use crate::directory::{DirectoryError, UserDirectory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryCall {
    Get(i64),
    Update(i64, UserUpdate),
    Delete(i64),
}

#[derive(Default)]
pub struct MemoryUserDirectory {
    users: RwLock<HashMap<i64, User>>,
    passwords: RwLock<HashMap<i64, String>>,
    calls: Mutex<Vec<DirectoryCall>>,
    failing: AtomicBool,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.insert(user).await;
        }
        directory
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Makes every subsequent operation fail with a non-`NotFound` error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn calls(&self) -> Vec<DirectoryCall> {
        self.calls.lock().await.clone()
    }

    /// Last password set through `update`, stored as given.
    pub async fn password_of(&self, id: i64) -> Option<String> {
        self.passwords.read().await.get(&id).cloned()
    }

    async fn record(&self, call: DirectoryCall) -> Result<(), DirectoryError> {
        self.calls.lock().await.push(call);

        if self.failing.load(Ordering::SeqCst) {
            return Err(DirectoryError::Other(anyhow!("directory unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn get(&self, id: i64) -> Result<User, DirectoryError> {
        self.record(DirectoryCall::Get(id)).await?;

        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn update(&self, id: i64, changes: UserUpdate) -> Result<User, DirectoryError> {
        self.record(DirectoryCall::Update(id, changes.clone())).await?;

        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(DirectoryError::NotFound)?;

        if !changes.email.is_empty() {
            user.email = changes.email;
        }
        if !changes.name.is_empty() {
            user.name = changes.name;
        }
        if !changes.password.is_empty() {
            self.passwords.write().await.insert(id, changes.password);
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DirectoryError> {
        self.record(DirectoryCall::Delete(id)).await?;

        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(DirectoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, email: &str, name: &str) -> User {
        User {
            id,
            email: email.to_string(),
            name: name.to_string(),
            admin: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_update_with_empty_fields_keeps_values() {
        let directory = MemoryUserDirectory::with_users([user(1, "a@test.com", "Alice")]).await;

        let updated = directory
            .update(
                1,
                UserUpdate {
                    name: "Bob".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "a@test.com");
        assert_eq!(updated.name, "Bob");
        assert_eq!(directory.password_of(1).await, None);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let directory = MemoryUserDirectory::with_users([user(3, "c@test.com", "Carol")]).await;

        directory.delete(3).await.unwrap();

        assert!(matches!(directory.get(3).await, Err(DirectoryError::NotFound)));
        assert!(matches!(
            directory.delete(3).await,
            Err(DirectoryError::NotFound)
        ));
        assert_eq!(
            directory.calls().await,
            vec![
                DirectoryCall::Delete(3),
                DirectoryCall::Get(3),
                DirectoryCall::Delete(3)
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_directory_reports_other_error() {
        let directory = MemoryUserDirectory::with_users([user(1, "a@test.com", "Alice")]).await;
        directory.set_failing(true);

        assert!(matches!(directory.get(1).await, Err(DirectoryError::Other(_))));
    }
}

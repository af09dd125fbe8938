use async_trait::async_trait;
use thiserror::Error;
use vape_models::{User, UserUpdate};

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No user exists with the requested id.
    #[error("user not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Persistence operations on user records.
///
/// `NotFound` is always reported as [`DirectoryError::NotFound`], never as
/// a database error, so callers can tell a missing record from a failure.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get(&self, id: i64) -> Result<User, DirectoryError>;

    /// Applies `changes` and returns the updated record. Empty fields in
    /// `changes` leave the stored value untouched.
    async fn update(&self, id: i64, changes: UserUpdate) -> Result<User, DirectoryError>;

    async fn delete(&self, id: i64) -> Result<(), DirectoryError>;
}

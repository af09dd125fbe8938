use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use vape_core::hash_password;
use vape_models::{User, UserUpdate};

use crate::directory::{DirectoryError, UserDirectory};

/// PostgreSQL-backed implementation of [`UserDirectory`].
#[derive(Clone, Debug)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn get(&self, id: i64) -> Result<User, DirectoryError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, admin, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or(DirectoryError::NotFound)
    }

    async fn update(&self, id: i64, changes: UserUpdate) -> Result<User, DirectoryError> {
        let UserUpdate {
            email,
            name,
            password,
        } = changes;

        // Empty password keeps the stored hash via NULLIF below.
        let password_hash = if password.is_empty() {
            String::new()
        } else {
            tokio::task::spawn_blocking(move || hash_password(&password))
                .await
                .map_err(|e| DirectoryError::Other(e.into()))?
                .map_err(|e| DirectoryError::Other(e.error))?
        };

        debug!(user_id = id, "Updating user record");

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                email = COALESCE(NULLIF($2, ''), email),
                name = COALESCE(NULLIF($3, ''), name),
                password_hash = COALESCE(NULLIF($4, ''), password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, name, admin, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_optional(self.pool())
        .await?
        .ok_or(DirectoryError::NotFound)?;

        info!(user_id = id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<(), DirectoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::NotFound);
        }

        info!(user_id = id, "Deleted user");
        Ok(())
    }
}

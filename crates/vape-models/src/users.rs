//! User domain models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A user account as stored in the directory.
///
/// The password hash lives in its own column and is never loaded into
/// this struct, so serializing a `User` cannot leak it.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub admin: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Request body for `PUT /users/{id}`.
///
/// Every field is optional; absent and `null` are treated the same.
#[derive(Deserialize, Default, Clone, PartialEq, Eq, ToSchema)]
pub struct UpdateUserDto {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for UpdateUserDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserDto")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// The change set handed to the user directory.
///
/// An empty string means "leave this field unchanged". A non-empty
/// password is plaintext here; the directory hashes it before storing.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl From<UpdateUserDto> for UserUpdate {
    fn from(dto: UpdateUserDto) -> Self {
        Self {
            email: dto.email.unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
            password: dto.password.unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = if self.password.is_empty() {
            ""
        } else {
            "<redacted>"
        };

        f.debug_struct("UserUpdate")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &password)
            .finish()
    }
}

//! # Vape Models
//!
//! Data structures shared between the HTTP layer and the user directory.
//!
//! - [`users`]: the user record, the update request body and the
//!   normalized change set handed to the directory
//! - [`MessageResponse`]: the `{message}` body of successful operations
//!   that have no resource to return

pub mod users;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use users::{UpdateUserDto, User, UserUpdate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

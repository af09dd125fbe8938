//! # Vape Core
//!
//! Core types shared by every Vape crate.
//!
//! - [`errors`]: the application error type and its `{message}` HTTP envelope
//! - [`password`]: bcrypt password hashing
//!
//! # Example
//!
//! ```ignore
//! use vape_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("user not found"));
//! let hash = vape_core::hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorResponse};
pub use password::hash_password;

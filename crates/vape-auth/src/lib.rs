//! # Vape Auth
//!
//! Authentication types for the Vape API.
//!
//! - [`claims`]: the JWT claim set carried by bearer tokens
//! - [`caller`]: the authenticated identity derived from verified claims
//! - [`jwt`]: token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use vape_auth::{Caller, create_access_token, verify_token};
//! use vape_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(5, "user@example.com", false, &config)?;
//!
//! let claims = verify_token(&token, &config)?;
//! let caller = Caller::try_from(&claims)?;
//! assert_eq!(caller.id, 5);
//! ```

pub mod caller;
pub mod claims;
pub mod jwt;

pub use caller::Caller;
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};

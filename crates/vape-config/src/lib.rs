//! # Vape Config
//!
//! Configuration types for the Vape API.
//!
//! Each structure is loaded from environment variables and falls back to a
//! development-friendly default:
//!
//! - [`jwt`]: bearer token verification settings
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`email`]: SMTP and template settings for outgoing mail
//! - [`server`]: listen addresses for the API and the metrics exporter
//!
//! # Example
//!
//! ```ignore
//! use vape_config::{CorsConfig, EmailConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let email_config = EmailConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod email;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

//! # Vape API
//!
//! User account management over HTTP, built with Axum and PostgreSQL.
//!
//! ## Endpoints
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | `GET` | `/users/{id}` | the user as JSON |
//! | `PUT` | `/users/{id}` | updates `email`, `name`, `password`; returns the user |
//! | `DELETE` | `/users/{id}` | `{"message": "user has been deleted"}` |
//!
//! Every request needs `Authorization: Bearer <jwt>`. A caller may act on
//! their own account; an administrator may act on any account.
//!
//! ## Request pipeline
//!
//! ```text
//! authenticate ─► authorize ─► fetch_user ─► handler ─► JSON
//!   (caller)      (self-or-    (directory      (read/update/
//!                  admin)       lookup)          delete)
//! ```
//!
//! Each stage may end the request with one `{ "message": ... }` error
//! response: 400 for an unparsable id or body, 401 for a missing or
//! unauthorized caller, 404 for an unknown user, 500 for anything else.
//!
//! ## Modules
//!
//! - [`middleware`]: authentication and the per-user authorization chain
//! - [`modules`]: feature modules (`users`)
//! - [`utils`]: templated email delivery
//! - [`extract`]: request body extractor
//! - [`logging`] and [`metrics`]: tracing setup, request logs, Prometheus
//! - [`docs`]: OpenAPI document
//! - [`router`] and [`state`]: application wiring

pub mod docs;
pub mod extract;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;

pub use vape_auth;
pub use vape_config;
pub use vape_core;
pub use vape_db;
pub use vape_models;

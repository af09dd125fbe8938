//! Middleware for the `/users/{id}` request pipeline.
//!
//! Requests pass through these stages in order, and any stage may end the
//! request with an error response:
//!
//! 1. [`auth::authenticate`] attaches the [`Caller`](vape_auth::Caller)
//!    when the bearer token is valid (applied to the whole app)
//! 2. [`user::authorize`] parses the path id and enforces self-or-admin
//! 3. [`user::fetch_user`] loads the target user from the directory
//!
//! Handlers then read the populated [`user::UserContext`].

pub mod auth;
pub mod user;

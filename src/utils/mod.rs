//! Shared utilities.
//!
//! - [`email`]: templated email rendering and SMTP delivery

pub mod email;

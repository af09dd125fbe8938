//! User account endpoints: read, update and delete a single user.

pub mod controller;
pub mod router;
pub mod service;

//! Server utilities

pub mod health;
pub mod request_id;

//! # AgriOne Domain
//!
//! Business domain types for the AgriOne dashboard backend.
//!
//! This crate contains:
//! - Request/response types for every dashboard feature, with input
//!   validation
//! - The domain error type and Result alias
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - Depends only on the foundation tier of `agrione-common` (failure
//!   classification)
//! - No I/O, no async
//! - Pure domain models and data structures

#[macro_use]
pub mod macros;

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

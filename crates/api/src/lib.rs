//! # AgriOne Server
//!
//! HTTP application layer for the farmer dashboard.
//!
//! This crate contains:
//! - Route handlers (dashboard → backend bridge)
//! - Application context (dependency injection)
//! - Request tracing and the main entry point
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Every action route answers `200` with a `{ data, error }` body

pub mod context;
pub mod error;
pub mod routes;
pub mod utils;

pub use context::AppContext;
pub use error::{ApiError, ApiResult};
pub use routes::app_router;

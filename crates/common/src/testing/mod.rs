//! Testing utilities for code built on the resilience executor
//!
//! - **[`scripted`]**: [`ScriptedWork`], a unit of work that replays a fixed
//!   script of results and records when each attempt started
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "test-utils")]
//! # {
//! use agrione_common::testing::ScriptedWork;
//!
//! let work = ScriptedWork::<u32, String>::new()
//!     .then_err("503 Service Unavailable".to_string())
//!     .then_ok(7);
//! assert_eq!(work.calls(), 0);
//! # }
//! ```

pub mod scripted;

pub use scripted::{ScriptedStep, ScriptedWork};

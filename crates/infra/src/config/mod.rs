//! Configuration loading
//!
//! Configuration is read once at start-up from a file and the environment,
//! then passed down explicitly.

pub mod loader;

// Re-export commonly used items
pub use loader::{apply_env_overrides, load, load_from_file, discover_config_paths};

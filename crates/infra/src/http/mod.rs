//! HTTP client used by upstream integrations

pub mod client;

pub use client::{status_error, HttpClient, HttpClientBuilder};

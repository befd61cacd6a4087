//! Health report for the `/health` route
//!
//! Each upstream provider is a component. The server is healthy when at
//! least 80% of them have a usable credential; the rest serve fallback data.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

const HEALTHY_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub is_healthy: bool,

    /// Share of healthy components, from 0.0 to 1.0
    pub score: f64,

    pub components: Vec<ComponentHealth>,

    /// Unix timestamp (seconds) of the check
    pub timestamp: i64,
}

impl HealthStatus {
    /// Healthy with score 1.0 and no components.
    pub fn new() -> Self {
        Self { is_healthy: true, score: 1.0, components: Vec::new(), timestamp: unix_now() }
    }

    #[must_use]
    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute `score` and `is_healthy` from the components added so far.
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy = self.components.iter().filter(|c| c.is_healthy).count();
        self.score = healthy as f64 / self.components.len() as f64;
        self.is_healthy = self.score >= HEALTHY_THRESHOLD;
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Provider name, e.g. "gemini" or "weather"
    pub name: String,
    pub is_healthy: bool,
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

//! Free-text farming assistant

use serde::{Deserialize, Serialize};

use super::required;
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: String,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<&str> {
        required(&self.query, "Query is required.")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

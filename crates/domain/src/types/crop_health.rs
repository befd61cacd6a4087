//! Crop health diagnosis from a photo

use serde::{Deserialize, Serialize};

use super::required;
use crate::errors::{AgriError, Result};

/// Photo plus free-text description submitted by the farmer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropHealthRequest {
    /// `data:<mime>;base64,<payload>`
    pub photo_data_uri: String,
    #[serde(default)]
    pub description: String,
}

impl CropHealthRequest {
    /// Check the request and decode the photo envelope.
    pub fn validate(&self) -> Result<InlineImage> {
        let uri = required(&self.photo_data_uri, "An image is required.")?;
        InlineImage::from_data_uri(uri)
    }
}

/// Base64 image payload split out of a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let invalid = || AgriError::invalid_input("The image must be a base64 data URI.");
        let rest = uri.strip_prefix("data:").ok_or_else(invalid)?;
        let (meta, data) = rest.split_once(',').ok_or_else(invalid)?;
        let mime_type = meta.strip_suffix(";base64").ok_or_else(invalid)?;
        if mime_type.is_empty() || data.is_empty() {
            return Err(invalid());
        }
        Ok(Self { mime_type: mime_type.to_string(), data: data.to_string() })
    }
}

/// Three-part diagnosis returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropHealthReport {
    pub plant_info: String,
    pub disease_diagnosis: String,
    pub solution: String,
}

impl CropHealthReport {
    /// Translatable sections in display order.
    pub fn sections(&self) -> [&str; 3] {
        [&self.plant_info, &self.disease_diagnosis, &self.solution]
    }

    pub fn from_sections([plant_info, disease_diagnosis, solution]: [String; 3]) -> Self {
        Self { plant_info, disease_diagnosis, solution }
    }

    /// Reject a structurally valid but empty answer.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.sections().iter().any(|s| s.trim().is_empty()) {
            return Err(AgriError::invalid_response("AI failed to generate a report."));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateReportRequest {
    pub report: CropHealthReport,
    pub language_code: String,
}

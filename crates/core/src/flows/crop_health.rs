//! Crop health diagnosis flow

use std::sync::Arc;

use agrione_common::{execute_with_fallback, Fallback, FallbackMode, Precondition, RetryExecutor};
use agrione_domain::{CropHealthReport, CropHealthRequest, Result};
use tracing::{debug, instrument};

use super::{parse_structured, surface};
use crate::fallbacks::sample_crop_report;
use crate::ports::GenerativeModel;
use crate::prompts;

/// Generates a three-part crop health report from a photo.
pub struct CropHealthService {
    model: Arc<dyn GenerativeModel>,
    executor: RetryExecutor,
}

impl CropHealthService {
    pub fn new(model: Arc<dyn GenerativeModel>, executor: RetryExecutor) -> Self {
        Self { model, executor }
    }

    /// Diagnose the photographed plant.
    ///
    /// Without a model credential the sample report is returned and the
    /// model is never called.
    #[instrument(skip_all, fields(description_len = request.description.len()))]
    pub async fn generate_report(&self, request: &CropHealthRequest) -> Result<CropHealthReport> {
        let image = request.validate()?;
        let prompt = prompts::crop_health_report(request.description.trim(), image);

        let model = self.model.as_ref();
        let prompt = &prompt;
        let resolved = execute_with_fallback(
            Precondition::require(
                model.is_configured(),
                "GEMINI_API_KEY is not set, returning sample crop health report",
            ),
            move || async move {
                let value = model.generate_json(prompt).await?;
                let report: CropHealthReport = parse_structured(value)?;
                report.ensure_complete()?;
                Ok(report)
            },
            Fallback::lazy(sample_crop_report),
            FallbackMode::SurfaceAll,
            &self.executor,
        )
        .await
        .map_err(surface)?;

        debug!(source = ?resolved.source, "Crop health report ready");
        Ok(resolved.value)
    }
}

//! Translation into supported Indian languages

use std::sync::Arc;

use agrione_common::{execute_with_fallback, Fallback, FallbackMode, Precondition, RetryExecutor};
use agrione_domain::{CropHealthReport, FarmingPlan, Language, Result, TranslationTarget};
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::{parse_structured, surface};
use crate::ports::GenerativeModel;
use crate::prompts;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translated {
    translated_text: String,
}

/// Translates dashboard text, passing it through when no model call is
/// needed.
pub struct TranslationService {
    model: Arc<dyn GenerativeModel>,
    executor: RetryExecutor,
}

impl TranslationService {
    pub fn new(model: Arc<dyn GenerativeModel>, executor: RetryExecutor) -> Self {
        Self { model, executor }
    }

    /// Translate `text` into the language identified by `language_code`.
    ///
    /// - `en` and unsupported codes return the text unchanged.
    /// - Exhausted transient failures surface as `ServiceUnavailable`.
    /// - Any other failure returns the original text.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn translate(&self, text: &str, language_code: &str) -> Result<String> {
        let language = match TranslationTarget::from_code(language_code) {
            TranslationTarget::English => return Ok(text.to_string()),
            TranslationTarget::Unsupported(code) => {
                warn!("Translation to '{}' is not supported, returning original text", code);
                return Ok(text.to_string());
            }
            TranslationTarget::Language(language) => language,
        };
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        self.translate_to(text, language).await
    }

    async fn translate_to(&self, text: &str, language: Language) -> Result<String> {
        let prompt = prompts::translation(text, language);
        let model = self.model.as_ref();
        let prompt = &prompt;

        let resolved = execute_with_fallback(
            Precondition::require(model.is_configured(), "GEMINI_API_KEY is not set, skipping translation"),
            move || async move {
                let value = model.generate_json(prompt).await?;
                let translated: Translated = parse_structured(value)?;
                Ok(translated.translated_text)
            },
            Fallback::value(text.to_string()),
            FallbackMode::SurfaceUnavailable,
            &self.executor,
        )
        .await
        .map_err(surface)?;

        if resolved.is_fallback() {
            info!(language = language.name(), source = ?resolved.source, "Returning original text");
        }
        Ok(resolved.value)
    }

    /// Translate every text concurrently, preserving order.
    pub async fn translate_all<S: AsRef<str>>(
        &self,
        texts: &[S],
        language_code: &str,
    ) -> Result<Vec<String>> {
        try_join_all(texts.iter().map(|text| self.translate(text.as_ref(), language_code))).await
    }

    /// Translate the three report sections concurrently.
    pub async fn translate_report(
        &self,
        report: &CropHealthReport,
        language_code: &str,
    ) -> Result<CropHealthReport> {
        let [plant_info, diagnosis, solution] = report.sections();
        let (plant_info, diagnosis, solution) = tokio::try_join!(
            self.translate(plant_info, language_code),
            self.translate(diagnosis, language_code),
            self.translate(solution, language_code),
        )?;
        Ok(CropHealthReport::from_sections([plant_info, diagnosis, solution]))
    }

    /// Translate the recommendation sections of a plan; estimates are kept.
    pub async fn translate_plan(&self, plan: &FarmingPlan, language_code: &str) -> Result<FarmingPlan> {
        let [irrigation, fertilization, pest_control] = plan.recommendations();
        let (irrigation, fertilization, pest_control) = tokio::try_join!(
            self.translate(irrigation, language_code),
            self.translate(fertilization, language_code),
            self.translate(pest_control, language_code),
        )?;
        Ok(plan.clone().with_recommendations([irrigation, fertilization, pest_control]))
    }
}

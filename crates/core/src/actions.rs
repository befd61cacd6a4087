//! Action layer: flows mapped into `{ data, error }` view-models
//!
//! Actions never fail. Every error is logged and converted into a short
//! user-facing message matching what the dashboard displays.

use agrione_common::{ErrorClassification, ErrorSeverity, RetryExecutor};
use agrione_domain::{
    AgriError, AudioClip, ChatRequest, ChatResponse, CommodityPrices, CropHealthReport,
    CropHealthRequest, FarmingPlan, FarmingPlanRequest, MarketPriceRequest, SpeechRequest,
    TranslateAlertsRequest, TranslatePlanRequest, TranslateReportRequest, WeatherAlerts,
    WeatherAlertsRequest,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::flows::speech::AUDIO_DISABLED_MESSAGE;
use crate::flows::{
    AssistantService, AssistantTools, CropHealthService, FarmingPlanService, MarketPriceService,
    SpeechService, TranslationService, WeatherAlertService,
};
use crate::ports::Providers;

/// Result of an action as the dashboard consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionState<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ActionState<T> {
    pub fn success(data: T) -> Self {
        Self { data: Some(data), error: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { data: None, error: Some(message.into()) }
    }

    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }
}

fn log_failure(action: &str, err: &AgriError) {
    match err.severity() {
        ErrorSeverity::Info | ErrorSeverity::Warning => {
            warn!(action, error = %err, class = %err.classification(), "Action failed");
        }
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(action, error = %err, class = %err.classification(), "Action failed");
        }
    }
}

/// Every dashboard action, wired to one set of providers.
pub struct DashboardActions {
    crop_health: CropHealthService,
    translation: TranslationService,
    weather: WeatherAlertService,
    market: MarketPriceService,
    farming: FarmingPlanService,
    speech: SpeechService,
    assistant: AssistantService,
}

impl DashboardActions {
    pub fn new(providers: &Providers, executor: RetryExecutor) -> Self {
        let Providers { model, speech, weather, market } = providers.clone();
        Self {
            crop_health: CropHealthService::new(model.clone(), executor.clone()),
            translation: TranslationService::new(model.clone(), executor.clone()),
            weather: WeatherAlertService::new(model.clone(), weather.clone(), executor.clone()),
            market: MarketPriceService::new(market.clone(), executor.clone()),
            farming: FarmingPlanService::new(model.clone(), executor.clone()),
            speech: SpeechService::new(speech, executor.clone()),
            assistant: AssistantService::new(
                model.clone(),
                AssistantTools {
                    weather: WeatherAlertService::new(model.clone(), weather, executor.clone()),
                    market: MarketPriceService::new(market, executor.clone()),
                    farming: FarmingPlanService::new(model, executor.clone()),
                },
                executor,
            ),
        }
    }

    pub fn market(&self) -> &MarketPriceService {
        &self.market
    }

    pub fn farming(&self) -> &FarmingPlanService {
        &self.farming
    }

    pub async fn get_crop_health_report(
        &self,
        request: &CropHealthRequest,
    ) -> ActionState<CropHealthReport> {
        match self.crop_health.generate_report(request).await {
            Ok(report) => ActionState::success(report),
            Err(AgriError::InvalidInput(message)) => ActionState::failure(message),
            Err(err) => {
                log_failure("crop_health_report", &err);
                ActionState::failure(format!("Failed to generate crop health report: {err}"))
            }
        }
    }

    pub async fn get_translated_report(
        &self,
        request: &TranslateReportRequest,
    ) -> ActionState<CropHealthReport> {
        match self.translation.translate_report(&request.report, &request.language_code).await {
            Ok(report) => ActionState::success(report),
            Err(err) => {
                log_failure("translate_report", &err);
                ActionState::failure("Failed to translate report. Please try again.")
            }
        }
    }

    pub async fn get_audio_for_text(&self, request: &SpeechRequest) -> ActionState<AudioClip> {
        match self.speech.synthesize(request).await {
            Ok(clip) => ActionState::success(clip),
            Err(AgriError::InvalidInput(message)) => ActionState::failure(message),
            Err(AgriError::Config(message)) if message == AUDIO_DISABLED_MESSAGE => {
                warn!("Audio requested but speech synthesis is not configured");
                ActionState::failure(message)
            }
            Err(err) => {
                log_failure("audio", &err);
                ActionState::failure("Failed to generate audio. Please try again.")
            }
        }
    }

    pub async fn get_weather_alerts(
        &self,
        request: &WeatherAlertsRequest,
    ) -> ActionState<WeatherAlerts> {
        match self.weather.alerts(request).await {
            Ok(alerts) => ActionState::success(alerts),
            Err(AgriError::InvalidInput(message)) => ActionState::failure(message),
            Err(err) => {
                log_failure("weather_alerts", &err);
                ActionState::failure("Failed to fetch weather alerts. Please try again.")
            }
        }
    }

    pub async fn get_translated_alerts(
        &self,
        request: &TranslateAlertsRequest,
    ) -> ActionState<Vec<String>> {
        if let Err(err) = request.validate() {
            return ActionState::failure(err.to_string());
        }
        match self.translation.translate_all(&request.alerts, &request.language_code).await {
            Ok(alerts) => ActionState::success(alerts),
            Err(err) => {
                log_failure("translate_alerts", &err);
                ActionState::failure("Failed to translate alerts. Please try again.")
            }
        }
    }

    pub async fn get_farming_plan(&self, request: &FarmingPlanRequest) -> ActionState<FarmingPlan> {
        match self.farming.plan(request).await {
            Ok(plan) => ActionState::success(plan),
            Err(AgriError::InvalidInput(message)) => ActionState::failure(message),
            Err(err @ AgriError::ServiceUnavailable) => {
                log_failure("farming_plan", &err);
                ActionState::failure(err.to_string())
            }
            Err(err) => {
                log_failure("farming_plan", &err);
                ActionState::failure(format!("Failed to generate farming plan: {err}"))
            }
        }
    }

    pub async fn get_translated_plan(
        &self,
        request: &TranslatePlanRequest,
    ) -> ActionState<FarmingPlan> {
        match self.translation.translate_plan(&request.plan, &request.language_code).await {
            Ok(plan) => ActionState::success(plan),
            Err(err) => {
                log_failure("translate_plan", &err);
                ActionState::failure("Failed to translate farming plan. Please try again.")
            }
        }
    }

    pub async fn get_commodity_prices(
        &self,
        request: &MarketPriceRequest,
    ) -> ActionState<CommodityPrices> {
        match self.market.prices(request).await {
            Ok(prices) => ActionState::success(prices),
            Err(AgriError::InvalidInput(message)) => ActionState::failure(message),
            Err(err) => {
                log_failure("commodity_prices", &err);
                ActionState::failure(format!("Failed to fetch commodity prices: {err}"))
            }
        }
    }

    pub async fn get_text_response(&self, request: &ChatRequest) -> ActionState<ChatResponse> {
        match self.assistant.respond(request).await {
            Ok(response) => ActionState::success(response),
            Err(AgriError::InvalidInput(message)) => ActionState::failure(message),
            Err(err @ AgriError::ServiceUnavailable) => ActionState::failure(err.to_string()),
            Err(err) => {
                log_failure("text_response", &err);
                ActionState::failure(format!("Failed to generate a response: {err}"))
            }
        }
    }
}

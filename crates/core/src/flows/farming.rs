//! Personalized farming plans

use std::sync::Arc;

use agrione_common::RetryExecutor;
use agrione_domain::{FarmingPlan, FarmingPlanRequest, Result};
use tracing::{error, instrument};

use super::{parse_structured, surface};
use crate::ports::GenerativeModel;
use crate::prompts;

pub struct FarmingPlanService {
    model: Arc<dyn GenerativeModel>,
    executor: RetryExecutor,
}

impl FarmingPlanService {
    pub fn new(model: Arc<dyn GenerativeModel>, executor: RetryExecutor) -> Self {
        Self { model, executor }
    }

    /// Generate irrigation, fertilization and pest control recommendations.
    #[instrument(skip_all, fields(crop_type = %request.crop_type))]
    pub async fn plan(&self, request: &FarmingPlanRequest) -> Result<FarmingPlan> {
        request.validate()?;
        let prompt = prompts::farming_plan(
            request.farm_details.trim(),
            request.crop_type.trim(),
            request.current_practices.trim(),
        );
        let model = self.model.as_ref();
        let prompt = &prompt;

        self.executor
            .execute(move || async move {
                let value = model.generate_json(prompt).await?;
                parse_structured::<FarmingPlan>(value)
            })
            .await
            .map_err(surface)
    }

    /// Condensed plan for the assistant; failures become an apology.
    pub async fn summary(&self, request: &FarmingPlanRequest) -> String {
        match self.plan(request).await {
            Ok(plan) => plan.summary(),
            Err(err) => {
                error!(error = %err, "Failed to summarize farming plan");
                "Sorry, I was unable to generate a farming plan with the details provided. \
                 Please try again."
                    .to_string()
            }
        }
    }
}

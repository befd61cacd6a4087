//! Free-text farming assistant with tool calling
//!
//! The model may answer directly or ask for one of three tools first:
//! current weather, a market price summary or a farming plan summary. Each
//! model turn runs under the retry executor on its own, so a transient
//! failure late in the conversation never repeats tool work already done.

use std::sync::Arc;

use agrione_common::RetryExecutor;
use agrione_domain::constants::MAX_TOOL_ROUNDS;
use agrione_domain::{
    AgriError, ChatRequest, ChatResponse, FarmingPlanRequest, MarketPriceRequest, Result,
};
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use super::{surface, FarmingPlanService, MarketPriceService, WeatherAlertService};
use crate::ports::{GenerativeModel, ModelReply, ToolCall, ToolConversation, ToolResult, ToolRound};
use crate::prompts::{self, GET_FARMING_PLAN, GET_MARKET_PRICES, GET_WEATHER_DATA};

const NO_RESPONSE: &str = "AI failed to generate a response.";

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    #[serde(default)]
    location: String,
}

/// Services the assistant's tools call into.
pub struct AssistantTools {
    pub weather: WeatherAlertService,
    pub market: MarketPriceService,
    pub farming: FarmingPlanService,
}

impl AssistantTools {
    /// Answer one tool call. Failures are reported to the model as an
    /// `{"error": ..}` object rather than failing the chat.
    #[instrument(skip_all, fields(tool = %call.name))]
    async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        let response = match call.name.as_str() {
            GET_WEATHER_DATA => self.weather_tool(&call.args).await,
            GET_MARKET_PRICES => match serde_json::from_value::<MarketPriceRequest>(call.args.clone()) {
                Ok(request) => json!({ "result": self.market.summary(&request.market).await }),
                Err(err) => tool_error(format!("Invalid arguments: {err}")),
            },
            GET_FARMING_PLAN => match serde_json::from_value::<FarmingPlanRequest>(call.args.clone()) {
                Ok(request) => json!({ "result": self.farming.summary(&request).await }),
                Err(err) => tool_error(format!("Invalid arguments: {err}")),
            },
            other => {
                warn!(tool = other, "Model requested an unknown tool");
                tool_error(format!("Unknown tool: {other}"))
            }
        };
        ToolResult { name: call.name.clone(), response }
    }

    async fn weather_tool(&self, args: &Value) -> Value {
        let args: WeatherArgs = match serde_json::from_value(args.clone()) {
            Ok(args) => args,
            Err(err) => return tool_error(format!("Invalid arguments: {err}")),
        };
        let location = args.location.trim();
        if location.is_empty() {
            return tool_error("Location is required.");
        }
        match self.weather.weather_data(location).await {
            Ok(data) => serde_json::to_value(data).unwrap_or_else(|e| tool_error(e.to_string())),
            Err(err) => tool_error(err.to_string()),
        }
    }
}

fn tool_error(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}

pub struct AssistantService {
    model: Arc<dyn GenerativeModel>,
    tools: AssistantTools,
    executor: RetryExecutor,
}

impl AssistantService {
    pub fn new(model: Arc<dyn GenerativeModel>, tools: AssistantTools, executor: RetryExecutor) -> Self {
        Self { model, tools, executor }
    }

    /// Answer a farming query in the language it was asked in.
    #[instrument(skip_all, fields(query_len = request.query.len()))]
    pub async fn respond(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let query = request.validate()?;
        let mut conversation = ToolConversation::new(prompts::assistant(query), prompts::assistant_tools());

        for round in 0..=MAX_TOOL_ROUNDS {
            let model = self.model.as_ref();
            let turn = &conversation;
            let reply = self
                .executor
                .execute(move || model.converse(turn))
                .await
                .map_err(surface)?;

            match reply {
                ModelReply::Text(text) if text.trim().is_empty() => break,
                ModelReply::Text(response) => return Ok(ChatResponse { response }),
                ModelReply::ToolCalls(_) if round == MAX_TOOL_ROUNDS => {
                    warn!(rounds = round, "Model kept requesting tools");
                    break;
                }
                ModelReply::ToolCalls(calls) => {
                    debug!(round, calls = calls.len(), "Answering tool calls");
                    let results = join_all(calls.iter().map(|call| self.tools.dispatch(call))).await;
                    conversation.rounds.push(ToolRound { calls, results });
                }
            }
        }

        Err(AgriError::invalid_response(NO_RESPONSE))
    }
}

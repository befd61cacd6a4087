//! Commodity price lookup

use std::sync::Arc;

use agrione_common::{execute_with_fallback, Fallback, FallbackMode, Precondition, RetryExecutor};
use agrione_domain::{CommodityPrices, MarketPriceRequest, Result};
use tracing::{error, instrument};

use super::surface;
use crate::fallbacks::sample_commodities;
use crate::ports::MarketPriceProvider;

pub struct MarketPriceService {
    market: Arc<dyn MarketPriceProvider>,
    executor: RetryExecutor,
}

impl MarketPriceService {
    pub fn new(market: Arc<dyn MarketPriceProvider>, executor: RetryExecutor) -> Self {
        Self { market, executor }
    }

    /// Prices for one market. Without a credential the sample list is
    /// returned.
    #[instrument(skip_all, fields(market = %request.market))]
    pub async fn prices(&self, request: &MarketPriceRequest) -> Result<CommodityPrices> {
        let market_name = request.validate()?;
        let provider = self.market.as_ref();

        let resolved = execute_with_fallback(
            Precondition::require(
                provider.is_configured(),
                "FASAL_API_KEY is not set, using sample commodity prices",
            ),
            move || provider.commodity_prices(market_name),
            Fallback::lazy(sample_commodities),
            FallbackMode::SurfaceAll,
            &self.executor,
        )
        .await
        .map_err(surface)?;

        Ok(CommodityPrices { market: market_name.to_string(), commodities: resolved.value })
    }

    /// Short textual summary for the assistant; failures become an apology.
    pub async fn summary(&self, market: &str) -> String {
        let request = MarketPriceRequest { market: market.to_string() };
        match self.prices(&request).await {
            Ok(prices) => prices.summary(),
            Err(err) => {
                error!(error = %err, market, "Failed to summarize market prices");
                format!(
                    "Sorry, I couldn't fetch the prices for {market}. Please ensure the market \
                     name is correct."
                )
            }
        }
    }
}

//! Fasal commodity pricing API client

use agrione_core::MarketPriceProvider;
use agrione_domain::{AgriError, ApiKey, Commodity, MarketConfig, Result};
use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, instrument};

use crate::http::HttpClient;

pub struct FasalClient {
    http_client: HttpClient,
    api_key: ApiKey,
    base_url: String,
}

impl FasalClient {
    pub fn new(config: &MarketConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MarketPriceProvider for FasalClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_configured()
    }

    #[instrument(skip(self))]
    async fn commodity_prices(&self, market: &str) -> Result<Vec<Commodity>> {
        let builder = self
            .http_client
            .request(Method::GET, format!("{}/commodities/pricing", self.base_url))
            .query(&[("market", market)])
            .bearer_auth(self.api_key.expose());

        let response = self.http_client.send_checked(builder).await?;
        let commodities: Vec<Commodity> = response
            .json()
            .await
            .map_err(|e| AgriError::invalid_response(format!("commodity pricing response: {e}")))?;

        info!(count = commodities.len(), "Fetched commodity prices");
        Ok(commodities)
    }
}

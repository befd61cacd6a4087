//! Commodity (mandi) prices

use serde::{Deserialize, Serialize};

use super::required;
use crate::constants::MARKET_SUMMARY_MAX_ITEMS;
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPriceRequest {
    #[serde(default)]
    pub market: String,
}

impl MarketPriceRequest {
    pub fn validate(&self) -> Result<&str> {
        required(&self.market, "Market name is required.")
    }
}

/// One row of the market-price API, field names as the upstream sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commodity {
    pub commodity: String,
    pub min_price: f64,
    pub max_price: f64,
    pub modal_price: f64,
    pub unit: String,
}

impl Commodity {
    pub fn new(name: &str, min_price: f64, max_price: f64, modal_price: f64, unit: &str) -> Self {
        Self {
            commodity: name.to_string(),
            min_price,
            max_price,
            modal_price,
            unit: unit.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityPrices {
    pub market: String,
    pub commodities: Vec<Commodity>,
}

impl CommodityPrices {
    /// One-line summary of the first few commodities for the assistant.
    ///
    /// The "... and more." suffix is always present, whatever the count.
    pub fn summary(&self) -> String {
        if self.commodities.is_empty() {
            return format!(
                "No commodity data found for {}. Please try another market.",
                self.market
            );
        }
        let listed = self
            .commodities
            .iter()
            .take(MARKET_SUMMARY_MAX_ITEMS)
            .map(|c| {
                format!(
                    "{}: Min ₹{}, Max ₹{}, Modal ₹{}",
                    c.commodity, c.min_price, c.max_price, c.modal_price
                )
            })
            .collect::<Vec<_>>()
            .join("; ");
        format!("Prices for {}: {listed}... and more.", self.market)
    }
}

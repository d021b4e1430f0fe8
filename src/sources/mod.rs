pub mod http;

use crate::aggregate::latest_by_currency;
use crate::error::FetchError;
use crate::types::{TokenPrice, TokenPriceMap};
use async_trait::async_trait;

pub use http::HttpPriceSource;

#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_records(&self) -> Result<Vec<TokenPrice>, FetchError>;

    /// Fetch once and reduce to the latest price per currency.
    async fn fetch_price_map(&self) -> Result<TokenPriceMap, FetchError> {
        let records = self.fetch_records().await?;
        tracing::info!("[{}] fetched {} price record(s)", self.name(), records.len());
        Ok(latest_by_currency(records))
    }
}

/// Icon location for a currency: `{base}{currency}.svg`.
pub fn icon_url(base: &str, currency: &str) -> String {
    format!("{}{}.svg", base, currency)
}

use super::PriceSource;
use crate::error::FetchError;
use crate::types::TokenPrice;
use async_trait::async_trait;
use reqwest::Url;

/// Message used when an error response carries no `error` field.
const FALLBACK_ERROR: &str = "Failed to fetch data";

/// Price records served as a JSON array from `{base_url}{path}`.
pub struct HttpPriceSource {
    client: reqwest::Client,
    url: Url,
    query: Vec<(String, String)>,
}

impl HttpPriceSource {
    pub fn new(client: reqwest::Client, base_url: &str, path: &str) -> Result<Self, FetchError> {
        let raw = format!("{}{}", base_url, path);
        let url = Url::parse(&raw).map_err(|e| FetchError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            url,
            query: Vec::new(),
        })
    }

    /// Append a query parameter to every request.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_records(&self) -> Result<Vec<TokenPrice>, FetchError> {
        tracing::debug!("GET {}", self.url);

        let mut req = self
            .client
            .get(self.url.clone())
            .header("Accept", "application/json");
        if !self.query.is_empty() {
            req = req.query(&self.query);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status,
                message: error_message(&body),
            });
        }

        let body = resp.text().await?;
        parse_records(&body)
    }
}

/// Decode the response array record by record. A record that does not
/// decode (bad date, missing price) is skipped; a body that is not an
/// array fails as a whole.
fn parse_records(body: &str) -> Result<Vec<TokenPrice>, FetchError> {
    let items: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<TokenPrice>(item) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("skipping price record #{}: {}", i, e),
        }
    }
    Ok(records)
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}

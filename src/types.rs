use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{BTreeMap, Values};

/// One observed price point for a currency, as returned by the prices endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub currency: String,
    pub price: f64,
    pub date: DateTime<Utc>,
    /// Accepted on the wire, never used for aggregation.
    #[serde(rename = "iconUrl", default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl TokenPrice {
    pub fn new(currency: impl Into<String>, price: f64, date: DateTime<Utc>) -> Self {
        Self {
            currency: currency.into(),
            price,
            date,
            icon_url: None,
        }
    }
}

/// Latest positive price per currency, keyed and iterated in currency order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenPriceMap {
    entries: BTreeMap<String, TokenPrice>,
}

impl TokenPriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut BTreeMap<String, TokenPrice> {
        &mut self.entries
    }

    pub fn get(&self, currency: &str) -> Option<&TokenPrice> {
        self.entries.get(currency)
    }

    pub fn price(&self, currency: &str) -> Option<f64> {
        self.entries.get(currency).map(|t| t.price)
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.entries.contains_key(currency)
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a TokenPriceMap {
    type Item = &'a TokenPrice;
    type IntoIter = Values<'a, String, TokenPrice>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

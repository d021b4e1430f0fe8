use std::fmt;
use thiserror::Error;

/// Failures while fetching price records.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("building request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("price request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("price API HTTP {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("price API returned malformed body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Reported by the strict conversion path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("no price data loaded")]
    NoPrices,

    #[error("no price for currency '{0}'")]
    MissingPrice(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FromCurrency,
    ToCurrency,
    FromAmount,
    ToAmount,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FromCurrency => "fromCurrency",
            Field::ToCurrency => "toCurrency",
            Field::FromAmount => "fromAmount",
            Field::ToAmount => "toAmount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every field-level failure found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message)
    }

    pub fn has(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "invalid swap form ({})", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

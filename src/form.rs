//! Swap form state and its transitions.
//!
//! The paired amount fields are kept consistent by [`reduce`]: editing one
//! side recomputes the other from the current price snapshot.

use crate::convert::{convert_amount, sanitize_amount};
use crate::error::{Field, FieldError, ValidationErrors};
use crate::types::TokenPriceMap;
use serde::Serialize;

pub const DEFAULT_FROM_CURRENCY: &str = "WBTC";
pub const DEFAULT_TO_CURRENCY: &str = "ETH";

/// Form fields as text, the way an input widget holds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapFormState {
    pub from_currency: String,
    pub to_currency: String,
    pub from_amount: String,
    pub to_amount: String,
}

impl SwapFormState {
    pub fn new(from_currency: impl Into<String>, to_currency: impl Into<String>) -> Self {
        Self {
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
            from_amount: "0".to_string(),
            to_amount: "0".to_string(),
        }
    }
}

impl Default for SwapFormState {
    fn default() -> Self {
        Self::new(DEFAULT_FROM_CURRENCY, DEFAULT_TO_CURRENCY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapEvent {
    /// Raw text typed into the "from" amount field.
    FromAmountChanged(String),
    /// Raw text typed into the "to" amount field.
    ToAmountChanged(String),
    FromCurrencySelected(String),
    ToCurrencySelected(String),
    /// Swap direction: both (currency, amount) pairs trade places.
    Toggle,
}

/// Apply one event to the form.
///
/// Amount edits are sanitized first, then the opposite amount is recomputed
/// when both currencies are set. Currency selection and toggling never
/// recompute.
pub fn reduce(
    mut state: SwapFormState,
    event: SwapEvent,
    prices: Option<&TokenPriceMap>,
) -> SwapFormState {
    match event {
        SwapEvent::FromAmountChanged(raw) => {
            state.from_amount = sanitize_amount(&raw);
            if currencies_selected(&state) {
                state.to_amount = convert_amount(
                    &state.from_amount,
                    &state.from_currency,
                    &state.to_currency,
                    prices,
                );
            }
        }
        SwapEvent::ToAmountChanged(raw) => {
            state.to_amount = sanitize_amount(&raw);
            if currencies_selected(&state) {
                state.from_amount = convert_amount(
                    &state.to_amount,
                    &state.to_currency,
                    &state.from_currency,
                    prices,
                );
            }
        }
        SwapEvent::FromCurrencySelected(code) => state.from_currency = code,
        SwapEvent::ToCurrencySelected(code) => state.to_currency = code,
        SwapEvent::Toggle => {
            let SwapFormState {
                from_currency,
                to_currency,
                from_amount,
                to_amount,
            } = state;
            state = SwapFormState {
                from_currency: to_currency,
                to_currency: from_currency,
                from_amount: to_amount,
                to_amount: from_amount,
            };
        }
    }
    state
}

fn currencies_selected(state: &SwapFormState) -> bool {
    !state.from_currency.is_empty() && !state.to_currency.is_empty()
}

/// A form that passed [`validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedSwap {
    pub from_currency: String,
    pub to_currency: String,
    pub from_amount: f64,
    pub to_amount: f64,
    /// Amounts exactly as entered, for display.
    #[serde(skip)]
    pub form: SwapFormState,
}

pub fn validate(state: &SwapFormState) -> Result<ValidatedSwap, ValidationErrors> {
    let mut errors = Vec::new();

    if state.from_currency.is_empty() {
        errors.push(FieldError {
            field: Field::FromCurrency,
            message: "Please select a currency to swap from",
        });
    }
    if state.to_currency.is_empty() {
        errors.push(FieldError {
            field: Field::ToCurrency,
            message: "Please select a currency to swap to",
        });
    }

    let from_amount = check_amount(Field::FromAmount, &state.from_amount, &mut errors);
    let to_amount = check_amount(Field::ToAmount, &state.to_amount, &mut errors);

    if state.from_currency == state.to_currency {
        errors.push(FieldError {
            field: Field::ToCurrency,
            message: "Cannot swap the same currency",
        });
    }

    match (from_amount, to_amount) {
        (Some(from_amount), Some(to_amount)) if errors.is_empty() => Ok(ValidatedSwap {
            from_currency: state.from_currency.clone(),
            to_currency: state.to_currency.clone(),
            from_amount,
            to_amount,
            form: state.clone(),
        }),
        _ => Err(ValidationErrors::new(errors)),
    }
}

fn check_amount(field: Field, value: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    if value.is_empty() {
        errors.push(FieldError {
            field,
            message: "Amount is required",
        });
        return None;
    }
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        _ => {
            errors.push(FieldError {
                field,
                message: "Amount must be a positive number",
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::latest_by_currency;
    use crate::types::TokenPrice;
    use chrono::Utc;

    fn prices() -> TokenPriceMap {
        let now = Utc::now();
        latest_by_currency(vec![
            TokenPrice::new("A", 100.0, now),
            TokenPrice::new("B", 50.0, now),
        ])
    }

    fn state(from: &str, from_amt: &str, to: &str, to_amt: &str) -> SwapFormState {
        SwapFormState {
            from_currency: from.into(),
            to_currency: to.into(),
            from_amount: from_amt.into(),
            to_amount: to_amt.into(),
        }
    }

    #[test]
    fn test_default_state() {
        let s = SwapFormState::default();
        assert_eq!(s.from_currency, "WBTC");
        assert_eq!(s.to_currency, "ETH");
        assert_eq!(s.from_amount, "0");
        assert_eq!(s.to_amount, "0");
    }

    #[test]
    fn test_from_amount_recomputes_to_amount() {
        let map = prices();
        let s = reduce(
            SwapFormState::new("A", "B"),
            SwapEvent::FromAmountChanged("2".into()),
            Some(&map),
        );
        assert_eq!(s.from_amount, "2");
        assert_eq!(s.to_amount, "4.000000");
    }

    #[test]
    fn test_to_amount_recomputes_from_amount() {
        let map = prices();
        let s = reduce(
            SwapFormState::new("A", "B"),
            SwapEvent::ToAmountChanged("x4".into()),
            Some(&map),
        );
        assert_eq!(s.to_amount, "4");
        assert_eq!(s.from_amount, "2.000000");
    }

    #[test]
    fn test_amount_edit_without_prices_yields_zero() {
        let s = reduce(
            SwapFormState::new("A", "B"),
            SwapEvent::FromAmountChanged("2".into()),
            None,
        );
        assert_eq!(s.to_amount, "0");
    }

    #[test]
    fn test_amount_edit_without_currency_leaves_other_side() {
        let map = prices();
        let s = reduce(
            state("", "0", "B", "9"),
            SwapEvent::FromAmountChanged("2".into()),
            Some(&map),
        );
        assert_eq!(s.from_amount, "2");
        assert_eq!(s.to_amount, "9");
    }

    #[test]
    fn test_currency_selection_does_not_recompute() {
        let map = prices();
        let s = reduce(
            state("A", "2", "B", "4.000000"),
            SwapEvent::ToCurrencySelected("C".into()),
            Some(&map),
        );
        assert_eq!(s, state("A", "2", "C", "4.000000"));
    }

    #[test]
    fn test_toggle_swaps_both_pairs() {
        let s = reduce(state("A", "2", "B", "4"), SwapEvent::Toggle, None);
        assert_eq!(s, state("B", "4", "A", "2"));
    }

    #[test]
    fn test_validate_accepts_well_formed_form() {
        let swap = validate(&state("A", "2", "B", "4.000000")).unwrap();
        assert_eq!(swap.from_amount, 2.0);
        assert_eq!(swap.to_amount, 4.0);
        assert_eq!(swap.form.to_amount, "4.000000");
    }

    #[test]
    fn test_validate_rejects_same_currency_regardless_of_amounts() {
        let err = validate(&state("A", "2", "A", "2")).unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(
            err.for_field(Field::ToCurrency).collect::<Vec<_>>(),
            vec!["Cannot swap the same currency"]
        );

        let err = validate(&state("A", "0", "A", "")).unwrap_err();
        assert!(err.has(Field::ToCurrency));
        assert!(err.has(Field::FromAmount));
        assert!(err.has(Field::ToAmount));
    }

    #[test]
    fn test_validate_amount_messages() {
        let err = validate(&state("A", "", "B", "0")).unwrap_err();
        assert_eq!(
            err.for_field(Field::FromAmount).collect::<Vec<_>>(),
            vec!["Amount is required"]
        );
        assert_eq!(
            err.for_field(Field::ToAmount).collect::<Vec<_>>(),
            vec!["Amount must be a positive number"]
        );
    }

    #[test]
    fn test_validate_missing_currencies() {
        let err = validate(&state("", "1", "", "1")).unwrap_err();
        assert!(err.has(Field::FromCurrency));
        // Both empty also counts as the same currency.
        assert_eq!(err.for_field(Field::ToCurrency).count(), 2);
    }
}

use crate::error::ConvertError;
use crate::types::TokenPriceMap;

/// Fractional digits used for every computed amount and rate.
pub const AMOUNT_DECIMALS: usize = 6;

/// Convert `amount` of `from` into `to` using the price snapshot.
///
/// Falls back to `"0"` when prices are not loaded, a currency is unset or
/// unknown, or the amount does not parse. Callers that need the reason use
/// [`try_convert`].
pub fn convert_amount(
    amount: &str,
    from: &str,
    to: &str,
    prices: Option<&TokenPriceMap>,
) -> String {
    if from.is_empty() || to.is_empty() {
        return "0".to_string();
    }
    match try_convert(amount, from, to, prices) {
        Ok(value) => format_amount(value),
        Err(_) => "0".to_string(),
    }
}

pub fn try_convert(
    amount: &str,
    from: &str,
    to: &str,
    prices: Option<&TokenPriceMap>,
) -> Result<f64, ConvertError> {
    let prices = prices.ok_or(ConvertError::NoPrices)?;
    let from_price = prices
        .price(from)
        .ok_or_else(|| ConvertError::MissingPrice(from.to_string()))?;
    let to_price = prices
        .price(to)
        .ok_or_else(|| ConvertError::MissingPrice(to.to_string()))?;
    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| ConvertError::InvalidAmount(amount.to_string()))?;

    Ok(amount * from_price / to_price)
}

/// Units of `to` received for one unit of `from`, or `None` if either price is missing.
pub fn exchange_rate(from: &str, to: &str, prices: Option<&TokenPriceMap>) -> Option<String> {
    let prices = prices?;
    let rate = prices.price(from)? / prices.price(to)?;
    Some(format_amount(rate))
}

pub fn format_amount(value: f64) -> String {
    format!("{:.*}", AMOUNT_DECIMALS, value)
}

/// Reduce free-form input to a canonical non-negative decimal string.
///
/// Only ASCII digits and the first `.` survive; digits after a second `.`
/// are kept and the extra point is dropped. Empty input becomes `"0"`, and
/// the rest is normalized through a float round trip (`"007"` -> `"7"`,
/// `"1.50"` -> `"1.5"`).
pub fn sanitize_amount(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut seen_point = false;
    for c in raw.chars() {
        match c {
            '0'..='9' => cleaned.push(c),
            '.' if !seen_point => {
                seen_point = true;
                cleaned.push(c);
            }
            _ => {}
        }
    }

    if cleaned.is_empty() || cleaned == "." {
        return "0".to_string();
    }

    match cleaned.parse::<f64>() {
        Ok(value) => value.to_string(),
        Err(_) => "0".to_string(),
    }
}

use crate::form::SwapFormState;
use crate::sources::icon_url;
use crate::types::TokenPriceMap;
use anyhow::{Context, Result};

pub fn print_table(prices: &TokenPriceMap, icon_base_url: &str) {
    println!(
        "\n{:<10} {:<18} {:<26} {}",
        "Currency", "Price (USD)", "Updated", "Icon"
    );
    println!("{}", "-".repeat(100));
    for t in prices {
        println!(
            "{:<10} {:<18} {:<26} {}",
            t.currency,
            format_usd(t.price),
            t.date.format("%Y-%m-%d %H:%M:%S UTC"),
            icon_url(icon_base_url, &t.currency)
        );
    }
    println!("\n{} currencies", prices.len());
}

pub fn print_json(prices: &TokenPriceMap) -> Result<()> {
    let json = serde_json::to_string_pretty(prices).context("serializing price map")?;
    println!("{}", json);
    Ok(())
}

pub fn print_quote(state: &SwapFormState, prices: &TokenPriceMap, rate: Option<&str>) {
    println!(
        "You send:    {} {}  (1 {} = {})",
        state.from_amount,
        state.from_currency,
        state.from_currency,
        format_usd(prices.price(&state.from_currency).unwrap_or(0.0))
    );
    println!(
        "You receive: {} {}  (1 {} = {})",
        state.to_amount,
        state.to_currency,
        state.to_currency,
        format_usd(prices.price(&state.to_currency).unwrap_or(0.0))
    );
    if let Some(rate) = rate {
        println!(
            "Exchange rate: 1 {} = {} {}",
            state.from_currency, rate, state.to_currency
        );
    }
}

/// US dollar display: `$1,645.93`. Values under a dollar keep six decimals
/// so small token prices stay readable.
pub fn format_usd(value: f64) -> String {
    let decimals = if value.abs() < 1.0 && value != 0.0 { 6 } else { 2 };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{}", sign, grouped, frac_part)
    }
}

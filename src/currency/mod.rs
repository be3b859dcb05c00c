//! Currency conversion and display helpers over the static rate table.

use serde::Serialize;

use crate::{
    errors::{AccountingError, Result},
    reference,
};

/// Conversion result including the fee applied on top.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConversionQuote {
    pub original_amount: f64,
    pub converted_amount: f64,
    pub fee: f64,
    pub total_amount: f64,
    pub exchange_rate: f64,
}

fn rate_for(code: &str) -> Result<f64> {
    reference::currency(code)
        .map(|info| info.rate)
        .ok_or_else(|| AccountingError::UnknownCurrency(code.to_string()))
}

/// Converts an amount between two currencies through the USD base.
pub fn convert(amount: f64, from: &str, to: &str) -> Result<f64> {
    if from.eq_ignore_ascii_case(to) {
        // Still reject unknown codes on the identity path.
        rate_for(from)?;
        return Ok(amount);
    }
    let from_rate = rate_for(from)?;
    let to_rate = rate_for(to)?;
    Ok(amount / from_rate * to_rate)
}

/// Converts and applies a percentage fee on the converted amount.
pub fn convert_with_fees(amount: f64, from: &str, to: &str, fee_percentage: f64) -> Result<ConversionQuote> {
    let converted_amount = convert(amount, from, to)?;
    let fee = converted_amount * fee_percentage / 100.0;
    Ok(ConversionQuote {
        original_amount: amount,
        converted_amount,
        fee,
        total_amount: converted_amount + fee,
        exchange_rate: rate_for(to)? / rate_for(from)?,
    })
}

/// Formats an amount with the currency's symbol, two decimals, and
/// thousands grouping. Unknown codes fall back to the code itself as the
/// symbol, since formatting is display-only.
pub fn format_amount(amount: f64, code: &str) -> String {
    let symbol = reference::currency(code)
        .map(|info| info.symbol)
        .unwrap_or(code);
    let negative = amount < 0.0;
    let body = group_thousands(&format!("{:.2}", amount.abs()));
    if negative {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

/// Renders a `1 FROM = x.xxxx TO` exchange-rate label.
pub fn exchange_rate_label(from: &str, to: &str) -> Result<String> {
    let rate = rate_for(to)? / rate_for(from)?;
    Ok(format!(
        "1 {} = {:.4} {}",
        from.to_uppercase(),
        rate,
        to.to_uppercase()
    ))
}

fn group_thousands(formatted: &str) -> String {
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted, None),
    };
    let mut grouped = String::new();
    let mut count = 0;
    for ch in int_part.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    match frac_part {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}

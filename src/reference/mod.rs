//! Static reference tables for tax rates and currencies.
//!
//! Rates are configuration data, not logic: they are compiled in and never
//! refreshed at runtime. All currency rates are expressed relative to a USD
//! base (USD ≡ 1.0).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Published VAT and corporate tax rates for one jurisdiction.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaxRates {
    pub country: &'static str,
    pub vat_standard: f64,
    pub vat_reduced: f64,
    pub vat_zero: f64,
    pub corporate_rate: f64,
    pub currency: &'static str,
}

/// Static description of a supported currency.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub rate: f64,
}

macro_rules! tax_entry {
    ($code:literal, $country:literal, $std:expr, $red:expr, $zero:expr, $corp:expr, $cur:literal) => {
        (
            $code,
            TaxRates {
                country: $country,
                vat_standard: $std,
                vat_reduced: $red,
                vat_zero: $zero,
                corporate_rate: $corp,
                currency: $cur,
            },
        )
    };
}

static TAX_RATES: Lazy<HashMap<&'static str, TaxRates>> = Lazy::new(|| {
    HashMap::from([
        tax_entry!("US", "United States", 0.0, 0.0, 0.0, 21.0, "USD"),
        tax_entry!("GB", "United Kingdom", 20.0, 5.0, 0.0, 25.0, "GBP"),
        tax_entry!("DE", "Germany", 19.0, 7.0, 0.0, 30.0, "EUR"),
        tax_entry!("FR", "France", 20.0, 10.0, 0.0, 28.0, "EUR"),
        tax_entry!("IT", "Italy", 22.0, 10.0, 0.0, 24.0, "EUR"),
        tax_entry!("ES", "Spain", 21.0, 10.0, 0.0, 25.0, "EUR"),
        tax_entry!("NL", "Netherlands", 21.0, 9.0, 0.0, 25.8, "EUR"),
        tax_entry!("BE", "Belgium", 21.0, 12.0, 0.0, 25.0, "EUR"),
        tax_entry!("AT", "Austria", 20.0, 10.0, 0.0, 25.0, "EUR"),
        tax_entry!("CH", "Switzerland", 7.7, 3.7, 0.0, 21.0, "CHF"),
        tax_entry!("CA", "Canada", 13.0, 5.0, 0.0, 26.5, "CAD"),
        tax_entry!("AU", "Australia", 10.0, 0.0, 0.0, 30.0, "AUD"),
        tax_entry!("JP", "Japan", 10.0, 8.0, 0.0, 23.2, "JPY"),
        tax_entry!("CN", "China", 13.0, 9.0, 0.0, 25.0, "CNY"),
        tax_entry!("IN", "India", 18.0, 12.0, 0.0, 30.0, "INR"),
        tax_entry!("BR", "Brazil", 17.0, 7.0, 0.0, 34.0, "BRL"),
        tax_entry!("SG", "Singapore", 7.0, 0.0, 0.0, 17.0, "SGD"),
        tax_entry!("HK", "Hong Kong", 0.0, 0.0, 0.0, 16.5, "HKD"),
        tax_entry!("NZ", "New Zealand", 15.0, 0.0, 0.0, 28.0, "NZD"),
        tax_entry!("SE", "Sweden", 25.0, 12.0, 0.0, 20.6, "SEK"),
        tax_entry!("NO", "Norway", 25.0, 15.0, 0.0, 22.0, "NOK"),
        tax_entry!("DK", "Denmark", 25.0, 0.0, 0.0, 22.0, "DKK"),
        tax_entry!("FI", "Finland", 24.0, 14.0, 0.0, 20.0, "EUR"),
        tax_entry!("IE", "Ireland", 23.0, 13.5, 0.0, 12.5, "EUR"),
        tax_entry!("PT", "Portugal", 23.0, 13.0, 0.0, 21.0, "EUR"),
        tax_entry!("PL", "Poland", 23.0, 8.0, 0.0, 19.0, "PLN"),
        tax_entry!("CZ", "Czech Republic", 21.0, 15.0, 0.0, 19.0, "CZK"),
        tax_entry!("HU", "Hungary", 27.0, 18.0, 0.0, 9.0, "HUF"),
        tax_entry!("GR", "Greece", 24.0, 13.0, 0.0, 22.0, "EUR"),
        tax_entry!("RO", "Romania", 19.0, 9.0, 0.0, 16.0, "RON"),
        tax_entry!("BG", "Bulgaria", 20.0, 9.0, 0.0, 10.0, "BGN"),
    ])
});

macro_rules! currency_entry {
    ($code:literal, $name:literal, $symbol:literal, $rate:expr) => {
        (
            $code,
            CurrencyInfo {
                code: $code,
                name: $name,
                symbol: $symbol,
                rate: $rate,
            },
        )
    };
}

static CURRENCIES: Lazy<HashMap<&'static str, CurrencyInfo>> = Lazy::new(|| {
    HashMap::from([
        currency_entry!("USD", "US Dollar", "$", 1.0),
        currency_entry!("EUR", "Euro", "€", 0.85),
        currency_entry!("GBP", "British Pound", "£", 0.73),
        currency_entry!("JPY", "Japanese Yen", "¥", 110.0),
        currency_entry!("CAD", "Canadian Dollar", "C$", 1.25),
        currency_entry!("AUD", "Australian Dollar", "A$", 1.35),
        currency_entry!("CHF", "Swiss Franc", "CHF", 0.92),
        currency_entry!("CNY", "Chinese Yuan", "¥", 6.45),
        currency_entry!("INR", "Indian Rupee", "₹", 74.5),
        currency_entry!("BRL", "Brazilian Real", "R$", 5.2),
        currency_entry!("KRW", "South Korean Won", "₩", 1180.0),
        currency_entry!("SGD", "Singapore Dollar", "S$", 1.35),
        currency_entry!("HKD", "Hong Kong Dollar", "HK$", 7.8),
        currency_entry!("NZD", "New Zealand Dollar", "NZ$", 1.42),
        currency_entry!("SEK", "Swedish Krona", "kr", 8.6),
        currency_entry!("NOK", "Norwegian Krone", "kr", 8.8),
        currency_entry!("DKK", "Danish Krone", "kr", 6.4),
        currency_entry!("PLN", "Polish Złoty", "zł", 3.9),
        currency_entry!("CZK", "Czech Koruna", "Kč", 22.0),
        currency_entry!("HUF", "Hungarian Forint", "Ft", 295.0),
    ])
});

/// Looks up the published tax rates for a 2-letter country code.
/// Case-insensitive; returns `None` for unknown jurisdictions.
pub fn tax_rates(country_code: &str) -> Option<&'static TaxRates> {
    TAX_RATES.get(country_code.to_uppercase().as_str())
}

/// Looks up a currency by its 3-letter ISO code. Case-insensitive.
pub fn currency(code: &str) -> Option<&'static CurrencyInfo> {
    CURRENCIES.get(code.to_uppercase().as_str())
}

pub fn is_currency_supported(code: &str) -> bool {
    currency(code).is_some()
}

/// All jurisdictions with published rates, as `(code, name, currency)`,
/// sorted by code for deterministic output.
pub fn supported_countries() -> Vec<(&'static str, &'static str, &'static str)> {
    let mut countries: Vec<_> = TAX_RATES
        .iter()
        .map(|(code, rates)| (*code, rates.country, rates.currency))
        .collect();
    countries.sort_by_key(|(code, _, _)| *code);
    countries
}

/// All supported currencies, sorted by code.
pub fn all_currencies() -> Vec<&'static CurrencyInfo> {
    let mut currencies: Vec<_> = CURRENCIES.values().collect();
    currencies.sort_by_key(|info| info.code);
    currencies
}

//! Company-wide configuration and the persisted currency table.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    reference,
    storage::{keys, KeyValueStore},
};

/// Singleton company configuration. One instance per store; `update`
/// replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanySettings {
    pub name: String,
    pub address: String,
    pub country: String,
    pub currency: String,
    pub tax_id: String,
    /// Financial year start as `MM-DD`.
    pub financial_year_start: String,
    pub default_vat_rate: f64,
    pub default_corporate_tax_rate: f64,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            name: "Your Company Name".into(),
            address: "123 Business Street, City, Country".into(),
            country: "United States".into(),
            currency: "USD".into(),
            tax_id: "TAX123456789".into(),
            financial_year_start: "01-01".into(),
            default_vat_rate: 20.0,
            default_corporate_tax_rate: 25.0,
        }
    }
}

/// Persisted currency record, seeded from the static reference table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub rate: f64,
}

impl From<&reference::CurrencyInfo> for Currency {
    fn from(info: &reference::CurrencyInfo) -> Self {
        Self {
            code: info.code.into(),
            name: info.name.into(),
            symbol: info.symbol.into(),
            rate: info.rate,
        }
    }
}

/// Holds company settings and the currency table, loading them from the
/// injected storage on open and persisting best-effort on change.
pub struct SettingsStore {
    storage: Arc<dyn KeyValueStore>,
    settings: CompanySettings,
    currencies: Vec<Currency>,
}

impl SettingsStore {
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let settings = load_or_warn(storage.as_ref(), keys::SETTINGS).unwrap_or_default();
        let mut currencies: Vec<Currency> =
            load_or_warn(storage.as_ref(), keys::CURRENCIES).unwrap_or_default();
        let mut store = Self {
            storage,
            settings,
            currencies: Vec::new(),
        };
        if currencies.is_empty() {
            currencies = reference::all_currencies()
                .into_iter()
                .map(Currency::from)
                .collect();
            store.persist_key(keys::CURRENCIES, &currencies);
        }
        store.currencies = currencies;
        store
    }

    pub fn settings(&self) -> &CompanySettings {
        &self.settings
    }

    /// Replaces the settings wholesale and persists.
    pub fn update(&mut self, settings: CompanySettings) {
        self.settings = settings;
        self.persist_key(keys::SETTINGS, &self.settings);
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn currency(&self, code: &str) -> Option<&Currency> {
        self.currencies
            .iter()
            .find(|currency| currency.code.eq_ignore_ascii_case(code))
    }

    fn persist_key<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => {
                if let Err(err) = self.storage.save(key, &json) {
                    tracing::warn!(key, %err, "persist failed; in-memory state stays authoritative");
                }
            }
            Err(err) => {
                tracing::warn!(key, %err, "serialization failed; skipping persist");
            }
        }
    }
}

fn load_or_warn<T: serde::de::DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Option<T> {
    match storage.load(key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(key, %err, "corrupt persisted data; falling back to defaults");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(key, %err, "load failed; falling back to defaults");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn opens_with_defaults_and_seeded_currencies() {
        let store = SettingsStore::open(Arc::new(MemoryStore::new()));
        assert_eq!(store.settings().currency, "USD");
        assert_eq!(store.currencies().len(), 20);
        assert!(store.currency("eur").is_some());
    }

    #[test]
    fn update_replaces_wholesale_and_persists() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = SettingsStore::open(storage.clone());
        let mut settings = CompanySettings::default();
        settings.name = "Acme Ltd".into();
        settings.country = "United Kingdom".into();
        store.update(settings.clone());

        let reopened = SettingsStore::open(storage);
        assert_eq!(reopened.settings(), &settings);
    }
}

pub mod json_backend;
pub mod memory;

use serde_json::Value;

use crate::errors::Result;

/// Stable storage keys, one per top-level aggregate.
pub mod keys {
    pub const TRANSACTIONS: &str = "accounting_transactions";
    pub const INVOICES: &str = "accounting_invoices";
    pub const ACCOUNTS: &str = "accounting_accounts";
    pub const CUSTOMERS: &str = "accounting_customers";
    pub const VENDORS: &str = "accounting_vendors";
    pub const CURRENCIES: &str = "accounting_currencies";
    pub const SETTINGS: &str = "accounting_settings";
}

/// Abstraction over persistence backends capable of storing JSON documents
/// under stable keys.
///
/// `load` distinguishes "no data yet" (`Ok(None)`) from actual failures so
/// callers can fall back to defaults without masking corruption.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Value>>;
    fn save(&self, key: &str, value: &Value) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStore;

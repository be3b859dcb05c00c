use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Double-entry classification of an account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

/// Financial-statement line an account rolls up into.
///
/// Assigned explicitly at chart-of-accounts setup so statement derivation
/// groups by tag instead of matching on account names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatementBucket {
    // Current assets
    Cash,
    Receivables,
    Inventory,
    OtherCurrentAsset,
    // Fixed assets
    PropertyPlantEquipment,
    IntangibleAssets,
    OtherFixedAsset,
    // Current liabilities
    Payables,
    ShortTermDebt,
    AccruedExpenses,
    OtherCurrentLiability,
    // Long-term liabilities
    LongTermDebt,
    OtherLongTermLiability,
    // Equity
    ShareCapital,
    RetainedEarnings,
    OtherEquity,
    // Revenue
    SalesRevenue,
    OtherRevenue,
    // Expenses
    CostOfGoodsSold,
    Salaries,
    Rent,
    Utilities,
    OtherExpense,
}

/// A ledger account with a running balance in its own currency.
///
/// Accounts are created once at chart setup; their balances are mutated
/// only by the ledger store's posting and reversal logic, and they are
/// never deleted in normal operation. `is_active` is advisory only,
/// filtering on it is a presentation concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub category: String,
    pub bucket: StatementBucket,
    pub balance: f64,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates an active account with a zero balance.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        account_type: AccountType,
        category: impl Into<String>,
        bucket: StatementBucket,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            code: code.into(),
            account_type,
            category: category.into(),
            bucket,
            balance: 0.0,
            currency: currency.into(),
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

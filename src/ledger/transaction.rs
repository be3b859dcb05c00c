use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Business classification of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionCategory {
    Sales,
    Purchase,
    Utility,
    Rent,
    Salary,
    Dividend,
    Other,
}

/// Coarse organizational bucket, independent of account classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionFolder {
    Bank,
    Expenses,
    Suspense,
}

/// Lifecycle stage of a transaction. No transition graph is enforced;
/// any stage may follow any other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Reconciled,
}

/// A posted double-entry transaction.
///
/// Posting moves `amount` into the debit account and out of the credit
/// account. `tax_amount` is derived from `vat_rate` at posting time and
/// kept in sync on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub reference: String,
    pub amount: f64,
    pub currency: String,
    pub category: TransactionCategory,
    pub folder: TransactionFolder,
    pub debit_account: Uuid,
    pub credit_account: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<f64>,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for posting a new transaction.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub category: TransactionCategory,
    pub folder: TransactionFolder,
    pub date: NaiveDate,
    pub reference: Option<String>,
    pub debit_account: Uuid,
    pub credit_account: Uuid,
    pub vat_rate: Option<f64>,
}

/// Partial update for an existing transaction. `None` fields keep their
/// current value; `vat_rate` can only be set, not cleared.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<TransactionCategory>,
    pub folder: Option<TransactionFolder>,
    pub debit_account: Option<Uuid>,
    pub credit_account: Option<Uuid>,
    pub vat_rate: Option<f64>,
    pub attachments: Option<Vec<String>>,
    pub status: Option<TransactionStatus>,
}

/// Filters for transaction listings. All bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub category: Option<TransactionCategory>,
    pub folder: Option<TransactionFolder>,
    pub currency: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub status: Option<TransactionStatus>,
}

impl TransactionFilters {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(from) = self.date_from {
            if txn.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if txn.date > to {
                return false;
            }
        }
        if let Some(category) = self.category {
            if txn.category != category {
                return false;
            }
        }
        if let Some(folder) = self.folder {
            if txn.folder != folder {
                return false;
            }
        }
        if let Some(currency) = self.currency.as_deref() {
            if txn.currency != currency {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if txn.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if txn.amount > max {
                return false;
            }
        }
        if let Some(status) = self.status {
            if txn.status != status {
                return false;
            }
        }
        true
    }
}

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    errors::{AccountingError, Result},
    reference,
    storage::{keys, KeyValueStore},
};

use super::{
    account::Account,
    chart::default_chart,
    transaction::{Transaction, TransactionDraft, TransactionFilters, TransactionPatch},
};

/// Owns the chart of accounts and the transaction log, keeping account
/// balances consistent with the log through posting and reversal.
///
/// The store expects a single synchronous caller at a time; the
/// reverse-then-reapply update sequence is not safe under concurrent
/// writers without external mutual exclusion.
pub struct LedgerStore {
    storage: Arc<dyn KeyValueStore>,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
}

impl LedgerStore {
    /// Opens the store against the given storage backend, restoring
    /// persisted state. Missing or corrupt data falls back to the default
    /// chart of accounts and an empty transaction log.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::open_with_chart(storage, default_chart())
    }

    /// Opens the store with a custom chart of accounts to seed when no
    /// persisted chart exists. Persisted accounts always win over the
    /// seed chart.
    pub fn open_with_chart(storage: Arc<dyn KeyValueStore>, chart: Vec<Account>) -> Self {
        let accounts: Option<Vec<Account>> = load_or_default(storage.as_ref(), keys::ACCOUNTS);
        let transactions: Option<Vec<Transaction>> =
            load_or_default(storage.as_ref(), keys::TRANSACTIONS);

        let mut store = Self {
            storage,
            accounts: accounts.unwrap_or_default(),
            transactions: transactions.unwrap_or_default(),
        };
        if store.accounts.is_empty() {
            store.accounts = chart;
            store.persist_key(keys::ACCOUNTS, &store.accounts);
        }
        store
    }

    /// Posts a new transaction, applying its balance effect to the debit
    /// and credit accounts. Validation failures leave every balance
    /// untouched.
    pub fn post_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        self.validate_posting(
            &draft.description,
            draft.amount,
            &draft.currency,
            draft.debit_account,
            draft.credit_account,
            draft.vat_rate,
        )?;

        let now = Utc::now();
        let transaction = Transaction {
            id: Uuid::new_v4(),
            date: draft.date,
            description: draft.description,
            reference: draft.reference.unwrap_or_default(),
            amount: draft.amount,
            currency: draft.currency,
            category: draft.category,
            folder: draft.folder,
            debit_account: draft.debit_account,
            credit_account: draft.credit_account,
            vat_rate: draft.vat_rate,
            tax_amount: draft.vat_rate.map(|rate| draft.amount * rate / 100.0),
            attachments: Vec::new(),
            status: super::TransactionStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.apply_balance_effect(&transaction);
        self.transactions.push(transaction.clone());
        self.persist();
        Ok(transaction)
    }

    /// Updates a transaction by reversing its old balance effect and
    /// reapplying the merged state. The reversal happens even when only
    /// non-monetary fields change, keeping the path uniform.
    ///
    /// Returns `Ok(None)` when no transaction has the given id.
    pub fn update_transaction(
        &mut self,
        id: Uuid,
        patch: TransactionPatch,
    ) -> Result<Option<Transaction>> {
        let Some(index) = self.transactions.iter().position(|txn| txn.id == id) else {
            return Ok(None);
        };

        let mut merged = self.transactions[index].clone();
        if let Some(date) = patch.date {
            merged.date = date;
        }
        if let Some(description) = patch.description {
            merged.description = description;
        }
        if let Some(reference) = patch.reference {
            merged.reference = reference;
        }
        if let Some(amount) = patch.amount {
            merged.amount = amount;
        }
        if let Some(currency) = patch.currency {
            merged.currency = currency;
        }
        if let Some(category) = patch.category {
            merged.category = category;
        }
        if let Some(folder) = patch.folder {
            merged.folder = folder;
        }
        if let Some(debit) = patch.debit_account {
            merged.debit_account = debit;
        }
        if let Some(credit) = patch.credit_account {
            merged.credit_account = credit;
        }
        if let Some(vat_rate) = patch.vat_rate {
            merged.vat_rate = Some(vat_rate);
        }
        if let Some(attachments) = patch.attachments {
            merged.attachments = attachments;
        }
        if let Some(status) = patch.status {
            merged.status = status;
        }
        merged.tax_amount = merged.vat_rate.map(|rate| merged.amount * rate / 100.0);
        merged.updated_at = Utc::now();

        // Validate the merged state before touching any balance.
        self.validate_posting(
            &merged.description,
            merged.amount,
            &merged.currency,
            merged.debit_account,
            merged.credit_account,
            merged.vat_rate,
        )?;

        let old = self.transactions[index].clone();
        self.reverse_balance_effect(&old);
        self.apply_balance_effect(&merged);
        self.transactions[index] = merged.clone();
        self.persist();
        Ok(Some(merged))
    }

    /// Reverses and removes a transaction. Returns `false` when the id is
    /// unknown.
    pub fn delete_transaction(&mut self, id: Uuid) -> bool {
        let Some(index) = self.transactions.iter().position(|txn| txn.id == id) else {
            return false;
        };
        let transaction = self.transactions.remove(index);
        self.reverse_balance_effect(&transaction);
        self.persist();
        true
    }

    /// Lists transactions matching the filters, newest date first. Equal
    /// dates keep insertion order.
    pub fn transactions(&self, filters: &TransactionFilters) -> Vec<&Transaction> {
        let mut matched: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|txn| filters.matches(txn))
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        matched
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// All accounts, inactive ones included.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_by_code(&self, code: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.code == code)
    }

    fn validate_posting(
        &self,
        description: &str,
        amount: f64,
        currency: &str,
        debit: Uuid,
        credit: Uuid,
        vat_rate: Option<f64>,
    ) -> Result<()> {
        if description.trim().is_empty() {
            return Err(AccountingError::Validation(
                "description must not be empty".into(),
            ));
        }
        if amount <= 0.0 {
            return Err(AccountingError::Validation("amount must be positive".into()));
        }
        if debit == credit {
            return Err(AccountingError::Validation(
                "debit and credit accounts must differ".into(),
            ));
        }
        if let Some(rate) = vat_rate {
            if !(0.0..=100.0).contains(&rate) {
                return Err(AccountingError::Validation(format!(
                    "VAT rate {rate} is outside 0-100"
                )));
            }
        }
        if !reference::is_currency_supported(currency) {
            return Err(AccountingError::UnknownCurrency(currency.to_string()));
        }
        let debit_account = self.account(debit).ok_or_else(|| {
            AccountingError::Validation(format!("debit account {debit} does not exist"))
        })?;
        let credit_account = self.account(credit).ok_or_else(|| {
            AccountingError::Validation(format!("credit account {credit} does not exist"))
        })?;
        // Cross-currency pairs are rejected outright; the store never
        // converts amounts implicitly.
        if debit_account.currency != credit_account.currency {
            return Err(AccountingError::Validation(format!(
                "cross-currency posting between {} and {} accounts",
                debit_account.currency, credit_account.currency
            )));
        }
        if !debit_account.currency.eq_ignore_ascii_case(currency) {
            return Err(AccountingError::Validation(format!(
                "transaction currency {currency} does not match account currency {}",
                debit_account.currency
            )));
        }
        Ok(())
    }

    fn apply_balance_effect(&mut self, transaction: &Transaction) {
        if let Some(account) = self.account_mut(transaction.debit_account) {
            account.balance += transaction.amount;
        }
        if let Some(account) = self.account_mut(transaction.credit_account) {
            account.balance -= transaction.amount;
        }
    }

    fn reverse_balance_effect(&mut self, transaction: &Transaction) {
        if let Some(account) = self.account_mut(transaction.debit_account) {
            account.balance -= transaction.amount;
        }
        if let Some(account) = self.account_mut(transaction.credit_account) {
            account.balance += transaction.amount;
        }
    }

    fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    fn persist(&self) {
        self.persist_key(keys::ACCOUNTS, &self.accounts);
        self.persist_key(keys::TRANSACTIONS, &self.transactions);
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

fn load_or_default<T: serde::de::DeserializeOwned>(
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

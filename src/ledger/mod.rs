//! Double-entry ledger: chart of accounts, transactions, and the store
//! that keeps balances consistent with the transaction log.

pub mod account;
pub mod chart;
pub mod store;
pub mod transaction;

pub use account::{Account, AccountType, StatementBucket};
pub use chart::default_chart;
pub use store::LedgerStore;
pub use transaction::{
    Transaction, TransactionCategory, TransactionDraft, TransactionFilters, TransactionFolder,
    TransactionPatch, TransactionStatus,
};

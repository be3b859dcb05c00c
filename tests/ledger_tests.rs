//! Integration tests for double-entry posting, reversal, and updates
//! through the public ledger API.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use accounting_core::errors::AccountingError;
use accounting_core::ledger::{
    Account, AccountType, LedgerStore, StatementBucket, TransactionCategory, TransactionDraft,
    TransactionFilters, TransactionFolder, TransactionPatch,
};
use accounting_core::storage::MemoryStore;

fn open_store() -> LedgerStore {
    LedgerStore::open(Arc::new(MemoryStore::new()))
}

fn draft(store: &LedgerStore, debit_code: &str, credit_code: &str, amount: f64) -> TransactionDraft {
    TransactionDraft {
        description: "integration posting".into(),
        amount,
        currency: "USD".into(),
        category: TransactionCategory::Other,
        folder: TransactionFolder::Bank,
        date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        reference: None,
        debit_account: store.account_by_code(debit_code).unwrap().id,
        credit_account: store.account_by_code(credit_code).unwrap().id,
        vat_rate: None,
    }
}

fn balance_sum(store: &LedgerStore) -> f64 {
    store.accounts().iter().map(|account| account.balance).sum()
}

#[test]
fn balances_always_sum_to_zero_across_a_posting_sequence() {
    let mut store = open_store();
    store
        .post_transaction(draft(&store, "1000", "3000", 10_000.0))
        .unwrap();
    store
        .post_transaction(draft(&store, "1100", "4000", 2_500.0))
        .unwrap();
    store
        .post_transaction(draft(&store, "6100", "1000", 800.0))
        .unwrap();

    assert!(balance_sum(&store).abs() < 1e-9);
    assert_eq!(store.account_by_code("1000").unwrap().balance, 9_200.0);
    assert_eq!(store.account_by_code("4000").unwrap().balance, -2_500.0);
}

#[test]
fn update_is_equivalent_to_delete_then_repost() {
    let mut updated_store = open_store();
    let original = updated_store
        .post_transaction(draft(&updated_store, "1000", "4000", 300.0))
        .unwrap();
    let patch = TransactionPatch {
        amount: Some(450.0),
        debit_account: Some(updated_store.account_by_code("1100").unwrap().id),
        ..Default::default()
    };
    updated_store
        .update_transaction(original.id, patch)
        .unwrap()
        .unwrap();

    let mut reposted_store = open_store();
    let first = reposted_store
        .post_transaction(draft(&reposted_store, "1000", "4000", 300.0))
        .unwrap();
    assert!(reposted_store.delete_transaction(first.id));
    reposted_store
        .post_transaction(draft(&reposted_store, "1100", "4000", 450.0))
        .unwrap();

    for code in ["1000", "1100", "4000"] {
        assert_eq!(
            updated_store.account_by_code(code).unwrap().balance,
            reposted_store.account_by_code(code).unwrap().balance,
            "balance diverged on account {code}"
        );
    }
}

#[test]
fn update_reverses_old_effect_even_for_account_changes() {
    let mut store = open_store();
    let txn = store
        .post_transaction(draft(&store, "1000", "4000", 1_000.0))
        .unwrap();
    let patch = TransactionPatch {
        credit_account: Some(store.account_by_code("4100").unwrap().id),
        ..Default::default()
    };
    store.update_transaction(txn.id, patch).unwrap().unwrap();

    assert_eq!(store.account_by_code("4000").unwrap().balance, 0.0);
    assert_eq!(store.account_by_code("4100").unwrap().balance, -1_000.0);
    assert_eq!(store.account_by_code("1000").unwrap().balance, 1_000.0);
}

#[test]
fn rejected_postings_leave_the_ledger_untouched() {
    let mut store = open_store();
    store
        .post_transaction(draft(&store, "1000", "3000", 5_000.0))
        .unwrap();

    let mut same_account = draft(&store, "1000", "4000", 100.0);
    same_account.credit_account = same_account.debit_account;
    assert!(store.post_transaction(same_account).is_err());

    let mut unknown_account = draft(&store, "1000", "4000", 100.0);
    unknown_account.debit_account = Uuid::new_v4();
    assert!(store.post_transaction(unknown_account).is_err());

    let mut bad_currency = draft(&store, "1000", "4000", 100.0);
    bad_currency.currency = "XXX".into();
    assert!(matches!(
        store.post_transaction(bad_currency),
        Err(AccountingError::UnknownCurrency(_))
    ));

    assert_eq!(store.transactions(&TransactionFilters::default()).len(), 1);
    assert_eq!(store.account_by_code("1000").unwrap().balance, 5_000.0);
}

#[test]
fn cross_currency_account_pairs_are_rejected() {
    let chart = vec![
        Account::new(
            "Cash",
            "1000",
            AccountType::Asset,
            "Current Assets",
            StatementBucket::Cash,
            "USD",
        ),
        Account::new(
            "EUR Cash",
            "1010",
            AccountType::Asset,
            "Current Assets",
            StatementBucket::Cash,
            "EUR",
        ),
        Account::new(
            "Sales Revenue",
            "4000",
            AccountType::Revenue,
            "Revenue",
            StatementBucket::SalesRevenue,
            "USD",
        ),
    ];
    let mut store = LedgerStore::open_with_chart(Arc::new(MemoryStore::new()), chart);

    let mixed = TransactionDraft {
        description: "mixed pair".into(),
        amount: 100.0,
        currency: "USD".into(),
        category: TransactionCategory::Other,
        folder: TransactionFolder::Bank,
        date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        reference: None,
        debit_account: store.account_by_code("1010").unwrap().id,
        credit_account: store.account_by_code("4000").unwrap().id,
        vat_rate: None,
    };
    assert!(matches!(
        store.post_transaction(mixed),
        Err(AccountingError::Validation(_))
    ));

    let wrong_txn_currency = TransactionDraft {
        description: "eur amount against usd pair".into(),
        amount: 100.0,
        currency: "EUR".into(),
        category: TransactionCategory::Other,
        folder: TransactionFolder::Bank,
        date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        reference: None,
        debit_account: store.account_by_code("1000").unwrap().id,
        credit_account: store.account_by_code("4000").unwrap().id,
        vat_rate: None,
    };
    assert!(store.post_transaction(wrong_txn_currency).is_err());
    assert!(store.accounts().iter().all(|a| a.balance == 0.0));
}

#[test]
fn date_range_filters_are_inclusive() {
    let mut store = open_store();
    for (day, amount) in [(1, 10.0), (15, 20.0), (28, 30.0)] {
        let mut posting = draft(&store, "1000", "4000", amount);
        posting.date = NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
        store.post_transaction(posting).unwrap();
    }

    let filters = TransactionFilters {
        date_from: NaiveDate::from_ymd_opt(2024, 2, 15),
        date_to: NaiveDate::from_ymd_opt(2024, 2, 28),
        ..Default::default()
    };
    let listed = store.transactions(&filters);
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].amount, 30.0);
    assert_eq!(listed[1].amount, 20.0);
}

//! Integration tests for invoice lifecycle and derived totals through the
//! public invoicing API.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use uuid::Uuid;

use accounting_core::errors::AccountingError;
use accounting_core::invoicing::{
    Customer, InvoiceBook, InvoiceDraft, InvoiceFilters, InvoiceItemDraft, InvoicePatch,
    InvoiceStatus, Vendor,
};
use accounting_core::storage::MemoryStore;

fn open_book_with_customer() -> (InvoiceBook, Uuid) {
    let mut book = InvoiceBook::open(Arc::new(MemoryStore::new()));
    let customer_id = book.add_customer(Customer::new(
        "Acme Ltd",
        "1 High Street, London",
        "GB",
        "GBP",
    ));
    (book, customer_id)
}

fn item(description: &str, quantity: u32, unit_price: f64) -> InvoiceItemDraft {
    InvoiceItemDraft {
        description: description.into(),
        quantity,
        unit_price,
        vat_rate: 20.0,
    }
}

fn draft(customer_id: Uuid, items: Vec<InvoiceItemDraft>) -> InvoiceDraft {
    InvoiceDraft {
        customer_id,
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        currency: "GBP".into(),
        items,
        vat_rate: 20.0,
        notes: None,
    }
}

#[test]
fn totals_always_satisfy_the_subtotal_vat_total_identity() {
    let (mut book, customer_id) = open_book_with_customer();
    let invoice = book
        .create_invoice(draft(
            customer_id,
            vec![item("Consulting", 4, 250.0), item("Travel", 1, 80.0)],
        ))
        .unwrap();

    assert_eq!(invoice.subtotal(), 1_080.0);
    assert_eq!(invoice.vat_amount(), 216.0);
    assert_eq!(invoice.total_amount(), 1_296.0);
    assert!(
        (invoice.subtotal() + invoice.vat_amount() - invoice.total_amount()).abs() < 1e-9
    );
}

#[test]
fn numbers_are_sequential_within_the_year() {
    let (mut book, customer_id) = open_book_with_customer();
    let year = Utc::now().year();
    for sequence in 1..=3 {
        let invoice = book
            .create_invoice(draft(customer_id, vec![item("Widget", 1, 10.0)]))
            .unwrap();
        assert_eq!(invoice.number, format!("INV-{year}-{sequence:04}"));
    }
}

#[test]
fn creation_snapshots_the_customer_record() {
    let (mut book, customer_id) = open_book_with_customer();
    let invoice = book
        .create_invoice(draft(customer_id, vec![item("Widget", 1, 10.0)]))
        .unwrap();
    assert_eq!(invoice.customer_name, "Acme Ltd");
    assert_eq!(invoice.customer_address, "1 High Street, London");
    assert_eq!(invoice.status, InvoiceStatus::Draft);
}

#[test]
fn unknown_customer_and_unknown_currency_are_rejected() {
    let (mut book, customer_id) = open_book_with_customer();

    let err = book
        .create_invoice(draft(Uuid::new_v4(), vec![item("Widget", 1, 10.0)]))
        .unwrap_err();
    assert!(matches!(err, AccountingError::Validation(_)));

    let mut bad_currency = draft(customer_id, vec![item("Widget", 1, 10.0)]);
    bad_currency.currency = "XXX".into();
    assert!(matches!(
        book.create_invoice(bad_currency),
        Err(AccountingError::UnknownCurrency(_))
    ));
    assert!(book.invoices(&InvoiceFilters::default()).is_empty());
}

#[test]
fn item_replacement_rederives_totals_through_a_patch() {
    let (mut book, customer_id) = open_book_with_customer();
    let invoice = book
        .create_invoice(draft(customer_id, vec![item("Consulting", 4, 250.0)]))
        .unwrap();
    assert_eq!(invoice.total_amount(), 1_200.0);

    let patch = InvoicePatch {
        items: Some(vec![item("Retainer", 2, 50.0)]),
        vat_rate: Some(10.0),
        ..Default::default()
    };
    let updated = book.update_invoice(invoice.id, patch).unwrap().unwrap();
    assert_eq!(updated.subtotal(), 100.0);
    assert_eq!(updated.vat_amount(), 10.0);
    assert_eq!(updated.total_amount(), 110.0);
}

#[test]
fn filters_select_by_customer_status_and_derived_amount() {
    let (mut book, first_customer) = open_book_with_customer();
    let second_customer = book.add_customer(Customer::new(
        "Globex",
        "9 Low Road",
        "DE",
        "EUR",
    ));

    let small = book
        .create_invoice(draft(first_customer, vec![item("Widget", 1, 10.0)]))
        .unwrap();
    let mut eur_draft = draft(second_customer, vec![item("Gadget", 10, 100.0)]);
    eur_draft.currency = "EUR".into();
    let large = book.create_invoice(eur_draft).unwrap();
    book.update_invoice(
        large.id,
        InvoicePatch {
            status: Some(InvoiceStatus::Sent),
            ..Default::default()
        },
    )
    .unwrap();

    let by_customer = InvoiceFilters {
        customer_id: Some(first_customer),
        ..Default::default()
    };
    let listed = book.invoices(&by_customer);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, small.id);

    let by_status_and_amount = InvoiceFilters {
        status: Some(InvoiceStatus::Sent),
        min_amount: Some(1_000.0),
        ..Default::default()
    };
    let listed = book.invoices(&by_status_and_amount);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, large.id);
}

#[test]
fn vendors_are_registered_and_looked_up_independently() {
    let mut book = InvoiceBook::open(Arc::new(MemoryStore::new()));
    let vendor_id = book.add_vendor(Vendor::new("Paper Co", "2 Mill Lane", "GB", "GBP"));
    assert_eq!(book.vendors().len(), 1);
    assert_eq!(book.vendor(vendor_id).unwrap().name, "Paper Co");
    assert!(book.vendor(Uuid::new_v4()).is_none());
}

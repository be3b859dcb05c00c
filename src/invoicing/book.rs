use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    errors::{AccountingError, Result},
    reference,
    storage::{keys, KeyValueStore},
};

use super::{
    contact::{Customer, Vendor},
    invoice::{Invoice, InvoiceDraft, InvoiceFilters, InvoiceItem, InvoiceItemDraft, InvoicePatch,
        InvoiceStatus},
};

/// Owns invoices and their counterparty records. Independent of the
/// ledger: creating or deleting an invoice never touches account balances.
pub struct InvoiceBook {
    storage: Arc<dyn KeyValueStore>,
    invoices: Vec<Invoice>,
    customers: Vec<Customer>,
    vendors: Vec<Vendor>,
}

impl InvoiceBook {
    /// Opens the book against the given storage backend. Missing or
    /// corrupt data falls back to empty collections.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let invoices = load_or_warn(storage.as_ref(), keys::INVOICES).unwrap_or_default();
        let customers = load_or_warn(storage.as_ref(), keys::CUSTOMERS).unwrap_or_default();
        let vendors = load_or_warn(storage.as_ref(), keys::VENDORS).unwrap_or_default();
        Self {
            storage,
            invoices,
            customers,
            vendors,
        }
    }

    /// Creates an invoice for a known customer, snapshotting the customer
    /// name and address. The invoice number is sequential within the
    /// current year: `INV-{year}-{seq:04}`.
    pub fn create_invoice(&mut self, draft: InvoiceDraft) -> Result<Invoice> {
        let customer = self
            .customer(draft.customer_id)
            .ok_or_else(|| {
                AccountingError::Validation(format!(
                    "customer {} does not exist",
                    draft.customer_id
                ))
            })?
            .clone();
        validate_currency(&draft.currency)?;
        validate_vat_rate(draft.vat_rate)?;
        let items = build_items(draft.items)?;

        let now = Utc::now();
        let invoice = Invoice {
            id: Uuid::new_v4(),
            number: format!(
                "INV-{}-{:04}",
                now.year(),
                self.invoices.len() + 1
            ),
            customer_id: customer.id,
            customer_name: customer.name,
            customer_address: customer.address,
            date: draft.date,
            due_date: draft.due_date,
            currency: draft.currency,
            items,
            vat_rate: draft.vat_rate,
            status: InvoiceStatus::Draft,
            notes: draft.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.invoices.push(invoice.clone());
        self.persist_key(keys::INVOICES, &self.invoices);
        Ok(invoice)
    }

    /// Merges the patch into an existing invoice. Totals need no explicit
    /// recomputation since they are derived on access. Returns `Ok(None)`
    /// when the id is unknown.
    pub fn update_invoice(&mut self, id: Uuid, patch: InvoicePatch) -> Result<Option<Invoice>> {
        let Some(index) = self.invoices.iter().position(|invoice| invoice.id == id) else {
            return Ok(None);
        };

        let mut merged = self.invoices[index].clone();
        if let Some(customer_id) = patch.customer_id {
            let customer = self.customer(customer_id).ok_or_else(|| {
                AccountingError::Validation(format!("customer {customer_id} does not exist"))
            })?;
            merged.customer_id = customer.id;
            merged.customer_name = customer.name.clone();
            merged.customer_address = customer.address.clone();
        }
        if let Some(date) = patch.date {
            merged.date = date;
        }
        if let Some(due_date) = patch.due_date {
            merged.due_date = due_date;
        }
        if let Some(currency) = patch.currency {
            validate_currency(&currency)?;
            merged.currency = currency;
        }
        if let Some(items) = patch.items {
            merged.items = build_items(items)?;
        }
        if let Some(vat_rate) = patch.vat_rate {
            validate_vat_rate(vat_rate)?;
            merged.vat_rate = vat_rate;
        }
        if let Some(status) = patch.status {
            merged.status = status;
        }
        if let Some(notes) = patch.notes {
            merged.notes = notes;
        }
        merged.updated_at = Utc::now();

        self.invoices[index] = merged.clone();
        self.persist_key(keys::INVOICES, &self.invoices);
        Ok(Some(merged))
    }

    /// Removes an invoice. No reversal is needed; invoices never mutate
    /// ledger balances. Returns `false` when the id is unknown.
    pub fn delete_invoice(&mut self, id: Uuid) -> bool {
        let before = self.invoices.len();
        self.invoices.retain(|invoice| invoice.id != id);
        if self.invoices.len() == before {
            return false;
        }
        self.persist_key(keys::INVOICES, &self.invoices);
        true
    }

    /// Lists invoices matching the filters, newest date first. Equal dates
    /// keep insertion order.
    pub fn invoices(&self, filters: &InvoiceFilters) -> Vec<&Invoice> {
        let mut matched: Vec<&Invoice> = self
            .invoices
            .iter()
            .filter(|invoice| filters.matches(invoice))
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        matched
    }

    pub fn invoice(&self, id: Uuid) -> Option<&Invoice> {
        self.invoices.iter().find(|invoice| invoice.id == id)
    }

    pub fn add_customer(&mut self, customer: Customer) -> Uuid {
        let id = customer.id;
        self.customers.push(customer);
        self.persist_key(keys::CUSTOMERS, &self.customers);
        id
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, id: Uuid) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    pub fn add_vendor(&mut self, vendor: Vendor) -> Uuid {
        let id = vendor.id;
        self.vendors.push(vendor);
        self.persist_key(keys::VENDORS, &self.vendors);
        id
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn vendor(&self, id: Uuid) -> Option<&Vendor> {
        self.vendors.iter().find(|vendor| vendor.id == id)
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

fn build_items(drafts: Vec<InvoiceItemDraft>) -> Result<Vec<InvoiceItem>> {
    drafts
        .into_iter()
        .map(|draft| {
            if draft.description.trim().is_empty() {
                return Err(AccountingError::Validation(
                    "item description must not be empty".into(),
                ));
            }
            if draft.quantity == 0 {
                return Err(AccountingError::Validation(
                    "item quantity must be positive".into(),
                ));
            }
            validate_vat_rate(draft.vat_rate)?;
            Ok(InvoiceItem {
                id: Uuid::new_v4(),
                description: draft.description,
                quantity: draft.quantity,
                unit_price: draft.unit_price,
                vat_rate: draft.vat_rate,
            })
        })
        .collect()
}

fn validate_currency(code: &str) -> Result<()> {
    if reference::is_currency_supported(code) {
        Ok(())
    } else {
        Err(AccountingError::UnknownCurrency(code.to_string()))
    }
}

fn validate_vat_rate(rate: f64) -> Result<()> {
    if (0.0..=100.0).contains(&rate) {
        Ok(())
    } else {
        Err(AccountingError::Validation(format!(
            "VAT rate {rate} is outside 0-100"
        )))
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

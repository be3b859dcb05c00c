use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice lifecycle stage. No transition graph is enforced; any stage may
/// follow any other, and `Overdue` is set by callers, not derived.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

/// One invoice line. The line amount is always derived from quantity and
/// unit price, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceItem {
    pub id: Uuid,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub vat_rate: f64,
}

impl InvoiceItem {
    pub fn amount(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// An invoice with totals computed on access from its items and VAT rate,
/// so partial updates can never leave a stale stored total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub customer_id: Uuid,
    /// Customer snapshot taken at creation time.
    pub customer_name: String,
    pub customer_address: String,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub currency: String,
    pub items: Vec<InvoiceItem>,
    pub vat_rate: f64,
    pub status: InvoiceStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(InvoiceItem::amount).sum()
    }

    pub fn vat_amount(&self) -> f64 {
        self.subtotal() * self.vat_rate / 100.0
    }

    pub fn total_amount(&self) -> f64 {
        self.subtotal() + self.vat_amount()
    }
}

/// Input line for invoice creation or item replacement.
#[derive(Debug, Clone)]
pub struct InvoiceItemDraft {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub vat_rate: f64,
}

/// Input for creating a new invoice.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub customer_id: Uuid,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub currency: String,
    pub items: Vec<InvoiceItemDraft>,
    pub vat_rate: f64,
    pub notes: Option<String>,
}

/// Partial update for an existing invoice. Replacing `items` re-derives
/// all totals automatically since they are computed on access.
#[derive(Debug, Clone, Default)]
pub struct InvoicePatch {
    pub customer_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub currency: Option<String>,
    pub items: Option<Vec<InvoiceItemDraft>>,
    pub vat_rate: Option<f64>,
    pub status: Option<InvoiceStatus>,
    pub notes: Option<String>,
}

/// Filters for invoice listings. Amount bounds apply to the derived total.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
    pub customer_id: Option<Uuid>,
    pub currency: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl InvoiceFilters {
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(from) = self.date_from {
            if invoice.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if invoice.date > to {
                return false;
            }
        }
        if let Some(status) = self.status {
            if invoice.status != status {
                return false;
            }
        }
        if let Some(customer_id) = self.customer_id {
            if invoice.customer_id != customer_id {
                return false;
            }
        }
        if let Some(currency) = self.currency.as_deref() {
            if invoice.currency != currency {
                return false;
            }
        }
        let total = invoice.total_amount();
        if let Some(min) = self.min_amount {
            if total < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if total > max {
                return false;
            }
        }
        true
    }
}

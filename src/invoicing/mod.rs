//! Invoice management: invoices with derived totals, plus the customer and
//! vendor counterparty registry. Invoices never post to the ledger.

pub mod book;
pub mod contact;
pub mod invoice;

pub use book::InvoiceBook;
pub use contact::{Customer, Vendor};
pub use invoice::{
    Invoice, InvoiceDraft, InvoiceFilters, InvoiceItem, InvoiceItemDraft, InvoicePatch,
    InvoiceStatus,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice counterparty. Pure data: no behavior beyond storage and lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    pub currency: String,
    pub credit_limit: f64,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        country: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            address: address.into(),
            country: country.into(),
            tax_id: None,
            currency: currency.into(),
            credit_limit: 0.0,
            balance: 0.0,
            created_at: Utc::now(),
        }
    }
}

/// Purchase-side counterparty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vendor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    pub currency: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

impl Vendor {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        country: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            address: address.into(),
            country: country.into(),
            tax_id: None,
            currency: currency.into(),
            balance: 0.0,
            created_at: Utc::now(),
        }
    }
}

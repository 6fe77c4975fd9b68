use serde::{Deserialize, Serialize};

use super::{Entity, ServerTimestamp};

/// A customer record as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,

    /// Customer name. Older backend builds send it as `username`.
    #[serde(alias = "username")]
    pub name: String,

    pub email: String,

    #[serde(default)]
    pub phone: String,

    /// Set by the server on insert.
    #[serde(default)]
    pub created_at: Option<ServerTimestamp>,

    /// Jackson drops the `is` prefix of boolean getters, so both spellings
    /// appear on the wire.
    #[serde(rename = "isActive", alias = "active", default = "default_active")]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Entity for Customer {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Body of `POST /customers` and `PUT /customers/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Default for CustomerRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            is_active: true,
        }
    }
}

impl From<&Customer> for CustomerRequest {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            is_active: customer.is_active,
        }
    }
}

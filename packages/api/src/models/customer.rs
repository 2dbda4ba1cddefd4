//! Customer profiles and the bulk-assignment request shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Kind of customer account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    Individual,
    Institution,
    Agency,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Individual => "individual",
            CustomerType::Institution => "institution",
            CustomerType::Agency => "agency",
        }
    }

    pub fn all() -> &'static [CustomerType] {
        &[
            CustomerType::Individual,
            CustomerType::Institution,
            CustomerType::Agency,
        ]
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(CustomerType::Individual),
            "institution" => Ok(CustomerType::Institution),
            "agency" => Ok(CustomerType::Agency),
            other => Err(format!("unknown customer type: {}", other)),
        }
    }
}

/// Full customer record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct CustomerProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub customer_type: String,
    pub country: Option<String>,
    pub state: Option<String>,
    pub organization: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl CustomerProfile {
    pub fn to_info(&self, assigned_to_name: Option<String>) -> CustomerInfo {
        CustomerInfo {
            id: self.id.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            customer_type: self.customer_type.clone(),
            country: self.country.clone(),
            state: self.state.clone(),
            organization: self.organization.clone(),
            assigned_to: self.assigned_to.map(|u| u.to_string()),
            assigned_to_name,
        }
    }
}

/// Customer information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub customer_type: String,
    pub country: Option<String>,
    pub state: Option<String>,
    pub organization: Option<String>,
    pub assigned_to: Option<String>,
    pub assigned_to_name: Option<String>,
}

/// Active listing filters. `None` fields are not applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerFilters {
    pub search: Option<String>,
    pub customer_type: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
}

impl CustomerFilters {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.customer_type.is_none()
            && self.country.is_none()
            && self.state.is_none()
    }
}

/// Bulk assignment request. Exactly one of `customer_ids` and `filters` is
/// set: explicit ids when rows are selected, the active filters otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkAssignRequest {
    pub customer_ids: Option<Vec<String>>,
    pub filters: Option<CustomerFilters>,
    pub assigned_to: String,
}

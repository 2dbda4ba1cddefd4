//! Invoices and the shared totals arithmetic.
//!
//! [`compute_totals`] lives here (not behind the `server` feature) because the
//! create-invoice dialog shows a running subtotal from the same arithmetic the
//! server uses to persist the invoice. Amounts are rounded to cents.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, NaiveDate, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// One billable line on an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: 1,
            unit_price: 0.0,
        }
    }
}

/// Computed money amounts for an invoice.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Sum the line items and apply the percentage tax rate.
pub fn compute_totals(items: &[LineItem], tax_rate: f64) -> InvoiceTotals {
    let subtotal: f64 = items
        .iter()
        .map(|i| i.quantity as f64 * i.unit_price)
        .sum();
    let subtotal = round_cents(subtotal);
    let tax = round_cents(subtotal * tax_rate / 100.0);
    InvoiceTotals {
        subtotal,
        tax,
        total: round_cents(subtotal + tax),
    }
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub customer_id: Uuid,
    /// JSON array of [`LineItem`].
    pub items: serde_json::Value,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax: f64,
    pub total: f64,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Invoice {
    pub fn to_info(&self, customer_name: String) -> InvoiceInfo {
        InvoiceInfo {
            id: self.id.to_string(),
            number: self.number.clone(),
            customer_id: self.customer_id.to_string(),
            customer_name,
            items: serde_json::from_value(self.items.clone()).unwrap_or_default(),
            subtotal: self.subtotal,
            tax_rate: self.tax_rate,
            tax: self.tax,
            total: self.total,
            status: self.status.clone(),
            due_date: self.due_date.map(|d| d.to_string()),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceInfo {
    pub id: String,
    pub number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax: f64,
    pub total: f64,
    /// "draft", "sent", "paid", or "void".
    pub status: String,
    pub due_date: Option<String>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: u32, price: f64) -> LineItem {
        LineItem {
            description: "svc".to_string(),
            quantity: qty,
            unit_price: price,
        }
    }

    #[test]
    fn test_totals_with_18_percent_tax() {
        let totals = compute_totals(&[item(2, 100.0), item(1, 50.0)], 18.0);
        assert_eq!(totals.subtotal, 250.0);
        assert_eq!(totals.tax, 45.0);
        assert_eq!(totals.total, 295.0);
    }

    #[test]
    fn test_totals_round_to_cents() {
        let totals = compute_totals(&[item(3, 33.333)], 10.0);
        assert_eq!(totals.subtotal, 100.0);
        assert_eq!(totals.tax, 10.0);
        assert_eq!(totals.total, 110.0);
    }

    #[test]
    fn test_empty_items_are_zero() {
        let totals = compute_totals(&[], 18.0);
        assert_eq!(totals.total, 0.0);
    }
}

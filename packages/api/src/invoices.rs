//! Billing server functions. Totals are computed server-side from the line
//! items; the client never sends money amounts.

use dioxus::prelude::*;

use crate::models::{compute_totals, InvoiceInfo, LineItem, Paginated, Role};

#[cfg(feature = "server")]
const BILLING_ROLES: &[Role] = &[Role::SuperAdmin, Role::Manager, Role::FinanceAdmin];

/// Sequential invoice number, scoped per calendar year: `INV-<year>-<seq:05>`.
#[cfg(feature = "server")]
fn format_invoice_number(year: i32, seq: i64) -> String {
    format!("INV-{}-{:05}", year, seq)
}

/// Create an invoice. The server sums the line items, applies the tax rate,
/// and allocates the next invoice number for the current year.
#[cfg(feature = "server")]
#[post("/api/invoices", session: tower_sessions::Session)]
pub async fn create_invoice(
    customer_id: String,
    items: Vec<LineItem>,
    tax_rate: f64,
    due_date: Option<String>,
) -> Result<InvoiceInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Invoice;
    use chrono::Datelike;

    crate::auth::require_role(&session, BILLING_ROLES).await?;

    if items.is_empty() {
        return Err(ServerFnError::new("At least one line item is required"));
    }
    if items.iter().any(|i| i.description.trim().is_empty()) {
        return Err(ServerFnError::new("Every line item needs a description"));
    }
    if !(0.0..=100.0).contains(&tax_rate) {
        return Err(ServerFnError::new("Tax rate must be between 0 and 100"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let customer_uuid = uuid::Uuid::parse_str(&customer_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let customer: Option<(String,)> =
        sqlx::query_as("SELECT name FROM customer_profiles WHERE id = $1")
            .bind(customer_uuid)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some((customer_name,)) = customer else {
        return Err(ServerFnError::new("Customer not found"));
    };

    let due = match due_date.as_deref() {
        None | Some("") => None,
        Some(s) => Some(
            s.parse::<chrono::NaiveDate>()
                .map_err(|e| ServerFnError::new(e.to_string()))?,
        ),
    };

    let totals = compute_totals(&items, tax_rate);
    let items_json =
        serde_json::to_value(&items).map_err(|e| ServerFnError::new(e.to_string()))?;

    let year = chrono::Utc::now().year();
    let prefix = format!("INV-{}-%", year);

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    // Serialize number allocation against concurrent inserts.
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(year as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoices WHERE number LIKE $1")
        .bind(&prefix)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let number = format_invoice_number(year, count + 1);

    let invoice: Invoice = sqlx::query_as(
        "INSERT INTO invoices (number, customer_id, items, subtotal, tax_rate, tax, total, due_date)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(&number)
    .bind(customer_uuid)
    .bind(&items_json)
    .bind(totals.subtotal)
    .bind(tax_rate)
    .bind(totals.tax)
    .bind(totals.total)
    .bind(due)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    tx.commit()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(number = %invoice.number, total = invoice.total, "invoice created");

    Ok(invoice.to_info(customer_name))
}

#[cfg(not(feature = "server"))]
#[post("/api/invoices")]
pub async fn create_invoice(
    customer_id: String,
    items: Vec<LineItem>,
    tax_rate: f64,
    due_date: Option<String>,
) -> Result<InvoiceInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// List invoices with pagination, optional status filter, and number/customer
/// search.
#[cfg(feature = "server")]
#[get("/api/invoices", session: tower_sessions::Session)]
pub async fn list_invoices(
    page: u32,
    limit: u32,
    status: Option<String>,
    search: Option<String>,
) -> Result<Paginated<InvoiceInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Invoice;

    crate::auth::require_role(&session, BILLING_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let page = page.max(1);
    let limit = limit.clamp(1, 100);

    let push_where = |builder: &mut sqlx::QueryBuilder<'_, sqlx::Postgres>| {
        if let Some(ref status) = status {
            if !status.is_empty() {
                builder.push(" AND i.status = ").push_bind(status.clone());
            }
        }
        if let Some(ref search) = search {
            if !search.trim().is_empty() {
                let pattern = format!("%{}%", search.trim());
                builder
                    .push(" AND (i.number ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR c.name ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        }
    };

    let mut count_query = sqlx::QueryBuilder::new(
        "SELECT COUNT(*) FROM invoices i JOIN customer_profiles c ON c.id = i.customer_id WHERE TRUE",
    );
    push_where(&mut count_query);
    let (total,): (i64,) = count_query
        .build_query_as()
        .fetch_one(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    #[derive(sqlx::FromRow)]
    struct InvoiceRow {
        #[sqlx(flatten)]
        invoice: Invoice,
        customer_name: String,
    }

    let mut list_query = sqlx::QueryBuilder::new(
        "SELECT i.*, c.name AS customer_name
         FROM invoices i JOIN customer_profiles c ON c.id = i.customer_id WHERE TRUE",
    );
    push_where(&mut list_query);
    list_query
        .push(" ORDER BY i.created_at DESC LIMIT ")
        .push_bind(limit as i64)
        .push(" OFFSET ")
        .push_bind(((page - 1) * limit) as i64);

    let rows: Vec<InvoiceRow> = list_query
        .build_query_as()
        .fetch_all(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let data = rows
        .iter()
        .map(|row| row.invoice.to_info(row.customer_name.clone()))
        .collect();

    Ok(Paginated::new(data, page, limit, total as u64))
}

#[cfg(not(feature = "server"))]
#[get("/api/invoices")]
pub async fn list_invoices(
    page: u32,
    limit: u32,
    status: Option<String>,
    search: Option<String>,
) -> Result<Paginated<InvoiceInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_number_format() {
        assert_eq!(format_invoice_number(2026, 1), "INV-2026-00001");
        assert_eq!(format_invoice_number(2026, 123), "INV-2026-00123");
        assert_eq!(format_invoice_number(2026, 99999), "INV-2026-99999");
    }
}

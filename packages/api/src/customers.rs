//! Customer listing and bulk assignment server functions.

use dioxus::prelude::*;

use crate::models::{BulkAssignRequest, CustomerFilters, CustomerInfo, Paginated, Role};

#[cfg(feature = "server")]
fn push_filters(builder: &mut sqlx::QueryBuilder<'_, sqlx::Postgres>, filters: &CustomerFilters) {
    if let Some(ref search) = filters.search {
        if !search.trim().is_empty() {
            let pattern = format!("%{}%", search.trim());
            builder
                .push(" AND (c.name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.organization ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
    if let Some(ref t) = filters.customer_type {
        if !t.is_empty() {
            builder.push(" AND c.customer_type = ").push_bind(t.clone());
        }
    }
    if let Some(ref country) = filters.country {
        if !country.is_empty() {
            builder.push(" AND c.country = ").push_bind(country.clone());
        }
    }
    if let Some(ref state) = filters.state {
        if !state.is_empty() {
            builder.push(" AND c.state = ").push_bind(state.clone());
        }
    }
}

/// List customers with pagination and optional filters.
#[cfg(feature = "server")]
#[get("/api/customers", session: tower_sessions::Session)]
pub async fn list_customers(
    page: u32,
    limit: u32,
    search: Option<String>,
    customer_type: Option<String>,
    country: Option<String>,
    state: Option<String>,
) -> Result<Paginated<CustomerInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::CustomerProfile;

    crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let page = page.max(1);
    let limit = limit.clamp(1, 100);
    let filters = CustomerFilters {
        search,
        customer_type,
        country,
        state,
    };

    let mut count_query =
        sqlx::QueryBuilder::new("SELECT COUNT(*) FROM customer_profiles c WHERE TRUE");
    push_filters(&mut count_query, &filters);
    let (total,): (i64,) = count_query
        .build_query_as()
        .fetch_one(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let mut list_query =
        sqlx::QueryBuilder::new("SELECT c.* FROM customer_profiles c WHERE TRUE");
    push_filters(&mut list_query, &filters);
    list_query
        .push(" ORDER BY c.created_at DESC LIMIT ")
        .push_bind(limit as i64)
        .push(" OFFSET ")
        .push_bind(((page - 1) * limit) as i64);

    let customers: Vec<CustomerProfile> = list_query
        .build_query_as()
        .fetch_all(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let mut data = Vec::with_capacity(customers.len());
    for customer in &customers {
        let assigned_to_name = match customer.assigned_to {
            Some(user_id) => {
                let row: Option<(Option<String>, String)> =
                    sqlx::query_as("SELECT name, email FROM users WHERE id = $1")
                        .bind(user_id)
                        .fetch_optional(pool)
                        .await
                        .map_err(|e| ServerFnError::new(e.to_string()))?;
                row.map(|(name, email)| name.unwrap_or(email))
            }
            None => None,
        };
        data.push(customer.to_info(assigned_to_name));
    }

    Ok(Paginated::new(data, page, limit, total as u64))
}

#[cfg(not(feature = "server"))]
#[get("/api/customers")]
pub async fn list_customers(
    page: u32,
    limit: u32,
    search: Option<String>,
    customer_type: Option<String>,
    country: Option<String>,
    state: Option<String>,
) -> Result<Paginated<CustomerInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Assign a batch of customers to a staff user. The request carries either an
/// explicit id list or the active filters, never both; anything else is
/// rejected. Returns the number of rows updated.
#[cfg(feature = "server")]
#[post("/api/customers/bulk-assign", session: tower_sessions::Session)]
pub async fn bulk_assign(request: BulkAssignRequest) -> Result<u64, ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, &[Role::SuperAdmin, Role::Manager]).await?;

    match (&request.customer_ids, &request.filters) {
        (Some(ids), None) if !ids.is_empty() => {}
        (None, Some(_)) => {}
        _ => {
            return Err(ServerFnError::new(
                "Provide either customer ids or filters, not both",
            ))
        }
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let assignee = uuid::Uuid::parse_str(&request.assigned_to)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let staff: Option<(uuid::Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE id = $1")
        .bind(assignee)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    if staff.is_none() {
        return Err(ServerFnError::new("Assignee not found"));
    }

    let affected = if let Some(ids) = &request.customer_ids {
        let mut uuids = Vec::with_capacity(ids.len());
        for id in ids {
            uuids.push(
                uuid::Uuid::parse_str(id).map_err(|e| ServerFnError::new(e.to_string()))?,
            );
        }
        sqlx::query(
            "UPDATE customer_profiles SET assigned_to = $1, updated_at = NOW() WHERE id = ANY($2)",
        )
        .bind(assignee)
        .bind(&uuids)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?
        .rows_affected()
    } else {
        let filters = request
            .filters
            .as_ref()
            .ok_or_else(|| ServerFnError::new("Provide either customer ids or filters"))?;
        let mut builder = sqlx::QueryBuilder::new(
            "UPDATE customer_profiles c SET assigned_to = ",
        );
        builder
            .push_bind(assignee)
            .push(", updated_at = NOW() WHERE TRUE");
        push_filters(&mut builder, filters);
        builder
            .build()
            .execute(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?
            .rows_affected()
    };

    tracing::info!(affected, "bulk customer assignment");

    Ok(affected)
}

#[cfg(not(feature = "server"))]
#[post("/api/customers/bulk-assign")]
pub async fn bulk_assign(request: BulkAssignRequest) -> Result<u64, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

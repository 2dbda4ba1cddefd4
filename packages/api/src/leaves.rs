//! Leave-balance server functions. Allocations come from HR; `*_used`
//! counters are server-owned and never accepted from the client.

use dioxus::prelude::*;

use crate::models::{LeaveBalanceInfo, Role};

#[cfg(feature = "server")]
const HR_ROLES: &[Role] = &[Role::SuperAdmin, Role::Manager];

/// List leave balances for a year, optionally filtered by employee name.
#[cfg(feature = "server")]
#[get("/api/staff/leaves/balance", session: tower_sessions::Session)]
pub async fn list_leave_balances(
    year: i32,
    search: Option<String>,
) -> Result<Vec<LeaveBalanceInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::LeaveBalance;

    crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let rows: Vec<(LeaveBalance, String)> = match search.as_deref().filter(|s| !s.trim().is_empty())
    {
        Some(search) => {
            let pattern = format!("%{}%", search.trim());
            let balances: Vec<LeaveBalance> = sqlx::query_as(
                "SELECT b.* FROM leave_balances b JOIN employees e ON e.id = b.employee_id
                 WHERE b.year = $1 AND e.name ILIKE $2 ORDER BY e.name",
            )
            .bind(year)
            .bind(pattern)
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;
            with_names(pool, balances).await?
        }
        None => {
            let balances: Vec<LeaveBalance> = sqlx::query_as(
                "SELECT b.* FROM leave_balances b JOIN employees e ON e.id = b.employee_id
                 WHERE b.year = $1 ORDER BY e.name",
            )
            .bind(year)
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;
            with_names(pool, balances).await?
        }
    };

    Ok(rows
        .into_iter()
        .map(|(balance, name)| balance.to_info(name))
        .collect())
}

#[cfg(feature = "server")]
async fn with_names(
    pool: &sqlx::PgPool,
    balances: Vec<crate::models::LeaveBalance>,
) -> Result<Vec<(crate::models::LeaveBalance, String)>, ServerFnError> {
    let mut out = Vec::with_capacity(balances.len());
    for balance in balances {
        let (name,): (String,) = sqlx::query_as("SELECT name FROM employees WHERE id = $1")
            .bind(balance.employee_id)
            .fetch_one(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;
        out.push((balance, name));
    }
    Ok(out)
}

#[cfg(not(feature = "server"))]
#[get("/api/staff/leaves/balance")]
pub async fn list_leave_balances(
    year: i32,
    search: Option<String>,
) -> Result<Vec<LeaveBalanceInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Set an employee's leave allocations for a year, creating the row if it does
/// not exist. Used counters are left untouched.
#[cfg(feature = "server")]
#[post("/api/staff/leaves/balance/update", session: tower_sessions::Session)]
pub async fn update_leave_balance(
    employee_id: String,
    year: i32,
    annual_allocated: i32,
    sick_allocated: i32,
    casual_allocated: i32,
    compensatory_allocated: i32,
) -> Result<LeaveBalanceInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::LeaveBalance;

    crate::auth::require_role(&session, HR_ROLES).await?;

    if [annual_allocated, sick_allocated, casual_allocated, compensatory_allocated]
        .iter()
        .any(|v| *v < 0)
    {
        return Err(ServerFnError::new("Allocations cannot be negative"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let employee_uuid = uuid::Uuid::parse_str(&employee_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let employee: Option<(String,)> = sqlx::query_as("SELECT name FROM employees WHERE id = $1")
        .bind(employee_uuid)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some((employee_name,)) = employee else {
        return Err(ServerFnError::new("Employee not found"));
    };

    let balance: LeaveBalance = sqlx::query_as(
        "INSERT INTO leave_balances
         (employee_id, year, annual_allocated, sick_allocated, casual_allocated, compensatory_allocated)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (employee_id, year) DO UPDATE SET
            annual_allocated = $3,
            sick_allocated = $4,
            casual_allocated = $5,
            compensatory_allocated = $6,
            updated_at = NOW()
         RETURNING *",
    )
    .bind(employee_uuid)
    .bind(year)
    .bind(annual_allocated)
    .bind(sick_allocated)
    .bind(casual_allocated)
    .bind(compensatory_allocated)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(balance.to_info(employee_name))
}

#[cfg(not(feature = "server"))]
#[post("/api/staff/leaves/balance/update")]
pub async fn update_leave_balance(
    employee_id: String,
    year: i32,
    annual_allocated: i32,
    sick_allocated: i32,
    casual_allocated: i32,
    compensatory_allocated: i32,
) -> Result<LeaveBalanceInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

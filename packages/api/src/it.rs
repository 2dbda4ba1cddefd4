//! IT server functions: asset inventory, helpdesk tickets, and the analytics
//! dashboard.

use dioxus::prelude::*;

use crate::models::{ItAssetInfo, ItDashboardInfo, ItTicketInfo, Role, TicketStatus};

#[cfg(feature = "server")]
const IT_ROLES: &[Role] = &[Role::SuperAdmin, Role::Manager, Role::TeamLeader, Role::Executive];

#[cfg(feature = "server")]
async fn user_display_name(
    pool: &sqlx::PgPool,
    id: Option<uuid::Uuid>,
) -> Result<Option<String>, ServerFnError> {
    let Some(id) = id else {
        return Ok(None);
    };
    let row: Option<(Option<String>, String)> =
        sqlx::query_as("SELECT name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(row.map(|(name, email)| name.unwrap_or(email)))
}

/// List every asset, newest first.
#[cfg(feature = "server")]
#[get("/api/it/assets", session: tower_sessions::Session)]
pub async fn list_assets() -> Result<Vec<ItAssetInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::ItAsset;

    crate::auth::require_role(&session, IT_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let assets: Vec<ItAsset> =
        sqlx::query_as("SELECT * FROM it_assets ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    let mut out = Vec::with_capacity(assets.len());
    for asset in &assets {
        let assignee = user_display_name(pool, asset.assigned_to).await?;
        out.push(asset.to_info(assignee));
    }

    Ok(out)
}

#[cfg(not(feature = "server"))]
#[get("/api/it/assets")]
pub async fn list_assets() -> Result<Vec<ItAssetInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Register a new asset.
#[cfg(feature = "server")]
#[post("/api/it/assets", session: tower_sessions::Session)]
pub async fn create_asset(
    asset_type: String,
    serial_number: String,
    status: String,
    value: f64,
    purchase_date: Option<String>,
    assigned_to: Option<String>,
    details: Option<String>,
) -> Result<String, ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, IT_ROLES).await?;

    if asset_type.trim().is_empty() || serial_number.trim().is_empty() {
        return Err(ServerFnError::new("Type and serial number are required"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let assignee = parse_optional_uuid(&assigned_to)?;
    let purchased = parse_optional_date(&purchase_date)?;

    let (id,): (uuid::Uuid,) = sqlx::query_as(
        "INSERT INTO it_assets (asset_type, serial_number, status, value, purchase_date, assigned_to, details)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
    )
    .bind(asset_type.trim())
    .bind(serial_number.trim())
    .bind(&status)
    .bind(value)
    .bind(purchased)
    .bind(assignee)
    .bind(&details)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(id.to_string())
}

#[cfg(not(feature = "server"))]
#[post("/api/it/assets")]
pub async fn create_asset(
    asset_type: String,
    serial_number: String,
    status: String,
    value: f64,
    purchase_date: Option<String>,
    assigned_to: Option<String>,
    details: Option<String>,
) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update an asset.
#[cfg(feature = "server")]
#[post("/api/it/assets/update", session: tower_sessions::Session)]
pub async fn update_asset(
    id: String,
    asset_type: String,
    serial_number: String,
    status: String,
    value: f64,
    purchase_date: Option<String>,
    assigned_to: Option<String>,
    details: Option<String>,
) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, IT_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;
    let assignee = parse_optional_uuid(&assigned_to)?;
    let purchased = parse_optional_date(&purchase_date)?;

    let result = sqlx::query(
        "UPDATE it_assets
         SET asset_type = $1, serial_number = $2, status = $3, value = $4,
             purchase_date = $5, assigned_to = $6, details = $7, updated_at = NOW()
         WHERE id = $8",
    )
    .bind(asset_type.trim())
    .bind(serial_number.trim())
    .bind(&status)
    .bind(value)
    .bind(purchased)
    .bind(assignee)
    .bind(&details)
    .bind(uuid)
    .execute(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Asset not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/it/assets/update")]
pub async fn update_asset(
    id: String,
    asset_type: String,
    serial_number: String,
    status: String,
    value: f64,
    purchase_date: Option<String>,
    assigned_to: Option<String>,
    details: Option<String>,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete an asset.
#[cfg(feature = "server")]
#[post("/api/it/assets/delete", session: tower_sessions::Session)]
pub async fn delete_asset(id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, IT_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM it_assets WHERE id = $1")
        .bind(uuid)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Asset not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/it/assets/delete")]
pub async fn delete_asset(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// List tickets, optionally filtered by status, newest first.
#[cfg(feature = "server")]
#[get("/api/it/tickets", session: tower_sessions::Session)]
pub async fn list_tickets(status: Option<String>) -> Result<Vec<ItTicketInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::ItTicket;

    crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let tickets: Vec<ItTicket> = match status.as_deref().filter(|s| !s.is_empty()) {
        Some(status) => {
            sqlx::query_as("SELECT * FROM it_tickets WHERE status = $1 ORDER BY created_at DESC")
                .bind(status)
                .fetch_all(pool)
                .await
        }
        None => {
            sqlx::query_as("SELECT * FROM it_tickets ORDER BY created_at DESC")
                .fetch_all(pool)
                .await
        }
    }
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    let mut out = Vec::with_capacity(tickets.len());
    for ticket in &tickets {
        let reporter = user_display_name(pool, ticket.reporter_id).await?;
        let assignee = user_display_name(pool, ticket.assignee_id).await?;
        out.push(ticket.to_info(reporter, assignee));
    }

    Ok(out)
}

#[cfg(not(feature = "server"))]
#[get("/api/it/tickets")]
pub async fn list_tickets(status: Option<String>) -> Result<Vec<ItTicketInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Open a new ticket. The signed-in user becomes the reporter.
#[cfg(feature = "server")]
#[post("/api/it/tickets", session: tower_sessions::Session)]
pub async fn create_ticket(
    subject: String,
    description: Option<String>,
    priority: String,
    assignee_id: Option<String>,
) -> Result<String, ServerFnError> {
    use crate::db::get_pool;

    let user = crate::auth::require_user(&session).await?;

    if subject.trim().is_empty() {
        return Err(ServerFnError::new("Subject is required"));
    }
    priority
        .parse::<crate::models::TicketPriority>()
        .map_err(|e| ServerFnError::new(e))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let assignee = parse_optional_uuid(&assignee_id)?;

    let (id,): (uuid::Uuid,) = sqlx::query_as(
        "INSERT INTO it_tickets (subject, description, priority, reporter_id, assignee_id)
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(subject.trim())
    .bind(&description)
    .bind(&priority)
    .bind(user.id)
    .bind(assignee)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(id.to_string())
}

#[cfg(not(feature = "server"))]
#[post("/api/it/tickets")]
pub async fn create_ticket(
    subject: String,
    description: Option<String>,
    priority: String,
    assignee_id: Option<String>,
) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Edit a ticket's subject, description, priority, or assignee.
#[cfg(feature = "server")]
#[post("/api/it/tickets/update", session: tower_sessions::Session)]
pub async fn update_ticket(
    id: String,
    subject: String,
    description: Option<String>,
    priority: String,
    assignee_id: Option<String>,
) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, IT_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;
    let assignee = parse_optional_uuid(&assignee_id)?;

    let result = sqlx::query(
        "UPDATE it_tickets
         SET subject = $1, description = $2, priority = $3, assignee_id = $4, updated_at = NOW()
         WHERE id = $5",
    )
    .bind(subject.trim())
    .bind(&description)
    .bind(&priority)
    .bind(assignee)
    .bind(uuid)
    .execute(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Ticket not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/it/tickets/update")]
pub async fn update_ticket(
    id: String,
    subject: String,
    description: Option<String>,
    priority: String,
    assignee_id: Option<String>,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Move a ticket through its lifecycle. Resolving requires a resolution note.
#[cfg(feature = "server")]
#[post("/api/it/tickets/status", session: tower_sessions::Session)]
pub async fn update_ticket_status(
    id: String,
    status: String,
    resolution: Option<String>,
) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, IT_ROLES).await?;

    let parsed: TicketStatus = status.parse().map_err(|e: String| ServerFnError::new(e))?;

    if parsed == TicketStatus::Resolved
        && resolution.as_deref().unwrap_or("").trim().is_empty()
    {
        return Err(ServerFnError::new("A resolution note is required"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query(
        "UPDATE it_tickets SET status = $1, resolution = COALESCE($2, resolution), updated_at = NOW() WHERE id = $3",
    )
    .bind(parsed.as_str())
    .bind(&resolution)
    .bind(uuid)
    .execute(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Ticket not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/it/tickets/status")]
pub async fn update_ticket_status(
    id: String,
    status: String,
    resolution: Option<String>,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a ticket.
#[cfg(feature = "server")]
#[post("/api/it/tickets/delete", session: tower_sessions::Session)]
pub async fn delete_ticket(id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, IT_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM it_tickets WHERE id = $1")
        .bind(uuid)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Ticket not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/it/tickets/delete")]
pub async fn delete_ticket(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Analytics snapshot for the IT dashboard cards.
#[cfg(feature = "server")]
#[get("/api/it/analytics/dashboard", session: tower_sessions::Session)]
pub async fn it_dashboard() -> Result<ItDashboardInfo, ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, IT_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let by_status: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM it_tickets GROUP BY status")
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    let (asset_count, asset_value): (i64, Option<f64>) =
        sqlx::query_as("SELECT COUNT(*), SUM(value) FROM it_assets")
            .fetch_one(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    let (assets_in_repair,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM it_assets WHERE status = 'in_repair'")
            .fetch_one(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    let mut info = ItDashboardInfo {
        asset_count,
        asset_value: asset_value.unwrap_or(0.0),
        assets_in_repair,
        ..Default::default()
    };
    for (status, count) in by_status {
        match status.as_str() {
            "open" => info.open_tickets = count,
            "in_progress" => info.in_progress_tickets = count,
            "resolved" => info.resolved_tickets = count,
            "closed" => info.closed_tickets = count,
            _ => {}
        }
    }

    Ok(info)
}

#[cfg(not(feature = "server"))]
#[get("/api/it/analytics/dashboard")]
pub async fn it_dashboard() -> Result<ItDashboardInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
fn parse_optional_uuid(id: &Option<String>) -> Result<Option<uuid::Uuid>, ServerFnError> {
    match id.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => uuid::Uuid::parse_str(s)
            .map(Some)
            .map_err(|e| ServerFnError::new(e.to_string())),
    }
}

#[cfg(feature = "server")]
fn parse_optional_date(date: &Option<String>) -> Result<Option<chrono::NaiveDate>, ServerFnError> {
    match date.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<chrono::NaiveDate>()
            .map(Some)
            .map_err(|e| ServerFnError::new(e.to_string())),
    }
}

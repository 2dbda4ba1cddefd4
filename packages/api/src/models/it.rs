//! IT asset-tracking and helpdesk-ticket entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "server")]
use chrono::{DateTime, NaiveDate, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Helpdesk ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Critical => "critical",
        }
    }

    pub fn all() -> &'static [TicketPriority] {
        &[
            TicketPriority::Low,
            TicketPriority::Medium,
            TicketPriority::High,
            TicketPriority::Critical,
        ]
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            "critical" => Ok(TicketPriority::Critical),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// Helpdesk ticket lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn all() -> &'static [TicketStatus] {
        &[
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Resolved,
            TicketStatus::Closed,
        ]
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct ItAsset {
    pub id: Uuid,
    pub asset_type: String,
    pub serial_number: String,
    pub status: String,
    pub value: f64,
    pub purchase_date: Option<NaiveDate>,
    pub assigned_to: Option<Uuid>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl ItAsset {
    pub fn to_info(&self, assigned_to_name: Option<String>) -> ItAssetInfo {
        ItAssetInfo {
            id: self.id.to_string(),
            asset_type: self.asset_type.clone(),
            serial_number: self.serial_number.clone(),
            status: self.status.clone(),
            value: self.value,
            purchase_date: self.purchase_date.map(|d| d.to_string()),
            assigned_to: self.assigned_to.map(|u| u.to_string()),
            assigned_to_name,
            details: self.details.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItAssetInfo {
    pub id: String,
    pub asset_type: String,
    pub serial_number: String,
    /// "active", "in_repair", or "retired".
    pub status: String,
    pub value: f64,
    pub purchase_date: Option<String>,
    pub assigned_to: Option<String>,
    pub assigned_to_name: Option<String>,
    pub details: Option<String>,
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct ItTicket {
    pub id: Uuid,
    pub subject: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub reporter_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl ItTicket {
    pub fn to_info(&self, reporter_name: Option<String>, assignee_name: Option<String>) -> ItTicketInfo {
        ItTicketInfo {
            id: self.id.to_string(),
            subject: self.subject.clone(),
            description: self.description.clone(),
            priority: self.priority.parse().unwrap_or(TicketPriority::Low),
            status: self.status.parse().unwrap_or(TicketStatus::Open),
            reporter_id: self.reporter_id.map(|u| u.to_string()),
            reporter_name,
            assignee_id: self.assignee_id.map(|u| u.to_string()),
            assignee_name,
            resolution: self.resolution.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItTicketInfo {
    pub id: String,
    pub subject: String,
    pub description: Option<String>,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub reporter_id: Option<String>,
    pub reporter_name: Option<String>,
    pub assignee_id: Option<String>,
    pub assignee_name: Option<String>,
    pub resolution: Option<String>,
    pub created_at: String,
}

/// Snapshot of the IT dashboard analytics cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItDashboardInfo {
    pub open_tickets: i64,
    pub in_progress_tickets: i64,
    pub resolved_tickets: i64,
    pub closed_tickets: i64,
    pub asset_count: i64,
    pub asset_value: f64,
    pub assets_in_repair: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in TicketStatus::all() {
            assert_eq!(status.as_str().parse::<TicketStatus>().unwrap(), *status);
        }
        for priority in TicketPriority::all() {
            assert_eq!(
                priority.as_str().parse::<TicketPriority>().unwrap(),
                *priority
            );
        }
    }
}

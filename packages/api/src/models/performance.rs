//! Performance reviews and per-employee KPIs.
//!
//! Reviews are written by managers through the evaluation dialog; KPI
//! `current` values are server-owned aggregates, the client only reads them.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Percentage of a KPI target reached, capped at 100. A non-positive target
/// reads as no progress rather than dividing by zero.
pub fn progress_percent(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (current / target * 100.0).min(100.0)
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct PerformanceReview {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub reviewer_id: Uuid,
    pub rating: i32,
    pub feedback: String,
    pub review_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl PerformanceReview {
    pub fn to_info(&self, employee_name: String, reviewer_name: String) -> PerformanceReviewInfo {
        PerformanceReviewInfo {
            id: self.id.to_string(),
            employee_id: self.employee_id.to_string(),
            employee_name,
            reviewer_name,
            rating: self.rating,
            feedback: self.feedback.clone(),
            review_date: self.review_date.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceReviewInfo {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub reviewer_name: String,
    pub rating: i32,
    pub feedback: String,
    pub review_date: String,
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Kpi {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub title: String,
    pub category: Option<String>,
    pub target: f64,
    pub current: f64,
    pub unit: Option<String>,
    pub period: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Kpi {
    pub fn to_info(&self, employee_name: String) -> KpiInfo {
        KpiInfo {
            id: self.id.to_string(),
            employee_id: self.employee_id.to_string(),
            employee_name,
            title: self.title.clone(),
            category: self.category.clone(),
            target: self.target,
            current: self.current,
            unit: self.unit.clone(),
            period: self.period.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiInfo {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub title: String,
    pub category: Option<String>,
    pub target: f64,
    pub current: f64,
    pub unit: Option<String>,
    pub period: String,
}

impl KpiInfo {
    pub fn progress(&self) -> f64 {
        progress_percent(self.current, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_caps_at_hundred() {
        assert_eq!(progress_percent(50.0, 100.0), 50.0);
        assert_eq!(progress_percent(120.0, 100.0), 100.0);
    }

    #[test]
    fn test_zero_target_is_zero_progress() {
        assert_eq!(progress_percent(10.0, 0.0), 0.0);
        assert_eq!(progress_percent(10.0, -5.0), 0.0);
    }
}

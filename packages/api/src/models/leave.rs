//! Employee leave balances.
//!
//! Allocations are set by HR through the edit dialog; `*_used` counters are
//! owned by the server and never accepted from the client.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Days still available. Overspent categories clamp to zero rather than
/// showing a negative number.
pub fn available_days(allocated: i32, used: i32) -> i32 {
    (allocated - used).max(0)
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct LeaveBalance {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub year: i32,
    pub annual_allocated: i32,
    pub annual_used: i32,
    pub sick_allocated: i32,
    pub sick_used: i32,
    pub casual_allocated: i32,
    pub casual_used: i32,
    pub compensatory_allocated: i32,
    pub compensatory_used: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl LeaveBalance {
    pub fn to_info(&self, employee_name: String) -> LeaveBalanceInfo {
        LeaveBalanceInfo {
            id: self.id.to_string(),
            employee_id: self.employee_id.to_string(),
            employee_name,
            year: self.year,
            annual_allocated: self.annual_allocated,
            annual_used: self.annual_used,
            sick_allocated: self.sick_allocated,
            sick_used: self.sick_used,
            casual_allocated: self.casual_allocated,
            casual_used: self.casual_used,
            compensatory_allocated: self.compensatory_allocated,
            compensatory_used: self.compensatory_used,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveBalanceInfo {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub year: i32,
    pub annual_allocated: i32,
    pub annual_used: i32,
    pub sick_allocated: i32,
    pub sick_used: i32,
    pub casual_allocated: i32,
    pub casual_used: i32,
    pub compensatory_allocated: i32,
    pub compensatory_used: i32,
}

impl LeaveBalanceInfo {
    pub fn total_allocated(&self) -> i32 {
        self.annual_allocated + self.sick_allocated + self.casual_allocated
            + self.compensatory_allocated
    }

    pub fn total_used(&self) -> i32 {
        self.annual_used + self.sick_used + self.casual_used + self.compensatory_used
    }

    pub fn total_available(&self) -> i32 {
        available_days(self.total_allocated(), self.total_used())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_clamps_at_zero() {
        assert_eq!(available_days(20, 5), 15);
        assert_eq!(available_days(20, 20), 0);
        assert_eq!(available_days(5, 9), 0);
    }
}

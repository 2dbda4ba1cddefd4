//! HR entities: departments, designations, employees.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, NaiveDate, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Department {
    pub fn to_info(&self) -> DepartmentInfo {
        DepartmentInfo {
            id: self.id.to_string(),
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentInfo {
    pub id: String,
    pub name: String,
}

/// Full designation record: a named position with its career-ladder metadata.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Designation {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub job_description: Option<String>,
    pub kra: Option<String>,
    pub expected_experience_years: i32,
    pub promotion_wait_months: i32,
    pub increment_guidelines: Option<String>,
    pub level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Designation {
    pub fn to_info(&self) -> DesignationInfo {
        DesignationInfo {
            id: self.id.to_string(),
            name: self.name.clone(),
            code: self.code.clone(),
            job_description: self.job_description.clone(),
            kra: self.kra.clone(),
            expected_experience_years: self.expected_experience_years,
            promotion_wait_months: self.promotion_wait_months,
            increment_guidelines: self.increment_guidelines.clone(),
            level: self.level,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignationInfo {
    pub id: String,
    pub name: String,
    pub code: String,
    pub job_description: Option<String>,
    /// Key result areas, one per line.
    pub kra: Option<String>,
    pub expected_experience_years: i32,
    pub promotion_wait_months: i32,
    pub increment_guidelines: Option<String>,
    pub level: i32,
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub department_id: Option<Uuid>,
    pub designation_id: Option<Uuid>,
    pub joined_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Employee {
    pub fn to_info(
        &self,
        department_name: Option<String>,
        designation_name: Option<String>,
    ) -> EmployeeInfo {
        EmployeeInfo {
            id: self.id.to_string(),
            user_id: self.user_id.map(|u| u.to_string()),
            name: self.name.clone(),
            email: self.email.clone(),
            department_id: self.department_id.map(|u| u.to_string()),
            department_name,
            designation_id: self.designation_id.map(|u| u.to_string()),
            designation_name,
            joined_on: self.joined_on.map(|d| d.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeInfo {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub email: String,
    pub department_id: Option<String>,
    pub department_name: Option<String>,
    pub designation_id: Option<String>,
    pub designation_name: Option<String>,
    /// ISO date (YYYY-MM-DD).
    pub joined_on: Option<String>,
}

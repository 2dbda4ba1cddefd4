//! HR server functions: departments, designations, employees, performance
//! reviews and KPIs.

use dioxus::prelude::*;

use crate::models::{
    DepartmentInfo, DesignationInfo, EmployeeInfo, KpiInfo, PerformanceReviewInfo, Role,
};

#[cfg(feature = "server")]
const HR_ROLES: &[Role] = &[Role::SuperAdmin, Role::Manager];

/// List departments alphabetically.
#[cfg(feature = "server")]
#[get("/api/hr/departments", session: tower_sessions::Session)]
pub async fn list_departments() -> Result<Vec<DepartmentInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Department;

    crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let departments: Vec<Department> =
        sqlx::query_as("SELECT * FROM departments ORDER BY name")
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(departments.iter().map(|d| d.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/hr/departments")]
pub async fn list_departments() -> Result<Vec<DepartmentInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// List all designations, ordered by ladder level then name.
#[cfg(feature = "server")]
#[get("/api/hr/designations", session: tower_sessions::Session)]
pub async fn list_designations() -> Result<Vec<DesignationInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Designation;

    crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let designations: Vec<Designation> =
        sqlx::query_as("SELECT * FROM designations ORDER BY level, name")
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(designations.iter().map(|d| d.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/hr/designations")]
pub async fn list_designations() -> Result<Vec<DesignationInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a designation.
#[cfg(feature = "server")]
#[post("/api/hr/designations", session: tower_sessions::Session)]
pub async fn create_designation(
    name: String,
    code: String,
    job_description: Option<String>,
    kra: Option<String>,
    expected_experience_years: i32,
    promotion_wait_months: i32,
    increment_guidelines: Option<String>,
    level: i32,
) -> Result<DesignationInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Designation;

    crate::auth::require_role(&session, HR_ROLES).await?;

    if name.trim().is_empty() || code.trim().is_empty() {
        return Err(ServerFnError::new("Name and code are required"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let designation: Designation = sqlx::query_as(
        "INSERT INTO designations
         (name, code, job_description, kra, expected_experience_years, promotion_wait_months, increment_guidelines, level)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(name.trim())
    .bind(code.trim())
    .bind(&job_description)
    .bind(&kra)
    .bind(expected_experience_years)
    .bind(promotion_wait_months)
    .bind(&increment_guidelines)
    .bind(level)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(designation.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/hr/designations")]
pub async fn create_designation(
    name: String,
    code: String,
    job_description: Option<String>,
    kra: Option<String>,
    expected_experience_years: i32,
    promotion_wait_months: i32,
    increment_guidelines: Option<String>,
    level: i32,
) -> Result<DesignationInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update a designation.
#[cfg(feature = "server")]
#[post("/api/hr/designations/update", session: tower_sessions::Session)]
pub async fn update_designation(
    id: String,
    name: String,
    code: String,
    job_description: Option<String>,
    kra: Option<String>,
    expected_experience_years: i32,
    promotion_wait_months: i32,
    increment_guidelines: Option<String>,
    level: i32,
) -> Result<DesignationInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Designation;

    crate::auth::require_role(&session, HR_ROLES).await?;

    if name.trim().is_empty() || code.trim().is_empty() {
        return Err(ServerFnError::new("Name and code are required"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let designation: Option<Designation> = sqlx::query_as(
        "UPDATE designations
         SET name = $1, code = $2, job_description = $3, kra = $4,
             expected_experience_years = $5, promotion_wait_months = $6,
             increment_guidelines = $7, level = $8, updated_at = NOW()
         WHERE id = $9 RETURNING *",
    )
    .bind(name.trim())
    .bind(code.trim())
    .bind(&job_description)
    .bind(&kra)
    .bind(expected_experience_years)
    .bind(promotion_wait_months)
    .bind(&increment_guidelines)
    .bind(level)
    .bind(uuid)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    designation
        .map(|d| d.to_info())
        .ok_or_else(|| ServerFnError::new("Designation not found"))
}

#[cfg(not(feature = "server"))]
#[post("/api/hr/designations/update")]
pub async fn update_designation(
    id: String,
    name: String,
    code: String,
    job_description: Option<String>,
    kra: Option<String>,
    expected_experience_years: i32,
    promotion_wait_months: i32,
    increment_guidelines: Option<String>,
    level: i32,
) -> Result<DesignationInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a designation. Employees holding it keep their row; the foreign key
/// nulls out.
#[cfg(feature = "server")]
#[post("/api/hr/designations/delete", session: tower_sessions::Session)]
pub async fn delete_designation(id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, HR_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM designations WHERE id = $1")
        .bind(uuid)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Designation not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/hr/designations/delete")]
pub async fn delete_designation(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// List employees with their department and designation names.
#[cfg(feature = "server")]
#[get("/api/hr/employees", session: tower_sessions::Session)]
pub async fn list_employees() -> Result<Vec<EmployeeInfo>, ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let rows: Vec<(
        uuid::Uuid,
        Option<uuid::Uuid>,
        String,
        String,
        Option<uuid::Uuid>,
        Option<String>,
        Option<uuid::Uuid>,
        Option<String>,
        Option<chrono::NaiveDate>,
    )> = sqlx::query_as(
        "SELECT e.id, e.user_id, e.name, e.email, e.department_id, d.name, e.designation_id, g.name, e.joined_on
         FROM employees e
         LEFT JOIN departments d ON d.id = e.department_id
         LEFT JOIN designations g ON g.id = e.designation_id
         ORDER BY e.name",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(
            |(id, user_id, name, email, dept_id, dept_name, desig_id, desig_name, joined_on)| {
                EmployeeInfo {
                    id: id.to_string(),
                    user_id: user_id.map(|u| u.to_string()),
                    name,
                    email,
                    department_id: dept_id.map(|u| u.to_string()),
                    department_name: dept_name,
                    designation_id: desig_id.map(|u| u.to_string()),
                    designation_name: desig_name,
                    joined_on: joined_on.map(|d| d.to_string()),
                }
            },
        )
        .collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/hr/employees")]
pub async fn list_employees() -> Result<Vec<EmployeeInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create an employee record.
#[cfg(feature = "server")]
#[post("/api/hr/employees", session: tower_sessions::Session)]
pub async fn create_employee(
    name: String,
    email: String,
    department_id: Option<String>,
    designation_id: Option<String>,
    joined_on: Option<String>,
) -> Result<String, ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, HR_ROLES).await?;

    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(ServerFnError::new("Name and email are required"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let department = parse_optional_uuid(&department_id)?;
    let designation = parse_optional_uuid(&designation_id)?;
    let joined = parse_optional_date(&joined_on)?;

    let (id,): (uuid::Uuid,) = sqlx::query_as(
        "INSERT INTO employees (name, email, department_id, designation_id, joined_on)
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(name.trim())
    .bind(email.trim())
    .bind(department)
    .bind(designation)
    .bind(joined)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(id.to_string())
}

#[cfg(not(feature = "server"))]
#[post("/api/hr/employees")]
pub async fn create_employee(
    name: String,
    email: String,
    department_id: Option<String>,
    designation_id: Option<String>,
    joined_on: Option<String>,
) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update an employee record.
#[cfg(feature = "server")]
#[post("/api/hr/employees/update", session: tower_sessions::Session)]
pub async fn update_employee(
    id: String,
    name: String,
    email: String,
    department_id: Option<String>,
    designation_id: Option<String>,
    joined_on: Option<String>,
) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, HR_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;
    let department = parse_optional_uuid(&department_id)?;
    let designation = parse_optional_uuid(&designation_id)?;
    let joined = parse_optional_date(&joined_on)?;

    let result = sqlx::query(
        "UPDATE employees
         SET name = $1, email = $2, department_id = $3, designation_id = $4,
             joined_on = $5, updated_at = NOW()
         WHERE id = $6",
    )
    .bind(name.trim())
    .bind(email.trim())
    .bind(department)
    .bind(designation)
    .bind(joined)
    .bind(uuid)
    .execute(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Employee not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/hr/employees/update")]
pub async fn update_employee(
    id: String,
    name: String,
    email: String,
    department_id: Option<String>,
    designation_id: Option<String>,
    joined_on: Option<String>,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete an employee record and its leave balances (cascade).
#[cfg(feature = "server")]
#[post("/api/hr/employees/delete", session: tower_sessions::Session)]
pub async fn delete_employee(id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, HR_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(uuid)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Employee not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/hr/employees/delete")]
pub async fn delete_employee(id: String) -> Result<(), ServerFnError> {
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

/// List performance reviews, newest first, optionally for one employee.
#[cfg(feature = "server")]
#[get("/api/hr/performance", session: tower_sessions::Session)]
pub async fn list_performance_reviews(
    employee_id: Option<String>,
) -> Result<Vec<PerformanceReviewInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::PerformanceReview;

    crate::auth::require_role(&session, HR_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    #[derive(sqlx::FromRow)]
    struct ReviewRow {
        #[sqlx(flatten)]
        review: PerformanceReview,
        employee_name: String,
        reviewer_name: String,
    }

    let base = "SELECT r.*, e.name AS employee_name,
                COALESCE(u.name, u.email) AS reviewer_name
         FROM performance_reviews r
         JOIN employees e ON e.id = r.employee_id
         JOIN users u ON u.id = r.reviewer_id";

    let rows: Vec<ReviewRow> = match parse_optional_uuid(&employee_id)? {
        Some(employee) => {
            sqlx::query_as(&format!(
                "{base} WHERE r.employee_id = $1 ORDER BY r.review_date DESC"
            ))
            .bind(employee)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as(&format!("{base} ORDER BY r.review_date DESC"))
                .fetch_all(pool)
                .await
        }
    }
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|row| row.review.to_info(row.employee_name, row.reviewer_name))
        .collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/hr/performance")]
pub async fn list_performance_reviews(
    employee_id: Option<String>,
) -> Result<Vec<PerformanceReviewInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Record a performance review. The signed-in manager is the reviewer.
#[cfg(feature = "server")]
#[post("/api/hr/performance", session: tower_sessions::Session)]
pub async fn create_performance_review(
    employee_id: String,
    rating: i32,
    feedback: String,
) -> Result<PerformanceReviewInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::PerformanceReview;

    let reviewer = crate::auth::require_role(&session, HR_ROLES).await?;

    if !(1..=5).contains(&rating) {
        return Err(ServerFnError::new("Rating must be between 1 and 5"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let employee = uuid::Uuid::parse_str(&employee_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let review: PerformanceReview = sqlx::query_as(
        "INSERT INTO performance_reviews (employee_id, reviewer_id, rating, feedback)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(employee)
    .bind(reviewer.id)
    .bind(rating)
    .bind(feedback.trim())
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    let (employee_name,): (String,) = sqlx::query_as("SELECT name FROM employees WHERE id = $1")
        .bind(review.employee_id)
        .fetch_one(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let reviewer_name = reviewer.name.clone().unwrap_or_else(|| reviewer.email.clone());
    Ok(review.to_info(employee_name, reviewer_name))
}

#[cfg(not(feature = "server"))]
#[post("/api/hr/performance")]
pub async fn create_performance_review(
    employee_id: String,
    rating: i32,
    feedback: String,
) -> Result<PerformanceReviewInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// List KPIs, optionally for one employee, newest period first.
#[cfg(feature = "server")]
#[get("/api/hr/kpis", session: tower_sessions::Session)]
pub async fn list_kpis(employee_id: Option<String>) -> Result<Vec<KpiInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Kpi;

    crate::auth::require_role(&session, HR_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    #[derive(sqlx::FromRow)]
    struct KpiRow {
        #[sqlx(flatten)]
        kpi: Kpi,
        employee_name: String,
    }

    let base = "SELECT k.*, e.name AS employee_name
         FROM kpis k JOIN employees e ON e.id = k.employee_id";

    let rows: Vec<KpiRow> = match parse_optional_uuid(&employee_id)? {
        Some(employee) => {
            sqlx::query_as(&format!(
                "{base} WHERE k.employee_id = $1 ORDER BY k.period DESC, k.title"
            ))
            .bind(employee)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as(&format!("{base} ORDER BY k.period DESC, k.title"))
                .fetch_all(pool)
                .await
        }
    }
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|row| row.kpi.to_info(row.employee_name))
        .collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/hr/kpis")]
pub async fn list_kpis(employee_id: Option<String>) -> Result<Vec<KpiInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

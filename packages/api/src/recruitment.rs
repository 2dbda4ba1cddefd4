//! Recruitment server functions: job postings and their screening exams.

use dioxus::prelude::*;

use crate::models::{ExamQuestion, JobExamInfo, JobPostingInfo, Role};

#[cfg(feature = "server")]
const RECRUITMENT_ROLES: &[Role] = &[Role::SuperAdmin, Role::Manager, Role::TeamLeader];

/// List job postings, flagging the ones that already have an exam.
#[cfg(feature = "server")]
#[get("/api/recruitment/jobs", session: tower_sessions::Session)]
pub async fn list_job_postings() -> Result<Vec<JobPostingInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::JobPosting;

    crate::auth::require_role(&session, RECRUITMENT_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let postings: Vec<JobPosting> =
        sqlx::query_as("SELECT * FROM job_postings ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    let mut out = Vec::with_capacity(postings.len());
    for posting in &postings {
        let exam: Option<(uuid::Uuid,)> =
            sqlx::query_as("SELECT id FROM job_exams WHERE job_id = $1")
                .bind(posting.id)
                .fetch_optional(pool)
                .await
                .map_err(|e| ServerFnError::new(e.to_string()))?;
        out.push(posting.to_info(exam.is_some()));
    }

    Ok(out)
}

#[cfg(not(feature = "server"))]
#[get("/api/recruitment/jobs")]
pub async fn list_job_postings() -> Result<Vec<JobPostingInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Fetch the screening exam for a job, if one exists.
#[cfg(feature = "server")]
#[get("/api/recruitment/exams", session: tower_sessions::Session)]
pub async fn get_job_exam(job_id: String) -> Result<Option<JobExamInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::JobExam;

    crate::auth::require_role(&session, RECRUITMENT_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let job_uuid = uuid::Uuid::parse_str(&job_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let exam: Option<JobExam> = sqlx::query_as("SELECT * FROM job_exams WHERE job_id = $1")
        .bind(job_uuid)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(exam.map(|e| e.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/recruitment/exams")]
pub async fn get_job_exam(job_id: String) -> Result<Option<JobExamInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create or replace a job's screening exam.
#[cfg(feature = "server")]
#[post("/api/recruitment/exams", session: tower_sessions::Session)]
pub async fn save_job_exam(
    job_id: String,
    questions: Vec<ExamQuestion>,
    pass_mark: i32,
    duration_minutes: i32,
) -> Result<JobExamInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::JobExam;

    crate::auth::require_role(&session, RECRUITMENT_ROLES).await?;

    if questions.is_empty() {
        return Err(ServerFnError::new("Add at least one question"));
    }
    for question in &questions {
        if question.prompt.trim().is_empty() {
            return Err(ServerFnError::new("Every question needs a prompt"));
        }
        if question.options.len() < 2 {
            return Err(ServerFnError::new("Every question needs at least two options"));
        }
        if question.correct_index >= question.options.len() {
            return Err(ServerFnError::new("Correct answer is out of range"));
        }
    }
    if !(0..=questions.len() as i32).contains(&pass_mark) {
        return Err(ServerFnError::new("Pass mark exceeds the question count"));
    }
    if duration_minutes <= 0 {
        return Err(ServerFnError::new("Duration must be positive"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let job_uuid = uuid::Uuid::parse_str(&job_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let questions_json =
        serde_json::to_value(&questions).map_err(|e| ServerFnError::new(e.to_string()))?;

    let exam: JobExam = sqlx::query_as(
        "INSERT INTO job_exams (job_id, questions, pass_mark, duration_minutes)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (job_id) DO UPDATE SET
            questions = $2, pass_mark = $3, duration_minutes = $4, updated_at = NOW()
         RETURNING *",
    )
    .bind(job_uuid)
    .bind(&questions_json)
    .bind(pass_mark)
    .bind(duration_minutes)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(exam.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/recruitment/exams")]
pub async fn save_job_exam(
    job_id: String,
    questions: Vec<ExamQuestion>,
    pass_mark: i32,
    duration_minutes: i32,
) -> Result<JobExamInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a job's screening exam.
#[cfg(feature = "server")]
#[post("/api/recruitment/exams/delete", session: tower_sessions::Session)]
pub async fn delete_job_exam(job_id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    crate::auth::require_role(&session, RECRUITMENT_ROLES).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let job_uuid = uuid::Uuid::parse_str(&job_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM job_exams WHERE job_id = $1")
        .bind(job_uuid)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Exam not found"));
    }

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/recruitment/exams/delete")]
pub async fn delete_job_exam(job_id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

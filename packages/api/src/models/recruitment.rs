//! Job postings and their screening exams.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// One multiple-choice question on a screening exam.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExamQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub department: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl JobPosting {
    pub fn to_info(&self, has_exam: bool) -> JobPostingInfo {
        JobPostingInfo {
            id: self.id.to_string(),
            title: self.title.clone(),
            department: self.department.clone(),
            status: self.status.clone(),
            has_exam,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobPostingInfo {
    pub id: String,
    pub title: String,
    pub department: Option<String>,
    /// "open" or "closed".
    pub status: String,
    pub has_exam: bool,
}

#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct JobExam {
    pub id: Uuid,
    pub job_id: Uuid,
    /// JSON array of [`ExamQuestion`].
    pub questions: serde_json::Value,
    pub pass_mark: i32,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl JobExam {
    pub fn to_info(&self) -> JobExamInfo {
        JobExamInfo {
            id: self.id.to_string(),
            job_id: self.job_id.to_string(),
            questions: serde_json::from_value(self.questions.clone()).unwrap_or_default(),
            pass_mark: self.pass_mark,
            duration_minutes: self.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobExamInfo {
    pub id: String,
    pub job_id: String,
    pub questions: Vec<ExamQuestion>,
    pub pass_mark: i32,
    pub duration_minutes: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_json_roundtrip() {
        let q = ExamQuestion {
            prompt: "2 + 2?".to_string(),
            options: vec!["3".to_string(), "4".to_string()],
            correct_index: 1,
        };
        let json = serde_json::to_string(&q).unwrap();
        let back: ExamQuestion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }
}

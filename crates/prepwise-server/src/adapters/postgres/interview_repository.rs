//! PostgreSQL implementation of InterviewRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use prepwise::{DomainError, Interview, InterviewRepository};

/// PostgreSQL implementation of InterviewRepository
pub struct PgInterviewRepository {
    pool: PgPool,
}

impl PgInterviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct InterviewRow {
    id: String,
    user_id: String,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finalized: bool,
    interview_type: String,
    role: String,
    level: String,
    techstack: Vec<String>,
    questions: Vec<String>,
    cover_image: String,
}

impl From<InterviewRow> for Interview {
    fn from(row: InterviewRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            created_at: row.created_at,
            started_at: row.started_at,
            finalized: row.finalized,
            interview_type: row.interview_type,
            role: row.role,
            level: row.level,
            techstack: row.techstack,
            questions: row.questions,
            cover_image: row.cover_image,
        }
    }
}

#[async_trait]
impl InterviewRepository for PgInterviewRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Interview>, DomainError> {
        let row = sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Interview>, DomainError> {
        let rows = sqlx::query_as::<_, InterviewRow>(
            "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_latest_finalized(
        &self,
        exclude_user_id: &str,
        limit: usize,
    ) -> Result<Vec<Interview>, DomainError> {
        let rows = sqlx::query_as::<_, InterviewRow>(
            r#"
            SELECT * FROM interviews
            WHERE finalized = TRUE AND user_id <> $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(exclude_user_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, interview: &Interview) -> Result<Interview, DomainError> {
        let row = sqlx::query_as::<_, InterviewRow>(
            r#"
            INSERT INTO interviews
                (id, user_id, created_at, started_at, finalized, interview_type,
                 role, level, techstack, questions, cover_image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&interview.id)
        .bind(&interview.user_id)
        .bind(interview.created_at)
        .bind(interview.started_at)
        .bind(interview.finalized)
        .bind(&interview.interview_type)
        .bind(&interview.role)
        .bind(&interview.level)
        .bind(&interview.techstack)
        .bind(&interview.questions)
        .bind(&interview.cover_image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn mark_started(
        &self,
        id: &str,
        user_id: &str,
        started_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result =
            sqlx::query("UPDATE interviews SET started_at = $2, user_id = $3 WHERE id = $1")
                .bind(id)
                .bind(started_at)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

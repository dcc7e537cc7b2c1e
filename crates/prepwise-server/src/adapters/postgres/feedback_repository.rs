//! PostgreSQL implementation of FeedbackRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use prepwise::{CategoryScore, DomainError, Feedback, FeedbackRepository};

/// PostgreSQL implementation of FeedbackRepository
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct FeedbackRow {
    id: String,
    interview_id: String,
    user_id: String,
    total_score: f64,
    category_scores: Json<Vec<CategoryScore>>,
    strengths: Vec<String>,
    areas_for_improvement: Vec<String>,
    final_assessment: String,
    created_at: DateTime<Utc>,
}

impl From<FeedbackRow> for Feedback {
    fn from(row: FeedbackRow) -> Self {
        Self {
            id: row.id,
            interview_id: row.interview_id,
            user_id: row.user_id,
            total_score: row.total_score,
            category_scores: row.category_scores.0,
            strengths: row.strengths,
            areas_for_improvement: row.areas_for_improvement,
            final_assessment: row.final_assessment,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn save(&self, feedback: &Feedback) -> Result<Feedback, DomainError> {
        // Regeneration replaces every field of the existing record
        let row = sqlx::query_as::<_, FeedbackRow>(
            r#"
            INSERT INTO feedback
                (id, interview_id, user_id, total_score, category_scores,
                 strengths, areas_for_improvement, final_assessment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                interview_id = EXCLUDED.interview_id,
                user_id = EXCLUDED.user_id,
                total_score = EXCLUDED.total_score,
                category_scores = EXCLUDED.category_scores,
                strengths = EXCLUDED.strengths,
                areas_for_improvement = EXCLUDED.areas_for_improvement,
                final_assessment = EXCLUDED.final_assessment,
                created_at = EXCLUDED.created_at
            RETURNING *
            "#,
        )
        .bind(&feedback.id)
        .bind(&feedback.interview_id)
        .bind(&feedback.user_id)
        .bind(feedback.total_score)
        .bind(Json(&feedback.category_scores))
        .bind(&feedback.strengths)
        .bind(&feedback.areas_for_improvement)
        .bind(&feedback.final_assessment)
        .bind(feedback.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_latest_by_interview(
        &self,
        interview_id: &str,
    ) -> Result<Option<Feedback>, DomainError> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            r#"
            SELECT * FROM feedback
            WHERE interview_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(interview_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }
}

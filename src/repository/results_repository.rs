use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{AssessmentRecord, PaginationParams};

#[derive(Clone)]
pub struct ResultsRepository {
    pool: PgPool,
}

impl ResultsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, record: &AssessmentRecord) -> AppResult<AssessmentRecord> {
        let saved = sqlx::query_as::<_, AssessmentRecord>(
            r#"
            INSERT INTO assessment_results (
                id, session_id, name, university,
                overall_score, environmental_score, social_score, governance_score,
                response_count, strengths, weaknesses, recommendations,
                responses, completed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.session_id)
        .bind(&record.name)
        .bind(&record.university)
        .bind(record.overall_score)
        .bind(record.environmental_score)
        .bind(record.social_score)
        .bind(record.governance_score)
        .bind(record.response_count)
        .bind(&record.strengths)
        .bind(&record.weaknesses)
        .bind(&record.recommendations)
        .bind(&record.responses)
        .bind(record.completed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn find_by_session(&self, session_id: Uuid) -> AppResult<Option<AssessmentRecord>> {
        let record = sqlx::query_as::<_, AssessmentRecord>(
            r#"
            SELECT * FROM assessment_results
            WHERE session_id = $1
            ORDER BY completed_at DESC
            LIMIT 1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn list(
        &self,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<AssessmentRecord>, i64)> {
        let records = sqlx::query_as::<_, AssessmentRecord>(
            r#"
            SELECT * FROM assessment_results
            ORDER BY completed_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.per_page as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assessment_results")
            .fetch_one(&self.pool)
            .await?;

        Ok((records, total))
    }
}

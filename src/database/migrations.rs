use anyhow::Result;
use sqlx::PgPool;
use tracing::{info, warn};

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrations = vec![
        // Enable UUID extension
        r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp";"#,
        // Flattened assessment results
        r#"CREATE TABLE IF NOT EXISTS assessment_results (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            session_id UUID NOT NULL,
            name VARCHAR(255) NOT NULL,
            university VARCHAR(255) NOT NULL,
            overall_score DOUBLE PRECISION NOT NULL,
            environmental_score DOUBLE PRECISION NOT NULL,
            social_score DOUBLE PRECISION NOT NULL,
            governance_score DOUBLE PRECISION NOT NULL,
            response_count INTEGER NOT NULL,
            strengths TEXT NOT NULL DEFAULT '',
            weaknesses TEXT NOT NULL DEFAULT '',
            recommendations TEXT NOT NULL DEFAULT '',
            responses JSONB NOT NULL DEFAULT '[]'::jsonb,
            completed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );"#,
        r#"CREATE INDEX IF NOT EXISTS idx_assessment_results_session
            ON assessment_results(session_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_assessment_results_completed_at
            ON assessment_results(completed_at DESC);"#,
    ];

    for (i, migration) in migrations.iter().enumerate() {
        match sqlx::query(migration).execute(pool).await {
            Ok(_) => {}
            Err(e) => {
                warn!("Migration {} failed: {}", i, e);
                return Err(e.into());
            }
        }
    }

    info!("Database migrations completed");
    Ok(())
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::question::Dimension;
use super::session::AnswerRecord;

/// Completed respondent profile embedded in results. Unlike the in-progress
/// draft, both fields are guaranteed present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondentProfile {
    pub name: String,
    pub university: String,
}

/// Derived outcome for one dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionResult {
    pub score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionBreakdown {
    pub environmental: DimensionResult,
    pub social: DimensionResult,
    pub governance: DimensionResult,
}

impl DimensionBreakdown {
    pub fn get(&self, dimension: Dimension) -> &DimensionResult {
        match dimension {
            Dimension::Environmental => &self.environmental,
            Dimension::Social => &self.social,
            Dimension::Governance => &self.governance,
        }
    }
}

/// The full assessment outcome computed once after the last question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResults {
    pub profile: RespondentProfile,
    pub responses: Vec<AnswerRecord>,
    pub dimensions: DimensionBreakdown,
    pub overall_score: f64,
    pub completed_at: DateTime<Utc>,
}

/// Flattened results row as persisted to Postgres and exported to the
/// spreadsheet backend.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub university: String,
    pub overall_score: f64,
    pub environmental_score: f64,
    pub social_score: f64,
    pub governance_score: f64,
    pub response_count: i32,
    pub strengths: String,
    pub weaknesses: String,
    pub recommendations: String,
    pub responses: serde_json::Value,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    /// Flatten computed results into one row. Scores are rounded to one
    /// decimal place; list fields are joined with `"; "`.
    pub fn from_results(session_id: Uuid, results: &AssessmentResults) -> Self {
        let dims = &results.dimensions;
        let strengths: Vec<&str> = Dimension::ORDER
            .iter()
            .flat_map(|d| dims.get(*d).strengths.iter().map(String::as_str))
            .collect();
        let weaknesses: Vec<&str> = Dimension::ORDER
            .iter()
            .flat_map(|d| dims.get(*d).weaknesses.iter().map(String::as_str))
            .collect();
        let recommendations: Vec<&str> = Dimension::ORDER
            .iter()
            .flat_map(|d| dims.get(*d).recommendations.iter().map(String::as_str))
            .collect();

        Self {
            id: Uuid::new_v4(),
            session_id,
            name: results.profile.name.clone(),
            university: results.profile.university.clone(),
            overall_score: round1(results.overall_score),
            environmental_score: round1(dims.environmental.score),
            social_score: round1(dims.social.score),
            governance_score: round1(dims.governance.score),
            response_count: results.responses.len() as i32,
            strengths: strengths.join("; "),
            weaknesses: weaknesses.join("; "),
            recommendations: recommendations.join("; "),
            responses: serde_json::to_value(&results.responses)
                .unwrap_or(serde_json::Value::Null),
            completed_at: results.completed_at,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

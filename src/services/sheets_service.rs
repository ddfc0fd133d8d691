use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::AssessmentRecord;

/// Exports flattened assessment rows to a Google Sheets range. Best-effort:
/// callers fire this from a background task and only log failures.
pub struct SheetsService {
    config: Arc<Config>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct AppendRequest {
    values: Vec<Vec<String>>,
}

impl SheetsService {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.config.sheets_api_key.is_empty() && !self.config.sheets_spreadsheet_id.is_empty()
    }

    pub async fn append_result(&self, record: &AssessmentRecord) -> AppResult<()> {
        if !self.is_configured() {
            return Err(AppError::SheetsError(
                "Sheets export not configured".to_string(),
            ));
        }

        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}:append?valueInputOption=USER_ENTERED&key={}",
            self.config.sheets_spreadsheet_id,
            urlencoding::encode(&self.config.sheets_range),
            self.config.sheets_api_key
        );

        let body = AppendRequest {
            values: vec![Self::row(record)],
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::SheetsError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::SheetsError(format!(
                "Sheets append failed: {}",
                error_text
            )));
        }

        info!("Exported results for session {} to sheet", record.session_id);
        Ok(())
    }

    fn row(record: &AssessmentRecord) -> Vec<String> {
        vec![
            record.completed_at.to_rfc3339(),
            record.session_id.to_string(),
            record.name.clone(),
            record.university.clone(),
            format!("{:.1}", record.overall_score),
            format!("{:.1}", record.environmental_score),
            format!("{:.1}", record.social_score),
            format!("{:.1}", record.governance_score),
            record.response_count.to_string(),
            record.strengths.clone(),
            record.weaknesses.clone(),
            record.recommendations.clone(),
            record.responses.to_string(),
        ]
    }
}

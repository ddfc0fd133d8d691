use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{AssessmentResults, ChatMessage, Dimension, MessageRole};

/// Follow-up chat against an OpenAI-compatible completions API. The advisor
/// is primed with the respondent's computed results so answers stay grounded
/// in their actual scores.
pub struct AdvisorService {
    config: Arc<Config>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ApiMessage,
}

// Only the tail of the transcript is sent upstream
const HISTORY_WINDOW: usize = 20;

impl AdvisorService {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.config.advisor_api_key.is_empty()
    }

    pub async fn reply(
        &self,
        results: &AssessmentResults,
        history: &[ChatMessage],
        user_message: &str,
    ) -> AppResult<String> {
        if !self.is_configured() {
            return Err(AppError::ChatError(
                "Advisor chat not configured".to_string(),
            ));
        }

        let mut messages = vec![ApiMessage {
            role: "system".to_string(),
            content: Self::system_prompt(results),
        }];
        let tail = history.len().saturating_sub(HISTORY_WINDOW);
        for msg in &history[tail..] {
            messages.push(ApiMessage {
                role: match msg.role {
                    MessageRole::User => "user".to_string(),
                    MessageRole::Bot => "assistant".to_string(),
                },
                content: msg.content.clone(),
            });
        }
        messages.push(ApiMessage {
            role: "user".to_string(),
            content: user_message.to_string(),
        });

        let body = CompletionRequest {
            model: self.config.advisor_model.clone(),
            messages,
            max_tokens: self.config.advisor_max_tokens,
            temperature: self.config.advisor_temperature,
        };

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.config.advisor_base_url
            ))
            .header(
                "Authorization",
                format!("Bearer {}", self.config.advisor_api_key),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ChatError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ChatError(format!(
                "Advisor request failed: {}",
                error_text
            )));
        }

        let result: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::ChatError(e.to_string()))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::ChatError("Advisor returned no choices".to_string()))
    }

    fn system_prompt(results: &AssessmentResults) -> String {
        let mut prompt = format!(
            "You are an expert consultant in university sustainability and ESG \
             (Environmental, Social, Governance) frameworks. You are advising {} \
             about the sustainability assessment of {}.\n\n\
             Assessment results (scores out of 5.0):\n\
             - Overall: {:.1}\n",
            results.profile.name, results.profile.university, results.overall_score
        );

        for dimension in Dimension::ORDER {
            let r = results.dimensions.get(dimension);
            prompt.push_str(&format!(
                "- {}: {:.1} ({} strengths, {} weaknesses)\n",
                dimension,
                r.score,
                r.strengths.len(),
                r.weaknesses.len()
            ));
            for rec in &r.recommendations {
                prompt.push_str(&format!("  Recommendation: {}\n", rec));
            }
        }

        prompt.push_str(
            "\nAnswer questions about these results: help prioritize recommendations, \
             sketch implementation roadmaps, and relate findings to international \
             standards such as the UN SDGs, GRI and STARS. Be concrete and practical, \
             and keep answers grounded in the scores above.",
        );
        prompt
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::question::Dimension;
use super::session::{ChatMessage, Phase};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: i32,
    #[serde(default = "default_per_page")]
    pub per_page: i32,
}

fn default_page() -> i32 {
    1
}

fn default_per_page() -> i32 {
    10
}

impl PaginationParams {
    pub fn normalize(&mut self) {
        if self.page < 1 {
            self.page = 1;
        }
        if self.per_page < 1 {
            self.per_page = 10;
        }
        if self.per_page > 100 {
            self.per_page = 100;
        }
    }

    pub fn offset(&self) -> i32 {
        (self.page - 1) * self.per_page
    }
}

/// Body of every "say something to the assistant" endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "must be 1-2000 characters"))]
    pub message: String,
}

/// What the assistant answers with after one state transition: the new bot
/// messages plus the phase the session landed in.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub session_id: Uuid,
    pub phase: Phase,
    pub messages: Vec<ChatMessage>,
}

/// Dimension metadata for the questionnaire overview endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionInfo {
    pub dimension: Dimension,
    pub title: String,
    pub focus: String,
    pub question_count: usize,
}

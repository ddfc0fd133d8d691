mod assistant_test;
mod scoring_test;

use std::sync::Arc;

use crate::models::QuestionBank;
use crate::repository::SessionRepository;
use crate::services::AssistantService;

/// Wire the assistant with no Redis, Postgres or Sheets attached; the
/// in-memory store is enough to exercise the whole flow.
pub fn setup_assistant() -> AssistantService {
    let bank = Arc::new(QuestionBank::new());
    let sessions = Arc::new(SessionRepository::new(None, 24));
    AssistantService::new(sessions, bank, None, None)
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::question::{Dimension, Score};
use super::results::AssessmentResults;

/// Number of profile fields collected before the questionnaire (name +
/// university). Snapshots with a field index past this are incompatible.
pub const PROFILE_FIELD_COUNT: usize = 2;

/// Fixed list of institutions a respondent can evaluate.
pub const UNIVERSITIES: [&str; 12] = [
    "Universidad de La Sabana",
    "Universidad Nacional de Colombia",
    "Universidad de los Andes",
    "Pontificia Universidad Javeriana",
    "Universidad del Rosario",
    "Universidad EAFIT",
    "Universidad del Norte",
    "Universidad de Antioquia",
    "Universidad Industrial de Santander",
    "Universidad del Valle",
    "Universidad Externado de Colombia",
    "Other",
];

pub fn is_known_university(name: &str) -> bool {
    UNIVERSITIES.iter().any(|u| *u == name)
}

/// Conversation phases, in the order a session moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Welcome,
    Profile,
    Questionnaire,
    Results,
    Chat,
}

/// Respondent attributes collected before the questionnaire starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub university: Option<String>,
}

impl Profile {
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.university.is_some()
    }
}

/// One recorded answer. Re-answering a question replaces the prior record
/// for the same question id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub score: Score,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Bot,
}

/// One transcript entry. `options` carries the quick-reply strings the
/// client renders as buttons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Bot, content, None)
    }

    pub fn bot_with_options(content: impl Into<String>, options: Vec<String>) -> Self {
        Self::new(MessageRole::Bot, content, Some(options))
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content, None)
    }

    fn new(role: MessageRole, content: impl Into<String>, options: Option<Vec<String>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            options,
            sent_at: Utc::now(),
        }
    }
}

/// Full state of one anonymous assessment session. Owned by the session
/// repository; handlers and services only see clones and write back whole
/// sessions (last write wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub phase: Phase,
    pub field_index: usize,
    pub dimension: Dimension,
    pub question_index: usize,
    pub profile: Profile,
    pub responses: Vec<AnswerRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<AssessmentResults>,
    pub transcript: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phase: Phase::Welcome,
            field_index: 0,
            dimension: Dimension::Environmental,
            question_index: 0,
            profile: Profile::default(),
            responses: Vec::new(),
            results: None,
            transcript: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reset everything back to the welcome phase, keeping the session id.
    pub fn reset(&mut self) {
        self.phase = Phase::Welcome;
        self.field_index = 0;
        self.dimension = Dimension::Environmental;
        self.question_index = 0;
        self.profile = Profile::default();
        self.responses.clear();
        self.results = None;
        self.transcript.clear();
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Record an answer, replacing any prior answer for the same question.
    pub fn record_answer(&mut self, question_id: &str, score: Score) {
        let record = AnswerRecord {
            question_id: question_id.to_string(),
            score,
            answered_at: Utc::now(),
        };
        match self
            .responses
            .iter_mut()
            .find(|r| r.question_id == question_id)
        {
            Some(existing) => *existing = record,
            None => self.responses.push(record),
        }
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }

    pub fn is_expired(&self, ttl_hours: i64) -> bool {
        Utc::now() - self.updated_at > Duration::hours(ttl_hours)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_answer_is_last_write_wins() {
        let mut session = Session::new();
        session.record_answer("env_water", Score::new(2).unwrap());
        session.record_answer("env_water", Score::new(5).unwrap());
        assert_eq!(session.responses.len(), 1);
        assert_eq!(session.responses[0].score.value(), 5);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut session = Session::new();
        session.phase = Phase::Questionnaire;
        session.dimension = Dimension::Governance;
        session.question_index = 7;
        session.profile.name = Some("Ana".to_string());
        session.record_answer("gov_plan", Score::new(4).unwrap());
        session.push_message(ChatMessage::user("hello"));

        session.reset();

        assert_eq!(session.phase, Phase::Welcome);
        assert_eq!(session.dimension, Dimension::Environmental);
        assert_eq!(session.question_index, 0);
        assert_eq!(session.field_index, 0);
        assert!(session.profile.name.is_none());
        assert!(session.responses.is_empty());
        assert!(session.transcript.is_empty());
        assert!(session.results.is_none());
    }

    #[test]
    fn expiry_uses_updated_at() {
        let mut session = Session::new();
        assert!(!session.is_expired(24));
        session.updated_at = Utc::now() - Duration::hours(25);
        assert!(session.is_expired(24));
    }
}

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    is_known_university, AssessmentRecord, AssessmentResults, AssistantReply, ChatMessage,
    Dimension, Phase, Question, QuestionBank, RespondentProfile, Session, UNIVERSITIES,
};
use crate::repository::{ResultsRepository, SessionRepository};
use crate::services::{ScoringService, SheetsService};
use crate::utils::parse_answer;

const START_CONFIRM: &str = "Yes, start the assessment";
const MORE_INFO: &str = "I need more information";
const VIEW_RESULTS: &str = "View Full Results";

fn start_dimension_option(dimension: Dimension) -> String {
    format!("Start {} Dimension", dimension)
}

enum Command {
    StartDimension(Dimension),
    ViewResults,
}

fn parse_command(text: &str) -> Option<Command> {
    if text == VIEW_RESULTS {
        return Some(Command::ViewResults);
    }
    Dimension::ORDER
        .into_iter()
        .find(|d| text == start_dimension_option(*d))
        .map(Command::StartDimension)
}

struct ProfileField {
    key: &'static str,
    prompt: &'static str,
}

const PROFILE_FIELDS: [ProfileField; 2] = [
    ProfileField {
        key: "name",
        prompt: "What is your name?",
    },
    ProfileField {
        key: "university",
        prompt: "Which university would you like to evaluate?",
    },
];

/// The conversational state machine. Each user message drives exactly one
/// transition; failed transitions leave the session untouched (sessions are
/// loaded as clones and written back only on success).
pub struct AssistantService {
    sessions: Arc<SessionRepository>,
    bank: Arc<QuestionBank>,
    scoring: ScoringService,
    results_repo: Option<Arc<ResultsRepository>>,
    sheets: Option<Arc<SheetsService>>,
}

impl AssistantService {
    pub fn new(
        sessions: Arc<SessionRepository>,
        bank: Arc<QuestionBank>,
        results_repo: Option<Arc<ResultsRepository>>,
        sheets: Option<Arc<SheetsService>>,
    ) -> Self {
        let scoring = ScoringService::new(bank.clone());
        Self {
            sessions,
            bank,
            scoring,
            results_repo,
            sheets,
        }
    }

    /// Create a fresh session and greet the respondent.
    pub async fn start_session(&self) -> AssistantReply {
        let mut session = Session::new();
        let mut reply = Vec::new();
        push_bot(&mut session, &mut reply, self.welcome_message());

        let result = AssistantReply {
            session_id: session.id,
            phase: session.phase,
            messages: reply,
        };
        self.sessions.save(session).await;
        result
    }

    pub async fn get_session(&self, id: Uuid) -> AppResult<Session> {
        self.sessions
            .find(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
    }

    /// Drive one state transition with a user message.
    pub async fn handle_message(&self, id: Uuid, text: &str) -> AppResult<AssistantReply> {
        let mut session = self.get_session(id).await?;
        let mut reply = Vec::new();

        match session.phase {
            Phase::Welcome => self.handle_welcome(&mut session, &mut reply, text),
            Phase::Profile => self.handle_profile(&mut session, &mut reply, text)?,
            Phase::Questionnaire => self.handle_questionnaire(&mut session, &mut reply, text)?,
            Phase::Results => {
                // Nothing to advance; nudge and keep the exchange on record
                session.push_message(ChatMessage::user(text));
                push_bot(
                    &mut session,
                    &mut reply,
                    ChatMessage::bot(
                        "Your assessment is complete. Review the results, open the \
                         follow-up chat, or restart to evaluate again.",
                    ),
                );
            }
            Phase::Chat => {
                session.push_message(ChatMessage::user(text));
                push_bot(
                    &mut session,
                    &mut reply,
                    ChatMessage::bot(
                        "The follow-up chat is open. Send messages through the chat \
                         endpoint, or go back to your results.",
                    ),
                );
            }
        }

        session.touch();
        let result = AssistantReply {
            session_id: session.id,
            phase: session.phase,
            messages: reply,
        };
        self.sessions.save(session).await;
        Ok(result)
    }

    /// Discard all session state and start over from the welcome phase.
    pub async fn restart(&self, id: Uuid) -> AppResult<AssistantReply> {
        let mut session = self.get_session(id).await?;
        info!("Restarting assessment for session {}", id);

        self.sessions.delete(id).await;
        session.reset();

        let mut reply = Vec::new();
        push_bot(&mut session, &mut reply, self.welcome_message());

        let result = AssistantReply {
            session_id: session.id,
            phase: session.phase,
            messages: reply,
        };
        self.sessions.save(session).await;
        Ok(result)
    }

    /// Computed results, once the questionnaire has finished. A session that
    /// claims to be past completion but has no results is surfaced as
    /// corrupted rather than returning an empty payload.
    pub async fn results(&self, id: Uuid) -> AppResult<AssessmentResults> {
        let session = self.get_session(id).await?;
        match session.phase {
            Phase::Results | Phase::Chat => {
                session.results.ok_or(AppError::CorruptedResults)
            }
            _ => Err(AppError::AssessmentNotComplete),
        }
    }

    /// Results → Chat transition.
    pub async fn enter_chat(&self, id: Uuid) -> AppResult<AssistantReply> {
        let mut session = self.get_session(id).await?;
        match session.phase {
            Phase::Results => {}
            Phase::Chat => return Err(AppError::BadRequest("Chat is already open".to_string())),
            _ => return Err(AppError::AssessmentNotComplete),
        }
        if session.results.is_none() {
            return Err(AppError::CorruptedResults);
        }

        session.phase = Phase::Chat;
        let mut reply = Vec::new();
        push_bot(
            &mut session,
            &mut reply,
            ChatMessage::bot(
                "💬 **Follow-up chat opened.** Ask anything about your results: \
                 prioritizing recommendations, implementation roadmaps, or \
                 international sustainability frameworks.",
            ),
        );

        session.touch();
        let result = AssistantReply {
            session_id: session.id,
            phase: session.phase,
            messages: reply,
        };
        self.sessions.save(session).await;
        Ok(result)
    }

    /// Chat → Results transition.
    pub async fn leave_chat(&self, id: Uuid) -> AppResult<AssistantReply> {
        let mut session = self.get_session(id).await?;
        if session.phase != Phase::Chat {
            return Err(AppError::ChatNotActive);
        }

        session.phase = Phase::Results;
        let mut reply = Vec::new();
        push_bot(
            &mut session,
            &mut reply,
            ChatMessage::bot("Back to your results."),
        );

        session.touch();
        let result = AssistantReply {
            session_id: session.id,
            phase: session.phase,
            messages: reply,
        };
        self.sessions.save(session).await;
        Ok(result)
    }

    /// Results context plus transcript for one advisor turn. Fails without
    /// touching state when chat is not open.
    pub async fn chat_context(
        &self,
        id: Uuid,
    ) -> AppResult<(AssessmentResults, Vec<ChatMessage>)> {
        let session = self.get_session(id).await?;
        if session.phase != Phase::Chat {
            return Err(AppError::ChatNotActive);
        }
        let results = session.results.clone().ok_or(AppError::CorruptedResults)?;
        Ok((results, session.transcript))
    }

    /// Append one completed advisor exchange to the transcript.
    pub async fn append_chat_turn(
        &self,
        id: Uuid,
        user: ChatMessage,
        bot: ChatMessage,
    ) -> AppResult<()> {
        let mut session = self.get_session(id).await?;
        if session.phase != Phase::Chat {
            return Err(AppError::ChatNotActive);
        }
        session.push_message(user);
        session.push_message(bot);
        session.touch();
        self.sessions.save(session).await;
        Ok(())
    }

    // --- phase handlers -------------------------------------------------

    fn handle_welcome(&self, session: &mut Session, reply: &mut Vec<ChatMessage>, text: &str) {
        session.push_message(ChatMessage::user(text));

        if text == START_CONFIRM {
            session.phase = Phase::Profile;
            session.field_index = 0;
            push_bot(
                session,
                reply,
                ChatMessage::bot(format!(
                    "**📝 Initial Registration**\n\nGreat, let's start with a couple of \
                     basic questions to personalize your assessment.\n\n{}",
                    PROFILE_FIELDS[0].prompt
                )),
            );
        } else {
            push_bot(
                session,
                reply,
                ChatMessage::bot_with_options(
                    "The University Sustainability Assistant uses a comprehensive \
                     evaluation model based on international standards to measure \
                     sustainability across three key dimensions.\n\nWould you like \
                     to begin now?",
                    vec![START_CONFIRM.to_string()],
                ),
            );
        }
    }

    fn handle_profile(
        &self,
        session: &mut Session,
        reply: &mut Vec<ChatMessage>,
        text: &str,
    ) -> AppResult<()> {
        let input = text.trim();
        let field = &PROFILE_FIELDS[session.field_index];

        match field.key {
            "name" => {
                if input.is_empty() {
                    return Err(AppError::ValidationError(
                        "name must not be blank".to_string(),
                    ));
                }
                session.push_message(ChatMessage::user(input));
                session.profile.name = Some(input.to_string());
                session.field_index += 1;

                push_bot(
                    session,
                    reply,
                    ChatMessage::bot_with_options(
                        format!(
                            "Nice to meet you, {}!\n\n**{}**\n\nSelect it from the list:",
                            input, PROFILE_FIELDS[1].prompt
                        ),
                        UNIVERSITIES.iter().map(|u| u.to_string()).collect(),
                    ),
                );
            }
            "university" => {
                if !is_known_university(input) {
                    return Err(AppError::ValidationError(format!(
                        "Unknown university {:?}; select one from the list",
                        input
                    )));
                }
                session.push_message(ChatMessage::user(input));
                session.profile.university = Some(input.to_string());

                session.phase = Phase::Questionnaire;
                session.dimension = Dimension::Environmental;
                session.question_index = 0;

                let name = session.profile.name.clone().unwrap_or_default();
                push_bot(
                    session,
                    reply,
                    ChatMessage::bot_with_options(
                        format!(
                            "Excellent, {}! We have your basic information.\n\n🌱 **We'll \
                             begin with the ENVIRONMENTAL dimension**\n\nThis section \
                             evaluates {}.\n\n> 💡 **Instructions:** for each question, \
                             select the option (1-5) that best describes your \
                             institution's current situation.",
                            name,
                            Dimension::Environmental.focus()
                        ),
                        vec![start_dimension_option(Dimension::Environmental)],
                    ),
                );
            }
            _ => unreachable!("unknown profile field"),
        }

        Ok(())
    }

    fn handle_questionnaire(
        &self,
        session: &mut Session,
        reply: &mut Vec<ChatMessage>,
        text: &str,
    ) -> AppResult<()> {
        match parse_command(text) {
            Some(Command::StartDimension(dimension)) => {
                if dimension != session.dimension {
                    return Err(AppError::BadRequest(format!(
                        "The {} dimension is not the one in progress",
                        dimension
                    )));
                }
                let question = self
                    .bank
                    .question_at(session.dimension, session.question_index)
                    .ok_or(AppError::AssessmentNotComplete)?;

                session.push_message(ChatMessage::user(text));
                let msg = self.question_message(session.dimension, session.question_index, question);
                push_bot(session, reply, msg);
                Ok(())
            }
            Some(Command::ViewResults) => {
                if !self.assessment_complete(session) {
                    return Err(AppError::AssessmentNotComplete);
                }
                session.push_message(ChatMessage::user(text));
                self.generate_results(session, reply)
            }
            None => self.handle_answer(session, reply, text),
        }
    }

    fn handle_answer(
        &self,
        session: &mut Session,
        reply: &mut Vec<ChatMessage>,
        text: &str,
    ) -> AppResult<()> {
        let questions = self.bank.by_dimension(session.dimension);
        let question = *questions.get(session.question_index).ok_or_else(|| {
            AppError::BadRequest(
                "No question is pending; view your full results".to_string(),
            )
        })?;

        // Malformed input halts here, before anything is recorded
        let score = parse_answer(text)?;

        session.push_message(ChatMessage::user(text));
        session.record_answer(question.id, score);
        push_bot(
            session,
            reply,
            ChatMessage::bot(format!("✅ **Answer recorded:** score {}/5", score)),
        );

        if session.question_index + 1 < questions.len() {
            session.question_index += 1;
            let next = questions[session.question_index];
            let msg = self.question_message(session.dimension, session.question_index, next);
            push_bot(session, reply, msg);
            return Ok(());
        }

        self.finish_dimension(session, reply)
    }

    /// Summarize the dimension that just finished and advance to the next
    /// one, or offer the final results.
    fn finish_dimension(
        &self,
        session: &mut Session,
        reply: &mut Vec<ChatMessage>,
    ) -> AppResult<()> {
        let completed = session.dimension;
        let result = self.scoring.score_dimension(completed, &session.responses);

        let mut summary = format!(
            "📊 **{} Dimension Summary**\n\n\
             • **Average score:** {:.1}/5.0\n\
             • **Strengths identified:** {} areas\n\
             • **Areas for improvement:** {} areas\n\n",
            completed,
            result.score,
            result.strengths.len(),
            result.weaknesses.len()
        );

        match completed.next() {
            Some(next) => {
                session.dimension = next;
                session.question_index = 0;
                summary.push_str(&format!(
                    "**We continue with the {} dimension**\n\nThis section evaluates {}.",
                    next,
                    next.focus()
                ));
                push_bot(
                    session,
                    reply,
                    ChatMessage::bot_with_options(summary, vec![start_dimension_option(next)]),
                );
            }
            None => {
                // Past the last question of the last dimension
                session.question_index = self.bank.dimension_len(completed);
                summary.push_str(
                    "🎯 **Assessment complete!**\n\nYou have finished all three \
                     dimensions. Your full sustainability diagnosis is ready.",
                );
                push_bot(
                    session,
                    reply,
                    ChatMessage::bot_with_options(summary, vec![VIEW_RESULTS.to_string()]),
                );
            }
        }

        Ok(())
    }

    fn generate_results(
        &self,
        session: &mut Session,
        reply: &mut Vec<ChatMessage>,
    ) -> AppResult<()> {
        let profile = RespondentProfile {
            name: session
                .profile
                .name
                .clone()
                .ok_or_else(|| AppError::InternalError("profile missing a name".to_string()))?,
            university: session.profile.university.clone().ok_or_else(|| {
                AppError::InternalError("profile missing a university".to_string())
            })?,
        };

        let results = self.scoring.compute(profile, session.responses.clone());
        info!(
            "Session {} completed with overall score {:.1}",
            session.id, results.overall_score
        );

        session.results = Some(results.clone());
        session.phase = Phase::Results;

        push_bot(
            session,
            reply,
            ChatMessage::bot(
                "✅ **Diagnosis complete!**\n\nYour university sustainability assessment \
                 has been processed. Review the detailed results or open the follow-up \
                 chat to dig into specific recommendations.",
            ),
        );

        self.persist_results(session.id, &results);
        Ok(())
    }

    /// Fire-and-forget remote writes. The in-memory result is authoritative;
    /// failures here are logged and never reach the respondent.
    fn persist_results(&self, session_id: Uuid, results: &AssessmentResults) {
        let record = AssessmentRecord::from_results(session_id, results);

        if let Some(repo) = self.results_repo.clone() {
            let record = record.clone();
            tokio::spawn(async move {
                if let Err(e) = repo.insert(&record).await {
                    warn!("Failed to persist results for session {}: {}", session_id, e);
                }
            });
        }

        if let Some(sheets) = self.sheets.clone() {
            if sheets.is_configured() {
                tokio::spawn(async move {
                    if let Err(e) = sheets.append_result(&record).await {
                        warn!("Failed to export results for session {}: {}", session_id, e);
                    }
                });
            }
        }
    }

    // --- helpers --------------------------------------------------------

    fn assessment_complete(&self, session: &Session) -> bool {
        Dimension::ORDER.iter().all(|d| {
            let answered = session
                .responses
                .iter()
                .filter(|r| {
                    self.bank
                        .find(&r.question_id)
                        .map(|q| q.dimension == *d)
                        .unwrap_or(false)
                })
                .count();
            answered == self.bank.dimension_len(*d)
        })
    }

    fn question_message(
        &self,
        dimension: Dimension,
        index: usize,
        question: &Question,
    ) -> ChatMessage {
        let total = self.bank.dimension_len(dimension);
        ChatMessage::bot_with_options(
            format!(
                "**{} - Question {} of {}**\n\n**{}**\n\nSelect the option that best \
                 describes the current situation:",
                dimension,
                index + 1,
                total,
                question.prompt
            ),
            question.formatted_options(),
        )
    }

    fn welcome_message(&self) -> ChatMessage {
        ChatMessage::bot_with_options(
            format!(
                "🌱 **Welcome to the University Sustainability Assistant!**\n\n\
                 This assistant helps you evaluate your institution's sustainability \
                 across three fundamental dimensions:\n\n\
                 🌍 **Environmental** - {}\n\
                 👥 **Social** - {}\n\
                 🏛️ **Governance** - {}\n\n\
                 > 📋 **The process includes:**\n\
                 > - Basic registration ({} questions)\n\
                 > - Comprehensive sustainability questionnaire ({} questions)\n\
                 > - Detailed diagnosis with strengths, weaknesses and recommendations\n\
                 > - Optional follow-up chat about your results\n\n\
                 Are you ready to start the assessment?",
                Dimension::Environmental.focus(),
                Dimension::Social.focus(),
                Dimension::Governance.focus(),
                PROFILE_FIELDS.len(),
                self.bank.len()
            ),
            vec![START_CONFIRM.to_string(), MORE_INFO.to_string()],
        )
    }
}

/// Record a bot message in the transcript and in the reply being built.
fn push_bot(session: &mut Session, reply: &mut Vec<ChatMessage>, message: ChatMessage) {
    session.push_message(message.clone());
    reply.push(message);
}

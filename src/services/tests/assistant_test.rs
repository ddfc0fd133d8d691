use uuid::Uuid;

use crate::error::AppError;
use crate::models::{ChatMessage, Dimension, Phase, QuestionBank, Score};
use crate::services::tests::setup_assistant;
use crate::services::AssistantService;

const START_CONFIRM: &str = "Yes, start the assessment";
const VIEW_RESULTS: &str = "View Full Results";

async fn send(assistant: &AssistantService, id: Uuid, text: &str) -> Phase {
    assistant
        .handle_message(id, text)
        .await
        .unwrap_or_else(|e| panic!("message {:?} rejected: {}", text, e))
        .phase
}

/// Drive a session from welcome to the questionnaire start.
async fn reach_questionnaire(assistant: &AssistantService) -> Uuid {
    let reply = assistant.start_session().await;
    assert_eq!(reply.phase, Phase::Welcome);
    let id = reply.session_id;

    assert_eq!(send(assistant, id, START_CONFIRM).await, Phase::Profile);
    assert_eq!(send(assistant, id, "Ana").await, Phase::Profile);
    assert_eq!(
        send(assistant, id, "Universidad de La Sabana").await,
        Phase::Questionnaire
    );
    id
}

/// Answer every question of one dimension with the same score, including the
/// "Start X Dimension" confirmation that precedes it.
async fn answer_dimension(
    assistant: &AssistantService,
    id: Uuid,
    dimension: Dimension,
    score: u8,
) {
    let bank = QuestionBank::new();
    send(assistant, id, &format!("Start {} Dimension", dimension)).await;
    for _ in 0..bank.dimension_len(dimension) {
        send(assistant, id, &format!("{}. option", score)).await;
    }
}

async fn complete_assessment(assistant: &AssistantService) -> Uuid {
    let id = reach_questionnaire(assistant).await;
    answer_dimension(assistant, id, Dimension::Environmental, 5).await;
    answer_dimension(assistant, id, Dimension::Social, 3).await;
    answer_dimension(assistant, id, Dimension::Governance, 1).await;
    assert_eq!(send(assistant, id, VIEW_RESULTS).await, Phase::Results);
    id
}

#[tokio::test]
async fn welcome_offers_start_option() {
    let assistant = setup_assistant();
    let reply = assistant.start_session().await;

    assert_eq!(reply.phase, Phase::Welcome);
    assert_eq!(reply.messages.len(), 1);
    let options = reply.messages[0].options.as_ref().unwrap();
    assert!(options.contains(&START_CONFIRM.to_string()));
}

#[tokio::test]
async fn declining_keeps_welcome_phase() {
    let assistant = setup_assistant();
    let id = assistant.start_session().await.session_id;

    let reply = assistant
        .handle_message(id, "I need more information")
        .await
        .unwrap();
    assert_eq!(reply.phase, Phase::Welcome);
}

#[tokio::test]
async fn blank_name_is_rejected_without_advancing() {
    let assistant = setup_assistant();
    let id = assistant.start_session().await.session_id;
    send(&assistant, id, START_CONFIRM).await;

    let err = assistant.handle_message(id, "   ").await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // Still waiting on the name field
    let session = assistant.get_session(id).await.unwrap();
    assert_eq!(session.phase, Phase::Profile);
    assert_eq!(session.field_index, 0);
    assert!(session.profile.name.is_none());
}

#[tokio::test]
async fn unknown_university_is_rejected() {
    let assistant = setup_assistant();
    let id = assistant.start_session().await.session_id;
    send(&assistant, id, START_CONFIRM).await;
    send(&assistant, id, "Ana").await;

    let err = assistant
        .handle_message(id, "Hogwarts")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let session = assistant.get_session(id).await.unwrap();
    assert_eq!(session.phase, Phase::Profile);
    assert!(session.profile.university.is_none());
}

#[tokio::test]
async fn malformed_answer_leaves_questionnaire_state_untouched() {
    let assistant = setup_assistant();
    let id = reach_questionnaire(&assistant).await;
    send(&assistant, id, "Start Environmental Dimension").await;

    let before = assistant.get_session(id).await.unwrap();

    let err = assistant
        .handle_message(id, "maybe a four?")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAnswerFormat(_)));

    let after = assistant.get_session(id).await.unwrap();
    assert_eq!(after.question_index, before.question_index);
    assert_eq!(after.responses.len(), before.responses.len());
    assert_eq!(after.transcript.len(), before.transcript.len());
}

#[tokio::test]
async fn out_of_range_answer_is_rejected() {
    let assistant = setup_assistant();
    let id = reach_questionnaire(&assistant).await;
    send(&assistant, id, "Start Environmental Dimension").await;

    let err = assistant.handle_message(id, "6. option").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidAnswerFormat(_)));
}

#[tokio::test]
async fn bare_integer_answers_are_accepted() {
    let assistant = setup_assistant();
    let id = reach_questionnaire(&assistant).await;
    send(&assistant, id, "Start Environmental Dimension").await;
    send(&assistant, id, "4").await;

    let session = assistant.get_session(id).await.unwrap();
    assert_eq!(session.responses.len(), 1);
    assert_eq!(session.responses[0].score, Score::new(4).unwrap());
    assert_eq!(session.question_index, 1);
}

#[tokio::test]
async fn finishing_a_dimension_advances_to_the_next() {
    let assistant = setup_assistant();
    let id = reach_questionnaire(&assistant).await;
    answer_dimension(&assistant, id, Dimension::Environmental, 4).await;

    let session = assistant.get_session(id).await.unwrap();
    assert_eq!(session.phase, Phase::Questionnaire);
    assert_eq!(session.dimension, Dimension::Social);
    assert_eq!(session.question_index, 0);
}

#[tokio::test]
async fn viewing_results_early_fails() {
    let assistant = setup_assistant();
    let id = reach_questionnaire(&assistant).await;
    answer_dimension(&assistant, id, Dimension::Environmental, 4).await;

    let err = assistant.handle_message(id, VIEW_RESULTS).await.unwrap_err();
    assert!(matches!(err, AppError::AssessmentNotComplete));

    let err = assistant.results(id).await.unwrap_err();
    assert!(matches!(err, AppError::AssessmentNotComplete));
}

#[tokio::test]
async fn full_assessment_produces_expected_scores() {
    let assistant = setup_assistant();
    let id = complete_assessment(&assistant).await;

    let results = assistant.results(id).await.unwrap();
    let bank = QuestionBank::new();

    assert_eq!(results.profile.name, "Ana");
    assert_eq!(results.profile.university, "Universidad de La Sabana");
    assert_eq!(results.responses.len(), bank.len());

    let env = &results.dimensions.environmental;
    assert_eq!(env.score, 5.0);
    assert_eq!(env.strengths.len(), bank.dimension_len(Dimension::Environmental));
    assert!(env.weaknesses.is_empty());

    let soc = &results.dimensions.social;
    assert_eq!(soc.score, 3.0);
    assert!(soc.strengths.is_empty());
    assert!(soc.weaknesses.is_empty());
    assert_eq!(soc.recommendations.len(), 1);

    let gov = &results.dimensions.governance;
    assert_eq!(gov.score, 1.0);
    assert_eq!(gov.weaknesses.len(), bank.dimension_len(Dimension::Governance));
    assert_eq!(gov.recommendations.len(), bank.dimension_len(Dimension::Governance));

    assert_eq!(results.overall_score, 3.0);
}

#[tokio::test]
async fn messages_after_completion_do_not_mutate_results() {
    let assistant = setup_assistant();
    let id = complete_assessment(&assistant).await;

    let reply = assistant.handle_message(id, "5. option").await.unwrap();
    assert_eq!(reply.phase, Phase::Results);

    let results = assistant.results(id).await.unwrap();
    assert_eq!(results.overall_score, 3.0);
}

#[tokio::test]
async fn post_completion_exchanges_are_kept_in_transcript() {
    let assistant = setup_assistant();
    let id = complete_assessment(&assistant).await;

    let before = assistant.get_session(id).await.unwrap().transcript.len();
    let reply = assistant.handle_message(id, "what now?").await.unwrap();
    assert_eq!(reply.messages.len(), 1);

    let session = assistant.get_session(id).await.unwrap();
    assert_eq!(session.transcript.len(), before + 2);
    let tail = &session.transcript[before..];
    assert_eq!(tail[0].content, "what now?");
    assert_eq!(tail[1].content, reply.messages[0].content);
}

#[tokio::test]
async fn restart_discards_everything() {
    let assistant = setup_assistant();
    let id = complete_assessment(&assistant).await;

    let reply = assistant.restart(id).await.unwrap();
    assert_eq!(reply.phase, Phase::Welcome);

    let session = assistant.get_session(id).await.unwrap();
    assert!(session.responses.is_empty());
    assert!(session.results.is_none());
    assert!(session.profile.name.is_none());

    let err = assistant.results(id).await.unwrap_err();
    assert!(matches!(err, AppError::AssessmentNotComplete));
}

#[tokio::test]
async fn chat_round_trip() {
    let assistant = setup_assistant();
    let id = complete_assessment(&assistant).await;

    let reply = assistant.enter_chat(id).await.unwrap();
    assert_eq!(reply.phase, Phase::Chat);

    let (results, transcript) = assistant.chat_context(id).await.unwrap();
    assert_eq!(results.overall_score, 3.0);
    assert!(!transcript.is_empty());

    assistant
        .append_chat_turn(
            id,
            ChatMessage::user("Where do I start?"),
            ChatMessage::bot("Start with governance planning."),
        )
        .await
        .unwrap();

    let reply = assistant.leave_chat(id).await.unwrap();
    assert_eq!(reply.phase, Phase::Results);

    // Results still intact after the excursion
    let results = assistant.results(id).await.unwrap();
    assert_eq!(results.overall_score, 3.0);
}

#[tokio::test]
async fn chat_requires_completed_assessment() {
    let assistant = setup_assistant();
    let id = reach_questionnaire(&assistant).await;

    let err = assistant.enter_chat(id).await.unwrap_err();
    assert!(matches!(err, AppError::AssessmentNotComplete));

    let err = assistant.chat_context(id).await.unwrap_err();
    assert!(matches!(err, AppError::ChatNotActive));

    let err = assistant.leave_chat(id).await.unwrap_err();
    assert!(matches!(err, AppError::ChatNotActive));
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let assistant = setup_assistant();
    let err = assistant
        .handle_message(Uuid::new_v4(), "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

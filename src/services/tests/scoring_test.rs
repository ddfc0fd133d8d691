use std::sync::Arc;

use chrono::Utc;

use crate::models::{AnswerRecord, Dimension, QuestionBank, RespondentProfile, Score};
use crate::services::ScoringService;

fn setup() -> (Arc<QuestionBank>, ScoringService) {
    let bank = Arc::new(QuestionBank::new());
    let scoring = ScoringService::new(bank.clone());
    (bank, scoring)
}

fn answer(question_id: &str, score: u8) -> AnswerRecord {
    AnswerRecord {
        question_id: question_id.to_string(),
        score: Score::new(score).unwrap(),
        answered_at: Utc::now(),
    }
}

fn answer_dimension(bank: &QuestionBank, dimension: Dimension, score: u8) -> Vec<AnswerRecord> {
    bank.by_dimension(dimension)
        .iter()
        .map(|q| answer(q.id, score))
        .collect()
}

fn profile() -> RespondentProfile {
    RespondentProfile {
        name: "Ana".to_string(),
        university: "Universidad de La Sabana".to_string(),
    }
}

#[test]
fn high_scores_become_strengths() {
    let (bank, scoring) = setup();
    let responses = answer_dimension(&bank, Dimension::Environmental, 5);

    let result = scoring.score_dimension(Dimension::Environmental, &responses);
    assert_eq!(result.score, 5.0);
    assert_eq!(result.strengths.len(), bank.dimension_len(Dimension::Environmental));
    assert!(result.weaknesses.is_empty());
    // No weaknesses means the generic encouragement recommendation
    assert_eq!(result.recommendations.len(), 1);
    assert!(result.recommendations[0].contains("Keep strengthening"));
}

#[test]
fn low_scores_become_weaknesses_with_recommendations() {
    let (bank, scoring) = setup();
    let responses = answer_dimension(&bank, Dimension::Governance, 1);

    let result = scoring.score_dimension(Dimension::Governance, &responses);
    let n = bank.dimension_len(Dimension::Governance);
    assert_eq!(result.score, 1.0);
    assert!(result.strengths.is_empty());
    assert_eq!(result.weaknesses.len(), n);
    assert_eq!(result.recommendations.len(), n);
}

#[test]
fn neutral_scores_produce_no_classification() {
    let (bank, scoring) = setup();
    let responses = answer_dimension(&bank, Dimension::Social, 3);

    let result = scoring.score_dimension(Dimension::Social, &responses);
    assert_eq!(result.score, 3.0);
    assert!(result.strengths.is_empty());
    assert!(result.weaknesses.is_empty());
    assert_eq!(result.recommendations.len(), 1);
    assert!(result.recommendations[0].contains("Keep strengthening"));
}

#[test]
fn score_two_counts_as_weakness_and_four_as_strength() {
    let (bank, scoring) = setup();
    let questions = bank.by_dimension(Dimension::Environmental);
    let responses = vec![answer(questions[0].id, 2), answer(questions[1].id, 4)];

    let result = scoring.score_dimension(Dimension::Environmental, &responses);
    assert_eq!(result.score, 3.0);
    assert_eq!(result.strengths, vec![questions[1].prompt.to_string()]);
    assert_eq!(result.weaknesses, vec![questions[0].prompt.to_string()]);
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(
        result.recommendations[0],
        questions[0].recommendation_for(Score::new(2).unwrap())
    );
}

#[test]
fn empty_dimension_scores_zero_with_placeholder() {
    let (_bank, scoring) = setup();

    let result = scoring.score_dimension(Dimension::Environmental, &[]);
    assert_eq!(result.score, 0.0);
    assert!(result.strengths.is_empty());
    assert!(result.weaknesses.is_empty());
    assert_eq!(result.recommendations.len(), 1);
    assert!(result.recommendations[0].contains("Complete the"));
}

#[test]
fn unknown_question_ids_are_ignored() {
    let (bank, scoring) = setup();
    let questions = bank.by_dimension(Dimension::Social);
    let responses = vec![answer(questions[0].id, 5), answer("bogus_question", 1)];

    let result = scoring.score_dimension(Dimension::Social, &responses);
    assert_eq!(result.score, 5.0);
    assert_eq!(result.strengths.len(), 1);
    assert!(result.weaknesses.is_empty());
}

#[test]
fn overall_averages_answered_dimensions() {
    let (bank, scoring) = setup();
    let mut responses = answer_dimension(&bank, Dimension::Environmental, 5);
    responses.extend(answer_dimension(&bank, Dimension::Social, 3));
    responses.extend(answer_dimension(&bank, Dimension::Governance, 1));

    let results = scoring.compute(profile(), responses);
    assert_eq!(results.dimensions.environmental.score, 5.0);
    assert_eq!(results.dimensions.social.score, 3.0);
    assert_eq!(results.dimensions.governance.score, 1.0);
    assert_eq!(results.overall_score, 3.0);
}

#[test]
fn overall_excludes_unanswered_dimensions() {
    let (bank, scoring) = setup();
    // Only environmental answered; social and governance score 0 and must
    // not drag the overall average down
    let responses = answer_dimension(&bank, Dimension::Environmental, 4);

    let results = scoring.compute(profile(), responses);
    assert_eq!(results.dimensions.environmental.score, 4.0);
    assert_eq!(results.dimensions.social.score, 0.0);
    assert_eq!(results.overall_score, 4.0);
}

#[test]
fn overall_is_zero_with_no_answers() {
    let (_bank, scoring) = setup();

    let results = scoring.compute(profile(), Vec::new());
    assert_eq!(results.overall_score, 0.0);
}

#[test]
fn order_of_answers_does_not_change_scores() {
    let (bank, scoring) = setup();
    let mut responses = answer_dimension(&bank, Dimension::Environmental, 5);
    responses.extend(answer_dimension(&bank, Dimension::Governance, 2));

    let mut reversed = responses.clone();
    reversed.reverse();

    let a = scoring.compute(profile(), responses);
    let b = scoring.compute(profile(), reversed);
    assert_eq!(a.overall_score, b.overall_score);
    assert_eq!(
        a.dimensions.governance.recommendations,
        b.dimensions.governance.recommendations
    );
}

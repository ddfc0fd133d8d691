use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::models::{
    AnswerRecord, AssessmentResults, Dimension, DimensionBreakdown, DimensionResult,
    QuestionBank, RespondentProfile,
};

/// Pure aggregation over recorded answers. No I/O, no fallible paths for
/// well-formed input.
pub struct ScoringService {
    bank: Arc<QuestionBank>,
}

impl ScoringService {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self { bank }
    }

    /// Score a single dimension over the answers that belong to it.
    ///
    /// A dimension with no answers scores 0.0 with a single placeholder
    /// recommendation; answers of 4-5 become strengths, 1-2 become
    /// weaknesses with a score-specific recommendation, and 3 is neutral.
    pub fn score_dimension(
        &self,
        dimension: Dimension,
        responses: &[AnswerRecord],
    ) -> DimensionResult {
        let in_dimension: Vec<&AnswerRecord> = responses
            .iter()
            .filter(|r| match self.bank.find(&r.question_id) {
                Some(question) => question.dimension == dimension,
                None => {
                    warn!("Ignoring answer for unknown question {}", r.question_id);
                    false
                }
            })
            .collect();

        if in_dimension.is_empty() {
            return DimensionResult {
                score: 0.0,
                strengths: Vec::new(),
                weaknesses: Vec::new(),
                recommendations: vec![format!(
                    "Complete the {} assessment to receive specific recommendations.",
                    dimension.key()
                )],
            };
        }

        let total: u32 = in_dimension.iter().map(|r| r.score.value() as u32).sum();
        let score = total as f64 / in_dimension.len() as f64;

        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();
        let mut recommendations = Vec::new();

        for response in &in_dimension {
            // Presence is guaranteed by the filter above
            let Some(question) = self.bank.find(&response.question_id) else {
                continue;
            };

            let value = response.score.value();
            if value >= 4 {
                strengths.push(question.prompt.to_string());
            } else if value <= 2 {
                weaknesses.push(question.prompt.to_string());
                recommendations.push(question.recommendation_for(response.score).to_string());
            }
        }

        if recommendations.is_empty() {
            recommendations.push(format!(
                "Keep strengthening {} practices following the specific recommendations.",
                dimension.key()
            ));
        }

        DimensionResult {
            score,
            strengths,
            weaknesses,
            recommendations,
        }
    }

    /// Compute the full assessment outcome. The overall score averages only
    /// the dimension scores that are finite and nonzero, and is 0 when none
    /// qualify.
    pub fn compute(
        &self,
        profile: RespondentProfile,
        responses: Vec<AnswerRecord>,
    ) -> AssessmentResults {
        let dimensions = DimensionBreakdown {
            environmental: self.score_dimension(Dimension::Environmental, &responses),
            social: self.score_dimension(Dimension::Social, &responses),
            governance: self.score_dimension(Dimension::Governance, &responses),
        };

        let valid_scores: Vec<f64> = Dimension::ORDER
            .iter()
            .map(|d| dimensions.get(*d).score)
            .filter(|s| s.is_finite() && *s > 0.0)
            .collect();

        let overall_score = if valid_scores.is_empty() {
            0.0
        } else {
            valid_scores.iter().sum::<f64>() / valid_scores.len() as f64
        };

        AssessmentResults {
            profile,
            responses,
            dimensions,
            overall_score,
            completed_at: Utc::now(),
        }
    }
}

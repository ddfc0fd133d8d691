use crate::error::{AppError, AppResult};
use crate::models::Score;

/// Parse an answer string of the form `"<score 1-5>. <label>"` into a
/// validated score.
///
/// The score is the integer token before the first `.`; a bare integer with
/// no dot is also accepted. Anything else (no leading integer, out-of-range
/// value) is rejected before it can reach aggregation.
pub fn parse_answer(input: &str) -> AppResult<Score> {
    let token = input
        .split('.')
        .next()
        .map(str::trim)
        .unwrap_or_default();

    token
        .parse::<u8>()
        .ok()
        .and_then(Score::new)
        .ok_or_else(|| AppError::InvalidAnswerFormat(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_answers() {
        assert_eq!(parse_answer("4. Comprehensive plan").unwrap().value(), 4);
        assert_eq!(parse_answer("1. No plan exists").unwrap().value(), 1);
        assert_eq!(parse_answer(" 3.  Partial ").unwrap().value(), 3);
    }

    #[test]
    fn accepts_bare_score() {
        assert_eq!(parse_answer("5").unwrap().value(), 5);
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(matches!(
            parse_answer("abc"),
            Err(AppError::InvalidAnswerFormat(_))
        ));
        assert!(matches!(
            parse_answer(""),
            Err(AppError::InvalidAnswerFormat(_))
        ));
        assert!(matches!(
            parse_answer(". missing score"),
            Err(AppError::InvalidAnswerFormat(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_scores() {
        assert!(matches!(
            parse_answer("0. Below range"),
            Err(AppError::InvalidAnswerFormat(_))
        ));
        assert!(matches!(
            parse_answer("6. Above range"),
            Err(AppError::InvalidAnswerFormat(_))
        ));
        assert!(matches!(
            parse_answer("-2. Negative"),
            Err(AppError::InvalidAnswerFormat(_))
        ));
    }
}

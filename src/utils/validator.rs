use validator::Validate;

use crate::error::{AppError, AppResult};

/// Validate a request struct using the validator crate
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request.validate().map_err(|e| {
        let errors: Vec<String> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| {
                    format!(
                        "{}: {}",
                        field,
                        err.message.clone().unwrap_or_else(|| "Invalid value".into())
                    )
                })
            })
            .collect();

        AppError::ValidationError(errors.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserMessageRequest;

    #[test]
    fn accepts_well_formed_message_request() {
        let request = UserMessageRequest {
            message: "4. Comprehensive plan".to_string(),
        };
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn rejects_empty_message() {
        let request = UserMessageRequest {
            message: String::new(),
        };
        let err = validate_request(&request).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn rejects_oversized_message() {
        let request = UserMessageRequest {
            message: "x".repeat(2001),
        };
        assert!(validate_request(&request).is_err());
    }
}

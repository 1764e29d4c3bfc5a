//! Request validation helpers shared by handlers.
//!
//! DTOs derive [`validator::Validate`] for field-level rules; the helpers
//! here cover the required-field checks that depend on trimming and turn
//! `validator` output into a single readable message.

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Run `validator` rules on a DTO, mapping failures to [`CoreError::Validation`].
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), CoreError> {
    dto.validate().map_err(CoreError::from)
}

/// Require a non-blank string field. Returns the trimmed value.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Flatten `validator` errors into `"field: message; field: message"`.
///
/// Fields are sorted so the message is stable across runs.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    collect(errors, "", &mut parts);
    parts.sort();
    if parts.is_empty() {
        "Invalid input".to_string()
    } else {
        parts.join("; ")
    }
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", err.code));
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(email)]
        email: Option<String>,
    }

    #[test]
    fn valid_dto_passes() {
        let dto = Sample {
            name: "Ada".into(),
            email: Some("ada@example.org".into()),
        };
        assert!(validate_dto(&dto).is_ok());
    }

    #[test]
    fn messages_are_flattened_and_sorted() {
        let dto = Sample {
            name: String::new(),
            email: Some("not-an-email".into()),
        };
        let err = validate_dto(&dto).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) => {
            assert_eq!(msg, "email: failed 'email' check; name: must not be empty");
        });
    }

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("paper_title", "  A Study ").unwrap(), "A Study");
        assert_matches!(
            require_text("paper_title", "   "),
            Err(CoreError::Validation(msg)) if msg == "paper_title is required"
        );
    }
}

//! Field validation shared by entity inputs.

use thiserror::Error;

/// Maximum length of free-form descriptions (profiles and events).
pub const MAX_DESCRIPTION_LEN: usize = 3000;

/// Maximum length of an event or tag title.
pub const MAX_TITLE_LEN: usize = 255;

/// A contract violation detected before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty or whitespace only.
    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    /// A field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// A field has an unacceptable value.
    #[error("{field} is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Fails if `value` is blank.
pub fn require_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

/// Fails if `value` has more than `max` characters.
pub fn require_max_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_rejected() {
        assert_eq!(
            require_not_blank("title", "   "),
            Err(ValidationError::Blank { field: "title" })
        );
        assert!(require_not_blank("title", "Picnic").is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let value = "é".repeat(MAX_TITLE_LEN);
        assert!(require_max_len("title", &value, MAX_TITLE_LEN).is_ok());

        let value = "a".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(
            require_max_len("title", &value, MAX_TITLE_LEN),
            Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN
            })
        );
    }
}

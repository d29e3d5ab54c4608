//! Tag entity definitions.

use serde::{Deserialize, Serialize};

use crate::{MAX_TITLE_LEN, ValidationError, require_max_len, require_not_blank};

/// A label attachable to users and events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier.
    pub id: i64,
    /// Tag title.
    pub title: String,
    /// Optional grouping category.
    pub category: Option<String>,
}

/// Input for creating a tag.
#[derive(Debug, Clone)]
pub struct NewTag {
    pub title: String,
    pub category: Option<String>,
}

impl NewTag {
    /// Creates a tag input without a category.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: None,
        }
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Checks the input before it is persisted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_not_blank("title", &self.title)?;
        require_max_len("title", &self.title, MAX_TITLE_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_validation() {
        assert!(NewTag::new("hiking").with_category("outdoor").validate().is_ok());
        assert_eq!(
            NewTag::new(" ").validate(),
            Err(ValidationError::Blank { field: "title" })
        );
    }
}

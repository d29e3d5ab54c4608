//! Event entity definitions.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, ValidationError, require_max_len, require_not_blank,
};

/// A meeting created by a user that other users can join.
///
/// Events start active and become inactive once the activity sweep runs with
/// a cutoff later than `end_date`. The transition is one-way for the sweep,
/// though an owner may flip the flag explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier.
    pub id: i64,
    /// ID of the user that owns the event.
    pub owner_id: i64,
    /// Event title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Date the event was created.
    pub creation_date: NaiveDate,
    /// Last day of the activity window.
    pub end_date: NaiveDate,
    /// Whether the event is still active.
    pub is_active: bool,
    /// IDs of attached tags.
    pub tag_ids: Vec<i64>,
    /// IDs of member users.
    pub member_ids: Vec<i64>,
}

/// Checks that an activity window does not end before it starts.
pub fn validate_window(
    creation_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), ValidationError> {
    if end_date < creation_date {
        return Err(ValidationError::Invalid {
            field: "end_date",
            reason: "must not be before creation_date",
        });
    }
    Ok(())
}

/// Input for creating an event. The owner is supplied separately.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub creation_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub tag_ids: Vec<i64>,
    pub member_ids: Vec<i64>,
}

impl NewEvent {
    /// Creates an active event input starting today.
    pub fn new(title: impl Into<String>, end_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: None,
            creation_date: Utc::now().date_naive(),
            end_date,
            is_active: true,
            tag_ids: Vec::new(),
            member_ids: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the creation date.
    pub fn with_creation_date(mut self, date: NaiveDate) -> Self {
        self.creation_date = date;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets the attached tags.
    pub fn with_tags(mut self, tag_ids: Vec<i64>) -> Self {
        self.tag_ids = tag_ids;
        self
    }

    /// Sets the initial members.
    pub fn with_members(mut self, member_ids: Vec<i64>) -> Self {
        self.member_ids = member_ids;
        self
    }

    /// Checks the input before it is persisted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_not_blank("title", &self.title)?;
        require_max_len("title", &self.title, MAX_TITLE_LEN)?;
        if let Some(description) = &self.description {
            require_max_len("description", description, MAX_DESCRIPTION_LEN)?;
        }
        validate_window(self.creation_date, self.end_date)
    }
}

/// Partial update of an event. `None` leaves a field untouched; provided
/// tag and member lists replace the current sets.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub tag_ids: Option<Vec<i64>>,
    pub member_ids: Option<Vec<i64>>,
}

impl EventUpdate {
    /// Applies the update and validates the resulting event.
    pub fn apply(&self, event: &mut Event) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            require_not_blank("title", title)?;
            require_max_len("title", title, MAX_TITLE_LEN)?;
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            require_max_len("description", description, MAX_DESCRIPTION_LEN)?;
            event.description = Some(description.clone());
        }
        if let Some(end_date) = self.end_date {
            event.end_date = end_date;
        }
        if let Some(is_active) = self.is_active {
            event.is_active = is_active;
        }
        if let Some(tag_ids) = &self.tag_ids {
            event.tag_ids = dedup_ids(tag_ids);
        }
        if let Some(member_ids) = &self.member_ids {
            event.member_ids = dedup_ids(member_ids);
        }
        validate_window(event.creation_date, event.end_date)
    }
}

/// Sorts and deduplicates a list of IDs.
pub fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn picnic() -> Event {
        Event {
            id: 1,
            owner_id: 1,
            title: "Picnic".to_string(),
            description: None,
            creation_date: date(2024, 5, 1),
            end_date: date(2024, 5, 10),
            is_active: true,
            tag_ids: Vec::new(),
            member_ids: vec![2],
        }
    }

    #[test]
    fn test_new_event_defaults() {
        let event = NewEvent::new("Picnic", date(2999, 1, 1));
        assert!(event.is_active);
        assert!(event.tag_ids.is_empty());
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_new_event_rejects_inverted_window() {
        let event = NewEvent::new("Picnic", date(2024, 5, 1)).with_creation_date(date(2024, 5, 2));
        assert!(matches!(
            event.validate(),
            Err(ValidationError::Invalid { field: "end_date", .. })
        ));
    }

    #[test]
    fn test_update_replaces_sets_and_keeps_untouched_fields() {
        let mut event = picnic();
        let update = EventUpdate {
            title: Some("Barbecue".to_string()),
            tag_ids: Some(vec![3, 1, 3]),
            ..Default::default()
        };
        update.apply(&mut event).unwrap();

        assert_eq!(event.title, "Barbecue");
        assert_eq!(event.tag_ids, vec![1, 3]);
        assert_eq!(event.member_ids, vec![2]);
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let mut event = picnic();
        let update = EventUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            update.apply(&mut event),
            Err(ValidationError::Blank { field: "title" })
        );
    }
}

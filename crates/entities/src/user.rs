//! User-related entity definitions.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{MAX_DESCRIPTION_LEN, ValidationError, require_max_len, require_not_blank};

/// Prefix that turns a username into a public handle (`@alice`).
pub const HANDLE_PREFIX: char = '@';

/// A registered user.
///
/// Usernames are stored without the handle prefix; lookups by handle go
/// through [`parse_handle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: i64,
    /// Stable subject identifier issued by the identity provider.
    pub subject: String,
    /// Identity provider that issued the subject.
    pub provider: String,
    /// Unique username, without the `@` prefix.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Whether the user finished filling in their profile.
    pub profile_completed: bool,
    /// Free-form profile description.
    pub profile_description: Option<String>,
    /// IDs of the tags attached to this user.
    pub tag_ids: Vec<i64>,
}

impl User {
    /// Returns the public handle of this user (`@username`).
    pub fn handle(&self) -> String {
        format!("{HANDLE_PREFIX}{}", self.username)
    }
}

/// Extracts the username from a public handle.
///
/// Returns `None` unless `handle` starts with [`HANDLE_PREFIX`] followed by
/// at least one character.
pub fn parse_handle(handle: &str) -> Option<&str> {
    handle
        .strip_prefix(HANDLE_PREFIX)
        .filter(|username| !username.is_empty())
}

/// Profile data owned by a user, deleted together with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Owning user ID.
    pub user_id: i64,
    /// Full display name.
    pub full_name: String,
    /// Raw avatar image bytes.
    pub avatar: Option<Vec<u8>>,
    /// Date the user joined.
    pub member_since: Option<NaiveDate>,
}

/// Input for registering a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub subject: String,
    pub provider: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub profile_description: Option<String>,
    pub avatar: Option<Vec<u8>>,
    pub member_since: NaiveDate,
}

impl NewUser {
    /// Creates a registration input. A leading `@` on the username is
    /// dropped so both `alice` and `@alice` register the same handle.
    pub fn new(
        subject: impl Into<String>,
        provider: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        let username: String = username.into();
        let username = username
            .strip_prefix(HANDLE_PREFIX)
            .map(str::to_string)
            .unwrap_or(username);
        Self {
            subject: subject.into(),
            provider: provider.into(),
            username,
            email: email.into(),
            full_name: full_name.into(),
            profile_description: None,
            avatar: None,
            member_since: Utc::now().date_naive(),
        }
    }

    /// Sets the profile description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.profile_description = Some(description.into());
        self
    }

    /// Sets the avatar bytes.
    pub fn with_avatar(mut self, avatar: Vec<u8>) -> Self {
        self.avatar = Some(avatar);
        self
    }

    /// Sets the membership start date.
    pub fn with_member_since(mut self, date: NaiveDate) -> Self {
        self.member_since = date;
        self
    }

    /// Checks the input before it is persisted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_not_blank("subject", &self.subject)?;
        require_not_blank("provider", &self.provider)?;
        require_not_blank("username", &self.username)?;
        if self.username.contains(HANDLE_PREFIX) || self.username.contains(char::is_whitespace) {
            return Err(ValidationError::Invalid {
                field: "username",
                reason: "must not contain '@' or whitespace",
            });
        }
        require_not_blank("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(ValidationError::Invalid {
                field: "email",
                reason: "must contain '@'",
            });
        }
        require_not_blank("full_name", &self.full_name)?;
        if let Some(description) = &self.profile_description {
            require_max_len("profile_description", description, MAX_DESCRIPTION_LEN)?;
        }
        Ok(())
    }
}

/// Partial update of a user's profile. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub profile_description: Option<String>,
    pub profile_completed: Option<bool>,
    pub avatar: Option<Vec<u8>>,
}

impl ProfileUpdate {
    /// Checks the provided fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(full_name) = &self.full_name {
            require_not_blank("full_name", full_name)?;
        }
        if let Some(description) = &self.profile_description {
            require_max_len("profile_description", description, MAX_DESCRIPTION_LEN)?;
        }
        Ok(())
    }

    /// Applies the user-level fields.
    pub fn apply_to_user(&self, user: &mut User) {
        if let Some(description) = &self.profile_description {
            user.profile_description = Some(description.clone());
        }
        if let Some(completed) = self.profile_completed {
            user.profile_completed = completed;
        }
    }

    /// Applies the personal-info fields.
    pub fn apply_to_personal_info(&self, info: &mut PersonalInfo) {
        if let Some(full_name) = &self.full_name {
            info.full_name = full_name.clone();
        }
        if let Some(avatar) = &self.avatar {
            info.avatar = Some(avatar.clone());
        }
    }
}

use chrono::NaiveDate;
use entities::{Event, PersonalInfo, Tag, User};
use sqlx::FromRow;

/// Database row for User
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub subject: String,
    pub provider: String,
    pub username: String,
    pub email: String,
    pub profile_completed: bool,
    pub profile_description: Option<String>,
}

impl UserRow {
    pub fn into_user(self, tag_ids: Vec<i64>) -> User {
        User {
            id: self.id,
            subject: self.subject,
            provider: self.provider,
            username: self.username,
            email: self.email,
            profile_completed: self.profile_completed,
            profile_description: self.profile_description,
            tag_ids,
        }
    }
}

/// Database row for PersonalInfo
#[derive(Debug, FromRow)]
pub struct PersonalInfoRow {
    pub user_id: i64,
    pub full_name: String,
    pub avatar: Option<Vec<u8>>,
    pub member_since: Option<NaiveDate>,
}

impl From<PersonalInfoRow> for PersonalInfo {
    fn from(row: PersonalInfoRow) -> Self {
        PersonalInfo {
            user_id: row.user_id,
            full_name: row.full_name,
            avatar: row.avatar,
            member_since: row.member_since,
        }
    }
}

/// Database row for Tag
#[derive(Debug, FromRow)]
pub struct TagRow {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            title: row.title,
            category: row.category,
        }
    }
}

/// Database row for Event
#[derive(Debug, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub creation_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

impl EventRow {
    pub fn into_event(self, tag_ids: Vec<i64>, member_ids: Vec<i64>) -> Event {
        Event {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            creation_date: self.creation_date,
            end_date: self.end_date,
            is_active: self.is_active,
            tag_ids,
            member_ids,
        }
    }
}

//! Transfer objects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A user as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub id: i64,
    /// Username without the `@` prefix.
    pub username: String,
    /// Public handle, `@username`.
    pub handle: String,
    pub email: String,
    pub profile_completed: bool,
    pub profile_description: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// Profile data owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfoData {
    pub full_name: String,
    /// Avatar bytes, base64 encoded on the wire.
    #[serde(default, with = "base64_bytes")]
    pub avatar: Option<Vec<u8>>,
    pub member_since: Option<NaiveDate>,
}

/// A tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagData {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
}

/// An event snapshot.
///
/// Used both for responses and as the payload of event creation, where
/// `id` and `owner_id` are ignored and missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creation_date: Option<NaiveDate>,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    #[serde(default)]
    pub member_ids: Vec<i64>,
}

/// Serializes optional bytes as an optional base64 string.
pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|encoded| STANDARD.decode(encoded).map_err(serde::de::Error::custom))
            .transpose()
    }
}

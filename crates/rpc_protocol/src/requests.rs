//! API request types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{base64_bytes, EventData};

// ============================================================================
// User Service Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub subject: String,
    pub provider: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub profile_description: Option<String>,
    #[serde(default, with = "base64_bytes")]
    pub avatar: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserRequest {
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserByUsernameRequest {
    /// Public handle, including the leading `@`.
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub user_id: i64,
    pub full_name: Option<String>,
    pub profile_description: Option<String>,
    pub profile_completed: Option<bool>,
    #[serde(default, with = "base64_bytes")]
    pub avatar: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub user_id: i64,
    pub target_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsSubscriberRequest {
    pub user_id: i64,
    pub subscriber_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsSubscriptionRequest {
    pub user_id: i64,
    pub subscription_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTagRequest {
    pub user_id: i64,
    pub tag_id: i64,
}

// ============================================================================
// Event Service Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub owner_id: i64,
    pub event: EventData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEventRequest {
    pub event_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub event_id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub tag_ids: Option<Vec<i64>>,
    pub member_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEventsByOwnerRequest {
    pub owner_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipRequest {
    pub user_id: i64,
    pub event_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepEventsRequest {
    /// Events ending before this date are deactivated. Defaults to today.
    pub cutoff: Option<NaiveDate>,
}

// ============================================================================
// Tag Service Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagRequest {
    pub title: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTagRequest {
    pub tag_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTagsRequest {
    pub category: Option<String>,
}

//! API response types.

use serde::{Deserialize, Serialize};

use crate::types::*;

// ============================================================================
// User Service Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfoResponse {
    pub personal_info: PersonalInfoData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredicateResponse {
    pub result: bool,
}

// ============================================================================
// Event Service Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub event: EventData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<EventData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepEventsResponse {
    /// Number of events that became inactive.
    pub deactivated: u64,
}

// ============================================================================
// Tag Service Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub tag: TagData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    pub tags: Vec<TagData>,
}

// ============================================================================
// Shared
// ============================================================================

/// Body of endpoints that return nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyResponse {}

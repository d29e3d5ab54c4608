//! Event API endpoints.

use axum::{extract::State, Json};
use chrono::Utc;
use entities::{EventUpdate, NewEvent};
use rpc_protocol::{requests::*, responses::*, EventData};

use super::OptionalJson;
use crate::error::ServerResult;
use crate::services::events;
use crate::state::SharedState;

/// Converts entity Event to RPC EventData.
fn entity_to_rpc_event(event: &entities::Event) -> EventData {
    EventData {
        id: Some(event.id),
        owner_id: Some(event.owner_id),
        title: event.title.clone(),
        description: event.description.clone(),
        creation_date: Some(event.creation_date),
        end_date: event.end_date,
        is_active: Some(event.is_active),
        tag_ids: event.tag_ids.clone(),
        member_ids: event.member_ids.clone(),
    }
}

/// Builds creation input from a snapshot. The snapshot's ID and owner are
/// ignored; a missing creation date means today and a missing flag means
/// active.
fn rpc_to_new_event(data: EventData) -> NewEvent {
    NewEvent {
        title: data.title,
        description: data.description,
        creation_date: data.creation_date.unwrap_or_else(|| Utc::now().date_naive()),
        end_date: data.end_date,
        is_active: data.is_active.unwrap_or(true),
        tag_ids: data.tag_ids,
        member_ids: data.member_ids,
    }
}

fn event_response(event: &entities::Event) -> Json<EventResponse> {
    Json(EventResponse {
        event: entity_to_rpc_event(event),
    })
}

fn events_response(list: &[entities::Event]) -> Json<EventsResponse> {
    Json(EventsResponse {
        events: list.iter().map(entity_to_rpc_event).collect(),
    })
}

/// Creates an event owned by the requesting user.
pub async fn create_event(
    State(state): State<SharedState>,
    Json(request): Json<CreateEventRequest>,
) -> ServerResult<Json<EventResponse>> {
    let new_event = rpc_to_new_event(request.event);

    let mut uow = state.write().await?;
    let event = events::add_event_to_user(&mut uow, request.owner_id, &new_event).await?;
    uow.commit().await?;

    Ok(event_response(&event))
}

pub async fn get_event(
    State(state): State<SharedState>,
    Json(request): Json<GetEventRequest>,
) -> ServerResult<Json<EventResponse>> {
    let mut uow = state.read().await?;
    let event = events::get_by_id(&mut uow, request.event_id).await?;
    uow.commit().await?;

    Ok(event_response(&event))
}

pub async fn update_event(
    State(state): State<SharedState>,
    Json(request): Json<UpdateEventRequest>,
) -> ServerResult<Json<EventResponse>> {
    let update = EventUpdate {
        title: request.title,
        description: request.description,
        end_date: request.end_date,
        is_active: request.is_active,
        tag_ids: request.tag_ids,
        member_ids: request.member_ids,
    };

    let mut uow = state.write().await?;
    let event = events::update_event(&mut uow, request.event_id, &update).await?;
    uow.commit().await?;

    Ok(event_response(&event))
}

pub async fn delete_event(
    State(state): State<SharedState>,
    Json(request): Json<GetEventRequest>,
) -> ServerResult<Json<EmptyResponse>> {
    let mut uow = state.write().await?;
    events::delete_event(&mut uow, request.event_id).await?;
    uow.commit().await?;

    Ok(Json(EmptyResponse {}))
}

pub async fn list_active(State(state): State<SharedState>) -> ServerResult<Json<EventsResponse>> {
    let mut uow = state.read().await?;
    let list = events::find_all_active(&mut uow).await?;
    uow.commit().await?;

    Ok(events_response(&list))
}

pub async fn list_non_active(
    State(state): State<SharedState>,
) -> ServerResult<Json<EventsResponse>> {
    let mut uow = state.read().await?;
    let list = events::find_all_non_active(&mut uow).await?;
    uow.commit().await?;

    Ok(events_response(&list))
}

pub async fn list_by_owner(
    State(state): State<SharedState>,
    Json(request): Json<ListEventsByOwnerRequest>,
) -> ServerResult<Json<EventsResponse>> {
    let mut uow = state.read().await?;
    let list = events::find_all_by_owner_id(&mut uow, request.owner_id).await?;
    uow.commit().await?;

    Ok(events_response(&list))
}

pub async fn join_event(
    State(state): State<SharedState>,
    Json(request): Json<MembershipRequest>,
) -> ServerResult<Json<EventResponse>> {
    let mut uow = state.write().await?;
    let event = events::join_event(&mut uow, request.user_id, request.event_id).await?;
    uow.commit().await?;

    Ok(event_response(&event))
}

pub async fn leave_event(
    State(state): State<SharedState>,
    Json(request): Json<MembershipRequest>,
) -> ServerResult<Json<EventResponse>> {
    let mut uow = state.write().await?;
    let event = events::leave_event(&mut uow, request.user_id, request.event_id).await?;
    uow.commit().await?;

    Ok(event_response(&event))
}

/// Runs the activity sweep now, with an explicit cutoff or today.
pub async fn sweep_events(
    State(state): State<SharedState>,
    OptionalJson(request): OptionalJson<SweepEventsRequest>,
) -> ServerResult<Json<SweepEventsResponse>> {
    let cutoff = request.cutoff.unwrap_or_else(|| Utc::now().date_naive());

    let mut uow = state.write().await?;
    let deactivated = events::update_events_activity(&mut uow, cutoff).await?;
    uow.commit().await?;

    Ok(Json(SweepEventsResponse { deactivated }))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_snapshot_defaults() {
        let data = EventData {
            id: Some(42),
            owner_id: Some(7),
            title: "Picnic".to_string(),
            description: None,
            creation_date: None,
            end_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            is_active: None,
            tag_ids: vec![],
            member_ids: vec![],
        };

        let new_event = rpc_to_new_event(data);
        assert!(new_event.is_active);
        assert_eq!(new_event.creation_date, Utc::now().date_naive());
    }
}

//! Event lifecycle: creation, membership and the active/inactive sweep.
//!
//! Events move one way, from active to inactive, once their end date has
//! passed. See [`update_events_activity`].

use chrono::{NaiveDate, Utc};
use entities::{dedup_ids, Event, EventUpdate, NewEvent};
use meeting_store::{events, EventFilter, StoreError, StoreResult, UnitOfWork};

use super::users::{ensure_tag, ensure_user};

const EVENT: &str = "Event";

/// Fails with NotFound unless every ID in the list exists.
async fn ensure_users(uow: &mut UnitOfWork, ids: &[i64]) -> StoreResult<()> {
    for id in ids {
        ensure_user(uow, *id).await?;
    }
    Ok(())
}

async fn ensure_tags(uow: &mut UnitOfWork, ids: &[i64]) -> StoreResult<()> {
    for id in ids {
        ensure_tag(uow, *id).await?;
    }
    Ok(())
}

async fn ensure_event(uow: &mut UnitOfWork, id: i64) -> StoreResult<()> {
    if !events::event_exists(uow, id).await? {
        return Err(StoreError::not_found(EVENT, id));
    }
    Ok(())
}

pub async fn get_by_id(uow: &mut UnitOfWork, id: i64) -> StoreResult<Event> {
    events::find_event(uow, id)
        .await?
        .ok_or_else(|| StoreError::not_found(EVENT, id))
}

pub async fn find_all_active(uow: &mut UnitOfWork) -> StoreResult<Vec<Event>> {
    events::list_events(uow, &EventFilter::new().with_active(true)).await
}

pub async fn find_all_non_active(uow: &mut UnitOfWork) -> StoreResult<Vec<Event>> {
    events::list_events(uow, &EventFilter::new().with_active(false)).await
}

/// Events owned by `owner_id`, active or not.
pub async fn find_all_by_owner_id(uow: &mut UnitOfWork, owner_id: i64) -> StoreResult<Vec<Event>> {
    ensure_user(uow, owner_id).await?;
    events::list_events(uow, &EventFilter::new().with_owner(owner_id)).await
}

/// Creates an event owned by `owner_id`.
///
/// The owner is not added as a member.
pub async fn add_event_to_user(
    uow: &mut UnitOfWork,
    owner_id: i64,
    new_event: &NewEvent,
) -> StoreResult<Event> {
    new_event.validate()?;
    ensure_user(uow, owner_id).await?;

    let tag_ids = dedup_ids(&new_event.tag_ids);
    let member_ids = dedup_ids(&new_event.member_ids);
    ensure_tags(uow, &tag_ids).await?;
    ensure_users(uow, &member_ids).await?;

    let new_event = NewEvent {
        tag_ids,
        member_ids,
        ..new_event.clone()
    };
    let event = events::insert_event(uow, owner_id, &new_event).await?;

    tracing::info!(event_id = event.id, owner_id, title = %event.title, "Event created");

    Ok(event)
}

/// Applies a partial update. Provided tag and member lists replace the
/// current sets.
pub async fn update_event(
    uow: &mut UnitOfWork,
    id: i64,
    update: &EventUpdate,
) -> StoreResult<Event> {
    let mut event = get_by_id(uow, id).await?;
    update.apply(&mut event)?;

    if update.tag_ids.is_some() {
        ensure_tags(uow, &event.tag_ids).await?;
    }
    if update.member_ids.is_some() {
        ensure_users(uow, &event.member_ids).await?;
    }

    events::update_event(uow, &event).await?;
    if update.tag_ids.is_some() {
        events::replace_event_tags(uow, id, &event.tag_ids).await?;
    }
    if update.member_ids.is_some() {
        events::replace_event_members(uow, id, &event.member_ids).await?;
    }

    tracing::info!(event_id = id, "Event updated");

    get_by_id(uow, id).await
}

/// Adds `user_id` to the members of `event_id`. Joining twice is a no-op.
pub async fn join_event(uow: &mut UnitOfWork, user_id: i64, event_id: i64) -> StoreResult<Event> {
    ensure_user(uow, user_id).await?;
    ensure_event(uow, event_id).await?;

    if events::add_member(uow, event_id, user_id).await? {
        tracing::info!(event_id, user_id, "User joined event");
    }
    get_by_id(uow, event_id).await
}

/// Removes `user_id` from the members of `event_id`, if present.
pub async fn leave_event(uow: &mut UnitOfWork, user_id: i64, event_id: i64) -> StoreResult<Event> {
    ensure_user(uow, user_id).await?;
    ensure_event(uow, event_id).await?;

    if events::remove_member(uow, event_id, user_id).await? {
        tracing::info!(event_id, user_id, "User left event");
    }
    get_by_id(uow, event_id).await
}

/// Deactivates every active event whose end date is before `cutoff`.
///
/// Returns the number of events deactivated. Inactive events are never
/// touched, so running it again with the same cutoff changes nothing.
pub async fn update_events_activity(uow: &mut UnitOfWork, cutoff: NaiveDate) -> StoreResult<u64> {
    let deactivated = events::deactivate_ended_before(uow, cutoff).await?;

    tracing::info!(%cutoff, deactivated, "Event activity updated");

    Ok(deactivated)
}

/// Deactivates every event that ended before today.
pub async fn update_events_activity_today(uow: &mut UnitOfWork) -> StoreResult<u64> {
    update_events_activity(uow, Utc::now().date_naive()).await
}

pub async fn delete_event(uow: &mut UnitOfWork, id: i64) -> StoreResult<()> {
    if !events::delete_event(uow, id).await? {
        return Err(StoreError::not_found(EVENT, id));
    }

    tracing::info!(event_id = id, "Event deleted");

    Ok(())
}

//! User graph: profiles, tags and the subscription relation.
//!
//! Subscriptions are directed edges. "Friends" are users linked by edges in
//! both directions, see [`find_mutual_subscriptions`].

use std::collections::HashSet;

use entities::{parse_handle, NewUser, PersonalInfo, ProfileUpdate, User, ValidationError};
use meeting_store::{subscriptions, tags, users, StoreError, StoreResult, UnitOfWork};

const USER: &str = "User";
const TAG: &str = "Tag";

/// Fails with NotFound unless the user exists.
pub(crate) async fn ensure_user(uow: &mut UnitOfWork, id: i64) -> StoreResult<()> {
    if !users::user_exists(uow, id).await? {
        return Err(StoreError::not_found(USER, id));
    }
    Ok(())
}

/// Fails with NotFound unless the tag exists.
pub(crate) async fn ensure_tag(uow: &mut UnitOfWork, id: i64) -> StoreResult<()> {
    if !tags::tag_exists(uow, id).await? {
        return Err(StoreError::not_found(TAG, id));
    }
    Ok(())
}

/// Looks a user up by public handle. The handle must carry the `@` prefix.
pub async fn get_by_username(uow: &mut UnitOfWork, handle: &str) -> StoreResult<User> {
    let username = parse_handle(handle).ok_or_else(|| StoreError::not_found(USER, handle))?;
    users::find_user_by_username(uow, username)
        .await?
        .ok_or_else(|| StoreError::not_found(USER, handle))
}

pub async fn get_by_id(uow: &mut UnitOfWork, id: i64) -> StoreResult<User> {
    users::find_user(uow, id)
        .await?
        .ok_or_else(|| StoreError::not_found(USER, id))
}

pub async fn get_personal_info(uow: &mut UnitOfWork, id: i64) -> StoreResult<PersonalInfo> {
    users::find_personal_info(uow, id)
        .await?
        .ok_or_else(|| StoreError::not_found(USER, id))
}

/// Users that `id` subscribes to.
pub async fn find_subscriptions(uow: &mut UnitOfWork, id: i64) -> StoreResult<Vec<User>> {
    ensure_user(uow, id).await?;
    subscriptions::find_subscriptions(uow, id).await
}

/// Users subscribed to `id`.
pub async fn find_subscribers(uow: &mut UnitOfWork, id: i64) -> StoreResult<Vec<User>> {
    ensure_user(uow, id).await?;
    subscriptions::find_subscribers(uow, id).await
}

/// Makes `user_id` a subscriber of `target_id`.
pub async fn subscribe(uow: &mut UnitOfWork, user_id: i64, target_id: i64) -> StoreResult<()> {
    if user_id == target_id {
        return Err(ValidationError::Invalid {
            field: "target_id",
            reason: "a user cannot subscribe to themselves",
        }
        .into());
    }
    ensure_user(uow, user_id).await?;
    ensure_user(uow, target_id).await?;

    if subscriptions::insert_subscription(uow, user_id, target_id).await? {
        tracing::info!(user_id, target_id, "Subscription added");
    }
    Ok(())
}

/// Removes the edge from `user_id` to `target_id`, if any.
pub async fn unsubscribe(uow: &mut UnitOfWork, user_id: i64, target_id: i64) -> StoreResult<()> {
    ensure_user(uow, user_id).await?;
    ensure_user(uow, target_id).await?;

    if subscriptions::delete_subscription(uow, user_id, target_id).await? {
        tracing::info!(user_id, target_id, "Subscription removed");
    }
    Ok(())
}

/// Returns true if `subscriber_id` subscribes to `user_id`.
pub async fn is_subscriber(
    uow: &mut UnitOfWork,
    user_id: i64,
    subscriber_id: i64,
) -> StoreResult<bool> {
    subscriptions::subscription_exists(uow, subscriber_id, user_id).await
}

/// Returns true if `user_id` subscribes to `subscription_id`.
pub async fn is_subscription(
    uow: &mut UnitOfWork,
    user_id: i64,
    subscription_id: i64,
) -> StoreResult<bool> {
    subscriptions::subscription_exists(uow, user_id, subscription_id).await
}

/// Users that `id` subscribes to and that subscribe back.
pub async fn find_mutual_subscriptions(uow: &mut UnitOfWork, id: i64) -> StoreResult<Vec<User>> {
    ensure_user(uow, id).await?;

    let subscribers: HashSet<i64> = subscriptions::subscriber_ids(uow, id)
        .await?
        .into_iter()
        .collect();

    let mutual = subscriptions::find_subscriptions(uow, id)
        .await?
        .into_iter()
        .filter(|user| subscribers.contains(&user.id))
        .collect();

    Ok(mutual)
}

pub async fn register(uow: &mut UnitOfWork, new_user: &NewUser) -> StoreResult<User> {
    new_user.validate()?;
    let user = users::insert_user(uow, new_user).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(user)
}

pub async fn update_profile(
    uow: &mut UnitOfWork,
    id: i64,
    update: &ProfileUpdate,
) -> StoreResult<User> {
    update.validate()?;

    let mut user = get_by_id(uow, id).await?;
    let mut info = get_personal_info(uow, id).await?;

    update.apply_to_user(&mut user);
    update.apply_to_personal_info(&mut info);

    users::update_user(uow, &user).await?;
    users::update_personal_info(uow, &info).await?;

    tracing::info!(user_id = id, "Profile updated");

    Ok(user)
}

pub async fn add_tag(uow: &mut UnitOfWork, user_id: i64, tag_id: i64) -> StoreResult<User> {
    ensure_user(uow, user_id).await?;
    ensure_tag(uow, tag_id).await?;

    if users::add_user_tag(uow, user_id, tag_id).await? {
        tracing::info!(user_id, tag_id, "Tag added to user");
    }
    get_by_id(uow, user_id).await
}

pub async fn remove_tag(uow: &mut UnitOfWork, user_id: i64, tag_id: i64) -> StoreResult<User> {
    ensure_user(uow, user_id).await?;
    ensure_tag(uow, tag_id).await?;

    if users::remove_user_tag(uow, user_id, tag_id).await? {
        tracing::info!(user_id, tag_id, "Tag removed from user");
    }
    get_by_id(uow, user_id).await
}

/// Deletes a user along with everything that references it.
pub async fn delete_user(uow: &mut UnitOfWork, id: i64) -> StoreResult<()> {
    if !users::delete_user(uow, id).await? {
        return Err(StoreError::not_found(USER, id));
    }

    tracing::info!(user_id = id, "User deleted");

    Ok(())
}

//! User API endpoints.

use axum::{extract::State, Json};
use entities::{NewUser, ProfileUpdate};
use rpc_protocol::{requests::*, responses::*, PersonalInfoData, UserData};

use crate::error::ServerResult;
use crate::services::users;
use crate::state::SharedState;

/// Converts entity User to RPC UserData.
pub(crate) fn entity_to_rpc_user(user: &entities::User) -> UserData {
    UserData {
        id: user.id,
        username: user.username.clone(),
        handle: user.handle(),
        email: user.email.clone(),
        profile_completed: user.profile_completed,
        profile_description: user.profile_description.clone(),
        tag_ids: user.tag_ids.clone(),
    }
}

fn entity_to_rpc_personal_info(info: entities::PersonalInfo) -> PersonalInfoData {
    PersonalInfoData {
        full_name: info.full_name,
        avatar: info.avatar,
        member_since: info.member_since,
    }
}

fn users_response(list: &[entities::User]) -> Json<UsersResponse> {
    Json(UsersResponse {
        users: list.iter().map(entity_to_rpc_user).collect(),
    })
}

/// Registers a new user.
pub async fn register(
    State(state): State<SharedState>,
    Json(request): Json<RegisterUserRequest>,
) -> ServerResult<Json<UserResponse>> {
    let mut new_user = NewUser::new(
        request.subject,
        request.provider,
        request.username,
        request.email,
        request.full_name,
    );
    if let Some(description) = request.profile_description {
        new_user = new_user.with_description(description);
    }
    if let Some(avatar) = request.avatar {
        new_user = new_user.with_avatar(avatar);
    }

    let mut uow = state.write().await?;
    let user = users::register(&mut uow, &new_user).await?;
    uow.commit().await?;

    Ok(Json(UserResponse {
        user: entity_to_rpc_user(&user),
    }))
}

/// Gets a user by ID.
pub async fn get_user(
    State(state): State<SharedState>,
    Json(request): Json<GetUserRequest>,
) -> ServerResult<Json<UserResponse>> {
    let mut uow = state.read().await?;
    let user = users::get_by_id(&mut uow, request.user_id).await?;
    uow.commit().await?;

    Ok(Json(UserResponse {
        user: entity_to_rpc_user(&user),
    }))
}

/// Gets a user by `@handle`.
pub async fn get_user_by_username(
    State(state): State<SharedState>,
    Json(request): Json<GetUserByUsernameRequest>,
) -> ServerResult<Json<UserResponse>> {
    let mut uow = state.read().await?;
    let user = users::get_by_username(&mut uow, &request.username).await?;
    uow.commit().await?;

    Ok(Json(UserResponse {
        user: entity_to_rpc_user(&user),
    }))
}

pub async fn get_personal_info(
    State(state): State<SharedState>,
    Json(request): Json<GetUserRequest>,
) -> ServerResult<Json<PersonalInfoResponse>> {
    let mut uow = state.read().await?;
    let info = users::get_personal_info(&mut uow, request.user_id).await?;
    uow.commit().await?;

    Ok(Json(PersonalInfoResponse {
        personal_info: entity_to_rpc_personal_info(info),
    }))
}

pub async fn update_profile(
    State(state): State<SharedState>,
    Json(request): Json<UpdateProfileRequest>,
) -> ServerResult<Json<UserResponse>> {
    let update = ProfileUpdate {
        full_name: request.full_name,
        profile_description: request.profile_description,
        profile_completed: request.profile_completed,
        avatar: request.avatar,
    };

    let mut uow = state.write().await?;
    let user = users::update_profile(&mut uow, request.user_id, &update).await?;
    uow.commit().await?;

    Ok(Json(UserResponse {
        user: entity_to_rpc_user(&user),
    }))
}

pub async fn delete_user(
    State(state): State<SharedState>,
    Json(request): Json<GetUserRequest>,
) -> ServerResult<Json<EmptyResponse>> {
    let mut uow = state.write().await?;
    users::delete_user(&mut uow, request.user_id).await?;
    uow.commit().await?;

    Ok(Json(EmptyResponse {}))
}

/// Lists the users a user subscribes to.
pub async fn list_subscriptions(
    State(state): State<SharedState>,
    Json(request): Json<GetUserRequest>,
) -> ServerResult<Json<UsersResponse>> {
    let mut uow = state.read().await?;
    let list = users::find_subscriptions(&mut uow, request.user_id).await?;
    uow.commit().await?;

    Ok(users_response(&list))
}

/// Lists the subscribers of a user.
pub async fn list_subscribers(
    State(state): State<SharedState>,
    Json(request): Json<GetUserRequest>,
) -> ServerResult<Json<UsersResponse>> {
    let mut uow = state.read().await?;
    let list = users::find_subscribers(&mut uow, request.user_id).await?;
    uow.commit().await?;

    Ok(users_response(&list))
}

/// Lists users subscribed in both directions with a user.
pub async fn list_mutual_subscriptions(
    State(state): State<SharedState>,
    Json(request): Json<GetUserRequest>,
) -> ServerResult<Json<UsersResponse>> {
    let mut uow = state.read().await?;
    let list = users::find_mutual_subscriptions(&mut uow, request.user_id).await?;
    uow.commit().await?;

    Ok(users_response(&list))
}

pub async fn subscribe(
    State(state): State<SharedState>,
    Json(request): Json<SubscriptionRequest>,
) -> ServerResult<Json<EmptyResponse>> {
    let mut uow = state.write().await?;
    users::subscribe(&mut uow, request.user_id, request.target_id).await?;
    uow.commit().await?;

    Ok(Json(EmptyResponse {}))
}

pub async fn unsubscribe(
    State(state): State<SharedState>,
    Json(request): Json<SubscriptionRequest>,
) -> ServerResult<Json<EmptyResponse>> {
    let mut uow = state.write().await?;
    users::unsubscribe(&mut uow, request.user_id, request.target_id).await?;
    uow.commit().await?;

    Ok(Json(EmptyResponse {}))
}

pub async fn is_subscriber(
    State(state): State<SharedState>,
    Json(request): Json<IsSubscriberRequest>,
) -> ServerResult<Json<PredicateResponse>> {
    let mut uow = state.read().await?;
    let result = users::is_subscriber(&mut uow, request.user_id, request.subscriber_id).await?;
    uow.commit().await?;

    Ok(Json(PredicateResponse { result }))
}

pub async fn is_subscription(
    State(state): State<SharedState>,
    Json(request): Json<IsSubscriptionRequest>,
) -> ServerResult<Json<PredicateResponse>> {
    let mut uow = state.read().await?;
    let result =
        users::is_subscription(&mut uow, request.user_id, request.subscription_id).await?;
    uow.commit().await?;

    Ok(Json(PredicateResponse { result }))
}

pub async fn add_tag(
    State(state): State<SharedState>,
    Json(request): Json<UserTagRequest>,
) -> ServerResult<Json<UserResponse>> {
    let mut uow = state.write().await?;
    let user = users::add_tag(&mut uow, request.user_id, request.tag_id).await?;
    uow.commit().await?;

    Ok(Json(UserResponse {
        user: entity_to_rpc_user(&user),
    }))
}

pub async fn remove_tag(
    State(state): State<SharedState>,
    Json(request): Json<UserTagRequest>,
) -> ServerResult<Json<UserResponse>> {
    let mut uow = state.write().await?;
    let user = users::remove_tag(&mut uow, request.user_id, request.tag_id).await?;
    uow.commit().await?;

    Ok(Json(UserResponse {
        user: entity_to_rpc_user(&user),
    }))
}

//! API endpoints.

pub mod events;
pub mod tags;
pub mod users;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;

use crate::error::ServerError;
use crate::state::SharedState;

/// JSON body for requests whose fields are all optional.
///
/// A missing or blank body reads as `T::default()`. A body that is present
/// but malformed is rejected with the usual error envelope.
#[derive(Debug)]
pub struct OptionalJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ServerError::InvalidRequest(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ServerError::InvalidRequest(e.to_string()))
    }
}

/// Creates the API router with all endpoints.
pub fn create_router() -> Router<SharedState> {
    Router::new()
        // User endpoints
        .route("/api/users/register", post(users::register))
        .route("/api/users/get", post(users::get_user))
        .route("/api/users/get-by-username", post(users::get_user_by_username))
        .route("/api/users/get-personal-info", post(users::get_personal_info))
        .route("/api/users/update-profile", post(users::update_profile))
        .route("/api/users/delete", post(users::delete_user))
        .route("/api/users/subscriptions", post(users::list_subscriptions))
        .route("/api/users/subscribers", post(users::list_subscribers))
        .route("/api/users/mutual", post(users::list_mutual_subscriptions))
        .route("/api/users/subscribe", post(users::subscribe))
        .route("/api/users/unsubscribe", post(users::unsubscribe))
        .route("/api/users/is-subscriber", post(users::is_subscriber))
        .route("/api/users/is-subscription", post(users::is_subscription))
        .route("/api/users/add-tag", post(users::add_tag))
        .route("/api/users/remove-tag", post(users::remove_tag))
        // Event endpoints
        .route("/api/events/create", post(events::create_event))
        .route("/api/events/get", post(events::get_event))
        .route("/api/events/update", post(events::update_event))
        .route("/api/events/delete", post(events::delete_event))
        .route("/api/events/list-active", post(events::list_active))
        .route("/api/events/list-non-active", post(events::list_non_active))
        .route("/api/events/list-by-owner", post(events::list_by_owner))
        .route("/api/events/join", post(events::join_event))
        .route("/api/events/leave", post(events::leave_event))
        .route("/api/events/sweep", post(events::sweep_events))
        // Tag endpoints
        .route("/api/tags/create", post(tags::create_tag))
        .route("/api/tags/get", post(tags::get_tag))
        .route("/api/tags/list", post(tags::list_tags))
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use meeting_store::Database;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{create_app, create_state};

    async fn test_app() -> Router {
        let db = Database::in_memory().await.unwrap();
        create_app(create_state(db))
    }

    async fn call(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        call_raw(app, uri, Body::from(body.to_string())).await
    }

    async fn call_raw(app: &Router, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn register(app: &Router, username: &str) -> i64 {
        let (status, body) = call(
            app,
            "/api/users/register",
            json!({
                "subject": format!("sub-{username}"),
                "provider": "google",
                "username": username,
                "email": format!("{username}@example.com"),
                "full_name": username,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["user"]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_lookup_by_handle() {
        let app = test_app().await;
        let bob = register(&app, "bob").await;

        let (status, body) =
            call(&app, "/api/users/get-by-username", json!({ "username": "bob" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], -32003);

        let (status, body) =
            call(&app, "/api/users/get-by-username", json!({ "username": "@bob" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["id"], bob);
        assert_eq!(body["user"]["handle"], "@bob");
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let app = test_app().await;
        register(&app, "alice").await;

        let (status, body) = call(
            &app,
            "/api/users/register",
            json!({
                "subject": "other",
                "provider": "google",
                "username": "alice",
                "email": "other@example.com",
                "full_name": "Other",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], -32004);
    }

    #[tokio::test]
    async fn test_event_flow() {
        let app = test_app().await;
        let alice = register(&app, "alice").await;
        let bob = register(&app, "bob").await;

        let (status, body) = call(
            &app,
            "/api/events/create",
            json!({
                "owner_id": alice,
                "event": {
                    "title": "Board games",
                    "creation_date": "2024-01-01",
                    "end_date": "2024-01-10",
                },
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["is_active"], true);
        let event_id = body["event"]["id"].as_i64().unwrap();

        let (status, body) = call(
            &app,
            "/api/events/join",
            json!({ "user_id": bob, "event_id": event_id }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["member_ids"], json!([bob]));

        let (_, body) = call(&app, "/api/events/sweep", json!({ "cutoff": "2024-01-11" })).await;
        assert_eq!(body["deactivated"], 1);
        let (_, body) = call(&app, "/api/events/sweep", json!({ "cutoff": "2024-01-11" })).await;
        assert_eq!(body["deactivated"], 0);

        let (_, body) = call(&app, "/api/events/list-non-active", json!({})).await;
        assert_eq!(body["events"][0]["id"], event_id);

        let (status, _) = call(
            &app,
            "/api/events/join",
            json!({ "user_id": 999, "event_id": event_id }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_self_subscription_is_bad_request() {
        let app = test_app().await;
        let alice = register(&app, "alice").await;

        let (status, body) = call(
            &app,
            "/api/users/subscribe",
            json!({ "user_id": alice, "target_id": alice }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_optional_bodies_may_be_omitted() {
        let app = test_app().await;

        let (status, body) = call_raw(&app, "/api/events/sweep", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deactivated"], 0);

        let (status, body) = call_raw(&app, "/api/tags/list", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tags"], json!([]));

        let (status, body) = call_raw(&app, "/api/tags/list", Body::from("{\"category\": 7")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], -32600);

        let (status, body) = call_raw(&app, "/api/events/sweep", Body::from("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], -32600);
    }
}

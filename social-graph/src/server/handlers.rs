// HTTP request handlers
use std::convert::Infallible;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use social_graph_shared::types::{Notification, Post, User, UserProfile, UserSummary};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info};
use uuid::Uuid;

use crate::server::errors::ApiError;
use crate::server::identity::session_from_headers;
use crate::server::models::{CreatePostRequest, FollowResponse, LimitQuery};
use crate::server::state::AppState;

/// Notifications returned when the request has no `limit`.
const DEFAULT_NOTIFICATIONS_LIMIT: i64 = 50;

/// Upper bound for `limit` on list endpoints.
const MAX_LIST_LIMIT: i64 = 100;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Social graph service is running")
}

/// Resolves the caller, creating the user on first sight
pub async fn sync_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, ApiError> {
    let user = state.resolver.sync_user(&session_from_headers(&headers)).await?;
    Ok(Json(user))
}

/// Profile with follower, following and post counts
pub async fn get_profile(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    state
        .profiles
        .user_by_external_id(&external_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// Users the caller does not follow yet. Always succeeds, possibly empty.
pub async fn suggested_users(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
    headers: HeaderMap,
) -> Json<Vec<UserSummary>> {
    let limit = match query.limit {
        Some(limit) => limit.clamp(0, MAX_LIST_LIMIT) as usize,
        None => state.suggested_limit,
    };
    let users = state
        .sampler
        .sample_unconnected_users(&session_from_headers(&headers), limit)
        .await;
    Json(users)
}

/// Toggles the caller's follow of `target_id`
pub async fn toggle_follow(
    State(state): State<AppState>,
    Path(target_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<FollowResponse>, ApiError> {
    let toggled = state
        .follows
        .toggle_follow(&session_from_headers(&headers), target_id)
        .await?;
    Ok(Json(FollowResponse {
        status: toggled.as_str(),
    }))
}

/// Publishes a post authored by the caller
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state
        .posts
        .create_post(&session_from_headers(&headers), &payload.content, payload.image)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// The caller's notifications, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_NOTIFICATIONS_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let notifications = state
        .profiles
        .notifications_for(&session_from_headers(&headers), limit)
        .await?;
    Ok(Json(notifications))
}

/// Streams invalidated view paths as server-sent `invalidate` events
pub async fn invalidation_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("Invalidation subscriber connected");
    let stream =
        BroadcastStream::new(state.invalidator.subscribe()).filter_map(|signal| match signal {
            Ok(path) => Some(Ok(Event::default().event("invalidate").data(path))),
            Err(e) => {
                debug!(error = %e, "Invalidation subscriber lagged");
                None
            }
        });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Friend request endpoints
///
/// This module provides the social-graph operations: sending a friend
/// request and resolving one as its recipient. The graph is intentionally
/// loose — duplicate requests and self-requests insert fresh edges, matching
/// how the feature has always behaved.
///
/// # Endpoints
///
/// - `GET /amizade/enviar/:recipient_id` - Send a request (session required)
/// - `GET /amizade/aceitar/:friendship_id` - Accept a pending request (session required)
/// - `GET /amizade/recusar/:friendship_id` - Decline a pending request (session required)
///
/// Sending redirects back to `/ranking`, the view the links live on; the
/// other two redirect to `/index`. None of the no-op outcomes (unknown IDs,
/// non-recipient callers, already-resolved requests) change the response.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension,
};
use questlog_shared::models::friendship::{CreateFriendship, Friendship, FriendshipResponse};
use uuid::Uuid;

use crate::middleware::session::SessionUser;

/// Send-request handler
///
/// Inserts a pending edge from the session user to the addressed user. A
/// recipient ID that matches no user trips the foreign key and is swallowed
/// as a silent no-op.
///
/// # Endpoint
///
/// ```text
/// GET /amizade/enviar/:recipient_id
/// ```
pub async fn send_request(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(recipient_id): Path<Uuid>,
) -> ApiResult<Redirect> {
    let created = Friendship::create(
        &state.db,
        CreateFriendship {
            sender_id: session.user_id,
            recipient_id,
        },
    )
    .await;

    match created {
        Ok(friendship) => {
            tracing::info!(
                friendship_id = %friendship.id,
                sender_id = %session.user_id,
                recipient_id = %recipient_id,
                "Friend request sent"
            );
        }
        Err(err) => match ApiError::from(err) {
            ApiError::NotFound => {
                tracing::debug!(
                    sender_id = %session.user_id,
                    recipient_id = %recipient_id,
                    "Friend request to unknown user ignored"
                );
            }
            other => return Err(other),
        },
    }

    Ok(Redirect::to("/ranking"))
}

/// Accept-request handler
///
/// Moves a pending request to accepted, but only when the session user is
/// its recipient.
///
/// # Endpoint
///
/// ```text
/// GET /amizade/aceitar/:friendship_id
/// ```
pub async fn accept_request(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(friendship_id): Path<Uuid>,
) -> ApiResult<Redirect> {
    let outcome = Friendship::accept(&state.db, friendship_id, session.user_id).await?;
    log_outcome("accept", friendship_id, session.user_id, &outcome);

    Ok(Redirect::to("/index"))
}

/// Decline-request handler
///
/// Moves a pending request to declined, but only when the session user is
/// its recipient.
///
/// # Endpoint
///
/// ```text
/// GET /amizade/recusar/:friendship_id
/// ```
pub async fn decline_request(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(friendship_id): Path<Uuid>,
) -> ApiResult<Redirect> {
    let outcome = Friendship::decline(&state.db, friendship_id, session.user_id).await?;
    log_outcome("decline", friendship_id, session.user_id, &outcome);

    Ok(Redirect::to("/index"))
}

fn log_outcome(action: &str, friendship_id: Uuid, user_id: Uuid, outcome: &FriendshipResponse) {
    match outcome {
        FriendshipResponse::Updated { friendship } => {
            tracing::info!(
                friendship_id = %friendship.id,
                user_id = %user_id,
                status = friendship.status.as_str(),
                "Friend request resolved"
            );
        }
        other => {
            tracing::debug!(
                friendship_id = %friendship_id,
                user_id = %user_id,
                action,
                ?other,
                "Friend request response was a no-op"
            );
        }
    }
}

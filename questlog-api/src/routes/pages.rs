/// Landing and main view payloads
///
/// HTML rendering lives outside this service; these endpoints serve the
/// JSON view models the presentation layer consumes. Both tolerate
/// anonymous viewers — the landing page is fully public, and the main view
/// degrades to an empty payload without a session instead of rejecting.
///
/// # Endpoints
///
/// - `GET /` - Landing payload (service identity)
/// - `GET /index` - Main view: profile, tasks, and friendship edges

use crate::{app::AppState, error::ApiResult, middleware::session::resolve_session};
use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use chrono::NaiveDate;
use questlog_shared::models::{
    friendship::{Friendship, FriendshipStatus},
    task::Task,
    user::User,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Landing payload
#[derive(Debug, Serialize, Deserialize)]
pub struct LandingResponse {
    /// Service name
    pub service: String,

    /// Application version
    pub version: String,
}

/// The viewer's own profile, as exposed to the presentation layer
///
/// Deliberately omits the password hash and row timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Accumulated XP
    pub xp: i32,

    /// Current level
    pub level: i32,

    /// Profile music URL, if set
    pub music_url: Option<String>,

    /// Whether profile music starts automatically
    pub autoplay: bool,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            xp: user.xp,
            level: user.level,
            music_url: user.music_url,
            autoplay: user.autoplay,
        }
    }
}

/// One task row of the main view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskView {
    /// Task ID
    pub id: Uuid,

    /// Free-text description
    pub description: String,

    /// Day the task is due
    pub due_date: NaiveDate,

    /// Whether the task has been completed
    pub completed: bool,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            description: task.description,
            due_date: task.due_date,
            completed: task.completed,
        }
    }
}

/// One friendship edge of the main view
///
/// Edges are served raw (sender, recipient, status); the presentation layer
/// decides which ones to show as incoming requests and which as friends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendshipView {
    /// Edge ID
    pub id: Uuid,

    /// User who sent the request
    pub sender_id: Uuid,

    /// User the request was sent to
    pub recipient_id: Uuid,

    /// Current state of the request
    pub status: FriendshipStatus,
}

impl From<Friendship> for FriendshipView {
    fn from(friendship: Friendship) -> Self {
        Self {
            id: friendship.id,
            sender_id: friendship.sender_id,
            recipient_id: friendship.recipient_id,
            status: friendship.status,
        }
    }
}

/// Main view payload
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    /// The viewer's profile; `null` for anonymous viewers
    pub user: Option<UserProfile>,

    /// The viewer's tasks, oldest first; empty for anonymous viewers
    pub tasks: Vec<TaskView>,

    /// Every friendship edge touching the viewer; empty for anonymous viewers
    pub friendships: Vec<FriendshipView>,
}

/// Landing page handler
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```
pub async fn landing() -> Json<LandingResponse> {
    Json(LandingResponse {
        service: "questlog".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Main view handler
///
/// With a valid session the payload carries the viewer's profile, their
/// tasks, and their friendship edges. Without one, every field is empty —
/// the route never redirects.
///
/// # Endpoint
///
/// ```text
/// GET /index
/// ```
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<IndexResponse>> {
    let Some(session) = resolve_session(&jar, state.session_secret()) else {
        return Ok(Json(IndexResponse {
            user: None,
            tasks: Vec::new(),
            friendships: Vec::new(),
        }));
    };

    // A valid session for a deleted user degrades to the anonymous payload
    let Some(user) = User::find_by_id(&state.db, session.user_id).await? else {
        return Ok(Json(IndexResponse {
            user: None,
            tasks: Vec::new(),
            friendships: Vec::new(),
        }));
    };

    let tasks = Task::list_for_user(&state.db, user.id)
        .await?
        .into_iter()
        .map(TaskView::from)
        .collect();

    let friendships = Friendship::list_for_user(&state.db, user.id)
        .await?
        .into_iter()
        .map(FriendshipView::from)
        .collect();

    Ok(Json(IndexResponse {
        user: Some(UserProfile::from(user)),
        tasks,
        friendships,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_landing_response_serialization() {
        let response = LandingResponse {
            service: "questlog".to_string(),
            version: "0.1.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("questlog"));
        assert!(json.contains("0.1.0"));
    }

    #[test]
    fn test_user_profile_omits_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=65536,t=3,p=4$secret".to_string(),
            xp: 55,
            level: 2,
            music_url: None,
            autoplay: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&UserProfile::from(user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"xp\":55"));
    }

    #[test]
    fn test_anonymous_index_payload_is_empty() {
        let response = IndexResponse {
            user: None,
            tasks: Vec::new(),
            friendships: Vec::new(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"user\":null"));
        assert!(json.contains("\"tasks\":[]"));
        assert!(json.contains("\"friendships\":[]"));
    }
}

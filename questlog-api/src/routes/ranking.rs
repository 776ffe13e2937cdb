/// Global XP leaderboard endpoint
///
/// # Endpoint
///
/// ```text
/// GET /ranking
/// ```
///
/// # Response
///
/// ```json
/// {
///   "players": [
///     { "id": "uuid", "name": "Alice", "xp": 120, "level": 3 },
///     { "id": "uuid", "name": "Bob", "xp": 40, "level": 1 }
///   ],
///   "viewer_id": "uuid"
/// }
/// ```
///
/// The list covers every registered user, highest XP first. `viewer_id` is
/// present when the request carries a valid session so the presentation
/// layer can highlight the viewer's own row; the ranking itself is public.

use crate::{app::AppState, error::ApiResult, middleware::session::resolve_session};
use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use questlog_shared::models::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Accumulated XP
    pub xp: i32,

    /// Current level
    pub level: i32,
}

impl From<User> for RankingEntry {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            xp: user.xp,
            level: user.level,
        }
    }
}

/// Leaderboard response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResponse {
    /// All players, highest XP first
    pub players: Vec<RankingEntry>,

    /// The viewer's own ID, when a valid session is attached
    pub viewer_id: Option<Uuid>,
}

/// Leaderboard handler
///
/// Anonymous viewers get the same list with `viewer_id: null`.
pub async fn ranking(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<RankingResponse>> {
    let viewer = resolve_session(&jar, state.session_secret());

    let players = User::rank_by_xp(&state.db)
        .await?
        .into_iter()
        .map(RankingEntry::from)
        .collect();

    Ok(Json(RankingResponse {
        players,
        viewer_id: viewer.map(|session| session.user_id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_response_serialization() {
        let response = RankingResponse {
            players: vec![RankingEntry {
                id: Uuid::new_v4(),
                name: "Alice".to_string(),
                xp: 120,
                level: 3,
            }],
            viewer_id: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"players\""));
        assert!(json.contains("\"xp\":120"));
        assert!(json.contains("\"viewer_id\":null"));
    }

    #[test]
    fn test_ranking_entry_from_user_drops_credentials() {
        let json = serde_json::to_string(&RankingEntry {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            xp: 0,
            level: 1,
        })
        .unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains("email"));
    }
}

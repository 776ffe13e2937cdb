/// Profile music preference endpoints
///
/// Users can pin a music URL to their profile and choose whether it starts
/// automatically. The form uses HTML checkbox semantics for `autoplay`: the
/// field is present when checked and absent when not, so its mere presence
/// means `true`.
///
/// # Endpoints
///
/// - `GET /config-musica` - Current preferences (session required)
/// - `POST /config-musica` - Update preferences (session required)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, response::Redirect, Extension, Form, Json};
use questlog_shared::models::user::User;
use serde::{Deserialize, Serialize};

use crate::middleware::session::SessionUser;

/// Current music preferences
#[derive(Debug, Serialize, Deserialize)]
pub struct MusicPrefsResponse {
    /// Stored music URL, if any
    pub music_url: Option<String>,

    /// Whether the music starts automatically
    pub autoplay: bool,
}

/// Music preference form fields
#[derive(Debug, Deserialize)]
pub struct MusicForm {
    /// Music URL; absent or blank clears the stored value
    pub music_url: Option<String>,

    /// Checkbox field: present (any value) means checked
    pub autoplay: Option<String>,
}

/// Drops blank URLs so they clear the stored value
fn normalize_music_url(raw: Option<String>) -> Option<String> {
    raw.filter(|url| !url.trim().is_empty())
}

/// Show-preferences handler
///
/// # Endpoint
///
/// ```text
/// GET /config-musica
/// ```
pub async fn show_music_prefs(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<MusicPrefsResponse>> {
    // A valid session for a deleted user is treated like no session
    let user = User::find_by_id(&state.db, session.user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(MusicPrefsResponse {
        music_url: user.music_url,
        autoplay: user.autoplay,
    }))
}

/// Update-preferences handler
///
/// # Endpoint
///
/// ```text
/// POST /config-musica
/// Content-Type: application/x-www-form-urlencoded
///
/// music_url=https%3A%2F%2Fexample.com%2Ftheme.mp3&autoplay=on
/// ```
pub async fn update_music_prefs(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Form(form): Form<MusicForm>,
) -> ApiResult<Redirect> {
    let music_url = normalize_music_url(form.music_url);
    let autoplay = form.autoplay.is_some();

    let updated =
        User::update_music_prefs(&state.db, session.user_id, music_url, autoplay).await?;

    if updated.is_none() {
        tracing::debug!(
            user_id = %session.user_id,
            "Music preference update for unknown user ignored"
        );
    }

    Ok(Redirect::to("/index"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_music_url_keeps_real_urls() {
        let url = normalize_music_url(Some("https://example.com/theme.mp3".to_string()));
        assert_eq!(url.as_deref(), Some("https://example.com/theme.mp3"));
    }

    #[test]
    fn test_normalize_music_url_clears_blank_values() {
        assert_eq!(normalize_music_url(None), None);
        assert_eq!(normalize_music_url(Some(String::new())), None);
        assert_eq!(normalize_music_url(Some("   ".to_string())), None);
    }

    #[test]
    fn test_autoplay_checkbox_semantics() {
        // Checked boxes submit a value; unchecked boxes submit nothing
        let checked: MusicForm = serde_json::from_str(r#"{"autoplay":"on"}"#).unwrap();
        assert!(checked.autoplay.is_some());

        let unchecked: MusicForm = serde_json::from_str(r#"{}"#).unwrap();
        assert!(unchecked.autoplay.is_none());
    }
}

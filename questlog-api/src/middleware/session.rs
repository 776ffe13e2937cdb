/// Session middleware for cookie-authenticated routes
///
/// The session is a signed token carried in the `questlog_session` cookie.
/// Routes that require a logged-in user are wrapped with [`session_guard`],
/// which validates the cookie and injects a [`SessionUser`] into the request
/// extensions. Routes that merely *adapt* to a logged-in user (the main view,
/// the ranking) call [`resolve_session`] themselves and carry on anonymously
/// when it returns `None`.
///
/// # Rejection behavior
///
/// A missing, expired, or tampered cookie on a guarded route produces a
/// `303 See Other` redirect to the landing page. No state is touched and
/// nothing is revealed about why the session was rejected.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::post, Router};
/// use questlog_api::app::AppState;
/// use questlog_api::middleware::session::session_guard;
///
/// # fn example(state: AppState) {
/// let guarded: Router<AppState> = Router::new()
///     .route("/add", post(add_task))
///     .layer(middleware::from_fn_with_state(state, session_guard));
/// # }
/// # async fn add_task() {}
/// ```

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use questlog_shared::auth::session;
use uuid::Uuid;

/// The authenticated user behind the current request
///
/// Inserted into request extensions by [`session_guard`]; handlers receive
/// it through `Extension<SessionUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser {
    /// ID of the logged-in user
    pub user_id: Uuid,
}

/// Resolves the session cookie into a [`SessionUser`], if possible
///
/// Returns `None` when the cookie is absent or its token fails validation.
/// Validation failures are logged at debug level only; an expired cookie is
/// everyday traffic, not an incident.
pub fn resolve_session(jar: &CookieJar, secret: &str) -> Option<SessionUser> {
    let cookie = jar.get(session::SESSION_COOKIE)?;

    match session::validate_token(cookie.value(), secret) {
        Ok(claims) => Some(SessionUser {
            user_id: claims.sub,
        }),
        Err(err) => {
            tracing::debug!(error = %err, "Rejecting session cookie");
            None
        }
    }
}

/// Session guard middleware
///
/// Validates the session cookie and injects [`SessionUser`] into request
/// extensions. Requests without a valid session are redirected to the
/// landing page.
pub async fn session_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_user =
        resolve_session(&jar, state.session_secret()).ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(session_user);

    Ok(next.run(req).await)
}

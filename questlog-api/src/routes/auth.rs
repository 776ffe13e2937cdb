/// Account endpoints
///
/// This module provides the browser-facing account flows:
/// - Registration
/// - Login
/// - Logout
///
/// All three answer with a `303 See Other` redirect on success. Only login
/// establishes a session; a fresh registration redirects to the main view,
/// which renders anonymously until the user logs in. The two failure modes
/// that are *not* silent live here: a duplicate registration email and bad
/// login credentials both answer with a plain text body for the
/// presentation layer to display.
///
/// # Endpoints
///
/// - `POST /register` - Create an account
/// - `POST /login` - Authenticate and establish a session
/// - `GET /logout` - Drop the session
///
/// # Input contract
///
/// Form fields are taken as-is: no email format check, no password strength
/// rule, no trimming. The only thing that can reject a registration is an
/// email that is already taken.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::State,
    response::Redirect,
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use questlog_shared::{
    auth::{password, session},
    models::user::{CreateUser, User},
};
use serde::Deserialize;
use uuid::Uuid;

/// Registration form fields
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// Display name
    pub name: String,

    /// Email address (exact-match unique)
    pub email: String,

    /// Plaintext password (hashed before storage)
    pub password: String,
}

/// Login form fields
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Email address
    pub email: String,

    /// Plaintext password
    pub password: String,
}

/// Builds the session cookie for a freshly authenticated user
///
/// The cookie carries a signed token; `HttpOnly` and `SameSite=Lax` keep it
/// out of scripts and cross-site POSTs.
fn establish_session(jar: CookieJar, user_id: Uuid, secret: &str) -> Result<CookieJar, ApiError> {
    let claims = session::Claims::new(user_id);
    let token = session::create_token(&claims, secret)?;

    let cookie = Cookie::build((session::SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok(jar.add(cookie))
}

/// Registration handler
///
/// Creates a new user starting at 0 XP, level 1. No session is established:
/// the new account signs in through `POST /login` like any other.
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/x-www-form-urlencoded
///
/// name=Alice&email=alice%40example.com&password=hunter2
/// ```
///
/// # Errors
///
/// - `409 Conflict`: "Email already registered!" (plain text)
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> ApiResult<Redirect> {
    if User::email_exists(&state.db, &form.email).await? {
        return Err(ApiError::DuplicateEmail);
    }

    let password_hash = password::hash_password(&form.password)?;

    // The unique index on email backs up the existence check above, so a
    // race between two registrations still surfaces as DuplicateEmail
    let user = User::create(
        &state.db,
        CreateUser {
            name: form.name,
            email: form.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "New user registered");

    Ok(Redirect::to("/index"))
}

/// Login handler
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/x-www-form-urlencoded
///
/// email=alice%40example.com&password=hunter2
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: "Invalid email or password" (plain text) — the
///   same body whether the email is unknown or the password is wrong
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> ApiResult<(CookieJar, Redirect)> {
    let user = User::find_by_email(&state.db, &form.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = password::verify_password(&form.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "User logged in");

    let jar = establish_session(jar, user.id, state.session_secret())?;

    Ok((jar, Redirect::to("/index")))
}

/// Logout handler
///
/// Removes the session cookie unconditionally; logging out while already
/// logged out is fine.
///
/// # Endpoint
///
/// ```text
/// GET /logout
/// ```
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(session::SESSION_COOKIE).path("/"));

    (jar, Redirect::to("/index"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_establish_session_sets_the_session_cookie() {
        let secret = "test-secret-key-at-least-32-bytes-long";
        let user_id = Uuid::new_v4();

        let jar = establish_session(CookieJar::new(), user_id, secret).unwrap();
        let cookie = jar.get(session::SESSION_COOKIE).expect("cookie not set");

        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let claims = session::validate_token(cookie.value(), secret).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_register_form_field_names() {
        let form: RegisterForm =
            serde_json::from_str(r#"{"name":"Alice","email":"alice@example.com","password":"x"}"#)
                .unwrap();

        assert_eq!(form.name, "Alice");
        assert_eq!(form.email, "alice@example.com");
    }
}

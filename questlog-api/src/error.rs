/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers should return `Result<T, ApiError>` which automatically
/// converts to the matching HTTP behavior.
///
/// # Error surface
///
/// The error surface is deliberately split in two:
///
/// - The account flows (`/register`, `/login`) answer failures with plain
///   text bodies ("Email already registered!", "Invalid email or password")
///   so the presentation layer can show them directly.
/// - Everything else fails *silently*: a missing session redirects to the
///   landing page, and a missing or foreign resource redirects to `/index`
///   exactly like the success path does. Clients cannot tell a rejected
///   mutation from an accepted one by the response alone.
///
/// Only [`ApiError::Internal`] is logged; the silent variants are expected
/// traffic.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use questlog_shared::auth::{password::PasswordError, session::SessionError};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Registration with an email that is already taken (409, plain text)
    DuplicateEmail,

    /// Login with an unknown email or a wrong password (401, plain text)
    ///
    /// The two causes share one variant so they stay indistinguishable.
    InvalidCredentials,

    /// Missing or invalid session (303 redirect to the landing page)
    Unauthorized,

    /// Resource does not exist (303 redirect to `/index`)
    NotFound,

    /// Resource belongs to another user (303 redirect to `/index`)
    ///
    /// Responds byte-identically to [`ApiError::NotFound`]; the distinct
    /// variant exists for internal typing only.
    Forbidden,

    /// Internal server error (500)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::DuplicateEmail => write!(f, "Email already registered!"),
            ApiError::InvalidCredentials => write!(f, "Invalid email or password"),
            ApiError::Unauthorized => write!(f, "Authentication required"),
            ApiError::NotFound => write!(f, "Resource not found"),
            ApiError::Forbidden => write!(f, "Access denied"),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::DuplicateEmail => {
                (StatusCode::CONFLICT, "Email already registered!").into_response()
            }
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password").into_response()
            }
            ApiError::Unauthorized => Redirect::to("/").into_response(),
            ApiError::NotFound | ApiError::Forbidden => Redirect::to("/index").into_response(),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred",
                )
                    .into_response()
            }
        }
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    // users.email is the only unique key in the schema
                    return ApiError::DuplicateEmail;
                }

                if db_err.is_foreign_key_violation() {
                    // e.g. a friend request addressed to a user ID that
                    // does not exist; handled as a silent no-op
                    return ApiError::NotFound;
                }

                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert session token errors to API errors
///
/// Token creation failures are server faults; everything else means the
/// presented session is not acceptable.
impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::CreateError(msg) => {
                ApiError::Internal(format!("Failed to create session token: {}", msg))
            }
            _ => ApiError::Unauthorized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    fn location_of(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .expect("missing Location header")
            .to_str()
            .expect("non-ASCII Location header")
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::DuplicateEmail;
        assert_eq!(err.to_string(), "Email already registered!");

        let err = ApiError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_duplicate_email_is_conflict() {
        let response = ApiError::DuplicateEmail.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_credentials_is_unauthorized_status() {
        let response = ApiError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_flow_errors_carry_plain_text_bodies() {
        let response = ApiError::DuplicateEmail.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Email already registered!");

        let response = ApiError::InvalidCredentials.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Invalid email or password");
    }

    #[test]
    fn test_missing_session_redirects_to_landing() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/");
    }

    #[test]
    fn test_not_found_redirects_to_index() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/index");
    }

    #[test]
    fn test_not_found_and_forbidden_answer_identically() {
        let not_found = ApiError::NotFound.into_response();
        let forbidden = ApiError::Forbidden.into_response();

        assert_eq!(not_found.status(), forbidden.status());
        assert_eq!(location_of(&not_found), location_of(&forbidden));
    }

    #[test]
    fn test_internal_error_is_500() {
        let response = ApiError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn test_session_create_failure_is_internal() {
        let err = ApiError::from(SessionError::CreateError("bad key".to_string()));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_expired_session_is_unauthorized() {
        let err = ApiError::from(SessionError::Expired);
        assert!(matches!(err, ApiError::Unauthorized));
    }
}

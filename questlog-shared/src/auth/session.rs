/// Session token generation and validation module
///
/// Browser sessions are represented by an HS256-signed token carried in the
/// [`SESSION_COOKIE`] cookie. The token holds nothing but the user's
/// identity and the standard time claims; all other user state lives in the
/// database.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 24 hours
/// - **Validation**: Signature, expiration, issuer and not-before checks
/// - **Secret Management**: Secret must be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use questlog_shared::auth::session::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
///
/// // Create a session token at login
/// let claims = Claims::new(user_id);
/// let token = create_token(&claims, "your-secret-key-at-least-32-bytes")?;
///
/// // Validate it on the next request
/// let validated = validate_token(&token, "your-secret-key-at-least-32-bytes")?;
/// assert_eq!(validated.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "questlog_session";

/// How long a session stays valid after login
pub const SESSION_TTL_HOURS: i64 = 24;

/// Issuer claim stamped into every session token
const ISSUER: &str = "questlog";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate session token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Session has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// Session token claims
///
/// # Standard Claims
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer (always "questlog")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - User ID
    pub sub: Uuid,

    /// Issuer - Always "questlog"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Creates new claims expiring in [`SESSION_TTL_HOURS`]
    ///
    /// # Example
    ///
    /// ```
    /// use questlog_shared::auth::session::Claims;
    /// use uuid::Uuid;
    ///
    /// let claims = Claims::new(Uuid::new_v4());
    /// assert!(!claims.is_expired());
    /// ```
    pub fn new(user_id: Uuid) -> Self {
        Self::with_expiration(user_id, Duration::hours(SESSION_TTL_HOURS))
    }

    /// Creates claims with a custom expiration
    ///
    /// # Arguments
    ///
    /// * `user_id` - User ID (subject)
    /// * `expires_in` - How long until the session expires
    pub fn with_expiration(user_id: Uuid, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets time until expiration
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let now = Utc::now().timestamp();
        if self.exp > now {
            Some(Duration::seconds(self.exp - now))
        } else {
            None
        }
    }
}

/// Creates a session token from claims
///
/// Signs the token using HS256 (HMAC-SHA256) with the provided secret.
///
/// # Arguments
///
/// * `claims` - Session claims
/// * `secret` - Secret key for signing (should be at least 32 bytes)
///
/// # Errors
///
/// Returns `SessionError::CreateError` if token creation fails
///
/// # Example
///
/// ```
/// use questlog_shared::auth::session::{create_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(Uuid::new_v4());
/// let token = create_token(&claims, "your-secret-key-at-least-32-bytes")?;
/// assert!(!token.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, SessionError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| SessionError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts claims
///
/// Verifies:
/// - Signature is valid
/// - Token hasn't expired
/// - Issuer is "questlog"
/// - Token is not used before nbf time
///
/// # Arguments
///
/// * `token` - Session token string
/// * `secret` - Secret key used for signing
///
/// # Returns
///
/// Validated claims if the token is valid
///
/// # Errors
///
/// Returns error if:
/// - Signature is invalid
/// - Token has expired
/// - Issuer doesn't match
/// - Token format is invalid
///
/// # Example
///
/// ```
/// use questlog_shared::auth::session::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "your-secret-key-at-least-32-bytes";
///
/// let token = create_token(&Claims::new(user_id), secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.sub, user_id);
/// # Ok(())
/// # }
/// ```
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, SessionError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => SessionError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        _ => SessionError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();

        let claims = Claims::new(user_id);

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "questlog");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_with_custom_expiration() {
        let claims = Claims::with_expiration(Uuid::new_v4(), Duration::hours(1));

        let time_left = claims.time_until_expiration().unwrap();
        assert!(time_left.num_seconds() > 3500); // ~1 hour minus a bit
        assert!(time_left.num_seconds() <= 3600); // <= 1 hour
    }

    #[test]
    fn test_create_and_validate_token() {
        let user_id = Uuid::new_v4();
        let secret = "test-secret-key-at-least-32-bytes-long";

        let claims = Claims::new(user_id);
        let token = create_token(&claims, secret).expect("Should create token");

        let validated = validate_token(&token, secret).expect("Should validate token");
        assert_eq!(validated.sub, user_id);
        assert_eq!(validated.iss, "questlog");
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = Claims::new(Uuid::new_v4());
        let token = create_token(&claims, "secret1").expect("Should create token");

        let result = validate_token(&token, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_tampered_token() {
        let secret = "test-secret-key-at-least-32-bytes-long";
        let claims = Claims::new(Uuid::new_v4());
        let token = create_token(&claims, secret).expect("Should create token");

        // Any change to the token body breaks the signature
        let tampered = format!("{}x", token);
        assert!(validate_token(&tampered, secret).is_err());
    }

    #[test]
    fn test_validate_garbage_token() {
        let result = validate_token("not-a-token-at-all", "some-secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        let user_id = Uuid::new_v4();
        let secret = "test-secret";

        // Negative duration = already expired
        let claims = Claims::with_expiration(user_id, Duration::seconds(-3600));

        assert!(claims.is_expired());
        assert!(claims.time_until_expiration().is_none());

        let token = create_token(&claims, secret).expect("Should create token");
        let result = validate_token(&token, secret);

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), SessionError::Expired));
    }

    #[test]
    fn test_session_cookie_name() {
        assert_eq!(SESSION_COOKIE, "questlog_session");
    }
}

/// Authentication utilities
///
/// This module provides the authentication primitives for questlog:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: Signed session tokens carried in the browser cookie
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: HS256 signing, 24 hour expiration
/// - **Constant-time Comparison**: All verification uses constant-time operations
///
/// # Example
///
/// ```no_run
/// use questlog_shared::auth::password::{hash_password, verify_password};
/// use questlog_shared::auth::session::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Session token generation
/// let claims = Claims::new(Uuid::new_v4());
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long")?;
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod session;

/// User model and database operations
///
/// This module provides the User model and CRUD operations for managing user
/// accounts. A user carries their gamification progress (xp, level) and the
/// music preferences shown on their dashboard.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(100) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     xp INTEGER NOT NULL DEFAULT 0 CHECK (xp >= 0),
///     level INTEGER NOT NULL DEFAULT 1 CHECK (level >= 1),
///     music_url VARCHAR(512),
///     autoplay BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use questlog_shared::models::user::{User, CreateUser};
/// use questlog_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// // Create a new user
/// let new_user = CreateUser {
///     name: "Ana".to_string(),
///     email: "ana@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// println!("Created user: {}", user.id);
///
/// // Find by email
/// let found = User::find_by_email(&pool, "ana@example.com").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User model representing an account
///
/// New accounts start at 0 XP, level 1. Passwords are stored as Argon2id
/// hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name shown on the dashboard and ranking
    pub name: String,

    /// Email address, unique across all users (exact match)
    pub email: String,

    /// Argon2id password hash
    ///
    /// Never store plaintext passwords!
    /// Use `argon2` crate for hashing/verification
    pub password_hash: String,

    /// Lifetime XP total, grown by task completions
    pub xp: i32,

    /// Current level, derived from xp by the leveling rule
    pub level: i32,

    /// Optional background music URL for the dashboard
    pub music_url: Option<String>,

    /// Whether the dashboard music starts automatically
    pub autoplay: bool,

    /// When the user account was created
    pub created_at: DateTime<Utc>,

    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
///
/// Progress fields (xp, level) and music preferences start at their
/// database defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - User creation data
    ///
    /// # Returns
    ///
    /// The newly created user with generated ID, default progress (0 XP,
    /// level 1) and timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use questlog_shared::models::user::{User, CreateUser};
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// let new_user = CreateUser {
    ///     name: "Ana".to_string(),
    ///     email: "ana@example.com".to_string(),
    ///     password_hash: "$argon2id$...".to_string(),
    /// };
    ///
    /// let user = User::create(&pool, new_user).await?;
    /// println!("Created user: {}", user.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, xp, level,
                      music_url, autoplay, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `id` - User ID to search for
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, xp, level,
                   music_url, autoplay, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address (exact match)
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `email` - Email address to search for
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use questlog_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// let user = User::find_by_email(&pool, "ana@example.com").await?;
    /// if let Some(u) = user {
    ///     println!("Found user: {}", u.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, xp, level,
                   music_url, autoplay, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Checks whether an email address is already registered
    ///
    /// Used by registration to reject duplicates before hashing the
    /// password. The unique constraint on the column backs this up.
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1
            )
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Updates a user's music preferences
    ///
    /// Passing `None` for `music_url` clears the stored URL.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `id` - ID of user to update
    /// * `music_url` - New music URL, or None to clear
    /// * `autoplay` - Whether the music starts automatically
    ///
    /// # Returns
    ///
    /// The updated user if found, None if user doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn update_music_prefs(
        pool: &PgPool,
        id: Uuid,
        music_url: Option<String>,
        autoplay: bool,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET music_url = $2,
                autoplay = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, password_hash, xp, level,
                      music_url, autoplay, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(music_url)
        .bind(autoplay)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all users ordered for the XP ranking
    ///
    /// Highest XP first. Ties are broken by account age (older first) and
    /// finally by ID so the order is stable across reads.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    ///
    /// # Returns
    ///
    /// Vector of all users in ranking order
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use questlog_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// let ranking = User::rank_by_xp(&pool).await?;
    /// for (position, user) in ranking.iter().enumerate() {
    ///     println!("#{} {} ({} XP)", position + 1, user.name, user.xp);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn rank_by_xp(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, xp, level,
                   music_url, autoplay, created_at, updated_at
            FROM users
            ORDER BY xp DESC, created_at ASC, id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
        };

        assert_eq!(create_user.name, "Test User");
        assert_eq!(create_user.email, "test@example.com");
        assert_eq!(create_user.password_hash, "hash");
    }

    // Integration tests for database operations are in the api crate's
    // tests/ directory, which exercises these through the router
}

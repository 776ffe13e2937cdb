/// Database models for questlog
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts with XP/level progress and music preferences
/// - `task`: Personal to-do items that grant XP on completion
/// - `friendship`: Directed friend requests between users
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
/// let new_user = CreateUser {
///     name: "Ana".to_string(),
///     email: "ana@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod friendship;
pub mod task;
pub mod user;

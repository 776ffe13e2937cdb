/// Friendship model and database operations
///
/// This module provides the Friendship model for directed friend requests
/// between users. An edge starts as `pending` and is resolved exactly once
/// by its recipient, to `accepted` or `declined`.
///
/// # State Machine
///
/// ```text
/// pending → accepted
///         → declined
/// ```
///
/// Both resolved states are terminal: there is no un-accept, no re-send on
/// the same row, and no deletion.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE friendship_status AS ENUM ('pending', 'accepted', 'declined');
///
/// CREATE TABLE friendships (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     sender_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     recipient_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     status friendship_status NOT NULL DEFAULT 'pending',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// There is deliberately no uniqueness over (sender_id, recipient_id) and no
/// self-request guard: sending twice, or to yourself, simply inserts more
/// rows.
///
/// # Example
///
/// ```no_run
/// use questlog_shared::models::friendship::{Friendship, CreateFriendship, FriendshipResponse};
/// use questlog_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(sender_id: Uuid, recipient_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let request = Friendship::create(&pool, CreateFriendship {
///     sender_id,
///     recipient_id,
/// }).await?;
///
/// // Only the recipient can resolve it
/// match Friendship::accept(&pool, request.id, recipient_id).await? {
///     FriendshipResponse::Updated { friendship } => {
///         println!("Now friends: {:?}", friendship.status);
///     }
///     other => println!("No-op: {:?}", other),
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Friend request state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "friendship_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    /// Request sent, waiting for the recipient's decision
    Pending,

    /// Recipient accepted; the two users are friends
    Accepted,

    /// Recipient declined; the edge stays as a dead record
    Declined,
}

impl FriendshipStatus {
    /// Converts status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "pending",
            FriendshipStatus::Accepted => "accepted",
            FriendshipStatus::Declined => "declined",
        }
    }

    /// Checks if the request is still waiting for a decision
    pub fn is_pending(&self) -> bool {
        matches!(self, FriendshipStatus::Pending)
    }

    /// Checks if the request has been resolved (accepted or declined)
    pub fn is_resolved(&self) -> bool {
        !self.is_pending()
    }
}

/// Friendship model representing one directed friend request
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Friendship {
    /// Unique edge ID
    pub id: Uuid,

    /// User who sent the request
    pub sender_id: Uuid,

    /// User the request was sent to
    pub recipient_id: Uuid,

    /// Current state of the request
    pub status: FriendshipStatus,

    /// When the request was sent
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new friend request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFriendship {
    /// User sending the request
    pub sender_id: Uuid,

    /// User the request is addressed to
    pub recipient_id: Uuid,
}

/// Outcome of responding to a friend request
///
/// Every variant except `Updated` leaves the database untouched. The HTTP
/// layer answers them all identically; the variants exist so callers and
/// tests can tell the no-op causes apart.
#[derive(Debug, Clone)]
pub enum FriendshipResponse {
    /// The pending request was resolved by its recipient
    Updated {
        /// The edge after the transition
        friendship: Friendship,
    },

    /// The request had already been accepted or declined
    AlreadyResolved,

    /// No request with that ID exists
    NotFound,

    /// The caller is not the recipient (senders cannot resolve their own
    /// requests)
    NotRecipient,
}

impl Friendship {
    /// Creates a new pending friend request
    ///
    /// No duplicate or self-request checks are performed: every call
    /// inserts a fresh edge.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - Sender and recipient IDs
    ///
    /// # Returns
    ///
    /// The newly created edge with `status = pending`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either user does not exist (foreign key violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateFriendship) -> Result<Self, sqlx::Error> {
        let friendship = sqlx::query_as::<_, Friendship>(
            r#"
            INSERT INTO friendships (sender_id, recipient_id)
            VALUES ($1, $2)
            RETURNING id, sender_id, recipient_id, status, created_at
            "#,
        )
        .bind(data.sender_id)
        .bind(data.recipient_id)
        .fetch_one(pool)
        .await?;

        Ok(friendship)
    }

    /// Finds a friendship edge by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let friendship = sqlx::query_as::<_, Friendship>(
            r#"
            SELECT id, sender_id, recipient_id, status, created_at
            FROM friendships
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(friendship)
    }

    /// Accepts a pending friend request on behalf of `user_id`
    ///
    /// Only the recipient of a still-pending request can accept it; any
    /// other situation is reported as a no-op outcome.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use questlog_shared::models::friendship::{Friendship, FriendshipResponse};
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, id: Uuid, me: Uuid) -> Result<(), sqlx::Error> {
    /// match Friendship::accept(&pool, id, me).await? {
    ///     FriendshipResponse::Updated { .. } => println!("Accepted"),
    ///     other => println!("Nothing changed: {:?}", other),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn accept(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<FriendshipResponse, sqlx::Error> {
        Self::respond(pool, id, user_id, FriendshipStatus::Accepted).await
    }

    /// Declines a pending friend request on behalf of `user_id`
    ///
    /// Same access rules as [`Friendship::accept`]; the edge moves to
    /// `declined` and stays there.
    pub async fn decline(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<FriendshipResponse, sqlx::Error> {
        Self::respond(pool, id, user_id, FriendshipStatus::Declined).await
    }

    /// Applies the recipient's decision to a pending request
    async fn respond(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        decision: FriendshipStatus,
    ) -> Result<FriendshipResponse, sqlx::Error> {
        let friendship = match Friendship::find_by_id(pool, id).await? {
            Some(friendship) => friendship,
            None => return Ok(FriendshipResponse::NotFound),
        };

        if friendship.recipient_id != user_id {
            return Ok(FriendshipResponse::NotRecipient);
        }

        if friendship.status.is_resolved() {
            return Ok(FriendshipResponse::AlreadyResolved);
        }

        // The status guard closes the race between the check above and
        // this update: a request is resolved at most once
        let updated = sqlx::query_as::<_, Friendship>(
            r#"
            UPDATE friendships
            SET status = $2
            WHERE id = $1 AND status = 'pending'
            RETURNING id, sender_id, recipient_id, status, created_at
            "#,
        )
        .bind(id)
        .bind(decision)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(friendship) => Ok(FriendshipResponse::Updated { friendship }),
            None => Ok(FriendshipResponse::AlreadyResolved),
        }
    }

    /// Lists every edge a user appears in, either end, any status
    ///
    /// The dashboard renders pending requests and accepted friends from
    /// this one list.
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let friendships = sqlx::query_as::<_, Friendship>(
            r#"
            SELECT id, sender_id, recipient_id, status, created_at
            FROM friendships
            WHERE sender_id = $1 OR recipient_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(friendships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendship_status_as_str() {
        assert_eq!(FriendshipStatus::Pending.as_str(), "pending");
        assert_eq!(FriendshipStatus::Accepted.as_str(), "accepted");
        assert_eq!(FriendshipStatus::Declined.as_str(), "declined");
    }

    #[test]
    fn test_friendship_status_is_pending() {
        assert!(FriendshipStatus::Pending.is_pending());
        assert!(!FriendshipStatus::Accepted.is_pending());
        assert!(!FriendshipStatus::Declined.is_pending());
    }

    #[test]
    fn test_friendship_status_is_resolved() {
        assert!(!FriendshipStatus::Pending.is_resolved());
        assert!(FriendshipStatus::Accepted.is_resolved());
        assert!(FriendshipStatus::Declined.is_resolved());
    }

    #[test]
    fn test_create_friendship_struct() {
        let sender_id = Uuid::new_v4();
        let recipient_id = Uuid::new_v4();
        let create = CreateFriendship {
            sender_id,
            recipient_id,
        };

        assert_eq!(create.sender_id, sender_id);
        assert_eq!(create.recipient_id, recipient_id);
    }

    // Integration tests for database operations are in the api crate's
    // tests/ directory, which exercises these through the router
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Post, PostStatus};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Result of a conditional status write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusWrite {
    /// The row was still pending and has been updated.
    Updated,
    /// The row was missing or already terminal; nothing was written.
    Conflict,
}

/// Post repository with scheduling-specific queries.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, newest first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Pending posts whose scheduled time is at or before `now`.
    ///
    /// A consistent snapshot at query time; posts becoming due afterwards
    /// wait for the next scan.
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError>;

    /// Number of posts currently in `status`.
    async fn count_by_status(&self, status: PostStatus) -> Result<u64, RepoError>;

    /// Atomically set `status` on a post that is still pending.
    ///
    /// The write carries its own `status = pending` guard, so a post already
    /// transitioned by a concurrent job reports [`StatusWrite::Conflict`]
    /// instead of being overwritten.
    async fn update_status(&self, id: Uuid, status: PostStatus) -> Result<StatusWrite, RepoError>;
}

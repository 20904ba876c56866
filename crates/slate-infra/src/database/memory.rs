//! In-memory post repository - used as fallback when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use slate_core::domain::{Post, PostStatus};
use slate_core::error::RepoError;
use slate_core::ports::{BaseRepository, PostRepository, StatusWrite};

/// In-memory post store using a HashMap with async RwLock.
///
/// This is the fallback implementation when PostgreSQL is not available.
/// Note: Posts are lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .values()
            .filter(|p| p.is_eligible(now))
            .cloned()
            .collect())
    }

    async fn count_by_status(&self, status: PostStatus) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().filter(|p| p.status == status).count() as u64)
    }

    async fn update_status(&self, id: Uuid, status: PostStatus) -> Result<StatusWrite, RepoError> {
        // Check-then-write under a single write lock, mirroring the
        // conditional UPDATE of the PostgreSQL adapter.
        let mut store = self.store.write().await;
        match store.get_mut(&id) {
            Some(post) if post.status == PostStatus::Pending => {
                post.status = status;
                Ok(StatusWrite::Updated)
            }
            _ => Ok(StatusWrite::Conflict),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post_with(scheduled_time: DateTime<Utc>, status: PostStatus) -> Post {
        let mut post = Post::new(
            "scheduled content".to_string(),
            None,
            vec!["mastodon".to_string()],
            scheduled_time,
        );
        post.status = status;
        post
    }

    #[tokio::test]
    async fn find_due_returns_only_pending_and_past() {
        let repo = InMemoryPostRepository::new();
        let now = Utc::now();

        let due = post_with(now - Duration::minutes(5), PostStatus::Pending);
        let future = post_with(now + Duration::hours(1), PostStatus::Pending);
        let published = post_with(now - Duration::hours(2), PostStatus::Published);
        let failed = post_with(now - Duration::hours(2), PostStatus::Failed);

        for p in [&due, &future, &published, &failed] {
            repo.save(p.clone()).await.unwrap();
        }

        let found = repo.find_due(now).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, due.id);
    }

    #[tokio::test]
    async fn update_status_guards_non_pending_rows() {
        let repo = InMemoryPostRepository::new();
        let post = post_with(Utc::now(), PostStatus::Pending);
        repo.save(post.clone()).await.unwrap();

        let first = repo
            .update_status(post.id, PostStatus::Published)
            .await
            .unwrap();
        assert_eq!(first, StatusWrite::Updated);

        // Already terminal - the second write must not stick.
        let second = repo
            .update_status(post.id, PostStatus::Failed)
            .await
            .unwrap();
        assert_eq!(second, StatusWrite::Conflict);

        let stored = repo.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PostStatus::Published);
    }

    #[tokio::test]
    async fn update_status_on_missing_post_is_conflict() {
        let repo = InMemoryPostRepository::new();
        let result = repo
            .update_status(Uuid::new_v4(), PostStatus::Published)
            .await
            .unwrap();
        assert_eq!(result, StatusWrite::Conflict);
    }

    #[tokio::test]
    async fn counts_by_status() {
        let repo = InMemoryPostRepository::new();
        let now = Utc::now();
        repo.save(post_with(now, PostStatus::Pending)).await.unwrap();
        repo.save(post_with(now, PostStatus::Pending)).await.unwrap();
        repo.save(post_with(now, PostStatus::Failed)).await.unwrap();

        assert_eq!(repo.count_by_status(PostStatus::Pending).await.unwrap(), 2);
        assert_eq!(repo.count_by_status(PostStatus::Failed).await.unwrap(), 1);
        assert_eq!(
            repo.count_by_status(PostStatus::Published).await.unwrap(),
            0
        );
    }
}

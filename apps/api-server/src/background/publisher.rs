//! Publish job executor - transitions one due post to a terminal status.

use uuid::Uuid;

use slate_core::domain::{PostStatus, PublishOutcome};
use slate_core::ports::{BaseRepository, PostRepository, StatusWrite};

use super::SchedulerContext;

/// Run one publish job for `post_id`.
///
/// Loads the post fresh, guards on it still being pending, draws a simulated
/// outcome and commits the status write. Exactly one status write happens per
/// run, or none when a guard short-circuits. Errors are contained here: a
/// post left pending is rediscovered by a later scan.
pub(crate) async fn publish_post(ctx: &SchedulerContext, post_id: Uuid) {
    let post = match ctx.posts.find_by_id(post_id).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            tracing::debug!(post_id = %post_id, "Post vanished before publishing, skipping");
            return;
        }
        Err(e) => {
            tracing::error!(post_id = %post_id, error = %e, "Failed to load post, job abandoned");
            return;
        }
    };

    // Lost race with a concurrent transition: expected, not an error.
    if post.status != PostStatus::Pending {
        tracing::debug!(post_id = %post_id, status = %post.status, "Post already transitioned");
        return;
    }

    let outcome = ctx.outcomes.draw();

    if outcome == PublishOutcome::Published
        && post.platforms.iter().any(|p| p.eq_ignore_ascii_case("instagram"))
    {
        // Platform-specific pre-publish check; logged side effect only, never
        // a gate on the outcome.
        tracing::info!(post_id = %post_id, "Instagram publishing check: text length verified and image resized");
    }

    match ctx.posts.update_status(post_id, outcome.as_status()).await {
        Ok(StatusWrite::Updated) => match outcome {
            PublishOutcome::Published => {
                tracing::info!(
                    post_id = %post_id,
                    platforms = ?post.platforms,
                    "Published post"
                );
            }
            PublishOutcome::Failed => {
                tracing::warn!(
                    post_id = %post_id,
                    "Post failed to publish due to a simulated API error"
                );
            }
        },
        Ok(StatusWrite::Conflict) => {
            tracing::debug!(post_id = %post_id, "Concurrent transition won, no-op");
        }
        Err(e) => {
            tracing::error!(post_id = %post_id, error = %e, "Status write failed, job abandoned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::jobs::ActiveJobs;
    use super::super::testing::{ForcedOutcome, post_due_at};
    use super::*;
    use chrono::{Duration, Utc};
    use slate_infra::InMemoryPostRepository;
    use std::sync::Arc;

    fn context(outcome: PublishOutcome) -> SchedulerContext {
        SchedulerContext {
            posts: Arc::new(InMemoryPostRepository::new()),
            outcomes: Arc::new(ForcedOutcome(outcome)),
            jobs: ActiveJobs::new(),
        }
    }

    #[tokio::test]
    async fn publishes_pending_post() {
        let ctx = context(PublishOutcome::Published);
        let post = post_due_at(Utc::now() - Duration::seconds(1));
        ctx.posts.save(post.clone()).await.unwrap();

        publish_post(&ctx, post.id).await;

        let stored = ctx.posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PostStatus::Published);
    }

    #[tokio::test]
    async fn simulated_failure_is_terminal() {
        let ctx = context(PublishOutcome::Failed);
        let post = post_due_at(Utc::now() - Duration::seconds(1));
        ctx.posts.save(post.clone()).await.unwrap();

        publish_post(&ctx, post.id).await;

        let stored = ctx.posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PostStatus::Failed);
    }

    #[tokio::test]
    async fn already_transitioned_post_is_untouched() {
        let ctx = context(PublishOutcome::Failed);
        let mut post = post_due_at(Utc::now() - Duration::seconds(1));
        post.status = PostStatus::Published;
        ctx.posts.save(post.clone()).await.unwrap();

        publish_post(&ctx, post.id).await;

        let stored = ctx.posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PostStatus::Published);
    }

    #[tokio::test]
    async fn missing_post_is_a_silent_noop() {
        let ctx = context(PublishOutcome::Published);
        publish_post(&ctx, uuid::Uuid::new_v4()).await;
    }
}

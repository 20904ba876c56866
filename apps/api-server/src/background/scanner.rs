//! Due-post scanner - one pass per scheduler tick.

use std::sync::Arc;

use chrono::Utc;

use slate_core::ports::PostRepository;

use super::SchedulerContext;
use super::publisher::publish_post;

/// Scan the store for pending posts whose scheduled time has passed and
/// submit one publish job per post.
///
/// A query failure aborts the whole pass before any submission; the next
/// tick retries it, so the scan interval doubles as the retry policy. The
/// scanner never mutates post state itself.
pub(crate) async fn scan_due_posts(ctx: &Arc<SchedulerContext>) {
    let now = Utc::now();

    let due = match ctx.posts.find_due(now).await {
        Ok(due) => due,
        Err(e) => {
            tracing::error!(error = %e, "Due-post scan failed, retrying on next tick");
            return;
        }
    };

    if due.is_empty() {
        tracing::trace!("No due posts");
        return;
    }

    tracing::debug!(count = due.len(), "Found due posts");

    for post in due {
        let post_id = post.id;
        let job_ctx = ctx.clone();

        let submitted = ctx
            .jobs
            .submit(post_id, async move {
                publish_post(&job_ctx, post_id).await;
            })
            .await;

        if submitted {
            tracing::info!(post_id = %post_id, "Publish job submitted");
        }
    }
}

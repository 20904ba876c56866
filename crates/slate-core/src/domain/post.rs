use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a scheduled post.
///
/// `Pending` is the only non-terminal state: once a post is `Published` or
/// `Failed` no further transition occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Pending,
    Published,
    Failed,
}

impl PostStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PostStatus::Published | PostStatus::Failed)
    }

    /// Lowercase string form, as persisted in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Pending => "pending",
            PostStatus::Published => "published",
            PostStatus::Failed => "failed",
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PostStatus::Pending),
            "published" => Ok(PostStatus::Published),
            "failed" => Ok(PostStatus::Failed),
            other => Err(format!("unknown post status '{other}'")),
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one publish attempt against the (simulated) platform APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    Failed,
}

impl PublishOutcome {
    pub fn as_status(&self) -> PostStatus {
        match self {
            PublishOutcome::Published => PostStatus::Published,
            PublishOutcome::Failed => PostStatus::Failed,
        }
    }
}

/// Post entity - a piece of content scheduled for publication.
///
/// Everything except `status` is immutable after creation; `status` is
/// mutated exactly once, by the publish executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub text_content: String,
    pub image_path: Option<String>,
    /// Target platform names, order preserved for display.
    pub platforms: Vec<String>,
    /// Absolute UTC instant at which the post becomes due.
    pub scheduled_time: DateTime<Utc>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post in `Pending` state.
    pub fn new(
        text_content: String,
        image_path: Option<String>,
        platforms: Vec<String>,
        scheduled_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text_content,
            image_path,
            platforms,
            scheduled_time,
            status: PostStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Whether the post is due for publishing at `now`.
    ///
    /// Eligibility licenses a publish job submission; it does not itself
    /// change status.
    pub fn is_eligible(&self, now: DateTime<Utc>) -> bool {
        self.status == PostStatus::Pending && self.scheduled_time <= now
    }

    /// Apply a publish outcome, transitioning `Pending` to the matching
    /// terminal state.
    ///
    /// Returns `false` without touching the post if it is no longer pending,
    /// so repeated application is idempotent.
    pub fn apply_outcome(&mut self, outcome: PublishOutcome) -> bool {
        if self.status != PostStatus::Pending {
            return false;
        }
        self.status = outcome.as_status();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post_at(scheduled_time: DateTime<Utc>) -> Post {
        Post::new(
            "release announcement".to_string(),
            None,
            vec!["twitter".to_string()],
            scheduled_time,
        )
    }

    #[test]
    fn pending_past_post_is_eligible() {
        let now = Utc::now();
        assert!(post_at(now - Duration::hours(1)).is_eligible(now));
        // Boundary: due exactly now counts as due.
        assert!(post_at(now).is_eligible(now));
    }

    #[test]
    fn future_post_is_not_eligible() {
        let now = Utc::now();
        assert!(!post_at(now + Duration::hours(1)).is_eligible(now));
    }

    #[test]
    fn terminal_post_is_not_eligible() {
        let now = Utc::now();
        let mut post = post_at(now - Duration::hours(1));
        post.apply_outcome(PublishOutcome::Published);
        assert!(!post.is_eligible(now));
    }

    #[test]
    fn apply_outcome_transitions_pending() {
        let mut post = post_at(Utc::now());
        assert!(post.apply_outcome(PublishOutcome::Failed));
        assert_eq!(post.status, PostStatus::Failed);
        assert!(post.status.is_terminal());
    }

    #[test]
    fn apply_outcome_is_idempotent_once_terminal() {
        let mut post = post_at(Utc::now());
        assert!(post.apply_outcome(PublishOutcome::Published));

        // Second application is a no-op regardless of the outcome argument.
        assert!(!post.apply_outcome(PublishOutcome::Failed));
        assert_eq!(post.status, PostStatus::Published);
    }

    #[test]
    fn status_round_trips_through_store_form() {
        for status in [PostStatus::Pending, PostStatus::Published, PostStatus::Failed] {
            assert_eq!(status.as_str().parse::<PostStatus>().unwrap(), status);
        }
        assert!("archived".parse::<PostStatus>().is_err());
    }
}

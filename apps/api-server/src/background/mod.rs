//! Background publishing pipeline.
//!
//! A fixed-interval scan discovers due posts and submits one publish job per
//! post id into a keyed task map; each job transitions its post to a terminal
//! status. The scheduler runtime wires the timer, the catch-up pass at
//! startup, and graceful shutdown together.

mod jobs;
mod publisher;
mod scanner;
mod scheduler;

pub use scheduler::{PublishScheduler, SchedulerConfig};

use std::sync::Arc;

use slate_core::ports::{OutcomeSource, PostRepository};

use jobs::ActiveJobs;

/// Dependencies shared by the scanner and the publish executor.
///
/// Injected explicitly - there is no process-wide scheduler singleton.
pub(crate) struct SchedulerContext {
    pub posts: Arc<dyn PostRepository>,
    pub outcomes: Arc<dyn OutcomeSource>,
    pub jobs: ActiveJobs,
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{DateTime, Utc};
    use slate_core::domain::{Post, PublishOutcome};
    use slate_core::ports::OutcomeSource;

    /// Deterministic outcome source for tests.
    pub struct ForcedOutcome(pub PublishOutcome);

    impl OutcomeSource for ForcedOutcome {
        fn draw(&self) -> PublishOutcome {
            self.0
        }
    }

    pub fn post_due_at(scheduled_time: DateTime<Utc>) -> Post {
        Post::new(
            "scheduled announcement".to_string(),
            None,
            vec!["twitter".to_string(), "instagram".to_string()],
            scheduled_time,
        )
    }
}

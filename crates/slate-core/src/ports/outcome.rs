//! Outcome source port - injectable randomness for publish simulation.

use crate::domain::PublishOutcome;

/// Source of publish outcomes.
///
/// Production draws `Failed` with a small configured probability to model an
/// unreliable platform API; tests inject a deterministic source.
pub trait OutcomeSource: Send + Sync {
    fn draw(&self) -> PublishOutcome;
}

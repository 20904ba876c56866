//! Random publish outcome source.
//!
//! Models the unreliability of the external platform APIs without real
//! network I/O: each publish attempt fails with a small fixed probability.

use rand::Rng;

use slate_core::domain::PublishOutcome;
use slate_core::ports::OutcomeSource;

/// Draws `Failed` with probability `failure_rate`, `Published` otherwise.
pub struct RandomOutcomeSource {
    failure_rate: f64,
}

impl RandomOutcomeSource {
    /// `failure_rate` is clamped to `[0.0, 1.0]`.
    pub fn new(failure_rate: f64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

impl OutcomeSource for RandomOutcomeSource {
    fn draw(&self) -> PublishOutcome {
        if rand::thread_rng().gen_bool(self.failure_rate) {
            PublishOutcome::Failed
        } else {
            PublishOutcome::Published
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_fraction_tracks_configured_rate() {
        let source = RandomOutcomeSource::new(0.05);
        let n = 100_000;

        let failed = (0..n)
            .filter(|_| source.draw() == PublishOutcome::Failed)
            .count();

        // Binomial sd at p=0.05, n=100k is ~0.0007; +-0.005 is ~7 sigma.
        let fraction = failed as f64 / n as f64;
        assert!(
            (fraction - 0.05).abs() < 0.005,
            "failed fraction {fraction} outside tolerance of 0.05"
        );
    }

    #[test]
    fn extreme_rates_are_deterministic() {
        let always = RandomOutcomeSource::new(1.0);
        let never = RandomOutcomeSource::new(0.0);
        for _ in 0..100 {
            assert_eq!(always.draw(), PublishOutcome::Failed);
            assert_eq!(never.draw(), PublishOutcome::Published);
        }
    }

    #[test]
    fn out_of_range_rate_is_clamped() {
        let source = RandomOutcomeSource::new(1.5);
        assert_eq!(source.draw(), PublishOutcome::Failed);
    }
}

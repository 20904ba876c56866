//! Scheduler runtime built on tokio-cron-scheduler.
//!
//! Owns the recurring scan timer and the keyed job map. Lifecycle is strictly
//! `stopped -> running -> stopped`, both transitions idempotent.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use slate_core::ports::{OutcomeSource, PostRepository};

use super::SchedulerContext;
use super::jobs::ActiveJobs;
use super::scanner::scan_due_posts;

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Enable the background scheduler.
    pub enabled: bool,
    /// Interval between due-post scans.
    pub scan_interval: Duration,
    /// Probability that a publish attempt is simulated as failed.
    pub failure_rate: f64,
    /// How long `stop()` waits for in-flight publish jobs.
    pub shutdown_grace: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scan_interval: Duration::from_secs(30),
            failure_rate: 0.05,
            shutdown_grace: Duration::from_secs(10),
        }
    }
}

impl SchedulerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("SCHEDULER_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            scan_interval: std::env::var("SCAN_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.scan_interval),
            failure_rate: std::env::var("PUBLISH_FAILURE_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.failure_rate),
            shutdown_grace: std::env::var("SHUTDOWN_GRACE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.shutdown_grace),
        }
    }
}

/// Background publish scheduler.
pub struct PublishScheduler {
    config: SchedulerConfig,
    ctx: Arc<SchedulerContext>,
    inner: Mutex<Option<JobScheduler>>,
    running: AtomicBool,
}

impl PublishScheduler {
    pub fn new(
        config: SchedulerConfig,
        posts: Arc<dyn PostRepository>,
        outcomes: Arc<dyn OutcomeSource>,
    ) -> Self {
        Self {
            config,
            ctx: Arc::new(SchedulerContext {
                posts,
                outcomes,
                jobs: ActiveJobs::new(),
            }),
            inner: Mutex::new(None),
            running: AtomicBool::new(false),
        }
    }

    /// Run the catch-up pass and arm the recurring scan timer.
    ///
    /// No-op when disabled or already running.
    pub async fn start(&self) -> Result<(), JobSchedulerError> {
        if !self.config.enabled {
            tracing::info!("Publish scheduler disabled");
            return Ok(());
        }
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::debug!("Publish scheduler already running");
            return Ok(());
        }

        self.ctx.jobs.reopen();

        // Catch-up pass: posts that came due while the process was down must
        // not wait for the first tick.
        scan_due_posts(&self.ctx).await;

        let scheduler = JobScheduler::new().await?;

        let ctx = self.ctx.clone();
        let scan_job = Job::new_repeated_async(self.config.scan_interval, move |_uuid, _lock| {
            let ctx = ctx.clone();
            Box::pin(async move {
                scan_due_posts(&ctx).await;
            })
        })?;

        let job_id = scheduler.add(scan_job).await?;
        scheduler.start().await?;

        tracing::info!(
            interval_secs = self.config.scan_interval.as_secs(),
            job_id = %job_id,
            "Publish scheduler started"
        );

        *self.inner.lock().await = Some(scheduler);
        Ok(())
    }

    /// Cancel the timer and drain in-flight jobs within the grace period.
    ///
    /// Idempotent; never kills a job mid-write.
    pub async fn stop(&self) -> Result<(), JobSchedulerError> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        if let Some(mut scheduler) = self.inner.lock().await.take() {
            scheduler.shutdown().await?;
        }

        self.ctx.jobs.shutdown(self.config.shutdown_grace).await;
        tracing::info!("Publish scheduler stopped");
        Ok(())
    }
}

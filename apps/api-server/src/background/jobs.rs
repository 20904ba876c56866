//! Keyed in-flight job map.
//!
//! At most one publish job may exist per post id at any time; the map gives
//! submissions insert-if-absent semantics so repeated scans of a
//! still-pending-but-already-queued post are no-ops rather than duplicates.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Map of post id to the handle of its in-flight publish job.
pub(crate) struct ActiveJobs {
    jobs: Mutex<HashMap<Uuid, JoinHandle<()>>>,
    accepting: AtomicBool,
}

impl ActiveJobs {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
            accepting: AtomicBool::new(true),
        }
    }

    /// Accept submissions again after a shutdown.
    pub fn reopen(&self) {
        self.accepting.store(true, Ordering::SeqCst);
    }

    /// Spawn `job` keyed by `id` unless a live job for that id exists.
    ///
    /// Returns whether the job was actually spawned. A submission for an id
    /// already in flight is dropped - the running job will settle that post.
    pub async fn submit<F>(&self, id: Uuid, job: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if !self.accepting.load(Ordering::SeqCst) {
            tracing::warn!(post_id = %id, "Job map is shut down, dropping submission");
            return false;
        }

        let mut jobs = self.jobs.lock().await;

        // Reap handles of completed jobs before the duplicate check.
        jobs.retain(|_, handle| !handle.is_finished());

        if jobs.contains_key(&id) {
            tracing::debug!(post_id = %id, "Publish job already in flight, skipping");
            return false;
        }

        jobs.insert(id, tokio::spawn(job));
        true
    }

    /// Number of jobs currently running.
    pub async fn in_flight(&self) -> usize {
        let jobs = self.jobs.lock().await;
        jobs.values().filter(|h| !h.is_finished()).count()
    }

    /// Stop accepting work and wait up to `grace` for running jobs.
    ///
    /// Jobs are never aborted mid-write; past the grace period they are left
    /// to finish detached.
    pub async fn shutdown(&self, grace: Duration) {
        self.accepting.store(false, Ordering::SeqCst);

        let handles: Vec<JoinHandle<()>> = {
            let mut jobs = self.jobs.lock().await;
            jobs.drain().map(|(_, handle)| handle).collect()
        };

        if handles.is_empty() {
            return;
        }

        tracing::info!(count = handles.len(), "Waiting for in-flight publish jobs");
        let drain = futures::future::join_all(handles);
        if tokio::time::timeout(grace, drain).await.is_err() {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "Grace period elapsed with publish jobs still running"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn duplicate_submission_for_same_id_is_dropped() {
        let jobs = ActiveJobs::new();
        let id = Uuid::new_v4();
        let gate = Arc::new(Notify::new());
        let runs = Arc::new(AtomicUsize::new(0));

        let (g, r) = (gate.clone(), runs.clone());
        assert!(
            jobs.submit(id, async move {
                g.notified().await;
                r.fetch_add(1, Ordering::SeqCst);
            })
            .await
        );

        // Same id while the first job is still parked: must not spawn.
        let r = runs.clone();
        assert!(
            !jobs
                .submit(id, async move {
                    r.fetch_add(1, Ordering::SeqCst);
                })
                .await
        );
        assert_eq!(jobs.in_flight().await, 1);

        gate.notify_one();
        jobs.shutdown(Duration::from_secs(1)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn finished_jobs_are_reaped_and_id_reusable() {
        let jobs = ActiveJobs::new();
        let id = Uuid::new_v4();

        assert!(jobs.submit(id, async {}).await);
        // Let the no-op job finish.
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(jobs.submit(id, async {}).await);
        jobs.shutdown(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn shutdown_refuses_new_work_until_reopened() {
        let jobs = ActiveJobs::new();
        jobs.shutdown(Duration::from_secs(1)).await;

        assert!(!jobs.submit(Uuid::new_v4(), async {}).await);

        jobs.reopen();
        assert!(jobs.submit(Uuid::new_v4(), async {}).await);
        jobs.shutdown(Duration::from_secs(1)).await;
    }
}

//! The concurrent load-generation core.
//!
//! [`run`] schedules a fixed number of snapshot-creation attempts against a
//! [`SnapshotTarget`], bounded by a semaphore, and folds the per-request
//! outcomes into a [`Summary`] once every attempt has finished.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Semaphore, mpsc};

use crate::summary::{Outcome, Summary};

/// A target that can serve one snapshot-creation request.
///
/// Implemented by the HTTP client for real runs and by in-process fakes in
/// tests.
#[async_trait::async_trait]
pub trait SnapshotTarget: Send + Sync + 'static {
    /// Issues a single snapshot-creation request.
    async fn create_snapshot(&self) -> anyhow::Result<()>;
}

/// Runs `total` snapshot-creation attempts with at most `concurrency` of
/// them in flight at any instant.
///
/// Each attempt is tried exactly once; failures are recorded and never abort
/// the run. The function returns only after every attempt has reached a
/// terminal outcome.
pub async fn run(target: Arc<dyn SnapshotTarget>, concurrency: usize, total: usize) -> Summary {
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();

    let start = Instant::now();

    let tasks: Vec<_> = (0..total)
        .map(|_| {
            let target = Arc::clone(&target);
            let semaphore = Arc::clone(&semaphore);
            let outcome_tx = outcome_tx.clone();

            tokio::spawn(async move {
                // The permit is held for the duration of the request and
                // released by scope on every path, success or failure.
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("semaphore never closes");

                let request_start = Instant::now();
                let outcome = match target.create_snapshot().await {
                    Ok(()) => Outcome::Success(request_start.elapsed()),
                    Err(err) => Outcome::Failure(err.to_string()),
                };

                // The receiver outlives all tasks, so the send cannot fail.
                let _ = outcome_tx.send(outcome);
            })
        })
        .collect();
    drop(outcome_tx);

    // Full barrier: every attempt reaches a terminal outcome before anything
    // is aggregated.
    for task in tasks {
        task.await.expect("benchmark task panicked");
    }
    let total_time = start.elapsed();

    let mut outcomes = Vec::with_capacity(total);
    while let Some(outcome) = outcome_rx.recv().await {
        outcomes.push(outcome);
    }

    Summary::compute(&outcomes, total_time)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    /// A target that tracks how many requests are in flight and fails every
    /// n-th call.
    #[derive(Default)]
    struct FakeTarget {
        live: AtomicUsize,
        max_live: AtomicUsize,
        calls: AtomicUsize,
        fail_every: usize,
    }

    impl FakeTarget {
        fn failing_every(n: usize) -> Self {
            Self {
                fail_every: n,
                ..Default::default()
            }
        }
    }

    #[async_trait::async_trait]
    impl SnapshotTarget for FakeTarget {
        async fn create_snapshot(&self) -> anyhow::Result<()> {
            let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_live.fetch_max(live, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(5)).await;
            self.live.fetch_sub(1, Ordering::SeqCst);

            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_every > 0 && call % self.fail_every == 0 {
                anyhow::bail!("synthetic failure");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn respects_the_concurrency_limit() {
        let target = Arc::new(FakeTarget::default());

        let summary = run(target.clone(), 3, 20).await;

        assert_eq!(summary.total, 20);
        assert_eq!(summary.success, 20);
        assert_eq!(summary.failure, 0);
        assert_eq!(summary.success + summary.failure, summary.total);
        assert!(target.max_live.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn records_every_outcome_exactly_once() {
        // Every second call fails; no outcome may be lost or duplicated.
        let target = Arc::new(FakeTarget::failing_every(2));

        let summary = run(target.clone(), 4, 30).await;

        assert_eq!(summary.total, 30);
        assert_eq!(summary.success + summary.failure, 30);
        assert_eq!(summary.failure, 15);
        assert_eq!(target.calls.load(Ordering::SeqCst), 30);
    }

    #[tokio::test]
    async fn failures_do_not_abort_the_run() {
        let target = Arc::new(FakeTarget::failing_every(1));

        let summary = run(target, 2, 10).await;

        assert_eq!(summary.total, 10);
        assert_eq!(summary.success, 0);
        assert_eq!(summary.failure, 10);
        assert_eq!(summary.min_time, Duration::ZERO);
        assert_eq!(summary.max_time, Duration::ZERO);
        assert_eq!(summary.avg_time, Duration::ZERO);
    }

    #[tokio::test]
    async fn zero_requests_yield_an_empty_summary() {
        let target = Arc::new(FakeTarget::default());

        let summary = run(target.clone(), 10, 0).await;

        assert_eq!(summary.total, 0);
        assert_eq!(summary.success, 0);
        assert_eq!(summary.failure, 0);
        assert_eq!(target.calls.load(Ordering::SeqCst), 0);
        assert_eq!(summary.success_rate(), 0.0);
    }
}

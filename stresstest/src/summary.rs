//! Per-request outcomes and their aggregation.

use std::time::Duration;

/// The terminal outcome of a single snapshot-creation attempt.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The request succeeded, taking the given time.
    Success(Duration),
    /// The request failed with an error description.
    Failure(String),
}

/// Aggregate statistics over one benchmark run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of attempted requests.
    pub total: usize,
    /// Number of successful requests.
    pub success: usize,
    /// Number of failed requests.
    pub failure: usize,
    /// Wall-clock time of the whole run.
    pub total_time: Duration,
    /// Mean latency over successful requests, zero if none succeeded.
    pub avg_time: Duration,
    /// Fastest successful request, zero if none succeeded.
    pub min_time: Duration,
    /// Slowest successful request, zero if none succeeded.
    pub max_time: Duration,
}

impl Summary {
    /// Folds a collection of outcomes into a summary.
    ///
    /// The fold is order-independent: any permutation of the same outcomes
    /// produces an identical summary. Latency extrema and the mean cover
    /// successful requests only; failed attempts carry no duration. When no
    /// request succeeded, the latency fields stay at zero rather than
    /// dividing by an empty count.
    pub fn compute(outcomes: &[Outcome], total_time: Duration) -> Self {
        let mut summary = Summary {
            total: outcomes.len(),
            total_time,
            ..Default::default()
        };

        let mut sum = Duration::ZERO;
        for outcome in outcomes {
            match outcome {
                Outcome::Success(duration) => {
                    if summary.success == 0 {
                        summary.min_time = *duration;
                        summary.max_time = *duration;
                    } else {
                        summary.min_time = summary.min_time.min(*duration);
                        summary.max_time = summary.max_time.max(*duration);
                    }
                    summary.success += 1;
                    sum += *duration;
                }
                Outcome::Failure(_) => summary.failure += 1,
            }
        }

        if summary.success > 0 {
            summary.avg_time = sum / summary.success as u32;
        }

        summary
    }

    /// The fraction of requests that succeeded, 0.0 when nothing ran.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.success as f64 / self.total as f64
    }

    /// Successful requests per second of wall-clock time, 0.0 for an empty
    /// or instantaneous run.
    pub fn throughput(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.success as f64 / secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn empty_run_stays_at_zero() {
        let summary = Summary::compute(&[], Duration::ZERO);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.success, 0);
        assert_eq!(summary.failure, 0);
        assert_eq!(summary.avg_time, Duration::ZERO);
        assert_eq!(summary.min_time, Duration::ZERO);
        assert_eq!(summary.max_time, Duration::ZERO);
        assert_eq!(summary.success_rate(), 0.0);
        assert_eq!(summary.throughput(), 0.0);
    }

    #[test]
    fn all_failures_leave_latencies_at_zero() {
        let outcomes = vec![
            Outcome::Failure("HTTP status 500".into()),
            Outcome::Failure("connection refused".into()),
        ];
        let summary = Summary::compute(&outcomes, ms(50));

        assert_eq!(summary.total, 2);
        assert_eq!(summary.success, 0);
        assert_eq!(summary.failure, 2);
        assert_eq!(summary.avg_time, Duration::ZERO);
        assert_eq!(summary.min_time, Duration::ZERO);
        assert_eq!(summary.max_time, Duration::ZERO);
        assert_eq!(summary.success_rate(), 0.0);
        assert_eq!(summary.throughput(), 0.0);
    }

    #[test]
    fn computes_latency_statistics() {
        let outcomes = vec![
            Outcome::Success(ms(100)),
            Outcome::Success(ms(200)),
            Outcome::Success(ms(300)),
        ];
        let summary = Summary::compute(&outcomes, Duration::from_secs(1));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.success, 3);
        assert_eq!(summary.failure, 0);
        assert_eq!(summary.avg_time, ms(200));
        assert_eq!(summary.min_time, ms(100));
        assert_eq!(summary.max_time, ms(300));
        assert_eq!(summary.success_rate(), 1.0);
        assert_eq!(summary.throughput(), 3.0);
    }

    #[test]
    fn failures_do_not_skew_latencies() {
        let outcomes = vec![
            Outcome::Failure("HTTP status 500".into()),
            Outcome::Success(ms(200)),
            Outcome::Failure("HTTP status 500".into()),
        ];
        let summary = Summary::compute(&outcomes, Duration::from_secs(1));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.success, 1);
        assert_eq!(summary.failure, 2);
        assert_eq!(summary.avg_time, ms(200));
        assert_eq!(summary.min_time, ms(200));
        assert_eq!(summary.max_time, ms(200));
    }

    #[test]
    fn aggregation_is_order_independent() {
        let outcomes = vec![
            Outcome::Success(ms(100)),
            Outcome::Failure("boom".into()),
            Outcome::Success(ms(300)),
            Outcome::Success(ms(200)),
        ];

        let expected = Summary::compute(&outcomes, Duration::from_secs(1));

        // Rotating through all cyclic permutations is enough to move every
        // element to every position.
        let mut rotated = outcomes;
        for _ in 0..rotated.len() {
            rotated.rotate_left(1);
            let summary = Summary::compute(&rotated, Duration::from_secs(1));
            assert_eq!(summary, expected);
        }
    }
}

//! Ordered Fallback Combinator
//!
//! Runs a list of async steps strictly in order, each under its own
//! optional timeout, and stops at the first success.
//! Used both for the IP provider list and for the resolver's cascade.

use crate::domain::entities::StepReport;
use crate::domain::errors::LocationError;
use futures::future::BoxFuture;
use std::time::Duration;

/// Future produced by a fallback step.
pub type StepFuture<'a, T> = BoxFuture<'a, Result<T, LocationError>>;

/// A named, lazily started step.
///
/// The future is only built when the step's turn comes, so a step after
/// the first success never runs any of its code.
pub struct FallbackStep<'a, T> {
    name: String,
    timeout: Option<Duration>,
    run: Box<dyn FnOnce() -> StepFuture<'a, T> + Send + 'a>,
}

impl<'a, T> FallbackStep<'a, T> {
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: FnOnce() -> StepFuture<'a, T> + Send + 'a,
    {
        Self {
            name: name.into(),
            timeout: None,
            run: Box::new(run),
        }
    }

    /// Bound the step. On expiry the future is dropped, cancelling any
    /// request it owns, and the step fails with `Timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// First successful value plus a report for every step that ran.
#[derive(Debug)]
pub struct FallbackOutcome<T> {
    pub value: Option<T>,
    pub attempts: Vec<StepReport>,
}

impl<T> FallbackOutcome<T> {
    /// Name of the step that produced `value`.
    pub fn winner(&self) -> Option<&str> {
        self.attempts
            .iter()
            .find(|a| a.is_success())
            .map(|a| a.step.as_str())
    }
}

/// Run `steps` in order and return the first `Ok` value.
///
/// Failures are absorbed: each is logged and recorded, then the next step
/// runs. Steps never overlap.
pub async fn first_success<'a, T>(steps: Vec<FallbackStep<'a, T>>) -> FallbackOutcome<T> {
    let mut attempts = Vec::with_capacity(steps.len());

    for step in steps {
        let FallbackStep { name, timeout, run } = step;
        let future = run();

        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, future).await {
                Ok(result) => result,
                Err(_) => Err(LocationError::Timeout(limit)),
            },
            None => future.await,
        };

        match result {
            Ok(value) => {
                attempts.push(StepReport::succeeded(name));
                return FallbackOutcome {
                    value: Some(value),
                    attempts,
                };
            }
            Err(e) => {
                tracing::debug!("step {} failed ({}): {}", name, e.kind(), e);
                attempts.push(StepReport::failed(name, e));
            }
        }
    }

    FallbackOutcome {
        value: None,
        attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn ok_step(name: &str, value: u32, calls: Arc<AtomicUsize>) -> FallbackStep<'static, u32> {
        FallbackStep::new(name, move || {
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(value)
            }
            .boxed()
        })
    }

    fn failing_step(name: &str, calls: Arc<AtomicUsize>) -> FallbackStep<'static, u32> {
        FallbackStep::new(name, move || {
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(LocationError::Transport("connection refused".to_string()))
            }
            .boxed()
        })
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let later = Arc::new(AtomicUsize::new(0));

        let outcome = first_success(vec![
            ok_step("a", 1, calls.clone()),
            ok_step("b", 2, later.clone()),
        ])
        .await;

        assert_eq!(outcome.value, Some(1));
        assert_eq!(outcome.attempts.len(), 1);
        assert_eq!(outcome.winner(), Some("a"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_through_failures_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));

        let outcome = first_success(vec![
            failing_step("a", calls.clone()),
            failing_step("b", calls.clone()),
            ok_step("c", 3, calls.clone()),
        ])
        .await;

        assert_eq!(outcome.value, Some(3));
        let names: Vec<&str> = outcome.attempts.iter().map(|a| a.step.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(!outcome.attempts[0].is_success());
        assert!(outcome.attempts[2].is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_all_fail_returns_none() {
        let calls = Arc::new(AtomicUsize::new(0));

        let outcome = first_success(vec![
            failing_step("a", calls.clone()),
            failing_step("b", calls.clone()),
        ])
        .await;

        assert_eq!(outcome.value, None);
        assert_eq!(outcome.attempts.len(), 2);
        assert_eq!(outcome.winner(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_timeout_cancels_and_continues() {
        let calls = Arc::new(AtomicUsize::new(0));
        let hung = FallbackStep::new("hung", || futures::future::pending().boxed())
            .with_timeout(Duration::from_millis(20));

        let outcome = first_success(vec![hung, ok_step("b", 7, calls.clone())]).await;

        assert_eq!(outcome.value, Some(7));
        assert_eq!(
            outcome.attempts[0].error(),
            Some(&LocationError::Timeout(Duration::from_millis(20)))
        );
    }

    #[tokio::test]
    async fn test_empty_steps() {
        let outcome: FallbackOutcome<u32> = first_success(Vec::new()).await;
        assert!(outcome.value.is_none());
        assert!(outcome.attempts.is_empty());
    }

    #[test]
    fn test_step_name() {
        let step: FallbackStep<'static, u32> =
            FallbackStep::new("ipapi.co", || async { Ok(1) }.boxed());
        assert_eq!(step.name(), "ipapi.co");
    }
}

//! Drives a wizard through submission.

use std::time::{Duration, Instant};

use domain::{ApplicationSubmission, Wizard};

use crate::adapter::{SubmissionAdapter, SubmissionReceipt};
use crate::error::{Result, SubmissionError};

/// Default time allowed for the backend to answer.
pub const DEFAULT_SUBMISSION_TIMEOUT: Duration = Duration::from_secs(30);

/// Hands finished applications to a [`SubmissionAdapter`] with a timeout.
///
/// A submission is one attempt: a rejection or timeout leaves the wizard in
/// the failed state and the user decides whether to submit again.
#[derive(Debug, Clone)]
pub struct SubmissionCoordinator<A: SubmissionAdapter> {
    adapter: A,
    timeout: Duration,
}

impl<A: SubmissionAdapter> SubmissionCoordinator<A> {
    /// Creates a coordinator using the default timeout.
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            timeout: DEFAULT_SUBMISSION_TIMEOUT,
        }
    }

    /// Overrides the backend timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends one record to the adapter, bounded by the timeout.
    ///
    /// Does not touch any wizard; callers that hold the wizard behind a lock
    /// use this between [`Wizard::begin_submission`] and the matching
    /// `record_*` call so the lock is not held while waiting.
    #[tracing::instrument(skip(self, submission), fields(application_id = %submission.application_id))]
    pub async fn dispatch(&self, submission: &ApplicationSubmission) -> Result<SubmissionReceipt> {
        metrics::counter!("submissions_total").increment(1);
        let started = Instant::now();

        let outcome = match tokio::time::timeout(self.timeout, self.adapter.submit(submission)).await
        {
            Ok(result) => result,
            Err(_) => Err(SubmissionError::TimedOut(self.timeout)),
        };

        metrics::histogram!("submission_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        match &outcome {
            Ok(receipt) => {
                tracing::info!(receipt_id = %receipt.receipt_id, "application accepted");
            }
            Err(error) => {
                metrics::counter!("submissions_failed_total").increment(1);
                tracing::warn!(%error, "application submission failed");
            }
        }
        outcome
    }

    /// Submits the wizard's application and records the outcome on it.
    ///
    /// Wizard preconditions (summary step, accepted terms, complete
    /// selection) are checked before the adapter is called.
    pub async fn submit(
        &self,
        wizard: &mut Wizard,
        terms_accepted: bool,
    ) -> Result<SubmissionReceipt> {
        let submission = wizard.begin_submission(terms_accepted)?;

        match self.dispatch(&submission).await {
            Ok(receipt) => {
                wizard.record_success(receipt.receipt_id.clone(), receipt.accepted_at)?;
                Ok(receipt)
            }
            Err(error) => {
                wizard.record_failure(error.to_string())?;
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::InMemorySubmissionAdapter;
    use domain::{ApplicationError, SubmissionStatus};

    #[tokio::test]
    async fn test_submit_requires_summary_step() {
        let coordinator = SubmissionCoordinator::new(InMemorySubmissionAdapter::new());
        let mut wizard = Wizard::new();

        let result = coordinator.submit(&mut wizard, true).await;
        assert!(matches!(
            result,
            Err(SubmissionError::Application(ApplicationError::NotAtSummary { .. }))
        ));
        assert_eq!(wizard.submission(), &SubmissionStatus::Idle);
        assert_eq!(coordinator.adapter().submission_count().await, 0);
    }

    #[test]
    fn test_default_timeout() {
        let coordinator = SubmissionCoordinator::new(InMemorySubmissionAdapter::new());
        assert_eq!(coordinator.timeout(), Duration::from_secs(30));

        let coordinator = coordinator.with_timeout(Duration::from_millis(50));
        assert_eq!(coordinator.timeout(), Duration::from_millis(50));
    }
}

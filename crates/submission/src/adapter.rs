//! Submission adapter trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::ApplicationId;
use domain::ApplicationSubmission;
use tokio::sync::Mutex;

use crate::error::{Result, SubmissionError};

/// Acknowledgement returned by the backend for an accepted application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Reference assigned by the backend.
    pub receipt_id: String,
    pub accepted_at: DateTime<Utc>,
}

/// Backend that durably receives finished applications.
///
/// Each call resolves exactly once, either accepted or rejected. Retrying is
/// the caller's decision.
#[async_trait]
pub trait SubmissionAdapter: Send + Sync {
    async fn submit(&self, submission: &ApplicationSubmission) -> Result<SubmissionReceipt>;
}

#[derive(Debug, Default)]
struct InMemorySubmissionState {
    submissions: HashMap<String, ApplicationSubmission>,
    next_id: u32,
    fail_on_submit: bool,
}

/// In-memory submission backend for development and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionAdapter {
    state: Arc<Mutex<InMemorySubmissionState>>,
    latency: Duration,
}

impl InMemorySubmissionAdapter {
    /// Creates an adapter that answers immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every answer by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Configures the adapter to reject subsequent submissions.
    pub async fn set_fail_on_submit(&self, fail: bool) {
        self.state.lock().await.fail_on_submit = fail;
    }

    /// Returns the number of accepted submissions.
    pub async fn submission_count(&self) -> usize {
        self.state.lock().await.submissions.len()
    }

    /// Returns the accepted submission stored under `receipt_id`.
    pub async fn get(&self, receipt_id: &str) -> Option<ApplicationSubmission> {
        self.state.lock().await.submissions.get(receipt_id).cloned()
    }

    /// Returns true if the application has been accepted at least once.
    pub async fn has_application(&self, application_id: ApplicationId) -> bool {
        self.state
            .lock()
            .await
            .submissions
            .values()
            .any(|s| s.application_id == application_id)
    }
}

#[async_trait]
impl SubmissionAdapter for InMemorySubmissionAdapter {
    async fn submit(&self, submission: &ApplicationSubmission) -> Result<SubmissionReceipt> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut state = self.state.lock().await;
        if state.fail_on_submit {
            return Err(SubmissionError::Rejected(
                "Placement backend unavailable".to_string(),
            ));
        }

        state.next_id += 1;
        let receipt_id = format!("APP-{:04}", state.next_id);
        state
            .submissions
            .insert(receipt_id.clone(), submission.clone());

        Ok(SubmissionReceipt {
            receipt_id,
            accepted_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CampaignDuration, CompanyInfo, Money};

    fn submission() -> ApplicationSubmission {
        ApplicationSubmission {
            application_id: ApplicationId::new(),
            company_info: CompanyInfo {
                email: "sarah@fitfuel.com".to_string(),
                company_name: "FitFuel Ltd.".to_string(),
                store_url: "fitfuel.myshopify.com".to_string(),
                phone: "+44 7700 123456".to_string(),
                company_reg: None,
            },
            products: vec![],
            machines: vec![],
            duration: CampaignDuration::SIX_MONTHS,
            config: vec![],
            placement_fee: Money::from_pounds(1000),
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_accepts_and_stores() {
        let adapter = InMemorySubmissionAdapter::new();
        let record = submission();

        let receipt = adapter.submit(&record).await.unwrap();
        assert!(receipt.receipt_id.starts_with("APP-"));
        assert_eq!(adapter.submission_count().await, 1);
        assert_eq!(adapter.get(&receipt.receipt_id).await, Some(record.clone()));
        assert!(adapter.has_application(record.application_id).await);
    }

    #[tokio::test]
    async fn test_fail_on_submit() {
        let adapter = InMemorySubmissionAdapter::new();
        adapter.set_fail_on_submit(true).await;

        let result = adapter.submit(&submission()).await;
        assert!(matches!(result, Err(SubmissionError::Rejected(_))));
        assert_eq!(adapter.submission_count().await, 0);
    }

    #[tokio::test]
    async fn test_sequential_receipt_ids() {
        let adapter = InMemorySubmissionAdapter::new();
        let r1 = adapter.submit(&submission()).await.unwrap();
        let r2 = adapter.submit(&submission()).await.unwrap();

        assert_eq!(r1.receipt_id, "APP-0001");
        assert_eq!(r2.receipt_id, "APP-0002");
    }
}

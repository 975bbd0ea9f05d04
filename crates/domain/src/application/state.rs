//! Wizard step sequence and submission sub-state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A step of the application wizard.
///
/// Steps form a strict line with no branching or skipping:
/// ```text
/// Company ──► Products ──► Machines ──► Duration ──► Config ──► Summary
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Company details (initial state).
    #[default]
    Company,
    Products,
    Machines,
    Duration,
    Config,
    /// Review and submit (terminal state).
    Summary,
}

impl Step {
    /// All steps in wizard order.
    pub const SEQUENCE: [Step; 6] = [
        Step::Company,
        Step::Products,
        Step::Machines,
        Step::Duration,
        Step::Config,
        Step::Summary,
    ];

    /// Returns the step that follows this one, or `None` at the terminal step.
    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Company => Some(Step::Products),
            Step::Products => Some(Step::Machines),
            Step::Machines => Some(Step::Duration),
            Step::Duration => Some(Step::Config),
            Step::Config => Some(Step::Summary),
            Step::Summary => None,
        }
    }

    /// Returns the step before this one, or `None` at the first step.
    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::Company => None,
            Step::Products => Some(Step::Company),
            Step::Machines => Some(Step::Products),
            Step::Duration => Some(Step::Machines),
            Step::Config => Some(Step::Duration),
            Step::Summary => Some(Step::Config),
        }
    }

    /// Zero-based position in the sequence.
    pub fn index(&self) -> usize {
        match self {
            Step::Company => 0,
            Step::Products => 1,
            Step::Machines => 2,
            Step::Duration => 3,
            Step::Config => 4,
            Step::Summary => 5,
        }
    }

    /// Returns true for the last step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Summary)
    }

    /// Progress-bar label.
    pub fn label(&self) -> &'static str {
        match self {
            Step::Company => "Company Info",
            Step::Products => "Select Products",
            Step::Machines => "Choose Machines",
            Step::Duration => "Duration",
            Step::Config => "Configure",
            Step::Summary => "Review & Submit",
        }
    }

    /// Returns the step name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Company => "company",
            Step::Products => "products",
            Step::Machines => "machines",
            Step::Duration => "duration",
            Step::Config => "config",
            Step::Summary => "summary",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of handing the application to the submission adapter.
///
/// State transitions:
/// ```text
/// Idle ──► Submitting ──┬──► Submitted
///              ▲        └──► Failed ──┐
///              └──────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,

    /// Awaiting the adapter; all input is disabled.
    Submitting,

    /// Accepted by the adapter (terminal state).
    Submitted {
        receipt_id: String,
        submitted_at: DateTime<Utc>,
    },

    /// Rejected or timed out; the user may re-submit.
    Failed { reason: String },
}

impl SubmissionStatus {
    /// Returns true while the adapter has not yet answered.
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Submitting)
    }

    /// Returns true if step navigation is allowed.
    pub fn accepts_input(&self) -> bool {
        !matches!(
            self,
            SubmissionStatus::Submitting | SubmissionStatus::Submitted { .. }
        )
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Submitted { .. })
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Submitting => "submitting",
            SubmissionStatus::Submitted { .. } => "submitted",
            SubmissionStatus::Failed { .. } => "failed",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

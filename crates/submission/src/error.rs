//! Submission error types.

use std::time::Duration;

use domain::ApplicationError;
use thiserror::Error;

/// Errors that can occur while submitting an application.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The backend refused the application.
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// The backend did not answer in time.
    #[error("Submission timed out after {0:?}")]
    TimedOut(Duration),

    /// The wizard was not in a state that allows submitting.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

/// Convenience type alias for submission results.
pub type Result<T> = std::result::Result<T, SubmissionError>;

//! Submission handoff for completed placement applications.
//!
//! This crate provides:
//! - [`SubmissionAdapter`] trait for the external backend receiving applications
//! - [`InMemorySubmissionAdapter`] stub with configurable latency and failure
//! - [`SubmissionCoordinator`] driving a wizard through submit with a timeout

pub mod adapter;
pub mod coordinator;
pub mod error;

pub use adapter::{InMemorySubmissionAdapter, SubmissionAdapter, SubmissionReceipt};
pub use coordinator::{DEFAULT_SUBMISSION_TIMEOUT, SubmissionCoordinator};
pub use error::{Result, SubmissionError};

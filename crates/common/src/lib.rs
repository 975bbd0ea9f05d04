//! Shared identifiers for the retail placement application.

pub mod types;

pub use types::ApplicationId;

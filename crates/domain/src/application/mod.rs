//! Placement application aggregate and related types.

mod catalog;
mod company;
mod payload;
mod selection;
mod state;
pub mod stocking;
mod submission;
mod value_objects;
mod wizard;

pub use catalog::{Machine, Product};
pub use company::{CompanyInfo, FieldError, ValidationErrors};
pub use payload::StepPayload;
pub use selection::{
    MachineSelectionSummary, ProductSelectionSummary, quick_select_by_tier, toggle_machine,
    toggle_product,
};
pub use state::{Step, SubmissionStatus};
pub use stocking::ProductConfig;
pub use submission::ApplicationSubmission;
pub use value_objects::{CampaignDuration, Coordinates, MachineId, Money, ProductId, Tier};
pub use wizard::{ApplicationState, Wizard};

use thiserror::Error;

/// Errors that can occur while filling in or submitting an application.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// One or more form fields are missing or malformed.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Tried to continue without any products.
    #[error("At least one product must be selected")]
    NoProductsSelected,

    /// Tried to continue without any machines.
    #[error("At least one machine must be selected")]
    NoMachinesSelected,

    /// Duration is not one of the offered options.
    #[error("Unsupported campaign duration: {months} months (choose 1, 3, 6 or 12)")]
    UnsupportedDuration { months: u32 },

    /// A selected product has no stocking entry.
    #[error("No stocking quantity configured for product {product_id}")]
    MissingProductConfig { product_id: String },

    /// A stocking entry refers to a product that is not selected.
    #[error("Stocking entry for unselected product {product_id}")]
    UnknownProductConfig { product_id: String },

    /// A product has more than one stocking entry.
    #[error("Duplicate stocking entry for product {product_id}")]
    DuplicateProductConfig { product_id: String },

    /// The payload was produced by a different step than the current one.
    #[error("Payload for {actual} step sent while on {expected} step")]
    PayloadMismatch { expected: Step, actual: Step },

    /// Submission attempted before reaching the summary step.
    #[error("Cannot submit from {current} step")]
    NotAtSummary { current: Step },

    /// Terms and conditions were not accepted.
    #[error("Terms and conditions must be accepted")]
    TermsNotAccepted,

    /// Company details were never provided.
    #[error("Company information is missing")]
    MissingCompanyInfo,

    /// A submission is awaiting its outcome.
    #[error("Submission in progress")]
    SubmissionInProgress,

    /// The application has already been submitted.
    #[error("Application already submitted")]
    AlreadySubmitted,

    /// No submission is pending, so there is no outcome to record.
    #[error("No submission in progress")]
    NoSubmissionInProgress,
}

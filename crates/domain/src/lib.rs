//! Domain layer for retail placement applications.
//!
//! This crate provides:
//! - The application data model (company, products, machines, stocking plan)
//! - The pricing engine deriving campaign cost and inventory figures
//! - The step sequencer (`Wizard`) that gates navigation and owns the state

pub mod application;
pub mod pricing;

pub use application::{
    ApplicationError, ApplicationState, ApplicationSubmission, CampaignDuration, CompanyInfo,
    Coordinates, FieldError, Machine, MachineId, MachineSelectionSummary, Money, Product,
    ProductConfig, ProductId, ProductSelectionSummary, Step, StepPayload, SubmissionStatus, Tier,
    ValidationErrors, Wizard, quick_select_by_tier, stocking, toggle_machine, toggle_product,
};
pub use pricing::{DurationQuote, PricingSummary, RevenueSplit, TierCounts};

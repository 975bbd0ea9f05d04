//! Application state and the step sequencer that owns it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use common::ApplicationId;
use serde::{Deserialize, Serialize};

use super::{
    ApplicationError, ApplicationSubmission, CampaignDuration, CompanyInfo, Machine, Product,
    ProductConfig, ProductId, Step, StepPayload, SubmissionStatus, stocking,
};
use crate::pricing;

/// Everything the user has chosen so far.
///
/// Only the [`Wizard`] mutates this, one step payload at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationState {
    company_info: Option<CompanyInfo>,
    selected_products: Vec<Product>,
    selected_machines: Vec<Machine>,
    duration: CampaignDuration,
    product_config: Vec<ProductConfig>,
}

impl ApplicationState {
    pub fn company_info(&self) -> Option<&CompanyInfo> {
        self.company_info.as_ref()
    }

    pub fn selected_products(&self) -> &[Product] {
        &self.selected_products
    }

    pub fn selected_machines(&self) -> &[Machine] {
        &self.selected_machines
    }

    pub fn duration(&self) -> CampaignDuration {
        self.duration
    }

    pub fn product_config(&self) -> &[ProductConfig] {
        &self.product_config
    }

    /// Writes a payload into its field.
    ///
    /// Returns true if the stored stocking plan was dropped because the
    /// product selection changed underneath it.
    fn store(&mut self, payload: StepPayload) -> bool {
        match payload {
            StepPayload::Company(info) => self.company_info = Some(info),
            StepPayload::Products(products) => {
                let changed = product_ids(&products) != product_ids(&self.selected_products);
                self.selected_products = products;
                if changed && !self.product_config.is_empty() {
                    self.product_config.clear();
                    return true;
                }
            }
            StepPayload::Machines(machines) => self.selected_machines = machines,
            StepPayload::Duration(duration) => self.duration = duration,
            StepPayload::Config(plan) => self.product_config = plan,
        }
        false
    }
}

impl ApplicationState {
    /// Checks that what is already stored lets the user continue past `step`.
    ///
    /// Used when a step is left without sending new data: company details
    /// must exist, selections must be non-empty and the stocking plan must
    /// cover the selected products.
    pub fn ensure_step_complete(&self, step: Step) -> Result<(), ApplicationError> {
        match step {
            Step::Company if self.company_info.is_none() => {
                Err(ApplicationError::MissingCompanyInfo)
            }
            Step::Products if self.selected_products.is_empty() => {
                Err(ApplicationError::NoProductsSelected)
            }
            Step::Machines if self.selected_machines.is_empty() => {
                Err(ApplicationError::NoMachinesSelected)
            }
            Step::Duration if !self.duration.is_offered() => {
                Err(ApplicationError::UnsupportedDuration {
                    months: self.duration.months(),
                })
            }
            Step::Config => stocking::validate_plan(&self.product_config, &self.selected_products),
            _ => Ok(()),
        }
    }
}

fn product_ids(products: &[Product]) -> HashSet<&ProductId> {
    products.iter().map(|p| &p.id).collect()
}

/// Linear step sequencer for one placement application.
///
/// Steps validate their own input before calling [`Wizard::advance`]; the
/// sequencer only checks that a payload belongs to the current step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wizard {
    id: ApplicationId,
    step: Step,
    state: ApplicationState,
    submission: SubmissionStatus,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// Starts a fresh application at the company step.
    pub fn new() -> Self {
        Self::with_id(ApplicationId::new())
    }

    pub fn with_id(id: ApplicationId) -> Self {
        Self {
            id,
            step: Step::default(),
            state: ApplicationState::default(),
            submission: SubmissionStatus::default(),
        }
    }

    pub fn id(&self) -> ApplicationId {
        self.id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    fn ensure_accepts_input(&self) -> Result<(), ApplicationError> {
        if self.submission.accepts_input() {
            Ok(())
        } else if self.submission.is_pending() {
            Err(ApplicationError::SubmissionInProgress)
        } else {
            Err(ApplicationError::AlreadySubmitted)
        }
    }

    /// Stores `payload` (if any) and moves to the next step.
    ///
    /// At the summary step this is a no-op. Data stored by later steps is
    /// kept, except that a changed product selection drops the stocking plan.
    #[tracing::instrument(skip(self, payload), fields(application_id = %self.id, step = %self.step))]
    pub fn advance(&mut self, payload: Option<StepPayload>) -> Result<Step, ApplicationError> {
        self.ensure_accepts_input()?;

        if let Some(payload) = payload {
            if payload.step() != self.step {
                return Err(ApplicationError::PayloadMismatch {
                    expected: self.step,
                    actual: payload.step(),
                });
            }
            if self.state.store(payload) {
                tracing::info!("product selection changed, stocking plan reset");
            }
        }

        if let Some(next) = self.step.next() {
            tracing::debug!(from = %self.step, to = %next, "advancing");
            self.step = next;
            metrics::counter!("wizard_transitions_total", "direction" => "forward").increment(1);
        }
        Ok(self.step)
    }

    /// Moves back one step; a no-op at the company step.
    #[tracing::instrument(skip(self), fields(application_id = %self.id, step = %self.step))]
    pub fn retreat(&mut self) -> Result<Step, ApplicationError> {
        self.ensure_accepts_input()?;

        if let Some(previous) = self.step.previous() {
            tracing::debug!(from = %self.step, to = %previous, "retreating");
            self.step = previous;
            metrics::counter!("wizard_transitions_total", "direction" => "back").increment(1);
        }
        Ok(self.step)
    }

    /// Enters the submitting sub-state and builds the handoff record.
    ///
    /// Only allowed on the summary step, with the terms accepted and a
    /// complete selection. Until [`Wizard::record_success`] or
    /// [`Wizard::record_failure`] is called, all navigation is rejected.
    pub fn begin_submission(
        &mut self,
        terms_accepted: bool,
    ) -> Result<ApplicationSubmission, ApplicationError> {
        self.ensure_accepts_input()?;
        if self.step != Step::Summary {
            return Err(ApplicationError::NotAtSummary { current: self.step });
        }
        if !terms_accepted {
            return Err(ApplicationError::TermsNotAccepted);
        }
        let company_info = self
            .state
            .company_info
            .clone()
            .ok_or(ApplicationError::MissingCompanyInfo)?;
        if self.state.selected_products.is_empty() {
            return Err(ApplicationError::NoProductsSelected);
        }
        if self.state.selected_machines.is_empty() {
            return Err(ApplicationError::NoMachinesSelected);
        }

        let submission = ApplicationSubmission {
            application_id: self.id,
            company_info,
            products: self.state.selected_products.clone(),
            machines: self.state.selected_machines.clone(),
            duration: self.state.duration,
            config: self.state.product_config.clone(),
            placement_fee: pricing::placement_fee(
                &self.state.selected_machines,
                self.state.duration,
            ),
            submitted_at: Utc::now(),
        };

        tracing::info!(
            application_id = %self.id,
            placement_fee = %submission.placement_fee,
            "submission started"
        );
        self.submission = SubmissionStatus::Submitting;
        Ok(submission)
    }

    /// Resolves a pending submission as accepted.
    pub fn record_success(
        &mut self,
        receipt_id: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Result<(), ApplicationError> {
        if self.submission != SubmissionStatus::Submitting {
            return Err(ApplicationError::NoSubmissionInProgress);
        }
        self.submission = SubmissionStatus::Submitted {
            receipt_id: receipt_id.into(),
            submitted_at,
        };
        Ok(())
    }

    /// Resolves a pending submission as failed; the user may try again.
    pub fn record_failure(&mut self, reason: impl Into<String>) -> Result<(), ApplicationError> {
        if self.submission != SubmissionStatus::Submitting {
            return Err(ApplicationError::NoSubmissionInProgress);
        }
        self.submission = SubmissionStatus::Failed {
            reason: reason.into(),
        };
        Ok(())
    }
}

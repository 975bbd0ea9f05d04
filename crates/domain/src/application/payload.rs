//! Data each step hands to the sequencer when the user continues.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{
    ApplicationError, ApplicationState, CampaignDuration, CompanyInfo, Machine, Product,
    ProductConfig, Step, stocking,
};

/// Payload of a forward transition, tagged by the step that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "lowercase")]
pub enum StepPayload {
    Company(CompanyInfo),
    Products(Vec<Product>),
    Machines(Vec<Machine>),
    Duration(CampaignDuration),
    Config(Vec<ProductConfig>),
}

impl StepPayload {
    /// The step this payload belongs to.
    pub fn step(&self) -> Step {
        match self {
            StepPayload::Company(_) => Step::Company,
            StepPayload::Products(_) => Step::Products,
            StepPayload::Machines(_) => Step::Machines,
            StepPayload::Duration(_) => Step::Duration,
            StepPayload::Config(_) => Step::Config,
        }
    }

    /// Runs the owning step's local checks.
    ///
    /// Duplicate product or machine picks are collapsed to their first
    /// occurrence. The config plan is checked against the products already
    /// stored in `state`.
    pub fn validate(self, state: &ApplicationState) -> Result<StepPayload, ApplicationError> {
        match self {
            StepPayload::Company(info) => Ok(StepPayload::Company(info.validate()?)),
            StepPayload::Products(products) => {
                let products = dedup_by(products, |p| p.id.clone());
                if products.is_empty() {
                    return Err(ApplicationError::NoProductsSelected);
                }
                Ok(StepPayload::Products(products))
            }
            StepPayload::Machines(machines) => {
                let machines = dedup_by(machines, |m| m.id.clone());
                if machines.is_empty() {
                    return Err(ApplicationError::NoMachinesSelected);
                }
                Ok(StepPayload::Machines(machines))
            }
            StepPayload::Duration(duration) => {
                if !duration.is_offered() {
                    return Err(ApplicationError::UnsupportedDuration {
                        months: duration.months(),
                    });
                }
                Ok(StepPayload::Duration(duration))
            }
            StepPayload::Config(plan) => {
                stocking::validate_plan(&plan, state.selected_products())?;
                Ok(StepPayload::Config(plan))
            }
        }
    }
}

fn dedup_by<T, K: std::hash::Hash + Eq>(items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

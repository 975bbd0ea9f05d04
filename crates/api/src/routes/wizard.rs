//! Wizard session endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use catalog::CatalogProvider;
use chrono::{DateTime, Utc};
use domain::pricing::{self, duration_quotes};
use domain::{
    ApplicationError, ApplicationState, ApplicationSubmission, CampaignDuration, CompanyInfo,
    DurationQuote, MachineId, MachineSelectionSummary, Money, PricingSummary, Product,
    ProductConfig, ProductId, ProductSelectionSummary, Step, StepPayload, SubmissionStatus,
    Wizard, stocking,
};
use serde::{Deserialize, Serialize};
use submission::SubmissionReceipt;

use super::AppState;
use crate::error::ApiError;

// -- Request types --

/// Step input as sent by a client; catalog entries are referenced by id.
#[derive(Debug, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "lowercase")]
pub enum StepInput {
    Company(CompanyInfo),
    Products(Vec<ProductId>),
    Machines(Vec<MachineId>),
    Duration(CampaignDuration),
    Config(Vec<ProductConfig>),
}

/// Body of `POST /wizard/advance`. `{}` advances without storing anything.
#[derive(Debug, Default, Deserialize)]
pub struct AdvanceRequest {
    #[serde(default)]
    pub payload: Option<StepInput>,
}

/// Body of `POST /wizard/config/quantity`: either an absolute `quantity` or
/// a `delta`, clamped at zero.
#[derive(Debug, Deserialize)]
pub struct QuantityUpdateRequest {
    pub plan: Vec<ProductConfig>,
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub delta: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub accept_terms: bool,
}

// -- Response types --

#[derive(Serialize)]
pub struct WizardResponse {
    pub application_id: String,
    pub step: Step,
    /// 1-based position of the step, as shown in the progress bar.
    pub step_number: usize,
    pub step_label: &'static str,
    pub state: ApplicationState,
    pub submission: SubmissionStatus,
    pub product_summary: ProductSelectionSummary,
    pub machine_summary: MachineSelectionSummary,
}

impl From<&Wizard> for WizardResponse {
    fn from(wizard: &Wizard) -> Self {
        let state = wizard.state();
        Self {
            application_id: wizard.id().to_string(),
            step: wizard.step(),
            step_number: wizard.step().index() + 1,
            step_label: wizard.step().label(),
            state: state.clone(),
            submission: wizard.submission().clone(),
            product_summary: ProductSelectionSummary::of(state.selected_products()),
            machine_summary: MachineSelectionSummary::of(state.selected_machines()),
        }
    }
}

#[derive(Serialize)]
pub struct DurationsResponse {
    pub selected: CampaignDuration,
    pub quotes: Vec<DurationQuote>,
}

#[derive(Serialize)]
pub struct DraftPlanResponse {
    pub plan: Vec<ProductConfig>,
    pub total_units_per_machine: u64,
    pub inventory_cost_per_machine: Money,
}

impl DraftPlanResponse {
    fn new(plan: Vec<ProductConfig>, products: &[Product]) -> Self {
        Self {
            total_units_per_machine: pricing::total_units_per_machine(&plan),
            inventory_cost_per_machine: pricing::inventory_cost_per_machine(products, &plan),
            plan,
        }
    }
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub application_id: String,
    pub receipt_id: String,
    pub accepted_at: DateTime<Utc>,
    pub placement_fee: Money,
    pub submission: SubmissionStatus,
}

// -- Handlers --

/// GET /wizard: the current step, stored state and submission status.
pub async fn get<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
) -> Json<WizardResponse> {
    let wizard = state.wizard.lock().await;
    Json(WizardResponse::from(&*wizard))
}

/// POST /wizard/advance: validate the step's input, store it and move on.
#[tracing::instrument(skip(state, req))]
pub async fn advance<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Json(req): Json<AdvanceRequest>,
) -> Result<Json<WizardResponse>, ApiError> {
    let payload = match req.payload {
        Some(input) => Some(resolve(&state.catalog, input).await?),
        None => None,
    };

    let mut wizard = state.wizard.lock().await;
    let payload = match payload {
        Some(payload) => Some(payload.validate(wizard.state())?),
        None => {
            wizard.state().ensure_step_complete(wizard.step())?;
            None
        }
    };
    wizard.advance(payload)?;

    Ok(Json(WizardResponse::from(&*wizard)))
}

/// POST /wizard/back: return to the previous step.
#[tracing::instrument(skip(state))]
pub async fn back<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
) -> Result<Json<WizardResponse>, ApiError> {
    let mut wizard = state.wizard.lock().await;
    wizard.retreat()?;
    Ok(Json(WizardResponse::from(&*wizard)))
}

/// POST /wizard/reset: discard the session and start a new application.
#[tracing::instrument(skip(state))]
pub async fn reset<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
) -> Result<Json<WizardResponse>, ApiError> {
    let mut wizard = state.wizard.lock().await;
    if wizard.submission().is_pending() {
        return Err(ApplicationError::SubmissionInProgress.into());
    }
    *wizard = Wizard::new();
    tracing::info!(application_id = %wizard.id(), "wizard reset");
    Ok(Json(WizardResponse::from(&*wizard)))
}

/// GET /wizard/durations: quotes every offered duration for the selected machines.
pub async fn durations<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
) -> Json<DurationsResponse> {
    let wizard = state.wizard.lock().await;
    let selection = wizard.state();
    Json(DurationsResponse {
        selected: selection.duration(),
        quotes: duration_quotes(selection.selected_machines()),
    })
}

/// GET /wizard/config/default: default stocking plan for the selected products.
pub async fn default_config<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
) -> Json<DraftPlanResponse> {
    let wizard = state.wizard.lock().await;
    let products = wizard.state().selected_products();
    Json(DraftPlanResponse::new(stocking::default_plan(products), products))
}

/// GET /wizard/pricing: every figure shown on the review step.
pub async fn pricing_summary<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
) -> Json<PricingSummary> {
    let wizard = state.wizard.lock().await;
    Json(PricingSummary::for_state(wizard.state()))
}

/// POST /wizard/config/quantity: edit one product's quantity in a draft plan.
///
/// The plan is not stored; the client sends it back with the config step.
#[tracing::instrument(skip(state, req), fields(product_id = %req.product_id))]
pub async fn update_quantity<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Json(req): Json<QuantityUpdateRequest>,
) -> Result<Json<DraftPlanResponse>, ApiError> {
    let mut plan = req.plan;
    let found = match (req.quantity, req.delta) {
        (Some(quantity), None) => stocking::set_quantity(&mut plan, &req.product_id, quantity),
        (None, Some(delta)) => stocking::adjust_quantity(&mut plan, &req.product_id, delta),
        _ => {
            return Err(ApiError::BadRequest(
                "exactly one of quantity or delta is required".to_string(),
            ));
        }
    };
    if !found {
        return Err(ApplicationError::UnknownProductConfig {
            product_id: req.product_id.to_string(),
        }
        .into());
    }

    let wizard = state.wizard.lock().await;
    Ok(Json(DraftPlanResponse::new(
        plan,
        wizard.state().selected_products(),
    )))
}

/// POST /wizard/submit: hand the application to the backend.
///
/// The wizard lock is released while the backend answers; other requests
/// see the submitting status and are rejected. The answer is recorded by a
/// spawned task, so a client that disconnects mid-request cannot leave the
/// session stuck in the submitting state.
#[tracing::instrument(skip(state, req))]
pub async fn submit<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let submission = state
        .wizard
        .lock()
        .await
        .begin_submission(req.accept_terms)?;

    let application_id = submission.application_id.to_string();
    let placement_fee = submission.placement_fee;
    let (receipt, status) = tokio::spawn(finish_submission(Arc::clone(&state), submission))
        .await
        .map_err(|e| ApiError::Internal(format!("submission task failed: {e}")))??;

    Ok(Json(SubmitResponse {
        application_id,
        receipt_id: receipt.receipt_id,
        accepted_at: receipt.accepted_at,
        placement_fee,
        submission: status,
    }))
}

/// Sends a begun submission to the backend and records the answer on the wizard.
async fn finish_submission<C: CatalogProvider + 'static>(
    state: Arc<AppState<C>>,
    submission: ApplicationSubmission,
) -> Result<(SubmissionReceipt, SubmissionStatus), ApiError> {
    let outcome = state.coordinator.dispatch(&submission).await;

    let mut wizard = state.wizard.lock().await;
    match outcome {
        Ok(receipt) => {
            wizard.record_success(receipt.receipt_id.clone(), receipt.accepted_at)?;
            Ok((receipt, wizard.submission().clone()))
        }
        Err(error) => {
            wizard.record_failure(error.to_string())?;
            Err(error.into())
        }
    }
}

/// Replaces catalog ids with the entries they name.
async fn resolve<C: CatalogProvider>(catalog: &C, input: StepInput) -> Result<StepPayload, ApiError> {
    Ok(match input {
        StepInput::Company(info) => StepPayload::Company(info),
        StepInput::Products(ids) => StepPayload::Products(catalog.products_by_id(&ids).await?),
        StepInput::Machines(ids) => StepPayload::Machines(catalog.machines_by_id(&ids).await?),
        StepInput::Duration(duration) => StepPayload::Duration(duration),
        StepInput::Config(plan) => StepPayload::Config(plan),
    })
}

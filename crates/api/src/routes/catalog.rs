//! Catalog browsing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use catalog::{CatalogProvider, MachineQuery, MachineSort, categories, location_types};
use domain::pricing::ProductMargin;
use domain::{
    Machine, MachineId, MachineSelectionSummary, Money, Product, Tier, quick_select_by_tier,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Default, Deserialize)]
pub struct MachineListParams {
    pub q: Option<String>,
    pub tier: Option<String>,
    pub location_type: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuickSelectRequest {
    #[serde(default)]
    pub selected: Vec<MachineId>,
    pub tier: Tier,
    pub count: usize,
}

// -- Response types --

#[derive(Serialize)]
pub struct ProductListing {
    #[serde(flatten)]
    pub product: Product,
    pub margin_per_unit: Money,
    pub margin_percent: f64,
}

#[derive(Serialize)]
pub struct CategoryResponse {
    pub category: String,
    pub product_ids: Vec<String>,
}

#[derive(Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductListing>,
    pub categories: Vec<CategoryResponse>,
}

#[derive(Serialize)]
pub struct MachineListResponse {
    pub count: usize,
    pub machines: Vec<Machine>,
    /// Every location type in the network, for building filters.
    pub location_types: Vec<String>,
}

#[derive(Serialize)]
pub struct QuickSelectResponse {
    pub selected: Vec<MachineId>,
    pub summary: MachineSelectionSummary,
}

// -- Handlers --

/// GET /catalog/products: the brand's products with margins, grouped by category.
#[tracing::instrument(skip(state))]
pub async fn products<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let products = state.catalog.list_products().await?;

    let categories = categories(&products)
        .into_iter()
        .map(|group| CategoryResponse {
            category: group.category,
            product_ids: group.products.iter().map(|p| p.id.to_string()).collect(),
        })
        .collect();

    let products = products
        .into_iter()
        .map(|product| {
            let margin = ProductMargin::of(&product);
            ProductListing {
                product,
                margin_per_unit: margin.margin_per_unit,
                margin_percent: margin.margin_percent,
            }
        })
        .collect();

    Ok(Json(ProductListResponse {
        products,
        categories,
    }))
}

/// GET /catalog/machines: search, filter and sort the machine network.
#[tracing::instrument(skip(state))]
pub async fn machines<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Query(params): Query<MachineListParams>,
) -> Result<Json<MachineListResponse>, ApiError> {
    let query = machine_query(params)?;
    let all = state.catalog.list_machines().await?;
    let machines = query.apply(&all);

    Ok(Json(MachineListResponse {
        count: machines.len(),
        machines,
        location_types: location_types(&all),
    }))
}

/// POST /catalog/machines/quick-select: replace one tier's picks with the
/// first `count` machines of that tier.
#[tracing::instrument(skip(state, req), fields(tier = %req.tier, count = req.count))]
pub async fn quick_select<C: CatalogProvider + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Json(req): Json<QuickSelectRequest>,
) -> Result<Json<QuickSelectResponse>, ApiError> {
    let all = state.catalog.list_machines().await?;
    let selected = state.catalog.machines_by_id(&req.selected).await?;
    let picked = quick_select_by_tier(&all, &selected, req.tier, req.count);

    Ok(Json(QuickSelectResponse {
        selected: picked.iter().map(|m| m.id.clone()).collect(),
        summary: MachineSelectionSummary::of(&picked),
    }))
}

fn machine_query(params: MachineListParams) -> Result<MachineQuery, ApiError> {
    let mut query = MachineQuery::new();
    if let Some(q) = params.q {
        query = query.search(q);
    }
    if let Some(tier) = params.tier.filter(|t| t != "all") {
        query = query.tier(tier.parse::<Tier>().map_err(ApiError::BadRequest)?);
    }
    if let Some(location_type) = params.location_type.filter(|t| t != "all") {
        query = query.location_type(location_type);
    }
    if let Some(sort) = params.sort {
        query = query.sort(sort.parse::<MachineSort>().map_err(ApiError::BadRequest)?);
    }
    Ok(query)
}

//! Per-machine stocking plan.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ApplicationError, Product, ProductId};

/// Units stocked first in a machine's opening slot.
pub const LEAD_PRODUCT_QUANTITY: u32 = 40;

/// Units stocked for every other product.
pub const STANDARD_PRODUCT_QUANTITY: u32 = 30;

/// How many units of a product each selected machine is stocked with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub product_id: ProductId,
    /// Units per machine.
    pub quantity: u32,
    /// Display row in the machine, starting at 1.
    pub row: u32,
}

impl ProductConfig {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32, row: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            row,
        }
    }
}

/// Builds the default plan: one entry per product in selection order.
pub fn default_plan(products: &[Product]) -> Vec<ProductConfig> {
    products
        .iter()
        .enumerate()
        .map(|(index, product)| ProductConfig {
            product_id: product.id.clone(),
            quantity: if index == 0 {
                LEAD_PRODUCT_QUANTITY
            } else {
                STANDARD_PRODUCT_QUANTITY
            },
            row: index as u32 + 1,
        })
        .collect()
}

/// Returns the configured quantity for a product, 0 if unconfigured.
pub fn quantity_for(plan: &[ProductConfig], product_id: &ProductId) -> u32 {
    plan.iter()
        .find(|c| &c.product_id == product_id)
        .map_or(0, |c| c.quantity)
}

/// Sets a product's quantity, clamping negative input to 0.
///
/// Returns false if the product is not in the plan.
pub fn set_quantity(plan: &mut [ProductConfig], product_id: &ProductId, quantity: i64) -> bool {
    match plan.iter_mut().find(|c| &c.product_id == product_id) {
        Some(config) => {
            config.quantity = quantity.clamp(0, i64::from(u32::MAX)) as u32;
            true
        }
        None => false,
    }
}

/// Adds `delta` (possibly negative) to a product's quantity, never going below 0.
pub fn adjust_quantity(plan: &mut [ProductConfig], product_id: &ProductId, delta: i64) -> bool {
    let current = i64::from(quantity_for(plan, product_id));
    set_quantity(plan, product_id, current + delta)
}

/// Checks that the plan holds exactly one entry per selected product.
pub fn validate_plan(plan: &[ProductConfig], products: &[Product]) -> Result<(), ApplicationError> {
    let selected: HashSet<&ProductId> = products.iter().map(|p| &p.id).collect();
    let mut seen = HashSet::new();

    for config in plan {
        if !selected.contains(&config.product_id) {
            return Err(ApplicationError::UnknownProductConfig {
                product_id: config.product_id.to_string(),
            });
        }
        if !seen.insert(&config.product_id) {
            return Err(ApplicationError::DuplicateProductConfig {
                product_id: config.product_id.to_string(),
            });
        }
    }

    if let Some(missing) = products.iter().find(|p| !seen.contains(&p.id)) {
        return Err(ApplicationError::MissingProductConfig {
            product_id: missing.id.to_string(),
        });
    }

    Ok(())
}

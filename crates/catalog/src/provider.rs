//! Catalog provider trait and in-memory implementation.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{Machine, MachineId, Product, ProductId};
use tokio::sync::RwLock;

use crate::demo;
use crate::error::{CatalogError, Result};

/// Source of the products and machines a brand can choose from.
///
/// Implementations may do network I/O; callers only see the resolved lists.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Lists the brand's products.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Lists every machine in the network.
    async fn list_machines(&self) -> Result<Vec<Machine>>;

    /// Resolves product ids in the order given.
    async fn products_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let products = self.list_products().await?;
        ids.iter()
            .map(|id| {
                products
                    .iter()
                    .find(|p| &p.id == id)
                    .cloned()
                    .ok_or_else(|| CatalogError::UnknownProduct(id.to_string()))
            })
            .collect()
    }

    /// Resolves machine ids in the order given.
    async fn machines_by_id(&self, ids: &[MachineId]) -> Result<Vec<Machine>> {
        let machines = self.list_machines().await?;
        ids.iter()
            .map(|id| {
                machines
                    .iter()
                    .find(|m| &m.id == id)
                    .cloned()
                    .ok_or_else(|| CatalogError::UnknownMachine(id.to_string()))
            })
            .collect()
    }
}

/// Rejects duplicate ids and products priced below wholesale cost.
pub fn validate_products(products: &[Product]) -> Result<()> {
    let mut seen = HashSet::new();
    for product in products {
        if !seen.insert(&product.id) {
            return Err(CatalogError::DuplicateId {
                kind: "product",
                id: product.id.to_string(),
            });
        }
        if product.retail_price < product.wholesale_cost {
            return Err(CatalogError::NegativeMargin {
                product_id: product.id.to_string(),
                retail: product.retail_price.to_string(),
                wholesale: product.wholesale_cost.to_string(),
            });
        }
    }
    Ok(())
}

/// Rejects duplicate ids and machines priced outside their tier band.
pub fn validate_machines(machines: &[Machine]) -> Result<()> {
    let mut seen = HashSet::new();
    for machine in machines {
        if !seen.insert(&machine.id) {
            return Err(CatalogError::DuplicateId {
                kind: "machine",
                id: machine.id.to_string(),
            });
        }
        if !machine.price_matches_tier() {
            return Err(CatalogError::PriceOutsideTier {
                machine_id: machine.id.to_string(),
                tier: machine.tier.to_string(),
                price: machine.price_6_months.to_string(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: Vec<Product>,
    machines: Vec<Machine>,
    unavailable: bool,
}

/// Catalog held in memory, validated when built.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalog {
    /// Creates a catalog from the given entries.
    pub fn new(products: Vec<Product>, machines: Vec<Machine>) -> Result<Self> {
        validate_products(&products)?;
        validate_machines(&machines)?;
        tracing::debug!(
            products = products.len(),
            machines = machines.len(),
            "catalog loaded"
        );
        Ok(Self {
            state: Arc::new(RwLock::new(InMemoryCatalogState {
                products,
                machines,
                unavailable: false,
            })),
        })
    }

    /// Creates a catalog filled with the demo store and machine network.
    pub fn demo() -> Result<Self> {
        Self::new(demo::products(), demo::machines())
    }

    /// Makes every subsequent lookup fail as if the source were down.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.write().await.unavailable = unavailable;
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let state = self.state.read().await;
        if state.unavailable {
            return Err(CatalogError::Unavailable("product source offline".to_string()));
        }
        Ok(state.products.clone())
    }

    async fn list_machines(&self) -> Result<Vec<Machine>> {
        let state = self.state.read().await;
        if state.unavailable {
            return Err(CatalogError::Unavailable("machine registry offline".to_string()));
        }
        Ok(state.machines.clone())
    }
}

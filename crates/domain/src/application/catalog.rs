//! Catalog entries a brand chooses from.

use serde::{Deserialize, Serialize};

use super::{Coordinates, MachineId, Money, ProductId, Tier};

/// A product from the brand's store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Retail price per unit.
    pub retail_price: Money,
    /// The brand's cost per unit shipped to the warehouse.
    pub wholesale_cost: Money,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Creates a new product without an image.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        retail_price: Money,
        wholesale_cost: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            retail_price,
            wholesale_cost,
            category: category.into(),
            image: None,
        }
    }

    /// Sets the display image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A vending machine in the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: MachineId,
    pub name: String,
    /// Human-readable location label, e.g. `Shoreditch, London`.
    pub location: String,
    pub coordinates: Coordinates,
    pub tier: Tier,
    /// Average daily foot traffic past the machine.
    pub foot_traffic: u32,
    /// Placement price for a six-month campaign.
    pub price_6_months: Money,
    /// Venue kind, e.g. `Gym` or `Station`.
    pub location_type: String,
}

impl Machine {
    /// Returns true if the six-month price lies inside the tier's band.
    pub fn price_matches_tier(&self) -> bool {
        self.tier.admits_price(self.price_6_months)
    }
}

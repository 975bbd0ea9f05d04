//! Catalog error types.

use thiserror::Error;

/// Errors that can occur while loading or looking up catalog entries.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A machine's six-month price lies outside its tier's band.
    #[error("Machine {machine_id} priced at {price} is outside the {tier} tier band")]
    PriceOutsideTier {
        machine_id: String,
        tier: String,
        price: String,
    },

    /// A product sells for less than it costs wholesale.
    #[error("Product {product_id} has retail price {retail} below wholesale cost {wholesale}")]
    NegativeMargin {
        product_id: String,
        retail: String,
        wholesale: String,
    },

    /// Two catalog entries share an identifier.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// No product with this id exists.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// No machine with this id exists.
    #[error("Unknown machine: {0}")]
    UnknownMachine(String),

    /// The backing source could not be reached.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

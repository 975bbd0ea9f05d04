//! Catalog providers for the placement application.
//!
//! This crate supplies the candidate lists a brand chooses from:
//! - [`CatalogProvider`] trait over products and machines
//! - [`InMemoryCatalog`], validated on construction
//! - [`MachineQuery`] for search, filtering and sorting of machines
//! - Demo fixtures standing in for a real store and machine registry

pub mod demo;
pub mod error;
pub mod provider;
pub mod query;

pub use error::{CatalogError, Result};
pub use provider::{CatalogProvider, InMemoryCatalog};
pub use query::{CategoryGroup, MachineQuery, MachineSort, categories, location_types};

//! HTTP route handlers.

pub mod catalog;
pub mod health;
pub mod metrics;
pub mod wizard;

use ::catalog::CatalogProvider;
use domain::Wizard;
use submission::{InMemorySubmissionAdapter, SubmissionCoordinator};
use tokio::sync::Mutex;

/// Shared application state accessible from all handlers.
///
/// The process hosts a single wizard session. Each request holds the lock
/// for the duration of its action, except submission, which releases it while
/// the backend answers.
pub struct AppState<C: CatalogProvider> {
    pub catalog: C,
    pub wizard: Mutex<Wizard>,
    pub coordinator: SubmissionCoordinator<InMemorySubmissionAdapter>,
}

impl<C: CatalogProvider> AppState<C> {
    pub fn new(catalog: C, coordinator: SubmissionCoordinator<InMemorySubmissionAdapter>) -> Self {
        Self {
            catalog,
            wizard: Mutex::new(Wizard::new()),
            coordinator,
        }
    }
}

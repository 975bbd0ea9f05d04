//! Record handed to the submission adapter.

use chrono::{DateTime, Utc};
use common::ApplicationId;
use serde::{Deserialize, Serialize};

use super::{CampaignDuration, CompanyInfo, Machine, Money, Product, ProductConfig};

/// Final application, frozen at the moment the user submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub application_id: ApplicationId,
    pub company_info: CompanyInfo,
    pub products: Vec<Product>,
    pub machines: Vec<Machine>,
    pub duration: CampaignDuration,
    pub config: Vec<ProductConfig>,
    /// Placement fee for the chosen machines and duration.
    pub placement_fee: Money,
    pub submitted_at: DateTime<Utc>,
}

//! Subscription plans and the catalog seam.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::quota::RequestCategory;
use crate::types::DbId;

/// Name of the plan every new user starts on.
pub const BASIC_PLAN_NAME: &str = "Basic";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price: i32,
    /// Billing period in months; 0 means the plan never lapses.
    pub duration_months: i32,
    pub internal_requests_limit: i64,
    pub external_requests_limit: i64,
}

impl Plan {
    pub fn is_basic(&self) -> bool {
        self.name == BASIC_PLAN_NAME
    }

    /// Daily ceiling for `category`. Zero means unlimited.
    pub fn ceiling(&self, category: RequestCategory) -> i64 {
        match category {
            RequestCategory::Internal => self.internal_requests_limit,
            RequestCategory::External => self.external_requests_limit,
        }
    }

    /// Whether a caller who has already made `count` requests today is over
    /// the ceiling. The comparison is strict, so `ceiling + 1` requests pass
    /// before the first rejection.
    pub fn exceeds(&self, category: RequestCategory, count: i64) -> bool {
        let ceiling = self.ceiling(category);
        ceiling != 0 && count > ceiling
    }
}

/// Read-only access to the plan catalog.
#[async_trait]
pub trait PlanCatalog: Send + Sync {
    async fn get_one(&self, plan_id: DbId) -> Result<Plan, CoreError>;

    /// The plan named [`BASIC_PLAN_NAME`].
    async fn get_one_by_default_name(&self) -> Result<Plan, CoreError>;
}

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use faker_core::error::CoreError;
use faker_core::plan::{Plan, PlanCatalog, BASIC_PLAN_NAME};
use faker_core::types::DbId;

/// A fixed set of plans. Starts with a single Basic plan (id 1).
pub struct StaticPlanCatalog {
    plans: Mutex<HashMap<DbId, Plan>>,
}

impl StaticPlanCatalog {
    /// Basic plan with the given daily ceilings (0 = unlimited).
    pub fn with_basic_limits(internal: i64, external: i64) -> Self {
        let basic = Plan {
            id: 1,
            name: BASIC_PLAN_NAME.to_string(),
            description: "Free tier".to_string(),
            price: 0,
            duration_months: 0,
            internal_requests_limit: internal,
            external_requests_limit: external,
        };
        Self {
            plans: Mutex::new(HashMap::from([(basic.id, basic)])),
        }
    }

    pub fn insert(&self, plan: Plan) {
        self.plans
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(plan.id, plan);
    }
}

impl Default for StaticPlanCatalog {
    fn default() -> Self {
        Self::with_basic_limits(0, 0)
    }
}

#[async_trait]
impl PlanCatalog for StaticPlanCatalog {
    async fn get_one(&self, plan_id: DbId) -> Result<Plan, CoreError> {
        self.plans
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&plan_id)
            .cloned()
            .ok_or(CoreError::not_found("Plan"))
    }

    async fn get_one_by_default_name(&self) -> Result<Plan, CoreError> {
        self.plans
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .find(|p| p.is_basic())
            .cloned()
            .ok_or(CoreError::not_found("Plan"))
    }
}

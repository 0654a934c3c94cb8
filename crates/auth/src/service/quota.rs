//! Per-plan daily request quotas.

use std::future::Future;

use chrono::Utc;
use faker_core::error::CoreError;
use faker_core::quota::{RequestCategory, Usage};
use faker_core::types::DbId;

use super::AuthCoordinator;

impl AuthCoordinator {
    /// Run `action` if the caller is within today's ceiling for `category`,
    /// and count it once it succeeds.
    ///
    /// The check compares the count *before* this request against the plan
    /// ceiling with a strict `>`, so `ceiling + 1` requests pass per day.
    /// A failed action is not counted.
    pub async fn with_quota<T, F, Fut>(
        &self,
        user_id: DbId,
        plan_id: DbId,
        category: RequestCategory,
        action: F,
    ) -> Result<T, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        self.check_quota(user_id, plan_id, category).await?;
        let output = action().await?;
        self.quotas.record(user_id, category, Utc::now()).await?;
        Ok(output)
    }

    async fn check_quota(
        &self,
        user_id: DbId,
        plan_id: DbId,
        category: RequestCategory,
    ) -> Result<(), CoreError> {
        let count = self.quotas.get_by_user_id(user_id, category).await?;
        let plan = self.plans.get_one(plan_id).await?;

        if plan.exceeds(category, count) {
            tracing::info!(
                user_id,
                plan_id,
                %category,
                count,
                ceiling = plan.ceiling(category),
                "Request limit reached"
            );
            return Err(CoreError::RequestLimitExceeded);
        }
        Ok(())
    }

    /// Today's request counts for both categories.
    pub async fn usage_today(&self, user_id: DbId) -> Result<Usage, CoreError> {
        self.quotas.usage(user_id).await
    }
}

//! Repository for the `plans` table.

use faker_core::types::DbId;
use sqlx::PgPool;

use crate::models::plan::PlanRow;

const COLUMNS: &str = "id, name, description, price, duration_months, \
                        internal_requests_limit, external_requests_limit";

pub struct PlanRepo;

impl PlanRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PlanRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plans WHERE id = $1");
        sqlx::query_as::<_, PlanRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a plan by its unique name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<PlanRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plans WHERE name = $1");
        sqlx::query_as::<_, PlanRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}

use faker_core::plan::Plan;
use faker_core::types::DbId;
use sqlx::FromRow;

/// A row from the `plans` table.
#[derive(Debug, Clone, FromRow)]
pub struct PlanRow {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub duration_months: i32,
    pub internal_requests_limit: i64,
    pub external_requests_limit: i64,
}

impl From<PlanRow> for Plan {
    fn from(row: PlanRow) -> Self {
        Plan {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            duration_months: row.duration_months,
            internal_requests_limit: row.internal_requests_limit,
            external_requests_limit: row.external_requests_limit,
        }
    }
}

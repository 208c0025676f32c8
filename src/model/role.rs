use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog entry for a staffing job title (cargo).
///
/// Monetary columns are stored in centavos.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 3,
        "name": "Enfermeiro",
        "base_salary": 450000,
        "additional_cost_rate": 0.8,
        "overtime_value": 3500,
        "contracted_hours": 180.0,
        "is_fixed_allocation": false
    })
)]
pub struct Role {
    #[schema(example = 3)]
    pub id: u64,

    #[schema(example = "Enfermeiro")]
    pub name: String,

    /// Monthly base salary, centavos.
    #[schema(example = 450000)]
    pub base_salary: i64,

    /// Charges applied on top of the salary (0.8 = 80%).
    #[schema(example = 0.8)]
    pub additional_cost_rate: f64,

    /// Hourly overtime value, centavos.
    #[schema(example = 3500)]
    pub overtime_value: i64,

    /// Contracted hours per employee per month.
    #[schema(example = 180.0)]
    pub contracted_hours: f64,

    /// Projected headcount is display-only for these roles.
    pub is_fixed_allocation: bool,
}

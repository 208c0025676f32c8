use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Recorded snapshot of sector-level costs, the comparison point for the
/// Pareto analysis.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Baseline {
    #[schema(example = 12)]
    pub id: u64,

    #[schema(example = "Baseline 2025 Q4")]
    pub name: String,

    #[schema(example = "2025-11-30T10:15:00", value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,
}

/// One sector cost entry of a baseline.
///
/// `active` is the Pareto selection flag; toggling it is persisted
/// per-sector and mirrored in the in-memory working copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SectorCost {
    #[schema(example = "UTI Adulto")]
    pub name: String,

    /// Sector cost in centavos.
    #[schema(example = 123456)]
    pub cost_centavos: i64,

    pub active: bool,
}

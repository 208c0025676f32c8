use serde::Serialize;
use utoipa::ToSchema;

/// Functional site (sítio funcional) of a non-admission unit.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Site {
    #[schema(example = 7)]
    pub id: u64,

    #[schema(example = 2)]
    pub unit_id: u64,

    #[schema(example = "Centro Cirúrgico")]
    pub name: String,
}

use crate::{
    finance::row::RowCostBreakdown,
    finance::totals::{CostGroup, CostGroupBreakdown, StaffingTotals, grand_total},
    model::{
        site::Site,
        staffing::UnitRoleRow,
        unit::{Unit, UnitKind},
    },
};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

/// Financial analysis of an admission (ward) unit: a flat costed table.
#[derive(Serialize, ToSchema)]
pub struct WardAnalysisResponse {
    #[schema(example = 1)]
    pub unit_id: u64,

    #[schema(example = "UTI Adulto")]
    pub unit_name: String,

    #[schema(example = "admission")]
    pub kind: String,

    #[schema(example = 120.0)]
    pub projected_overtime_hours: f64,

    pub rows: Vec<RowCostBreakdown>,
    pub totals: StaffingTotals,
}

/// Financial analysis of a non-admission unit: one costed table per
/// functional site plus the grand totals.
#[derive(Serialize, ToSchema)]
pub struct SiteAnalysisResponse {
    #[schema(example = 2)]
    pub unit_id: u64,

    #[schema(example = "Ambulatório Central")]
    pub unit_name: String,

    #[schema(example = "non_admission")]
    pub kind: String,

    #[schema(example = 0.0)]
    pub projected_overtime_hours: f64,

    pub sites: Vec<CostGroupBreakdown>,
    pub totals: StaffingTotals,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateProjectedHeadcount {
    #[schema(example = 12)]
    pub projected_headcount: i64,
}

async fn fetch_staffing_rows(
    pool: &MySqlPool,
    unit_id: u64,
) -> Result<Vec<UnitRoleRow>, sqlx::Error> {
    sqlx::query_as::<_, UnitRoleRow>(
        r#"
        SELECT
            ur.id,
            ur.unit_id,
            ur.site_id,
            ur.role_id,
            r.name AS role_name,
            r.is_fixed_allocation,
            r.base_salary,
            r.additional_cost_rate,
            r.overtime_value,
            ur.cost_per_employee,
            r.contracted_hours,
            ur.current_headcount,
            ur.projected_headcount
        FROM unit_roles ur
        JOIN roles r ON r.id = ur.role_id
        WHERE ur.unit_id = ?
        ORDER BY ur.site_id, ur.id
        "#,
    )
    .bind(unit_id)
    .fetch_all(pool)
    .await
}

/// Financial analysis for one unit
///
/// Recomputed from a fresh snapshot of the staffing rows on every call;
/// nothing here is stateful.
#[utoipa::path(
    get,
    path = "/api/v1/analysis/unit/{unit_id}",
    params(
        ("unit_id", Path, description = "Unit ID")
    ),
    responses(
        (status = 200, description = "Current vs. projected staffing costs", body = WardAnalysisResponse),
        (status = 404, description = "Unit not found", body = Object, example = json!({
            "message": "Unit not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Analysis"
)]
pub async fn unit_analysis(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let unit_id = path.into_inner();

    let unit = sqlx::query_as::<_, Unit>(
        r#"
        SELECT id, hospital_id, name, kind, projected_overtime_hours
        FROM units
        WHERE id = ?
        "#,
    )
    .bind(unit_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, unit_id, "Failed to fetch unit");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let unit = match unit {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Unit not found"
            })));
        }
    };

    let kind = unit.unit_kind().map_err(|e| {
        error!(error = %e, unit_id, kind = %unit.kind, "Unit has an unknown kind");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let staffing = fetch_staffing_rows(pool.get_ref(), unit_id)
        .await
        .map_err(|e| {
            error!(error = %e, unit_id, "Failed to fetch staffing rows");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match kind {
        UnitKind::Admission => {
            let rows: Vec<RowCostBreakdown> = staffing
                .iter()
                .map(|r| r.to_cost_row().breakdown())
                .collect();
            let totals = StaffingTotals::from_rows(&rows);

            Ok(HttpResponse::Ok().json(WardAnalysisResponse {
                unit_id: unit.id,
                unit_name: unit.name,
                kind: unit.kind,
                projected_overtime_hours: unit.projected_overtime_hours,
                rows,
                totals,
            }))
        }
        UnitKind::NonAdmission => {
            let sites = sqlx::query_as::<_, Site>(
                r#"
                SELECT id, unit_id, name
                FROM sites
                WHERE unit_id = ?
                ORDER BY id
                "#,
            )
            .bind(unit_id)
            .fetch_all(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, unit_id, "Failed to fetch sites");
                ErrorInternalServerError("Internal Server Error")
            })?;

            let groups: Vec<CostGroupBreakdown> = sites
                .iter()
                .map(|site| {
                    CostGroup {
                        group_id: site.id,
                        group_name: site.name.clone(),
                        rows: staffing
                            .iter()
                            .filter(|r| r.site_id == Some(site.id))
                            .map(UnitRoleRow::to_cost_row)
                            .collect(),
                    }
                    .breakdown()
                })
                .collect();

            let totals = grand_total(&groups);

            Ok(HttpResponse::Ok().json(SiteAnalysisResponse {
                unit_id: unit.id,
                unit_name: unit.name,
                kind: unit.kind,
                projected_overtime_hours: unit.projected_overtime_hours,
                sites: groups,
                totals,
            }))
        }
    }
}

/// Update the projected headcount of one staffing row
///
/// Fixed-allocation roles keep their projection read-only.
#[utoipa::path(
    put,
    path = "/api/v1/analysis/unit/{unit_id}/row/{row_id}/projected",
    params(
        ("unit_id", Path, description = "Unit ID"),
        ("row_id", Path, description = "Staffing row ID")
    ),
    request_body = UpdateProjectedHeadcount,
    responses(
        (status = 200, description = "Projected headcount updated", body = Object, example = json!({
            "message": "Projected headcount updated"
        })),
        (status = 400, description = "Negative headcount, or a fixed-allocation role", body = Object, example = json!({
            "message": "Projected headcount is fixed for this role"
        })),
        (status = 404, description = "Staffing row not found", body = Object, example = json!({
            "message": "Staffing row not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Analysis"
)]
pub async fn update_projected_headcount(
    pool: web::Data<MySqlPool>,
    path: web::Path<(u64, u64)>,
    body: web::Json<UpdateProjectedHeadcount>,
) -> actix_web::Result<impl Responder> {
    let (unit_id, row_id) = path.into_inner();

    if body.projected_headcount < 0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Projected headcount cannot be negative"
        })));
    }

    let is_fixed = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT r.is_fixed_allocation
        FROM unit_roles ur
        JOIN roles r ON r.id = ur.role_id
        WHERE ur.id = ? AND ur.unit_id = ?
        "#,
    )
    .bind(row_id)
    .bind(unit_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, unit_id, row_id, "Failed to fetch staffing row");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match is_fixed {
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Staffing row not found"
            })));
        }
        Some(true) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": "Projected headcount is fixed for this role"
            })));
        }
        Some(false) => {}
    }

    sqlx::query(
        r#"
        UPDATE unit_roles
        SET projected_headcount = ?
        WHERE id = ? AND unit_id = ?
        "#,
    )
    .bind(body.projected_headcount)
    .bind(row_id)
    .bind(unit_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, unit_id, row_id, "Failed to update projected headcount");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Projected headcount updated"
    })))
}

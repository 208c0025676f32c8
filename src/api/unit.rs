use crate::model::{site::Site, unit::Unit};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UnitQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub hospital_id: Option<u64>,
    /// `admission` or `non_admission`
    pub kind: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct UnitListResponse {
    pub data: Vec<Unit>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 6)]
    pub total: i64,
}

#[derive(Serialize, ToSchema)]
pub struct UnitDetailResponse {
    pub unit: Unit,
    /// Functional sites; empty for admission (ward) units
    pub sites: Vec<Site>,
}

#[utoipa::path(
    get,
    path = "/api/v1/units",
    params(
        ("page",  Query, description = "Page number"),
        ("per_page", Query, description = "Items per page"),
        ("hospital_id", Query, description = "Filter by hospital"),
        ("kind", Query, description = "Filter by unit kind (admission | non_admission)")
    ),
    responses(
        (status = 200, description = "Paginated unit list", body = UnitListResponse)
    ),
    tag = "Units"
)]
pub async fn list_units(
    pool: web::Data<MySqlPool>,
    query: web::Query<UnitQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    // ---------- build WHERE clause dynamically ----------
    let mut conditions = Vec::new();
    let mut bindings: Vec<sqlx::types::JsonValue> = Vec::new();

    if let Some(hospital_id) = query.hospital_id {
        conditions.push("hospital_id = ?");
        bindings.push(hospital_id.into());
    }

    if let Some(kind) = &query.kind {
        conditions.push("kind = ?");
        bindings.push(kind.clone().into());
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) as total FROM units {}", where_clause);
    debug!(sql = %count_sql, bindings = ?bindings, "Counting units");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_query = count_query.bind(b);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count units");
        ErrorInternalServerError("Database error")
    })?;

    // ---------- data query ----------
    let data_sql = format!(
        "SELECT * FROM units {} ORDER BY name LIMIT ? OFFSET ?",
        where_clause
    );
    debug!(sql = %data_sql, bindings = ?bindings, page, per_page, offset, "Fetching units");

    let mut data_query = sqlx::query_as::<_, Unit>(&data_sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }
    data_query = data_query.bind(per_page as i64).bind(offset as i64);

    let units = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch units");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(UnitListResponse {
        data: units,
        page,
        per_page,
        total,
    }))
}

/// Get Unit by ID, with its functional sites
#[utoipa::path(
    get,
    path = "/api/v1/units/{unit_id}",
    params(
        ("unit_id", Path, description = "Unit ID")
    ),
    responses(
        (status = 200, description = "Unit found", body = UnitDetailResponse),
        (status = 404, description = "Unit not found", body = Object, example = json!({
            "message": "Unit not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Units"
)]
pub async fn get_unit(
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

    Ok(HttpResponse::Ok().json(UnitDetailResponse { unit, sites }))
}

use crate::{
    config::Config,
    finance::currency::{format_brl, centavos_to_reais, parse_centavos, reais_to_centavos},
    finance::pareto::{ParetoEntry, ParetoRanking, rank, rank_selected},
    model::baseline::{Baseline, SectorCost},
    utils::baseline_cache,
    utils::db_utils::{SqlValue, build_update_sql, execute_update},
};
use actix_web::{
    HttpResponse, Responder,
    error::{ErrorBadRequest, ErrorInternalServerError},
    web,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct BaselineQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct BaselineListResponse {
    pub data: Vec<Baseline>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 4)]
    pub total: i64,
}

/// One sector entry, cost rendered in the dashboard's currency format.
#[derive(Serialize, ToSchema)]
pub struct SectorResponse {
    #[schema(example = "UTI Adulto")]
    pub name: String,

    #[schema(example = "R$ 1.234,56")]
    pub cost: String,

    #[schema(example = 123456)]
    pub cost_centavos: i64,

    pub active: bool,
}

#[derive(Serialize, ToSchema)]
pub struct BaselineDetailResponse {
    #[schema(example = 12)]
    pub id: u64,

    #[schema(example = "Baseline 2025 Q4")]
    pub name: String,

    #[schema(example = "2025-11-30T10:15:00", value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,

    pub sectors: Vec<SectorResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct BaselineParetoResponse {
    #[schema(example = 12)]
    pub baseline_id: u64,

    /// Every sector, ranked descending by cost
    pub all: ParetoRanking,

    /// Only the selected sectors, percentages relative to their own subtotal
    pub selected: ParetoRanking,
}

/// Normalize a sector PATCH payload.
///
/// `cost` comes from a free-text currency field: a string is parsed with the
/// trailing-two-digits-are-centavos rule ("R$ 1,50", "1.50" and "150" all
/// mean 150 centavos); a JSON number is taken as reais. `active` passes
/// through. Anything else is rejected.
fn normalize_sector_update(payload: &Value) -> Result<Value, actix_web::Error> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ErrorBadRequest("Payload must be a JSON object"))?;

    let mut normalized = serde_json::Map::new();

    for (key, value) in obj {
        match (key.as_str(), value) {
            ("cost", Value::String(s)) => {
                normalized.insert("cost_centavos".to_string(), json!(parse_centavos(s)));
            }
            ("cost", Value::Number(n)) => {
                let reais = n
                    .as_f64()
                    .ok_or_else(|| ErrorBadRequest("Invalid cost value"))?;
                normalized.insert("cost_centavos".to_string(), json!(reais_to_centavos(reais)));
            }
            ("active", Value::Bool(_)) => {
                normalized.insert("active".to_string(), value.clone());
            }
            _ => {
                return Err(ErrorBadRequest(format!("Unsupported field: {}", key)));
            }
        }
    }

    Ok(Value::Object(normalized))
}

#[utoipa::path(
    get,
    path = "/api/v1/baselines",
    params(
        ("page",  Query, description = "Page number"),
        ("per_page", Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated baseline list", body = BaselineListResponse)
    ),
    tag = "Baselines"
)]
pub async fn list_baselines(
    pool: web::Data<MySqlPool>,
    query: web::Query<BaselineQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    let total = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM baselines"#)
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count baselines");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let data = sqlx::query_as::<_, Baseline>(
        r#"
        SELECT id, name, created_at
        FROM baselines
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(per_page as i64)
    .bind(offset as i64)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch baseline list");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(BaselineListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

/// Get a baseline with its sector cost entries
#[utoipa::path(
    get,
    path = "/api/v1/baselines/{baseline_id}",
    params(
        ("baseline_id", Path, description = "Baseline ID")
    ),
    responses(
        (status = 200, description = "Baseline found", body = BaselineDetailResponse),
        (status = 404, description = "Baseline not found", body = Object, example = json!({
            "message": "Baseline not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Baselines"
)]
pub async fn get_baseline(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let baseline_id = path.into_inner();

    let baseline = sqlx::query_as::<_, Baseline>(
        r#"
        SELECT id, name, created_at
        FROM baselines
        WHERE id = ?
        "#,
    )
    .bind(baseline_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, baseline_id, "Failed to fetch baseline");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let baseline = match baseline {
        Some(b) => b,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Baseline not found"
            })));
        }
    };

    let sectors = baseline_cache::sectors_or_load(pool.get_ref(), baseline_id)
        .await
        .map_err(|e| {
            error!(error = %e, baseline_id, "Failed to fetch baseline sectors");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let sectors = sectors
        .iter()
        .map(|s| SectorResponse {
            name: s.name.clone(),
            cost: format_brl(s.cost_centavos),
            cost_centavos: s.cost_centavos,
            active: s.active,
        })
        .collect();

    Ok(HttpResponse::Ok().json(BaselineDetailResponse {
        id: baseline.id,
        name: baseline.name,
        created_at: baseline.created_at,
        sectors,
    }))
}

/// Update one sector cost entry
///
/// Accepts `cost` (locale-formatted or raw numeric) and/or `active`.
#[utoipa::path(
    patch,
    path = "/api/v1/baselines/{baseline_id}/sectors/{sector_name}",
    params(
        ("baseline_id", Path, description = "Baseline ID"),
        ("sector_name", Path, description = "Sector name")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Sector updated successfully", body = Object, example = json!({
            "message": "Sector updated successfully"
        })),
        (status = 400, description = "Unsupported or empty payload"),
        (status = 404, description = "Sector not found", body = Object, example = json!({
            "message": "Sector not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Baselines"
)]
pub async fn update_sector(
    pool: web::Data<MySqlPool>,
    path: web::Path<(u64, String)>,
    body: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    let (baseline_id, sector_name) = path.into_inner();

    let normalized = normalize_sector_update(&body)?;
    debug!(baseline_id, sector = %sector_name, payload = ?normalized, "Updating sector");

    let update = build_update_sql(
        "baseline_sectors",
        &normalized,
        vec![
            ("baseline_id", SqlValue::I64(baseline_id as i64)),
            ("name", SqlValue::String(sector_name.clone())),
        ],
    )?;

    let affected = execute_update(pool.get_ref(), update).await.map_err(|e| {
        error!(error = %e, baseline_id, sector = %sector_name, "Failed to update sector");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Sector not found"
        })));
    }

    // drop the working copy so the next read sees the new values
    baseline_cache::invalidate(baseline_id).await;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Sector updated successfully"
    })))
}

/// Pareto distribution of a baseline's sector costs
///
/// `all` ranks every sector; `selected` re-runs the ranking over the
/// selected subset with percentages relative to that subset's own total.
#[utoipa::path(
    get,
    path = "/api/v1/baselines/{baseline_id}/pareto",
    params(
        ("baseline_id", Path, description = "Baseline ID")
    ),
    responses(
        (status = 200, description = "Cost-ranked sectors with cumulative percentages", body = BaselineParetoResponse),
        (status = 404, description = "Baseline not found", body = Object, example = json!({
            "message": "Baseline not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Baselines"
)]
pub async fn baseline_pareto(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let baseline_id = path.into_inner();

    let exists = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM baselines WHERE id = ?"#)
        .bind(baseline_id)
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, baseline_id, "Failed to fetch baseline");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if exists == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Baseline not found"
        })));
    }

    let sectors = baseline_cache::sectors_or_load(pool.get_ref(), baseline_id)
        .await
        .map_err(|e| {
            error!(error = %e, baseline_id, "Failed to fetch baseline sectors");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let entries: Vec<ParetoEntry> = sectors
        .iter()
        .map(|s| ParetoEntry {
            label: s.name.clone(),
            cost: centavos_to_reais(s.cost_centavos),
            selected: s.active,
        })
        .collect();

    let focus_percent = config.pareto_focus_percent;
    let selected = rank_selected(&entries, focus_percent);
    let all = rank(entries, focus_percent);

    Ok(HttpResponse::Ok().json(BaselineParetoResponse {
        baseline_id,
        all,
        selected,
    }))
}

/// Toggle a sector's Pareto selection
///
/// The working copy is flipped first, then the change is persisted; if the
/// write fails the pre-toggle snapshot is restored and an error returned.
#[utoipa::path(
    put,
    path = "/api/v1/baselines/{baseline_id}/sectors/{sector_name}/toggle",
    params(
        ("baseline_id", Path, description = "Baseline ID"),
        ("sector_name", Path, description = "Sector name")
    ),
    responses(
        (status = 200, description = "Selection toggled", body = Object, example = json!({
            "name": "UTI Adulto",
            "active": false
        })),
        (status = 404, description = "Sector not found", body = Object, example = json!({
            "message": "Sector not found"
        })),
        (status = 500, description = "Selection change was not saved", body = Object, example = json!({
            "message": "Selection change was not saved"
        }))
    ),
    tag = "Baselines"
)]
pub async fn toggle_sector(
    pool: web::Data<MySqlPool>,
    path: web::Path<(u64, String)>,
) -> actix_web::Result<impl Responder> {
    let (baseline_id, sector_name) = path.into_inner();

    let sectors = baseline_cache::sectors_or_load(pool.get_ref(), baseline_id)
        .await
        .map_err(|e| {
            error!(error = %e, baseline_id, "Failed to fetch baseline sectors");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let snapshot: Vec<SectorCost> = sectors.as_ref().clone();

    let mut updated = snapshot.clone();
    let position = match updated.iter().position(|s| s.name == sector_name) {
        Some(p) => p,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Sector not found"
            })));
        }
    };

    updated[position].active = !updated[position].active;
    let new_active = updated[position].active;

    // speculative local update; rolled back below if the write fails
    baseline_cache::store_sectors(baseline_id, updated).await;

    let result = sqlx::query(
        r#"
        UPDATE baseline_sectors
        SET active = ?
        WHERE baseline_id = ? AND name = ?
        "#,
    )
    .bind(new_active)
    .bind(baseline_id)
    .bind(&sector_name)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(res) => {
            // the flip always changes the row, so zero means it is gone
            if res.rows_affected() == 0 {
                baseline_cache::store_sectors(baseline_id, snapshot).await;
                return Ok(HttpResponse::NotFound().json(json!({
                    "message": "Sector not found"
                })));
            }

            Ok(HttpResponse::Ok().json(json!({
                "name": sector_name,
                "active": new_active
            })))
        }
        Err(e) => {
            baseline_cache::store_sectors(baseline_id, snapshot).await;
            error!(error = %e, baseline_id, sector = %sector_name, "Toggle persist failed");

            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Selection change was not saved"
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cost_string_is_parsed_as_typed_digits() {
        let normalized = normalize_sector_update(&json!({ "cost": "R$ 1.234,56" })).unwrap();
        assert_eq!(normalized, json!({ "cost_centavos": 123456 }));

        let normalized = normalize_sector_update(&json!({ "cost": "150" })).unwrap();
        assert_eq!(normalized, json!({ "cost_centavos": 150 }));
    }

    #[test]
    fn cost_number_is_taken_as_reais() {
        let normalized = normalize_sector_update(&json!({ "cost": 123.45 })).unwrap();
        assert_eq!(normalized, json!({ "cost_centavos": 12345 }));
    }

    #[test]
    fn active_passes_through() {
        let normalized =
            normalize_sector_update(&json!({ "active": false, "cost": "200" })).unwrap();
        assert_eq!(
            normalized,
            json!({ "active": false, "cost_centavos": 200 })
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(normalize_sector_update(&json!({ "name": "x" })).is_err());
        assert!(normalize_sector_update(&json!({ "active": "yes" })).is_err());
        assert!(normalize_sector_update(&json!("cost")).is_err());
    }
}

use crate::{
    model::role::Role,
    utils::db_utils::{SqlValue, build_update_sql, execute_update},
};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateRole {
    #[schema(example = "Enfermeiro")]
    pub name: String,

    /// Monthly base salary, centavos
    #[schema(example = 450000)]
    pub base_salary: i64,

    /// Charges applied on top of the salary (0.8 = 80%)
    #[schema(example = 0.8)]
    pub additional_cost_rate: f64,

    /// Hourly overtime value, centavos
    #[schema(example = 3500)]
    pub overtime_value: i64,

    #[schema(example = 180.0)]
    pub contracted_hours: f64,

    #[schema(example = false)]
    pub is_fixed_allocation: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub is_fixed_allocation: Option<bool>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RoleListResponse {
    #[schema(
    example = json!([{
        "id": 3,
        "name": "Enfermeiro",
        "base_salary": 450000,
        "additional_cost_rate": 0.8,
        "overtime_value": 3500,
        "contracted_hours": 180.0,
        "is_fixed_allocation": false
    }])
)]
    pub data: Vec<Role>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 9)]
    pub total: i64,
}

/// Create Role
#[utoipa::path(
    post,
    path = "/api/v1/roles",
    request_body = CreateRole,
    responses(
        (status = 200, description = "Role created successfully", body = Object, example = json!({
            "message": "Role created successfully"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Roles"
)]
pub async fn create_role(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateRole>,
) -> impl Responder {
    let result = sqlx::query(
        r#"
        INSERT INTO roles
        (name, base_salary, additional_cost_rate, overtime_value, contracted_hours, is_fixed_allocation)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.name)
    .bind(payload.base_salary)
    .bind(payload.additional_cost_rate)
    .bind(payload.overtime_value)
    .bind(payload.contracted_hours)
    .bind(payload.is_fixed_allocation)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => HttpResponse::Ok().json(json!({
            "message": "Role created successfully"
        })),
        Err(e) => {
            error!(error = %e, "Failed to create role");
            HttpResponse::InternalServerError().json(json!({
                "message":"Something went wrong, Contact with system admin"
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/roles",
    params(
        ("page",  Query, description = "Page number"),
        ("per_page", Query, description = "Items per page"),
        ("is_fixed_allocation", Query, description = "Filter by fixed-allocation flag"),
        ("search", Query, description = "Search by role name")
    ),
    responses(
        (status = 200, description = "Paginated role list", body = RoleListResponse)
    ),
    tag = "Roles"
)]
pub async fn list_roles(
    pool: web::Data<MySqlPool>,
    query: web::Query<RoleQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    // ---------- build WHERE clause dynamically ----------
    let mut conditions = Vec::new();
    let mut bindings: Vec<sqlx::types::JsonValue> = Vec::new();

    if let Some(is_fixed) = query.is_fixed_allocation {
        conditions.push("is_fixed_allocation = ?");
        bindings.push(is_fixed.into());
    }

    if let Some(search) = &query.search {
        conditions.push("name LIKE ?");
        bindings.push(format!("%{}%", search).into());
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) as total FROM roles {}", where_clause);
    debug!(sql = %count_sql, bindings = ?bindings, "Counting roles");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_query = count_query.bind(b);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count roles");
        ErrorInternalServerError("Database error")
    })?;

    // ---------- data query ----------
    let data_sql = format!(
        "SELECT * FROM roles {} ORDER BY name LIMIT ? OFFSET ?",
        where_clause
    );
    debug!(sql = %data_sql, bindings = ?bindings, page, per_page, offset, "Fetching roles");

    let mut data_query = sqlx::query_as::<_, Role>(&data_sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }
    data_query = data_query.bind(per_page as i64).bind(offset as i64);

    let roles = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch roles");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(RoleListResponse {
        data: roles,
        page,
        per_page,
        total,
    }))
}

/// Get Role by ID
#[utoipa::path(
    get,
    path = "/api/v1/roles/{role_id}",
    params(
        ("role_id", Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role found", body = Role),
        (status = 404, description = "Role not found", body = Object, example = json!({
            "message": "Role not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Roles"
)]
pub async fn get_role(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let role_id = path.into_inner();

    let role = sqlx::query_as::<_, Role>(
        r#"
        SELECT id, name, base_salary, additional_cost_rate, overtime_value,
               contracted_hours, is_fixed_allocation
        FROM roles
        WHERE id = ?
        "#,
    )
    .bind(role_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, role_id, "Failed to fetch role");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match role {
        Some(r) => Ok(HttpResponse::Ok().json(r)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Role not found"
        }))),
    }
}

/// Update Role
#[utoipa::path(
    put,
    path = "/api/v1/roles/{role_id}",
    params(
        ("role_id", Path, description = "Role ID")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Role updated successfully", body = Object, example = json!({
            "message": "Role updated successfully"
        })),
        (status = 404, description = "Role not found", body = Object, example = json!({
            "message": "Role not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Roles"
)]
pub async fn update_role(
    pool: web::Data<MySqlPool>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    let role_id = path.into_inner();

    let update = build_update_sql("roles", &body, vec![("id", SqlValue::I64(role_id))])?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(|e| {
            error!(error = %e, role_id, "Failed to update role");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Role not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Role updated successfully"
    })))
}

/// Delete Role
#[utoipa::path(
    delete,
    path = "/api/v1/roles/{role_id}",
    params(
        ("role_id", Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Role not found", body = Object, example = json!({
            "message": "Role not found"
        })),
        (status = 500, description = "Internal server error", body = Object)
    ),
    tag = "Roles"
)]
pub async fn delete_role(
    pool: web::Data<MySqlPool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let role_id = path.into_inner();

    let result = sqlx::query(r#"DELETE FROM roles WHERE id = ?"#)
        .bind(role_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(res) => {
            if res.rows_affected() == 0 {
                return Ok(HttpResponse::NotFound().json(json!({
                    "message": "Role not found"
                })));
            }

            Ok(HttpResponse::Ok().json(json!({
                "message": "Successfully deleted"
            })))
        }

        Err(e) => {
            error!(error = %e, role_id, "Failed to delete role");

            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

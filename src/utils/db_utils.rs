use serde_json::Value;
use chrono::{NaiveDate, NaiveDateTime};
use actix_web::error::ErrorBadRequest;
use sqlx::MySqlPool;


/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, PartialEq)]
pub enum SqlValue {
    String(String),
    I64(i64),
    F64(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Null,
}


/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}


/// ===============================
/// Build dynamic UPDATE SQL
/// ===============================
/// `keys` are the WHERE columns, ANDed together; baselines key their
/// sector rows by (baseline_id, name), catalog tables by plain id.
pub fn build_update_sql(
    table: &str,
    payload: &Value,
    keys: Vec<(&str, SqlValue)>,
) -> Result<SqlUpdate, actix_web::Error> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ErrorBadRequest("Payload must be a JSON object"))?;

    if obj.is_empty() {
        return Err(ErrorBadRequest("No fields provided for update"));
    }

    // Build SET clause
    let set_clause = obj
        .keys()
        .map(|k| format!("{} = ?", k))
        .collect::<Vec<_>>()
        .join(", ");

    let where_clause = keys
        .iter()
        .map(|(column, _)| format!("{} = ?", column))
        .collect::<Vec<_>>()
        .join(" AND ");

    let sql = format!(
        "UPDATE {} SET {} WHERE {}",
        table, set_clause, where_clause
    );

    let mut values = Vec::with_capacity(obj.len() + keys.len());

    // Convert JSON values → SqlValue
    for value in obj.values() {
        match value {
            Value::String(s) => {
                if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    values.push(SqlValue::Date(d));
                } else if let Ok(dt) =
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                {
                    values.push(SqlValue::DateTime(dt));
                } else {
                    values.push(SqlValue::String(s.clone()));
                }
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    values.push(SqlValue::I64(i));
                } else if let Some(f) = n.as_f64() {
                    values.push(SqlValue::F64(f));
                }
            }
            Value::Bool(b) => values.push(SqlValue::Bool(*b)),
            Value::Null => values.push(SqlValue::Null),
            _ => return Err(ErrorBadRequest("Unsupported JSON value type")),
        }
    }

    for (_, key_value) in keys {
        values.push(key_value);
    }

    Ok(SqlUpdate { sql, values })
}


/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update(
    pool: &MySqlPool,
    update: SqlUpdate,
) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::String(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
            SqlValue::F64(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
            SqlValue::DateTime(v) => query.bind(v),
            SqlValue::Null => query.bind(None::<String>),
        };
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn builds_single_key_update() {
        let payload = json!({ "contracted_hours": 150.0 });
        let update =
            build_update_sql("roles", &payload, vec![("id", SqlValue::I64(3))]).unwrap();

        assert_eq!(update.sql, "UPDATE roles SET contracted_hours = ? WHERE id = ?");
        assert_eq!(
            update.values,
            vec![SqlValue::F64(150.0), SqlValue::I64(3)]
        );
    }

    #[test]
    fn builds_compound_key_update() {
        let payload = json!({ "active": false });
        let update = build_update_sql(
            "baseline_sectors",
            &payload,
            vec![
                ("baseline_id", SqlValue::I64(12)),
                ("name", SqlValue::String("UTI Adulto".to_string())),
            ],
        )
        .unwrap();

        assert_eq!(
            update.sql,
            "UPDATE baseline_sectors SET active = ? WHERE baseline_id = ? AND name = ?"
        );
        assert_eq!(
            update.values,
            vec![
                SqlValue::Bool(false),
                SqlValue::I64(12),
                SqlValue::String("UTI Adulto".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(build_update_sql("roles", &json!({}), vec![("id", SqlValue::I64(1))]).is_err());
        assert!(build_update_sql("roles", &json!(42), vec![("id", SqlValue::I64(1))]).is_err());
    }

    #[test]
    fn date_strings_become_dates() {
        let payload = json!({ "recorded_on": "2025-11-30" });
        let update =
            build_update_sql("baselines", &payload, vec![("id", SqlValue::I64(1))]).unwrap();

        assert!(matches!(update.values[0], SqlValue::Date(_)));
    }
}

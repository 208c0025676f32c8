use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// How a unit organizes its staffing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Ward-style unit with beds; staffing rows form a flat list.
    Admission,
    /// Unit split into functional sites, each with its own staffing rows.
    NonAdmission,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "hospital_id": 4,
        "name": "UTI Adulto",
        "kind": "admission",
        "projected_overtime_hours": 120.0
    })
)]
pub struct Unit {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 4)]
    pub hospital_id: u64,

    #[schema(example = "UTI Adulto")]
    pub name: String,

    /// `admission` or `non_admission`, as stored.
    #[schema(example = "admission")]
    pub kind: String,

    /// Overtime hours projected for the unit as a whole.
    #[schema(example = 120.0)]
    pub projected_overtime_hours: f64,
}

impl Unit {
    pub fn unit_kind(&self) -> Result<UnitKind, strum::ParseError> {
        self.kind.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_column_round_trips_through_strum() {
        assert_eq!("admission".parse::<UnitKind>().unwrap(), UnitKind::Admission);
        assert_eq!(
            "non_admission".parse::<UnitKind>().unwrap(),
            UnitKind::NonAdmission
        );
        assert_eq!(UnitKind::NonAdmission.to_string(), "non_admission");
        assert!("ward".parse::<UnitKind>().is_err());
    }
}

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

/// One costed role line of a unit's staffing table.
///
/// `cost_per_employee` comes from the data layer and is authoritative for
/// every total below; it is never re-derived from salary attributes here.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleCostRow {
    pub role_id: u64,
    pub role_name: String,
    pub is_fixed_allocation: bool,
    pub base_salary: f64,
    pub additional_cost_rate: f64,
    pub overtime_value: f64,
    pub cost_per_employee: f64,
    pub contracted_hours_per_employee: f64,
    pub current_headcount: i64,
    pub projected_headcount: i64,
}

/// Headcount variance as a share of the current headcount.
///
/// A unit with nobody in the role today and a projected headcount above zero
/// has no meaningful percentage; that case is carried as `NotApplicable`
/// (JSON `null`, displayed as "N/A") instead of an IEEE infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PercentVariance {
    NotApplicable,
    Percent(f64),
}

impl PercentVariance {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PercentVariance::NotApplicable => None,
            PercentVariance::Percent(v) => Some(*v),
        }
    }
}

impl fmt::Display for PercentVariance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentVariance::NotApplicable => write!(f, "N/A"),
            PercentVariance::Percent(v) => write!(f, "{:.2}%", v),
        }
    }
}

/// Derived costs for one staffing row, current vs. projected.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RowCostBreakdown {
    #[schema(example = 3)]
    pub role_id: u64,

    #[schema(example = "Enfermeiro")]
    pub role_name: String,

    pub is_fixed_allocation: bool,

    #[schema(example = 10)]
    pub current_headcount: i64,

    #[schema(example = 12)]
    pub projected_headcount: i64,

    #[schema(example = 2)]
    pub headcount_variance: i64,

    #[schema(example = 45000.0)]
    pub current_total_cost: f64,

    #[schema(example = 54000.0)]
    pub projected_total_cost: f64,

    #[schema(example = 9000.0)]
    pub cost_variance: f64,

    /// `null` when the current headcount is zero and the projection is not.
    #[schema(value_type = Option<f64>, example = 20.0)]
    pub percent_variance: PercentVariance,

    #[schema(example = 1800.0)]
    pub current_hours: f64,

    #[schema(example = 2160.0)]
    pub projected_hours: f64,

    #[schema(example = 360.0)]
    pub hours_variance: f64,
}

/// Percent variance of headcount, with the division-by-zero cases pinned.
pub fn percent_variance(current: i64, projected: i64) -> PercentVariance {
    if current > 0 {
        let diff = (projected - current) as f64;
        PercentVariance::Percent(diff / current as f64 * 100.0)
    } else if projected > 0 {
        PercentVariance::NotApplicable
    } else {
        PercentVariance::Percent(0.0)
    }
}

impl RoleCostRow {
    /// Compute the derived current/projected costs and variances for this row.
    pub fn breakdown(&self) -> RowCostBreakdown {
        let current_total_cost = self.current_headcount as f64 * self.cost_per_employee;
        let projected_total_cost = self.projected_headcount as f64 * self.cost_per_employee;
        let current_hours = self.current_headcount as f64 * self.contracted_hours_per_employee;
        let projected_hours = self.projected_headcount as f64 * self.contracted_hours_per_employee;

        RowCostBreakdown {
            role_id: self.role_id,
            role_name: self.role_name.clone(),
            is_fixed_allocation: self.is_fixed_allocation,
            current_headcount: self.current_headcount,
            projected_headcount: self.projected_headcount,
            headcount_variance: self.projected_headcount - self.current_headcount,
            current_total_cost,
            projected_total_cost,
            cost_variance: projected_total_cost - current_total_cost,
            percent_variance: percent_variance(self.current_headcount, self.projected_headcount),
            current_hours,
            projected_hours,
            hours_variance: projected_hours - current_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(current: i64, projected: i64) -> RoleCostRow {
        RoleCostRow {
            role_id: 1,
            role_name: "Enfermeiro".to_string(),
            is_fixed_allocation: false,
            base_salary: 4500.0,
            additional_cost_rate: 0.8,
            overtime_value: 35.0,
            cost_per_employee: 8100.0,
            contracted_hours_per_employee: 180.0,
            current_headcount: current,
            projected_headcount: projected,
        }
    }

    #[test]
    fn breakdown_costs_and_hours() {
        let b = row(10, 12).breakdown();

        assert_eq!(b.current_total_cost, 81000.0);
        assert_eq!(b.projected_total_cost, 97200.0);
        assert_eq!(b.headcount_variance, 2);
        assert_eq!(b.current_hours, 1800.0);
        assert_eq!(b.projected_hours, 2160.0);
        assert_eq!(b.hours_variance, 360.0);
        assert_eq!(b.percent_variance, PercentVariance::Percent(20.0));
    }

    #[test]
    fn cost_variance_is_exactly_projected_minus_current() {
        for (current, projected) in [(0, 0), (0, 7), (5, 0), (13, 4), (9, 9)] {
            let b = row(current, projected).breakdown();
            assert_eq!(b.cost_variance, b.projected_total_cost - b.current_total_cost);
        }
    }

    #[test]
    fn percent_variance_zero_over_zero_is_zero() {
        assert_eq!(percent_variance(0, 0), PercentVariance::Percent(0.0));
    }

    #[test]
    fn percent_variance_projected_without_current_is_not_applicable() {
        assert_eq!(percent_variance(0, 4), PercentVariance::NotApplicable);
        let b = row(0, 4).breakdown();
        assert_eq!(b.percent_variance, PercentVariance::NotApplicable);
        assert_eq!(b.percent_variance.to_string(), "N/A");
        assert_eq!(b.percent_variance.as_f64(), None);
        assert_eq!(PercentVariance::Percent(20.0).as_f64(), Some(20.0));
    }

    #[test]
    fn percent_variance_negative_when_shrinking() {
        assert_eq!(percent_variance(10, 5), PercentVariance::Percent(-50.0));
    }

    #[test]
    fn not_applicable_serializes_as_null() {
        let b = row(0, 4).breakdown();
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["percent_variance"], serde_json::Value::Null);

        let b = row(10, 12).breakdown();
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["percent_variance"], serde_json::json!(20.0));
    }
}

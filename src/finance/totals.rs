use serde::Serialize;
use utoipa::ToSchema;

use super::row::{RoleCostRow, RowCostBreakdown};

/// Column totals of a staffing table, or of one functional site's slice.
///
/// The fold is associative and commutative: summing two sub-lists separately
/// and combining gives the same totals as folding the concatenation, up to
/// float rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct StaffingTotals {
    #[schema(example = 42)]
    pub current_headcount: i64,

    #[schema(example = 47)]
    pub projected_headcount: i64,

    #[schema(example = 312000.0)]
    pub current_total_cost: f64,

    #[schema(example = 349000.0)]
    pub projected_total_cost: f64,

    #[schema(example = 7560.0)]
    pub current_hours: f64,

    #[schema(example = 8460.0)]
    pub projected_hours: f64,
}

impl StaffingTotals {
    pub fn add_row(&mut self, row: &RowCostBreakdown) {
        self.current_headcount += row.current_headcount;
        self.projected_headcount += row.projected_headcount;
        self.current_total_cost += row.current_total_cost;
        self.projected_total_cost += row.projected_total_cost;
        self.current_hours += row.current_hours;
        self.projected_hours += row.projected_hours;
    }

    pub fn combine(mut self, other: StaffingTotals) -> StaffingTotals {
        self.current_headcount += other.current_headcount;
        self.projected_headcount += other.projected_headcount;
        self.current_total_cost += other.current_total_cost;
        self.projected_total_cost += other.projected_total_cost;
        self.current_hours += other.current_hours;
        self.projected_hours += other.projected_hours;
        self
    }

    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a RowCostBreakdown>) -> StaffingTotals {
        let mut totals = StaffingTotals::default();
        for row in rows {
            totals.add_row(row);
        }
        totals
    }

    pub fn cost_variance(&self) -> f64 {
        self.projected_total_cost - self.current_total_cost
    }

    pub fn headcount_variance(&self) -> i64 {
        self.projected_headcount - self.current_headcount
    }

    pub fn hours_variance(&self) -> f64 {
        self.projected_hours - self.current_hours
    }
}

/// Staffing rows of one functional site inside a non-admission unit.
#[derive(Debug, Clone)]
pub struct CostGroup {
    pub group_id: u64,
    pub group_name: String,
    pub rows: Vec<RoleCostRow>,
}

/// A costed functional site: derived rows plus the site subtotal.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CostGroupBreakdown {
    #[schema(example = 7)]
    pub group_id: u64,

    #[schema(example = "Centro Cirúrgico")]
    pub group_name: String,

    pub rows: Vec<RowCostBreakdown>,
    pub subtotal: StaffingTotals,
}

impl CostGroup {
    pub fn breakdown(&self) -> CostGroupBreakdown {
        let rows: Vec<RowCostBreakdown> = self.rows.iter().map(RoleCostRow::breakdown).collect();
        let subtotal = StaffingTotals::from_rows(&rows);
        CostGroupBreakdown {
            group_id: self.group_id,
            group_name: self.group_name.clone(),
            rows,
            subtotal,
        }
    }
}

/// Grand total across sites; equals the fold of the flattened row list.
pub fn grand_total(groups: &[CostGroupBreakdown]) -> StaffingTotals {
    groups
        .iter()
        .fold(StaffingTotals::default(), |acc, g| acc.combine(g.subtotal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPS: f64 = 1e-9;

    fn row(id: u64, cost: f64, hours: f64, current: i64, projected: i64) -> RoleCostRow {
        RoleCostRow {
            role_id: id,
            role_name: format!("role-{id}"),
            is_fixed_allocation: false,
            base_salary: 0.0,
            additional_cost_rate: 0.0,
            overtime_value: 0.0,
            cost_per_employee: cost,
            contracted_hours_per_employee: hours,
            current_headcount: current,
            projected_headcount: projected,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn totals_fold() {
        let rows: Vec<RowCostBreakdown> = [
            row(1, 8100.0, 180.0, 10, 12),
            row(2, 3500.5, 150.0, 4, 3),
        ]
        .iter()
        .map(RoleCostRow::breakdown)
        .collect();

        let totals = StaffingTotals::from_rows(&rows);

        assert_eq!(totals.current_headcount, 14);
        assert_eq!(totals.projected_headcount, 15);
        assert!(close(totals.current_total_cost, 10.0 * 8100.0 + 4.0 * 3500.5));
        assert!(close(totals.projected_total_cost, 12.0 * 8100.0 + 3.0 * 3500.5));
        assert!(close(totals.current_hours, 10.0 * 180.0 + 4.0 * 150.0));
        assert!(close(totals.projected_hours, 12.0 * 180.0 + 3.0 * 150.0));
        assert!(close(
            totals.cost_variance(),
            totals.projected_total_cost - totals.current_total_cost
        ));
    }

    #[test]
    fn aggregation_is_associative() {
        let all: Vec<RowCostBreakdown> = [
            row(1, 8100.0, 180.0, 10, 12),
            row(2, 3500.5, 150.0, 4, 3),
            row(3, 12999.99, 200.0, 2, 5),
            row(4, 777.77, 44.0, 0, 1),
        ]
        .iter()
        .map(RoleCostRow::breakdown)
        .collect();

        let whole = StaffingTotals::from_rows(&all);
        let split = StaffingTotals::from_rows(&all[..2]).combine(StaffingTotals::from_rows(&all[2..]));

        assert_eq!(whole.current_headcount, split.current_headcount);
        assert_eq!(whole.projected_headcount, split.projected_headcount);
        assert!(close(whole.current_total_cost, split.current_total_cost));
        assert!(close(whole.projected_total_cost, split.projected_total_cost));
        assert!(close(whole.current_hours, split.current_hours));
        assert!(close(whole.projected_hours, split.projected_hours));
    }

    #[test]
    fn grand_total_equals_flattened_fold() {
        let site_a = CostGroup {
            group_id: 1,
            group_name: "Centro Cirúrgico".to_string(),
            rows: vec![row(1, 8100.0, 180.0, 10, 12), row(2, 3500.5, 150.0, 4, 3)],
        };
        let site_b = CostGroup {
            group_id: 2,
            group_name: "Ambulatório".to_string(),
            rows: vec![row(3, 12999.99, 200.0, 2, 5)],
        };

        let groups = vec![site_a.breakdown(), site_b.breakdown()];
        let total = grand_total(&groups);

        let flat: Vec<RowCostBreakdown> = site_a
            .rows
            .iter()
            .chain(site_b.rows.iter())
            .map(RoleCostRow::breakdown)
            .collect();
        let flat_total = StaffingTotals::from_rows(&flat);

        assert_eq!(total.current_headcount, flat_total.current_headcount);
        assert!(close(total.current_total_cost, flat_total.current_total_cost));
        assert!(close(total.projected_total_cost, flat_total.projected_total_cost));
        assert!(close(total.projected_hours, flat_total.projected_hours));
    }

    #[test]
    fn empty_totals_are_zero() {
        let totals = StaffingTotals::from_rows(&[]);
        assert_eq!(totals, StaffingTotals::default());
        assert_eq!(totals.headcount_variance(), 0);
        assert_eq!(totals.hours_variance(), 0.0);
    }
}

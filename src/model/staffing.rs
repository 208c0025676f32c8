use crate::finance::currency::centavos_to_reais;
use crate::finance::row::RoleCostRow;

/// One staffing row of a unit as stored, with the role attributes joined in.
///
/// `site_id` is NULL for admission (ward) units, whose rows form a flat
/// list; non-admission units hang every row off a functional site.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UnitRoleRow {
    pub id: u64,
    pub unit_id: u64,
    pub site_id: Option<u64>,
    pub role_id: u64,
    pub role_name: String,
    pub is_fixed_allocation: bool,
    pub base_salary: i64,
    pub additional_cost_rate: f64,
    pub overtime_value: i64,
    /// Authoritative cost of one employee in this row, centavos.
    pub cost_per_employee: i64,
    pub contracted_hours: f64,
    pub current_headcount: i64,
    pub projected_headcount: i64,
}

impl UnitRoleRow {
    /// Convert the stored row into the calculator's input, centavos → reais.
    pub fn to_cost_row(&self) -> RoleCostRow {
        RoleCostRow {
            role_id: self.role_id,
            role_name: self.role_name.clone(),
            is_fixed_allocation: self.is_fixed_allocation,
            base_salary: centavos_to_reais(self.base_salary),
            additional_cost_rate: self.additional_cost_rate,
            overtime_value: centavos_to_reais(self.overtime_value),
            cost_per_employee: centavos_to_reais(self.cost_per_employee),
            contracted_hours_per_employee: self.contracted_hours,
            current_headcount: self.current_headcount,
            projected_headcount: self.projected_headcount,
        }
    }
}

use crate::api::analysis::{
    SiteAnalysisResponse, UpdateProjectedHeadcount, WardAnalysisResponse,
};
use crate::api::baseline::{
    BaselineDetailResponse, BaselineListResponse, BaselineParetoResponse, BaselineQuery,
    SectorResponse,
};
use crate::api::role::{CreateRole, RoleListResponse, RoleQuery};
use crate::api::unit::{UnitDetailResponse, UnitListResponse, UnitQuery};
use crate::finance::pareto::{ParetoRanking, RankedEntry};
use crate::finance::row::RowCostBreakdown;
use crate::finance::totals::{CostGroupBreakdown, StaffingTotals};
use crate::model::baseline::Baseline;
use crate::model::role::Role;
use crate::model::site::Site;
use crate::model::unit::Unit;
use utoipa::OpenApi;
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dimensiona+ API",
        version = "1.0.0",
        description = r#"
## Dimensiona+ — hospital staffing cost service

This API backs the **Dimensiona+** dashboard for hospital staffing and bed
management, exposing the staffing-cost analysis over units, roles and
baselines.

### 🔹 Key Features
- **Role Catalog**
  - Create, update, list, and view staffing job titles (cargos)
- **Units**
  - Browse admission (ward) and non-admission units with their functional sites
- **Financial Analysis**
  - Current vs. projected staffing costs per role, with site subtotals and grand totals
- **Baselines & Pareto**
  - Sector cost baselines, cost-ranked Pareto distribution, and the 80% focus set

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints
- Monetary values carried in centavos, with locale-formatted strings where shown

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::role::create_role,
        crate::api::role::list_roles,
        crate::api::role::get_role,
        crate::api::role::update_role,
        crate::api::role::delete_role,

        crate::api::unit::list_units,
        crate::api::unit::get_unit,

        crate::api::analysis::unit_analysis,
        crate::api::analysis::update_projected_headcount,

        crate::api::baseline::list_baselines,
        crate::api::baseline::get_baseline,
        crate::api::baseline::update_sector,
        crate::api::baseline::baseline_pareto,
        crate::api::baseline::toggle_sector
    ),
    components(
        schemas(
            Role,
            CreateRole,
            RoleQuery,
            RoleListResponse,
            Unit,
            Site,
            UnitQuery,
            UnitListResponse,
            UnitDetailResponse,
            RowCostBreakdown,
            StaffingTotals,
            CostGroupBreakdown,
            WardAnalysisResponse,
            SiteAnalysisResponse,
            UpdateProjectedHeadcount,
            Baseline,
            BaselineQuery,
            BaselineListResponse,
            BaselineDetailResponse,
            BaselineParetoResponse,
            SectorResponse,
            ParetoRanking,
            RankedEntry
        )
    ),
    tags(
        (name = "Roles", description = "Role catalog (cargo) management APIs"),
        (name = "Units", description = "Unit and functional site APIs"),
        (name = "Analysis", description = "Staffing cost analysis APIs"),
        (name = "Baselines", description = "Baseline costs and Pareto APIs"),
    )
)]
pub struct ApiDoc;

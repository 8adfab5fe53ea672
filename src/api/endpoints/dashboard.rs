//! Dashboard endpoint — headline counters and chart data.

use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::dashboard::{self, DashboardSummary, RevenuePoint, TopService};

#[derive(Serialize)]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    pub revenue_by_day: Vec<RevenuePoint>,
    pub top_services: Vec<TopService>,
}

/// `GET /api/dashboard` — counters plus the two charts.
pub async fn overview(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let today = chrono::Local::now().date_naive();

    Ok(Json(DashboardResponse {
        summary: dashboard::summary(&conn, today)?,
        revenue_by_day: dashboard::revenue_by_day(&conn, today)?,
        top_services: dashboard::top_services(&conn)?,
    }))
}

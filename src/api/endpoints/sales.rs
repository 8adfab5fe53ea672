//! Sales endpoints — the filtered sales ledger with its revenue total.

use axum::extract::{Query, State};
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::db::repository::sale::{self, SaleRecord};
use crate::models::enums::SalesPeriod;

#[derive(Deserialize)]
pub struct SalesQuery {
    /// `day` (default), `week`, `month` or `year`.
    pub period: Option<String>,
    /// Period value: `YYYY-MM-DD`, `YYYY-Www`, `YYYY-MM` or `YYYY`.
    /// Defaults to the period containing today.
    pub value: Option<String>,
}

#[derive(Serialize)]
pub struct SalesResponse {
    pub sales: Vec<SaleRecord>,
    pub total_cents: i64,
}

/// `GET /api/sales?period=…&value=…` — sales in the period, newest
/// first, plus the revenue total.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
    Query(query): Query<SalesQuery>,
) -> Result<Json<SalesResponse>, ApiError> {
    let period = match query.period.as_deref() {
        Some(raw) => SalesPeriod::from_str(raw)
            .map_err(|_| ApiError::BadRequest(format!("unknown period '{raw}'")))?,
        None => SalesPeriod::Day,
    };

    let today = chrono::Local::now().date_naive();
    let (from, to) = sale::period_range(period, query.value.as_deref(), today).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "invalid value '{}' for period '{}'",
            query.value.as_deref().unwrap_or(""),
            period.as_str()
        ))
    })?;

    let conn = ctx.core.open_db()?;
    Ok(Json(SalesResponse {
        sales: sale::sales_between(&conn, from, to)?,
        total_cents: sale::sales_total_between(&conn, from, to)?,
    }))
}

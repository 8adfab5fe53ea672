//! Appointment endpoints — the day view plus the four lifecycle
//! operations: book, reschedule, finalize, cancel.

use axum::extract::{Path, Query, State};
use axum::Extension;
use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::db::repository::appointment::DayAppointment;
use crate::db::repository::{appointment, client, employee, service};
use crate::models::{Appointment, Client, Employee, Sale, Service};
use crate::scheduling::{self, BookingRequest};

#[derive(Deserialize)]
pub struct DayQuery {
    /// `YYYY-MM-DD`; defaults to today.
    pub date: Option<NaiveDate>,
}

/// The booking page payload: the day's appointments plus the selector
/// lists the form needs.
#[derive(Serialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub appointments: Vec<DayAppointment>,
    pub clients: Vec<Client>,
    pub services: Vec<Service>,
    pub employees: Vec<Employee>,
}

/// `GET /api/appointments?date=…` — day view.
pub async fn day(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DayResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let date = query.date.unwrap_or_else(|| chrono::Local::now().date_naive());

    Ok(Json(DayResponse {
        date,
        appointments: appointment::list_day(&conn, date)?,
        clients: client::list_clients(&conn, None)?,
        services: service::list_services(&conn)?,
        employees: employee::list_employees(&conn)?,
    }))
}

/// `POST /api/appointments` — book a new appointment.
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let mut conn = ctx.core.open_db()?;
    let appointment = scheduling::create_appointment(&mut conn, &payload)?;
    Ok(Json(appointment))
}

#[derive(Deserialize)]
pub struct UpdateRequest {
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    #[serde(deserialize_with = "crate::models::timefmt::deserialize")]
    pub start_time: NaiveTime,
}

/// `PUT /api/appointments/:id` — reschedule or reassign.
pub async fn update(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let mut conn = ctx.core.open_db()?;
    let appointment = scheduling::update_appointment(
        &mut conn,
        &id,
        &payload.client_id,
        &payload.service_id,
        &payload.employee_id,
        payload.date,
        payload.start_time,
    )?;
    Ok(Json(appointment))
}

/// `POST /api/appointments/:id/finalize` — convert into a sale and a
/// history record, removing the active appointment.
pub async fn finalize(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Sale>, ApiError> {
    let mut conn = ctx.core.open_db()?;
    let sale = scheduling::finalize_appointment(&mut conn, &id)?;
    Ok(Json(sale))
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

/// `DELETE /api/appointments/:id` — cancel without a terminal record.
pub async fn cancel(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<CancelResponse>, ApiError> {
    let mut conn = ctx.core.open_db()?;
    scheduling::cancel_appointment(&mut conn, &id)?;
    Ok(Json(CancelResponse { cancelled: true }))
}

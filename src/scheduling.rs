//! Appointment scheduling — conflict detection and the appointment
//! lifecycle (book, reschedule, finalize into a sale, cancel).
//!
//! Two invariants are enforced on every write:
//! 1. A client holds at most one active appointment per exact
//!    (date, start time).
//! 2. An employee's active appointments on one date never overlap as
//!    half-open `[start, start + duration)` intervals. Touching
//!    boundaries are not a conflict.
//!
//! Every operation runs its read-then-write sequence inside an
//! IMMEDIATE transaction, so concurrent bookings serialize on SQLite's
//! write lock and the checks cannot race. The `appointments` table's
//! UNIQUE constraint backs invariant 1 as a second line of defense.

use chrono::{NaiveDate, NaiveTime, Timelike};
use rusqlite::{Connection, TransactionBehavior};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::repository::{appointment, client, employee, sale, service};
use crate::db::DatabaseError;
use crate::models::enums::HistoryStatus;
use crate::models::{Appointment, HistoricalAppointment, Sale};

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Client already has an appointment on {date} at {start_time}")]
    ClientDoubleBooked {
        date: NaiveDate,
        start_time: NaiveTime,
    },

    #[error("Employee has an overlapping appointment in that time range")]
    EmployeeOverlap,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Finalization rolled back: {0}")]
    Finalization(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ScheduleError {
    fn not_found(entity: &'static str, id: &Uuid) -> Self {
        ScheduleError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// A booking request as it arrives from the booking form. The client is
/// identified by (name, phone) and resolved or created on the fly.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub client_name: String,
    pub client_phone: String,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    #[serde(deserialize_with = "crate::models::timefmt::deserialize")]
    pub start_time: NaiveTime,
}

/// Minutes-from-midnight interval for a slot. Keeps the overlap math in
/// plain integers and out of `NaiveTime` wrap-around territory.
fn interval(start: NaiveTime, duration_minutes: i64) -> (i64, i64) {
    let start_min = i64::from(start.num_seconds_from_midnight()) / 60;
    (start_min, start_min + duration_minutes)
}

/// Half-open interval overlap: `[a,b)` and `[c,d)` overlap iff a < d and b > c.
fn overlaps(a: (i64, i64), b: (i64, i64)) -> bool {
    a.0 < b.1 && a.1 > b.0
}

/// Book a new appointment.
///
/// Resolves or creates the client, rejects a second booking for the
/// same client at the exact (date, start time), then scans the
/// employee's day for interval overlap against each existing
/// appointment's `[start, start + service.duration)`.
pub fn create_appointment(
    conn: &mut Connection,
    request: &BookingRequest,
) -> Result<Appointment, ScheduleError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(DatabaseError::from)?;

    let booked_client = client::find_or_create_client(&tx, &request.client_name, &request.client_phone)?;

    let appointment = Appointment {
        id: Uuid::new_v4(),
        client_id: booked_client.id,
        employee_id: request.employee_id,
        service_id: request.service_id,
        date: request.date,
        start_time: request.start_time,
    };
    check_conflicts(&tx, &appointment, None)?;

    // Backstop: a concurrent writer that slipped past the check trips
    // the UNIQUE(client_id, date, start_time) constraint instead.
    appointment::insert_appointment(&tx, &appointment).map_err(|e| {
        if e.is_constraint_violation() {
            ScheduleError::ClientDoubleBooked {
                date: request.date,
                start_time: request.start_time,
            }
        } else {
            e.into()
        }
    })?;

    tx.commit().map_err(DatabaseError::from)?;
    tracing::info!(
        appointment_id = %appointment.id,
        client = %booked_client.name,
        date = %appointment.date,
        start = %appointment.start_time,
        "Appointment booked"
    );
    Ok(appointment)
}

/// Reschedule or reassign an active appointment.
///
/// Runs the same two conflict checks as creation — interval overlap for
/// the employee, exact (date, start time) for the client — excluding
/// the appointment being edited from both scans.
#[allow(clippy::too_many_arguments)]
pub fn update_appointment(
    conn: &mut Connection,
    id: &Uuid,
    client_id: &Uuid,
    service_id: &Uuid,
    employee_id: &Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
) -> Result<Appointment, ScheduleError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(DatabaseError::from)?;

    if appointment::get_appointment(&tx, id)?.is_none() {
        return Err(ScheduleError::not_found("Appointment", id));
    }

    let appointment = Appointment {
        id: *id,
        client_id: *client_id,
        employee_id: *employee_id,
        service_id: *service_id,
        date,
        start_time,
    };
    check_conflicts(&tx, &appointment, Some(id))?;

    appointment::overwrite_appointment(&tx, &appointment).map_err(|e| {
        if e.is_constraint_violation() {
            ScheduleError::ClientDoubleBooked { date, start_time }
        } else {
            e.into()
        }
    })?;

    tx.commit().map_err(DatabaseError::from)?;
    tracing::info!(appointment_id = %id, date = %date, start = %start_time, "Appointment updated");
    Ok(appointment)
}

/// Both conflict checks against the candidate appointment, optionally
/// excluding one appointment id (the one being edited).
fn check_conflicts(
    conn: &Connection,
    candidate: &Appointment,
    exclude: Option<&Uuid>,
) -> Result<(), ScheduleError> {
    if client::get_client(conn, &candidate.client_id)?.is_none() {
        return Err(ScheduleError::not_found("Client", &candidate.client_id));
    }

    if appointment::client_has_booking_at(
        conn,
        &candidate.client_id,
        candidate.date,
        candidate.start_time,
        exclude,
    )? {
        return Err(ScheduleError::ClientDoubleBooked {
            date: candidate.date,
            start_time: candidate.start_time,
        });
    }

    let booked_service = service::get_service(conn, &candidate.service_id)?
        .ok_or_else(|| ScheduleError::not_found("Service", &candidate.service_id))?;
    if employee::get_employee(conn, &candidate.employee_id)?.is_none() {
        return Err(ScheduleError::not_found("Employee", &candidate.employee_id));
    }

    let wanted = interval(candidate.start_time, booked_service.duration_minutes);
    let slots = appointment::employee_day_slots(
        conn,
        &candidate.employee_id,
        candidate.date,
        exclude,
    )?;
    for (start, duration) in slots {
        if overlaps(wanted, interval(start, duration)) {
            return Err(ScheduleError::EmployeeOverlap);
        }
    }

    Ok(())
}

/// Finalize an appointment: record the sale at the service's current
/// price, move the appointment into history with status `completed`,
/// and delete the active row. The three writes commit atomically; any
/// failure rolls all of them back.
pub fn finalize_appointment(conn: &mut Connection, id: &Uuid) -> Result<Sale, ScheduleError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(DatabaseError::from)?;

    let appointment = appointment::get_appointment(&tx, id)?
        .ok_or_else(|| ScheduleError::not_found("Appointment", id))?;
    let billed_service = service::get_service(&tx, &appointment.service_id)?
        .ok_or_else(|| ScheduleError::not_found("Service", &appointment.service_id))?;

    let recorded_sale = Sale {
        id: Uuid::new_v4(),
        client_id: appointment.client_id,
        employee_id: appointment.employee_id,
        service_id: appointment.service_id,
        date: appointment.date,
        total_cents: billed_service.price_cents,
    };

    let result = (|| -> Result<(), DatabaseError> {
        sale::insert_sale(&tx, &recorded_sale)?;
        appointment::insert_history(
            &tx,
            &HistoricalAppointment {
                id: appointment.id,
                client_id: appointment.client_id,
                employee_id: appointment.employee_id,
                service_id: appointment.service_id,
                date: appointment.date,
                start_time: appointment.start_time,
                status: HistoryStatus::Completed,
            },
        )?;
        appointment::delete_appointment(&tx, id)?;
        Ok(())
    })();

    if let Err(e) = result {
        // Dropping the transaction rolls back everything written so far.
        tracing::error!(appointment_id = %id, error = %e, "Finalization failed, rolling back");
        return Err(ScheduleError::Finalization(e.to_string()));
    }

    tx.commit()
        .map_err(|e| ScheduleError::Finalization(e.to_string()))?;
    tracing::info!(
        appointment_id = %id,
        sale_id = %recorded_sale.id,
        total_cents = recorded_sale.total_cents,
        "Appointment finalized"
    );
    Ok(recorded_sale)
}

/// Cancel an active appointment. No terminal record is kept.
pub fn cancel_appointment(conn: &mut Connection, id: &Uuid) -> Result<(), ScheduleError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(DatabaseError::from)?;
    if !appointment::delete_appointment(&tx, id)? {
        return Err(ScheduleError::not_found("Appointment", id));
    }
    tx.commit().map_err(DatabaseError::from)?;
    tracing::info!(appointment_id = %id, "Appointment cancelled");
    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection};
use serde::Serialize;
use uuid::Uuid;

use super::{parse_date, parse_time, parse_uuid};
use crate::db::DatabaseError;
use crate::models::{Appointment, HistoricalAppointment};

const TIME_FMT: &str = "%H:%M";

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, client_id, employee_id, service_id, date, start_time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))",
        params![
            appt.id.to_string(),
            appt.client_id.to_string(),
            appt.employee_id.to_string(),
            appt.service_id.to_string(),
            appt.date.to_string(),
            appt.start_time.format(TIME_FMT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_appointment(conn: &Connection, id: &Uuid) -> Result<Option<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, client_id, employee_id, service_id, date, start_time
         FROM appointments WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
        ))
    });

    match result {
        Ok((id, client_id, employee_id, service_id, date, start_time)) => Ok(Some(Appointment {
            id: parse_uuid(&id)?,
            client_id: parse_uuid(&client_id)?,
            employee_id: parse_uuid(&employee_id)?,
            service_id: parse_uuid(&service_id)?,
            date: parse_date(&date)?,
            start_time: parse_time(&start_time)?,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Overwrite every mutable field of an active appointment.
pub fn overwrite_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE appointments
         SET client_id = ?2, employee_id = ?3, service_id = ?4, date = ?5, start_time = ?6
         WHERE id = ?1",
        params![
            appt.id.to_string(),
            appt.client_id.to_string(),
            appt.employee_id.to_string(),
            appt.service_id.to_string(),
            appt.date.to_string(),
            appt.start_time.format(TIME_FMT).to_string(),
        ],
    )?;
    if updated == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Appointment".into(),
            id: appt.id.to_string(),
        });
    }
    Ok(())
}

/// Delete an active appointment. Returns whether a row was removed.
pub fn delete_appointment(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM appointments WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(deleted > 0)
}

/// Whether the client already has an active appointment at the exact
/// (date, start time), optionally excluding one appointment id (the one
/// being edited).
pub fn client_has_booking_at(
    conn: &Connection,
    client_id: &Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    exclude: Option<&Uuid>,
) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM appointments
         WHERE client_id = ?1 AND date = ?2 AND start_time = ?3
           AND (?4 IS NULL OR id != ?4)",
        params![
            client_id.to_string(),
            date.to_string(),
            start_time.format(TIME_FMT).to_string(),
            exclude.map(Uuid::to_string),
        ],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Occupied slots for an employee on one date: each active appointment's
/// start time with its service's duration, optionally excluding one
/// appointment id.
pub fn employee_day_slots(
    conn: &Connection,
    employee_id: &Uuid,
    date: NaiveDate,
    exclude: Option<&Uuid>,
) -> Result<Vec<(NaiveTime, i64)>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.start_time, s.duration_minutes
         FROM appointments a
         JOIN services s ON a.service_id = s.id
         WHERE a.employee_id = ?1 AND a.date = ?2
           AND (?3 IS NULL OR a.id != ?3)",
    )?;

    let rows = stmt.query_map(
        params![
            employee_id.to_string(),
            date.to_string(),
            exclude.map(Uuid::to_string),
        ],
        |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
    )?;

    let mut slots = Vec::new();
    for row in rows {
        let (start, duration) = row?;
        slots.push((parse_time(&start)?, duration));
    }
    Ok(slots)
}

/// One row of the day view: an appointment joined with the names the
/// booking page shows.
#[derive(Debug, Clone, Serialize)]
pub struct DayAppointment {
    pub id: Uuid,
    pub client: String,
    pub service: String,
    pub employee: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

/// All active appointments for one date, ordered by start time.
pub fn list_day(conn: &Connection, date: NaiveDate) -> Result<Vec<DayAppointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, c.name, s.name, e.name, a.date, a.start_time
         FROM appointments a
         JOIN clients c ON a.client_id = c.id
         JOIN services s ON a.service_id = s.id
         JOIN employees e ON a.employee_id = e.id
         WHERE a.date = ?1
         ORDER BY a.start_time ASC",
    )?;

    let rows = stmt.query_map(params![date.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut appointments = Vec::new();
    for row in rows {
        let (id, client, service, employee, date, start_time) = row?;
        appointments.push(DayAppointment {
            id: parse_uuid(&id)?,
            client,
            service,
            employee,
            date: parse_date(&date)?,
            start_time: parse_time(&start_time)?,
        });
    }
    Ok(appointments)
}

pub fn insert_history(
    conn: &Connection,
    record: &HistoricalAppointment,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointment_history (id, client_id, employee_id, service_id, date, start_time, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.id.to_string(),
            record.client_id.to_string(),
            record.employee_id.to_string(),
            record.service_id.to_string(),
            record.date.to_string(),
            record.start_time.format(TIME_FMT).to_string(),
            record.status.as_str(),
        ],
    )?;
    Ok(())
}

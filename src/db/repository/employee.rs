use std::str::FromStr;

use rusqlite::{params, Connection};

use super::parse_uuid;
use crate::db::DatabaseError;
use crate::models::enums::EmployeeStatus;
use crate::models::Employee;
use uuid::Uuid;

pub fn insert_employee(conn: &Connection, employee: &Employee) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO employees (id, name, email, phone, specialty, photo, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            employee.id.to_string(),
            employee.name,
            employee.email,
            employee.phone,
            employee.specialty,
            employee.photo,
            employee.status.as_str(),
        ],
    )?;
    Ok(())
}

pub fn get_employee(conn: &Connection, id: &Uuid) -> Result<Option<Employee>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, phone, specialty, photo, status
         FROM employees WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], map_row);

    match result {
        Ok(raw) => Ok(Some(employee_from_raw(raw)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_employees(conn: &Connection) -> Result<Vec<Employee>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, phone, specialty, photo, status
         FROM employees ORDER BY name",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut employees = Vec::new();
    for row in rows {
        employees.push(employee_from_raw(row?)?);
    }
    Ok(employees)
}

/// Record the uploaded photo reference for an employee.
pub fn set_employee_photo(
    conn: &Connection,
    id: &Uuid,
    filename: &str,
) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE employees SET photo = ?2 WHERE id = ?1",
        params![id.to_string(), filename],
    )?;
    if updated == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Employee".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

type RawEmployee = (
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    String,
);

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEmployee> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn employee_from_raw(raw: RawEmployee) -> Result<Employee, DatabaseError> {
    let (id, name, email, phone, specialty, photo, status) = raw;
    Ok(Employee {
        id: parse_uuid(&id)?,
        name,
        email,
        phone,
        specialty,
        photo,
        status: EmployeeStatus::from_str(&status)?,
    })
}

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection};
use serde::Serialize;
use uuid::Uuid;

use super::{parse_date, parse_time, parse_uuid};
use crate::db::DatabaseError;
use crate::models::Client;

pub fn insert_client(conn: &Connection, client: &Client) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO clients (id, name, phone, created_at)
         VALUES (?1, ?2, ?3, datetime('now'))",
        params![client.id.to_string(), client.name, client.phone],
    )?;
    Ok(())
}

pub fn get_client(conn: &Connection, id: &Uuid) -> Result<Option<Client>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, phone FROM clients WHERE id = ?1")?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    });

    match result {
        Ok((id, name, phone)) => Ok(Some(Client {
            id: parse_uuid(&id)?,
            name,
            phone,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_client(
    conn: &Connection,
    name: &str,
    phone: &str,
) -> Result<Option<Client>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, phone FROM clients WHERE name = ?1 AND phone = ?2 LIMIT 1",
    )?;

    let result = stmt.query_row(params![name, phone], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    });

    match result {
        Ok((id, name, phone)) => Ok(Some(Client {
            id: parse_uuid(&id)?,
            name,
            phone,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Resolve a client by the (name, phone) uniqueness key, inserting a new
/// record when no match exists. Booking never duplicates clients.
pub fn find_or_create_client(
    conn: &Connection,
    name: &str,
    phone: &str,
) -> Result<Client, DatabaseError> {
    if let Some(existing) = find_client(conn, name, phone)? {
        return Ok(existing);
    }

    let client = Client {
        id: Uuid::new_v4(),
        name: name.to_string(),
        phone: phone.to_string(),
    };
    insert_client(conn, &client)?;
    Ok(client)
}

/// List clients, optionally filtered by a name substring.
pub fn list_clients(
    conn: &Connection,
    name_filter: Option<&str>,
) -> Result<Vec<Client>, DatabaseError> {
    let pattern = format!("%{}%", name_filter.unwrap_or(""));
    let mut stmt = conn.prepare(
        "SELECT id, name, phone FROM clients WHERE name LIKE ?1 ORDER BY name",
    )?;

    let rows = stmt.query_map(params![pattern], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut clients = Vec::new();
    for row in rows {
        let (id, name, phone) = row?;
        clients.push(Client {
            id: parse_uuid(&id)?,
            name,
            phone,
        });
    }
    Ok(clients)
}

/// One row of a client's visit history (active and historical merged).
#[derive(Debug, Clone, Serialize)]
pub struct VisitRecord {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub service: String,
    pub employee: String,
    /// `scheduled` for active appointments, otherwise the history status.
    pub status: String,
}

/// Full visit history for one client: active appointments merged with
/// historical ones, newest first.
pub fn visit_history(
    conn: &Connection,
    client_id: &Uuid,
) -> Result<Vec<VisitRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.date, a.start_time, s.name, e.name, 'scheduled'
         FROM appointments a
         JOIN services s ON a.service_id = s.id
         JOIN employees e ON a.employee_id = e.id
         WHERE a.client_id = ?1
         UNION ALL
         SELECT h.date, h.start_time, s.name, e.name, h.status
         FROM appointment_history h
         JOIN services s ON h.service_id = s.id
         JOIN employees e ON h.employee_id = e.id
         WHERE h.client_id = ?1
         ORDER BY 1 DESC, 2 DESC",
    )?;

    let rows = stmt.query_map(params![client_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (date, start_time, service, employee, status) = row?;
        records.push(VisitRecord {
            date: parse_date(&date)?,
            start_time: parse_time(&start_time)?,
            service,
            employee,
            status,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn find_or_create_reuses_existing_match() {
        let conn = open_memory_database().unwrap();
        let first = find_or_create_client(&conn, "Ana Ruiz", "5512345678").unwrap();
        let second = find_or_create_client(&conn, "Ana Ruiz", "5512345678").unwrap();
        assert_eq!(first.id, second.id);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM clients", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn get_by_id_roundtrip_and_missing() {
        let conn = open_memory_database().unwrap();
        let created = find_or_create_client(&conn, "Ana Ruiz", "5512345678").unwrap();

        let loaded = get_client(&conn, &created.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Ana Ruiz");
        assert!(get_client(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn same_name_different_phone_is_a_new_client() {
        let conn = open_memory_database().unwrap();
        let first = find_or_create_client(&conn, "Ana Ruiz", "5512345678").unwrap();
        let second = find_or_create_client(&conn, "Ana Ruiz", "5587654321").unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn list_filters_by_name_substring() {
        let conn = open_memory_database().unwrap();
        find_or_create_client(&conn, "Ana Ruiz", "1111111111").unwrap();
        find_or_create_client(&conn, "Beatriz Soto", "2222222222").unwrap();

        let hits = list_clients(&conn, Some("ruiz")).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ana Ruiz");

        let all = list_clients(&conn, None).unwrap();
        assert_eq!(all.len(), 2);
    }
}

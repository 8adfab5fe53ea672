use rusqlite::{params, Connection};
use uuid::Uuid;

use super::parse_uuid;
use crate::db::DatabaseError;
use crate::models::Service;

pub fn insert_service(conn: &Connection, service: &Service) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO services (id, name, duration_minutes, price_cents)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            service.id.to_string(),
            service.name,
            service.duration_minutes,
            service.price_cents,
        ],
    )?;
    Ok(())
}

pub fn get_service(conn: &Connection, id: &Uuid) -> Result<Option<Service>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, duration_minutes, price_cents FROM services WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, i64>(3)?,
        ))
    });

    match result {
        Ok((id, name, duration_minutes, price_cents)) => Ok(Some(Service {
            id: parse_uuid(&id)?,
            name,
            duration_minutes,
            price_cents,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Update a service's price. Sales always capture the price current at
/// finalize time, so a change here affects future sales only.
pub fn set_service_price(
    conn: &Connection,
    id: &Uuid,
    price_cents: i64,
) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE services SET price_cents = ?2 WHERE id = ?1",
        params![id.to_string(), price_cents],
    )?;
    if updated == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Service".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn list_services(conn: &Connection) -> Result<Vec<Service>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, duration_minutes, price_cents FROM services ORDER BY name",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, i64>(3)?,
        ))
    })?;

    let mut services = Vec::new();
    for row in rows {
        let (id, name, duration_minutes, price_cents) = row?;
        services.push(Service {
            id: parse_uuid(&id)?,
            name,
            duration_minutes,
            price_cents,
        });
    }
    Ok(services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn insert_get_and_reprice() {
        let conn = open_memory_database().unwrap();
        let service = Service {
            id: Uuid::new_v4(),
            name: "Haircut".into(),
            duration_minutes: 30,
            price_cents: 5000,
        };
        insert_service(&conn, &service).unwrap();

        set_service_price(&conn, &service.id, 6000).unwrap();
        let loaded = get_service(&conn, &service.id).unwrap().unwrap();
        assert_eq!(loaded.price_cents, 6000);
        assert_eq!(loaded.duration_minutes, 30);
    }

    #[test]
    fn get_missing_service_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_service(&conn, &Uuid::new_v4()).unwrap().is_none());
    }
}

//! Dashboard aggregates — the headline counters plus the two chart
//! queries (revenue per day, best-selling services).
//!
//! All functions take `today` explicitly so tests can pin the date.

use chrono::{Datelike, NaiveDate, Weekday};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::db::repository::parse_date;
use crate::db::DatabaseError;

/// Headline counters for the landing page.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub appointments_today: i64,
    pub clients: i64,
    pub active_employees: i64,
    /// Revenue for the ISO week containing `today`.
    pub week_revenue_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub total_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopService {
    pub service: String,
    pub units: i64,
}

pub fn summary(conn: &Connection, today: NaiveDate) -> Result<DashboardSummary, DatabaseError> {
    let appointments_today: i64 = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE date = ?1",
        params![today.to_string()],
        |row| row.get(0),
    )?;

    let clients: i64 = conn.query_row("SELECT COUNT(*) FROM clients", [], |row| row.get(0))?;

    let active_employees: i64 = conn.query_row(
        "SELECT COUNT(*) FROM employees WHERE status = 'active'",
        [],
        |row| row.get(0),
    )?;

    let iso = today.iso_week();
    let monday = NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon)
        .unwrap_or(today);
    let sunday = NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Sun)
        .unwrap_or(today);
    let week_revenue_cents: i64 = conn.query_row(
        "SELECT IFNULL(SUM(total_cents), 0) FROM sales WHERE date BETWEEN ?1 AND ?2",
        params![monday.to_string(), sunday.to_string()],
        |row| row.get(0),
    )?;

    Ok(DashboardSummary {
        appointments_today,
        clients,
        active_employees,
        week_revenue_cents,
    })
}

/// Revenue per day over the last seven days (inclusive of `today`).
/// Days with no sales are absent from the result.
pub fn revenue_by_day(
    conn: &Connection,
    today: NaiveDate,
) -> Result<Vec<RevenuePoint>, DatabaseError> {
    let from = today - chrono::Duration::days(6);
    let mut stmt = conn.prepare(
        "SELECT date, SUM(total_cents)
         FROM sales
         WHERE date BETWEEN ?1 AND ?2
         GROUP BY date
         ORDER BY date",
    )?;

    let rows = stmt.query_map(params![from.to_string(), today.to_string()], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut points = Vec::new();
    for row in rows {
        let (date, total_cents) = row?;
        points.push(RevenuePoint {
            date: parse_date(&date)?,
            total_cents,
        });
    }
    Ok(points)
}

/// The five best-selling services by units sold, all time.
pub fn top_services(conn: &Connection) -> Result<Vec<TopService>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT s.name, COUNT(*) AS units
         FROM sales v
         JOIN services s ON v.service_id = s.id
         GROUP BY s.name
         ORDER BY units DESC
         LIMIT 5",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(TopService {
            service: row.get(0)?,
            units: row.get(1)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use uuid::Uuid;

    fn seed_reference_rows(conn: &Connection) -> (String, String, String, String) {
        let (c, e, s1, s2) = (
            Uuid::new_v4().to_string(),
            Uuid::new_v4().to_string(),
            Uuid::new_v4().to_string(),
            Uuid::new_v4().to_string(),
        );
        conn.execute(
            "INSERT INTO clients (id, name, phone, created_at) VALUES (?1, 'Ana', '5512345678', datetime('now'))",
            params![c],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO employees (id, name, status) VALUES (?1, 'Marta', 'active')",
            params![e],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO employees (id, name, status) VALUES (?1, 'Luis', 'inactive')",
            params![Uuid::new_v4().to_string()],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO services (id, name, duration_minutes, price_cents) VALUES (?1, 'Cut', 30, 2500)",
            params![s1],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO services (id, name, duration_minutes, price_cents) VALUES (?1, 'Color', 60, 5000)",
            params![s2],
        )
        .unwrap();
        (c, e, s1, s2)
    }

    fn seed_sale(conn: &Connection, ids: &(String, String, String, String), service: &str, date: &str, cents: i64) {
        conn.execute(
            "INSERT INTO sales (id, client_id, employee_id, service_id, date, total_cents, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))",
            params![Uuid::new_v4().to_string(), ids.0, ids.1, service, date, cents],
        )
        .unwrap();
    }

    #[test]
    fn summary_counts_today_and_week() {
        let conn = open_memory_database().unwrap();
        let ids = seed_reference_rows(&conn);
        conn.execute(
            "INSERT INTO appointments (id, client_id, employee_id, service_id, date, start_time, created_at)
             VALUES (?1, ?2, ?3, ?4, '2026-02-05', '10:00', datetime('now'))",
            params![Uuid::new_v4().to_string(), ids.0, ids.1, ids.2],
        )
        .unwrap();
        // Thursday 2026-02-05 — its ISO week runs Mon 02-02 to Sun 02-08.
        seed_sale(&conn, &ids, &ids.2, "2026-02-02", 2500);
        seed_sale(&conn, &ids, &ids.2, "2026-02-08", 2500);
        seed_sale(&conn, &ids, &ids.2, "2026-02-09", 9999); // next week

        let today = "2026-02-05".parse().unwrap();
        let summary = summary(&conn, today).unwrap();
        assert_eq!(summary.appointments_today, 1);
        assert_eq!(summary.clients, 1);
        assert_eq!(summary.active_employees, 1);
        assert_eq!(summary.week_revenue_cents, 5000);
    }

    #[test]
    fn revenue_series_covers_last_seven_days_only() {
        let conn = open_memory_database().unwrap();
        let ids = seed_reference_rows(&conn);
        seed_sale(&conn, &ids, &ids.2, "2026-02-05", 2500);
        seed_sale(&conn, &ids, &ids.2, "2026-02-05", 2500);
        seed_sale(&conn, &ids, &ids.2, "2026-01-30", 1000); // 6 days back, included
        seed_sale(&conn, &ids, &ids.2, "2026-01-29", 7777); // 7 days back, excluded

        let today = "2026-02-05".parse().unwrap();
        let series = revenue_by_day(&conn, today).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date.to_string(), "2026-01-30");
        assert_eq!(series[1].total_cents, 5000);
    }

    #[test]
    fn top_services_ranked_by_units() {
        let conn = open_memory_database().unwrap();
        let ids = seed_reference_rows(&conn);
        seed_sale(&conn, &ids, &ids.3, "2026-02-01", 5000);
        seed_sale(&conn, &ids, &ids.3, "2026-02-02", 5000);
        seed_sale(&conn, &ids, &ids.2, "2026-02-03", 2500);

        let top = top_services(&conn).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].service, "Color");
        assert_eq!(top[0].units, 2);
    }
}

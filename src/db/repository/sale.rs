use chrono::{Datelike, NaiveDate, Weekday};
use rusqlite::{params, Connection};
use serde::Serialize;
use uuid::Uuid;

use super::{parse_date, parse_uuid};
use crate::db::DatabaseError;
use crate::models::enums::SalesPeriod;
use crate::models::Sale;

pub fn insert_sale(conn: &Connection, sale: &Sale) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO sales (id, client_id, employee_id, service_id, date, total_cents, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))",
        params![
            sale.id.to_string(),
            sale.client_id.to_string(),
            sale.employee_id.to_string(),
            sale.service_id.to_string(),
            sale.date.to_string(),
            sale.total_cents,
        ],
    )?;
    Ok(())
}

/// A sale joined with the names the sales page shows.
#[derive(Debug, Clone, Serialize)]
pub struct SaleRecord {
    pub id: Uuid,
    pub client: String,
    pub employee: String,
    pub service: String,
    pub date: NaiveDate,
    pub total_cents: i64,
}

/// Sales whose date falls in the inclusive [from, to] range, newest first.
pub fn sales_between(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<SaleRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT v.id, c.name, e.name, s.name, v.date, v.total_cents
         FROM sales v
         JOIN clients c ON v.client_id = c.id
         JOIN employees e ON v.employee_id = e.id
         JOIN services s ON v.service_id = s.id
         WHERE v.date BETWEEN ?1 AND ?2
         ORDER BY v.date DESC, v.recorded_at DESC",
    )?;

    let rows = stmt.query_map(params![from.to_string(), to.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, i64>(5)?,
        ))
    })?;

    let mut sales = Vec::new();
    for row in rows {
        let (id, client, employee, service, date, total_cents) = row?;
        sales.push(SaleRecord {
            id: parse_uuid(&id)?,
            client,
            employee,
            service,
            date: parse_date(&date)?,
            total_cents,
        });
    }
    Ok(sales)
}

/// Revenue total for the inclusive [from, to] range (0 when empty).
pub fn sales_total_between(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<i64, DatabaseError> {
    let total = conn.query_row(
        "SELECT IFNULL(SUM(total_cents), 0) FROM sales WHERE date BETWEEN ?1 AND ?2",
        params![from.to_string(), to.to_string()],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// Resolve a sales filter into an inclusive date range.
///
/// Value formats: day `YYYY-MM-DD`, week `YYYY-Www` (ISO week), month
/// `YYYY-MM`, year `YYYY`. A missing value means "today" for the day
/// filter and the period containing today for the rest. Returns `None`
/// for an unparseable value.
pub fn period_range(
    period: SalesPeriod,
    value: Option<&str>,
    today: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    match period {
        SalesPeriod::Day => {
            let day = match value {
                Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d").ok()?,
                None => today,
            };
            Some((day, day))
        }
        SalesPeriod::Week => {
            let (year, week) = match value {
                Some(v) => {
                    let (y, w) = v.split_once("-W")?;
                    (y.parse().ok()?, w.parse().ok()?)
                }
                None => {
                    let iso = today.iso_week();
                    (iso.year(), iso.week())
                }
            };
            let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
            let sunday = NaiveDate::from_isoywd_opt(year, week, Weekday::Sun)?;
            Some((monday, sunday))
        }
        SalesPeriod::Month => {
            let (year, month) = match value {
                Some(v) => {
                    let (y, m) = v.split_once('-')?;
                    (y.parse().ok()?, m.parse().ok()?)
                }
                None => (today.year(), today.month()),
            };
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            let next_month = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1)?
            };
            Some((first, next_month.pred_opt()?))
        }
        SalesPeriod::Year => {
            let year = match value {
                Some(v) => v.parse().ok()?,
                None => today.year(),
            };
            Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn seed_sale(conn: &Connection, date: &str, total_cents: i64) {
        let (c, e, s) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        // Distinct phone per seeded client keeps the (name, phone) key unique.
        conn.execute(
            "INSERT INTO clients (id, name, phone, created_at) VALUES (?1, 'Ana', ?2, datetime('now'))",
            params![c.to_string(), c.to_string()],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO employees (id, name) VALUES (?1, 'Marta')",
            params![e.to_string()],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO services (id, name, duration_minutes, price_cents) VALUES (?1, 'Cut', 30, ?2)",
            params![s.to_string(), total_cents],
        )
        .unwrap();
        insert_sale(
            conn,
            &Sale {
                id: Uuid::new_v4(),
                client_id: c,
                employee_id: e,
                service_id: s,
                date: date.parse().unwrap(),
                total_cents,
            },
        )
        .unwrap();
    }

    #[test]
    fn range_filters_and_totals() {
        let conn = open_memory_database().unwrap();
        seed_sale(&conn, "2026-02-01", 5000);
        seed_sale(&conn, "2026-02-03", 2500);
        seed_sale(&conn, "2026-03-01", 9999);

        let from = "2026-02-01".parse().unwrap();
        let to = "2026-02-28".parse().unwrap();
        let sales = sales_between(&conn, from, to).unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].date.to_string(), "2026-02-03");
        assert_eq!(sales_total_between(&conn, from, to).unwrap(), 7500);
    }

    #[test]
    fn empty_range_totals_zero() {
        let conn = open_memory_database().unwrap();
        let day = "2026-02-01".parse().unwrap();
        assert_eq!(sales_total_between(&conn, day, day).unwrap(), 0);
        assert!(sales_between(&conn, day, day).unwrap().is_empty());
    }

    #[test]
    fn day_range_defaults_to_today() {
        let today = "2026-02-05".parse().unwrap();
        let (from, to) = period_range(SalesPeriod::Day, None, today).unwrap();
        assert_eq!(from, today);
        assert_eq!(to, today);
    }

    #[test]
    fn week_range_covers_monday_to_sunday() {
        let today = "2026-02-05".parse().unwrap();
        let (from, to) = period_range(SalesPeriod::Week, Some("2026-W06"), today).unwrap();
        assert_eq!(from.to_string(), "2026-02-02");
        assert_eq!(to.to_string(), "2026-02-08");
        assert_eq!(from.weekday(), Weekday::Mon);
        assert_eq!(to.weekday(), Weekday::Sun);
    }

    #[test]
    fn month_range_handles_december() {
        let today = "2026-02-05".parse().unwrap();
        let (from, to) = period_range(SalesPeriod::Month, Some("2025-12"), today).unwrap();
        assert_eq!(from.to_string(), "2025-12-01");
        assert_eq!(to.to_string(), "2025-12-31");
    }

    #[test]
    fn year_range_spans_the_year() {
        let today = "2026-02-05".parse().unwrap();
        let (from, to) = period_range(SalesPeriod::Year, Some("2026"), today).unwrap();
        assert_eq!(from.to_string(), "2026-01-01");
        assert_eq!(to.to_string(), "2026-12-31");
    }

    #[test]
    fn garbage_value_yields_none() {
        let today = "2026-02-05".parse().unwrap();
        assert!(period_range(SalesPeriod::Week, Some("six"), today).is_none());
        assert!(period_range(SalesPeriod::Day, Some("02/05"), today).is_none());
    }
}

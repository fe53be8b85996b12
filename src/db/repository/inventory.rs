use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::{column_parse_error, DatabaseError};
use crate::models::{InventoryMovement, Medicine, MovementStatus};

pub fn insert_medicine(conn: &Connection, med: &Medicine) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medicines (id, name) VALUES (?1, ?2)",
        params![med.id, med.name],
    )?;
    Ok(())
}

pub fn get_medicine(conn: &Connection, id: i64) -> Result<Option<Medicine>, DatabaseError> {
    conn.query_row(
        "SELECT id, name FROM medicines WHERE id = ?1",
        params![id],
        |row| {
            Ok(Medicine {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(DatabaseError::from)
}

pub fn insert_movement(conn: &Connection, m: &InventoryMovement) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO inventory_movements
         (id, medicine_id, quantity, total_cost, order_date, supplier, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            m.id.to_string(),
            m.medicine_id,
            m.quantity,
            m.total_cost,
            m.order_date,
            m.supplier,
            m.status.as_str(),
        ],
    )?;
    Ok(())
}

/// All movements for one medicine inside the inclusive date range,
/// regardless of status. Status filtering is an aggregation concern.
pub fn movements_for_medicine(
    conn: &Connection,
    medicine_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<InventoryMovement>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, medicine_id, quantity, total_cost, order_date, supplier, status
         FROM inventory_movements
         WHERE medicine_id = ?1 AND order_date >= ?2 AND order_date <= ?3
         ORDER BY order_date",
    )?;
    let rows = stmt.query_map(params![medicine_id, start, end], |row| {
        let status: MovementStatus = row
            .get::<_, String>(6)?
            .parse()
            .map_err(|e| column_parse_error(6, e))?;
        Ok(InventoryMovement {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            medicine_id: row.get(1)?,
            quantity: row.get(2)?,
            total_cost: row.get(3)?,
            order_date: row.get(4)?,
            supplier: row.get(5)?,
            status,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn movement(med: i64, date: NaiveDate, qty: i64, status: MovementStatus) -> InventoryMovement {
        InventoryMovement {
            id: Uuid::new_v4(),
            medicine_id: med,
            quantity: qty,
            total_cost: None,
            order_date: date,
            supplier: None,
            status,
        }
    }

    #[test]
    fn movements_respect_date_range() {
        let conn = open_memory_database().unwrap();
        insert_medicine(&conn, &Medicine { id: 7, name: "Amoxicillin".into() }).unwrap();

        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        insert_movement(&conn, &movement(7, d(1, 15), 10, MovementStatus::Received)).unwrap();
        insert_movement(&conn, &movement(7, d(2, 1), 20, MovementStatus::Received)).unwrap();
        insert_movement(&conn, &movement(7, d(3, 30), 30, MovementStatus::Received)).unwrap();

        let in_range = movements_for_medicine(&conn, 7, d(1, 20), d(3, 30)).unwrap();
        assert_eq!(in_range.len(), 2);
        // Inclusive on both ends
        assert_eq!(in_range[1].order_date, d(3, 30));
    }

    #[test]
    fn movements_keep_all_statuses() {
        let conn = open_memory_database().unwrap();
        insert_medicine(&conn, &Medicine { id: 7, name: "Amoxicillin".into() }).unwrap();
        let d = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        insert_movement(&conn, &movement(7, d, 10, MovementStatus::Received)).unwrap();
        insert_movement(&conn, &movement(7, d, 5, MovementStatus::Cancelled)).unwrap();

        let all = movements_for_medicine(&conn, 7, d, d).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn corrupt_status_surfaces_an_error() {
        let conn = open_memory_database().unwrap();
        insert_medicine(&conn, &Medicine { id: 7, name: "Amoxicillin".into() }).unwrap();
        let d = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        insert_movement(&conn, &movement(7, d, 10, MovementStatus::Received)).unwrap();
        conn.execute("UPDATE inventory_movements SET status = 'lost'", [])
            .unwrap();

        assert!(movements_for_medicine(&conn, 7, d, d).is_err());
    }

    #[test]
    fn missing_medicine_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_medicine(&conn, 99).unwrap().is_none());
    }
}

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::{column_parse_error, DatabaseError};
use crate::models::{Bill, BillItem, BillItemType, Prescription, PrescriptionEntry};

pub fn insert_bill(conn: &Connection, bill: &Bill) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO bills (id, patient_id, generation_date) VALUES (?1, ?2, ?3)",
        params![
            bill.id.to_string(),
            bill.patient_id.map(|p| p.to_string()),
            bill.generation_date,
        ],
    )?;
    for item in &bill.items {
        conn.execute(
            "INSERT INTO bill_items (id, bill_id, item_type, description, amount, prescription_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                item.id.to_string(),
                bill.id.to_string(),
                item.item_type.as_str(),
                item.description,
                item.amount,
                item.prescription_id.map(|p| p.to_string()),
            ],
        )?;
    }
    Ok(())
}

fn bill_items(conn: &Connection, bill_id: &str) -> Result<Vec<BillItem>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, item_type, description, amount, prescription_id
         FROM bill_items WHERE bill_id = ?1",
    )?;
    let rows = stmt.query_map(params![bill_id], |row| {
        let item_type: BillItemType = row
            .get::<_, String>(1)?
            .parse()
            .map_err(|e| column_parse_error(1, e))?;
        Ok(BillItem {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            item_type,
            description: row.get(2)?,
            amount: row.get(3)?,
            prescription_id: row
                .get::<_, Option<String>>(4)?
                .and_then(|p| Uuid::parse_str(&p).ok()),
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Bills generated inside the inclusive date range, items attached.
pub fn bills_in_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Bill>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, generation_date FROM bills
         WHERE generation_date >= ?1 AND generation_date <= ?2
         ORDER BY generation_date",
    )?;
    let shells = stmt
        .query_map(params![start, end], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, NaiveDate>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut bills = Vec::with_capacity(shells.len());
    for (id, patient_id, generation_date) in shells {
        let items = bill_items(conn, &id)?;
        bills.push(Bill {
            id: Uuid::parse_str(&id).unwrap_or_default(),
            patient_id: patient_id.and_then(|p| Uuid::parse_str(&p).ok()),
            generation_date,
            items,
        });
    }
    Ok(bills)
}

pub fn insert_prescription(conn: &Connection, rx: &Prescription) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO prescriptions (id, consultation_id) VALUES (?1, ?2)",
        params![rx.id.to_string(), rx.consultation_id.map(|c| c.to_string())],
    )?;
    for entry in &rx.entries {
        conn.execute(
            "INSERT INTO prescription_entries
             (id, prescription_id, medicine_id, quantity, dispensed_qty)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.id.to_string(),
                rx.id.to_string(),
                entry.medicine_id,
                entry.quantity,
                entry.dispensed_qty,
            ],
        )?;
    }
    Ok(())
}

pub fn get_prescription(conn: &Connection, id: &Uuid) -> Result<Option<Prescription>, DatabaseError> {
    let shell = conn
        .query_row(
            "SELECT id, consultation_id FROM prescriptions WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                ))
            },
        )
        .optional()?;

    let Some((rx_id, consultation_id)) = shell else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT id, medicine_id, quantity, dispensed_qty
         FROM prescription_entries WHERE prescription_id = ?1",
    )?;
    let entries = stmt
        .query_map(params![rx_id], |row| {
            Ok(PrescriptionEntry {
                id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
                medicine_id: row.get(1)?,
                quantity: row.get(2)?,
                dispensed_qty: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Prescription {
        id: Uuid::parse_str(&rx_id).unwrap_or_default(),
        consultation_id: consultation_id.and_then(|c| Uuid::parse_str(&c).ok()),
        entries,
    }))
}

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Bed, BedStatus, OccupancySnapshot, Room};

pub fn insert_room(conn: &Connection, room: &Room) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO rooms (id, name) VALUES (?1, ?2)",
        params![room.id.to_string(), room.name],
    )?;
    Ok(())
}

pub fn insert_bed(conn: &Connection, bed: &Bed) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO beds (id, room_id, status) VALUES (?1, ?2, ?3)",
        params![bed.id.to_string(), bed.room_id.to_string(), bed.status.as_str()],
    )?;
    Ok(())
}

pub fn set_bed_status(conn: &Connection, bed_id: &Uuid, status: BedStatus) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE beds SET status = ?1 WHERE id = ?2",
        params![status.as_str(), bed_id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "bed".into(),
            id: bed_id.to_string(),
        });
    }
    Ok(())
}

/// Ids of all beds currently marked occupied.
pub fn occupied_bed_ids(conn: &Connection) -> Result<Vec<Uuid>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id FROM beds WHERE status = 'occupied' ORDER BY id")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.map(|r| {
        r.map_err(DatabaseError::from)
            .map(|s| Uuid::parse_str(&s).unwrap_or_default())
    })
    .collect()
}

/// Overwrite-on-conflict upsert keyed by calendar day: re-running the
/// snapshot job for the same date replaces the entry, never duplicates.
pub fn upsert_snapshot(conn: &Connection, snapshot: &OccupancySnapshot) -> Result<(), DatabaseError> {
    let beds_json = serde_json::to_string(
        &snapshot
            .occupied_beds
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>(),
    )
    .map_err(|e| DatabaseError::ConstraintViolation(format!("bed list not serializable: {e}")))?;

    conn.execute(
        "INSERT INTO occupancy_snapshots (date, occupied_beds) VALUES (?1, ?2)
         ON CONFLICT(date) DO UPDATE SET occupied_beds = excluded.occupied_beds",
        params![snapshot.date, beds_json],
    )?;
    Ok(())
}

/// Snapshots inside the inclusive date range, ascending by date.
pub fn snapshots_in_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<OccupancySnapshot>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT date, occupied_beds FROM occupancy_snapshots
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date",
    )?;
    let rows = stmt.query_map(params![start, end], |row| {
        Ok((row.get::<_, NaiveDate>(0)?, row.get::<_, String>(1)?))
    })?;

    rows.map(|r| {
        let (date, beds_json) = r?;
        let ids: Vec<String> = serde_json::from_str(&beds_json).unwrap_or_default();
        Ok(OccupancySnapshot {
            date,
            occupied_beds: ids
                .iter()
                .filter_map(|s| Uuid::parse_str(s).ok())
                .collect(),
        })
    })
    .collect()
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityStatistics {
    pub total_rooms: i64,
    pub total_beds: i64,
    pub occupied_beds: i64,
}

pub fn facility_statistics(conn: &Connection) -> Result<FacilityStatistics, DatabaseError> {
    let total_rooms = conn.query_row("SELECT COUNT(*) FROM rooms", [], |r| r.get(0))?;
    let total_beds = conn.query_row("SELECT COUNT(*) FROM beds", [], |r| r.get(0))?;
    let occupied_beds = conn.query_row(
        "SELECT COUNT(*) FROM beds WHERE status = 'occupied'",
        [],
        |r| r.get(0),
    )?;
    Ok(FacilityStatistics {
        total_rooms,
        total_beds,
        occupied_beds,
    })
}

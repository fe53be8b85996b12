//! Daily occupancy snapshots: a scheduled job that records which beds
//! are occupied so the occupancy trend reports can read history instead
//! of reconstructing it from mutable bed state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use rusqlite::Connection;

use crate::db::{repository, DatabaseError};
use crate::models::OccupancySnapshot;

const REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Capture the current occupied-bed set as the snapshot for `date`.
/// Running twice on the same day overwrites the earlier capture.
pub fn refresh_snapshot(conn: &Connection, date: NaiveDate) -> Result<OccupancySnapshot, DatabaseError> {
    let snapshot = OccupancySnapshot {
        date,
        occupied_beds: repository::occupied_bed_ids(conn)?,
    };
    repository::upsert_snapshot(conn, &snapshot)?;
    Ok(snapshot)
}

/// Background refresher: re-captures today's snapshot every hour, so
/// the stored row converges on end-of-day state. Errors are logged and
/// the loop keeps running.
pub fn spawn_snapshot_task(db: Arc<Mutex<Connection>>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
        loop {
            ticker.tick().await;
            let today = Utc::now().date_naive();
            let result = {
                let conn = match db.lock() {
                    Ok(conn) => conn,
                    Err(poisoned) => poisoned.into_inner(),
                };
                refresh_snapshot(&conn, today)
            };
            match result {
                Ok(snapshot) => tracing::debug!(
                    date = %snapshot.date,
                    occupied = snapshot.occupied_bed_count(),
                    "occupancy snapshot refreshed"
                ),
                Err(e) => tracing::error!("occupancy snapshot refresh failed: {e}"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::{Bed, BedStatus, Room};
    use uuid::Uuid;

    #[test]
    fn refresh_captures_current_occupancy() {
        let conn = open_memory_database().unwrap();
        let room = Room { id: Uuid::new_v4(), name: "Ward C".into() };
        repository::insert_room(&conn, &room).unwrap();
        let bed = Bed { id: Uuid::new_v4(), room_id: room.id, status: BedStatus::Occupied };
        repository::insert_bed(&conn, &bed).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let snapshot = refresh_snapshot(&conn, date).unwrap();
        assert_eq!(snapshot.occupied_beds, vec![bed.id]);

        let stored = repository::snapshots_in_range(&conn, date, date).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].occupied_beds, vec![bed.id]);
    }

    #[test]
    fn rerunning_same_day_overwrites() {
        let conn = open_memory_database().unwrap();
        let room = Room { id: Uuid::new_v4(), name: "Ward C".into() };
        repository::insert_room(&conn, &room).unwrap();
        let bed = Bed { id: Uuid::new_v4(), room_id: room.id, status: BedStatus::Occupied };
        repository::insert_bed(&conn, &bed).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        refresh_snapshot(&conn, date).unwrap();

        repository::set_bed_status(&conn, &bed.id, BedStatus::Vacant).unwrap();
        let second = refresh_snapshot(&conn, date).unwrap();
        assert!(second.occupied_beds.is_empty());

        let stored = repository::snapshots_in_range(&conn, date, date).unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].occupied_beds.is_empty());
    }
}

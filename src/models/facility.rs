use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::BedStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bed {
    pub id: Uuid,
    pub room_id: Uuid,
    pub status: BedStatus,
}

/// Precomputed daily cache of occupied beds; one row per calendar day,
/// overwritten by the refresh job when re-run for the same day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancySnapshot {
    pub date: NaiveDate,
    pub occupied_beds: Vec<Uuid>,
}

impl OccupancySnapshot {
    pub fn occupied_bed_count(&self) -> usize {
        self.occupied_beds.len()
    }
}

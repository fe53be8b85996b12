use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::db::DatabaseError;
use crate::models::Period;

/// Errors surfaced by report assembly. Maps onto the HTTP taxonomy:
/// invalid input → 400, missing entity → 404, store failure → 500.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("startDate {start} cannot be later than endDate {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("medicine {0} not found")]
    MedicineNotFound(i64),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// A label/value pair series, chart-ready.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MedicineRef {
    pub id: i64,
    pub name: String,
}

/// Monthly consumption series for one medicine, with a weekly breakdown
/// per month keyed by month label.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTrendReport {
    pub medicine: MedicineRef,
    pub monthly_data: SeriesData,
    pub weekly_data_by_month: BTreeMap<String, SeriesData>,
    pub total_orders: i64,
}

/// Same shape as the inventory trend, but summing dispensed quantities
/// reached through bill → prescription joins.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionTrendReport {
    pub medicine: MedicineRef,
    pub monthly_data: SeriesData,
    pub weekly_data_by_month: BTreeMap<String, SeriesData>,
    pub total_prescriptions_quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyEntry {
    pub date: NaiveDate,
    pub occupied_bed_count: i64,
}

/// One point of an occupancy trend: canonical period start plus the
/// summed occupied-bed count of the bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub period_start: NaiveDate,
    pub occupied_bed_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyTrendReport {
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub occupancy_entries: Vec<OccupancyEntry>,
    pub trends: Vec<TrendPoint>,
}

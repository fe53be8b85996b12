//! Analytics endpoints: occupancy, inventory and prescription trends,
//! rating distribution, performance quadrants.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::analytics::{
    bed_occupancy_trend, department_quadrants, doctor_quadrants, doctor_rating_distribution,
    medicine_inventory_trend, medicine_prescription_trend, InventoryTrendReport,
    OccupancyTrendReport, PrescriptionTrendReport, QuadrantReport, QuadrantThresholds,
};
use crate::analytics::joins::{DepartmentPerformance, DoctorPerformance};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::Period;

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("{field} must be a YYYY-MM-DD date, got {value:?}")))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: String,
    pub end_date: String,
}

/// `GET /api/analytics/occupancy/:period?startDate=..&endDate=..`
pub async fn occupancy(
    State(ctx): State<ApiContext>,
    Path(period): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<OccupancyTrendReport>, ApiError> {
    let period: Period = period
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("unknown period {period:?}")))?;
    let start = parse_date("startDate", &range.start_date)?;
    let end = parse_date("endDate", &range.end_date)?;

    let conn = ctx.db()?;
    Ok(Json(bed_occupancy_trend(&conn, period, start, end)?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineTrendRequest {
    pub medicine_id: i64,
    pub start_date: String,
    pub end_date: String,
}

/// `POST /api/analytics/inventory-trend`
pub async fn inventory_trend(
    State(ctx): State<ApiContext>,
    Json(req): Json<MedicineTrendRequest>,
) -> Result<Json<InventoryTrendReport>, ApiError> {
    let start = parse_date("startDate", &req.start_date)?;
    let end = parse_date("endDate", &req.end_date)?;

    let conn = ctx.db()?;
    Ok(Json(medicine_inventory_trend(&conn, req.medicine_id, start, end)?))
}

/// `POST /api/analytics/prescription-trend`
pub async fn prescription_trend(
    State(ctx): State<ApiContext>,
    Json(req): Json<MedicineTrendRequest>,
) -> Result<Json<PrescriptionTrendReport>, ApiError> {
    let start = parse_date("startDate", &req.start_date)?;
    let end = parse_date("endDate", &req.end_date)?;

    let conn = ctx.db()?;
    Ok(Json(medicine_prescription_trend(&conn, req.medicine_id, start, end)?))
}

/// `GET /api/analytics/rating-distribution`
pub async fn rating_distribution(
    State(ctx): State<ApiContext>,
) -> Result<Json<BTreeMap<String, u32>>, ApiError> {
    let conn = ctx.db()?;
    Ok(Json(doctor_rating_distribution(&conn)?))
}

/// `POST /api/analytics/doctor-quadrants`
pub async fn doctor_quadrant_report(
    State(ctx): State<ApiContext>,
    Json(thresholds): Json<QuadrantThresholds>,
) -> Result<Json<QuadrantReport<DoctorPerformance>>, ApiError> {
    let conn = ctx.db()?;
    Ok(Json(doctor_quadrants(&conn, thresholds)?))
}

/// `POST /api/analytics/department-quadrants`
pub async fn department_quadrant_report(
    State(ctx): State<ApiContext>,
    Json(thresholds): Json<QuadrantThresholds>,
) -> Result<Json<QuadrantReport<DepartmentPerformance>>, ApiError> {
    let conn = ctx.db()?;
    Ok(Json(department_quadrants(&conn, thresholds)?))
}

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::Connection;

use super::aggregates::{monthly_with_weekly, sum_by};
use super::bucketing::bucket_by;
use super::joins::{
    department_performance, dispensed_for_bill, doctor_performance, DepartmentPerformance,
    DoctorPerformance,
};
use super::quadrant::{classify, QuadrantReport, QuadrantThresholds};
use super::types::{
    InventoryTrendReport, MedicineRef, OccupancyEntry, OccupancyTrendReport,
    PrescriptionTrendReport, ReportError, TrendPoint,
};
use crate::db::repository;
use crate::models::{MovementStatus, Period};

/// Fixed, non-uniform histogram bin edges. Every bin is half-open
/// [min, max) except the last, which also admits an exact 5.0.
const RATING_BINS: [(f64, f64); 5] = [
    (1.5, 2.2),
    (2.2, 2.9),
    (2.9, 3.6),
    (3.6, 4.3),
    (4.3, 5.0),
];

fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), ReportError> {
    if start > end {
        return Err(ReportError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Occupied-bed counts bucketed at the requested granularity.
///
/// Daily entries come straight from the snapshot cache; coarser periods
/// sum the per-day counts of each bucket. Only buckets containing at
/// least one snapshot are emitted.
pub fn bed_occupancy_trend(
    conn: &Connection,
    period: Period,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<OccupancyTrendReport, ReportError> {
    validate_range(start, end)?;

    let snapshots = repository::snapshots_in_range(conn, start, end)?;

    let occupancy_entries: Vec<OccupancyEntry> = snapshots
        .iter()
        .map(|s| OccupancyEntry {
            date: s.date,
            occupied_bed_count: s.occupied_bed_count() as i64,
        })
        .collect();

    let trends = bucket_by(snapshots, period, |s| Some(s.date))
        .into_iter()
        .map(|(period_start, bucket)| TrendPoint {
            period_start,
            occupied_bed_count: sum_by(&bucket, |s| s.occupied_bed_count() as i64),
        })
        .collect();

    Ok(OccupancyTrendReport {
        period,
        start_date: start,
        end_date: end,
        occupancy_entries,
        trends,
    })
}

fn medicine_ref(conn: &Connection, medicine_id: i64) -> Result<MedicineRef, ReportError> {
    let medicine = repository::get_medicine(conn, medicine_id)?
        .ok_or(ReportError::MedicineNotFound(medicine_id))?;
    Ok(MedicineRef {
        id: medicine.id,
        name: medicine.name,
    })
}

/// Stock received per month for one medicine, with a weekly breakdown.
/// Only movements with `status = received` count; ordered or cancelled
/// movements never reach the series.
pub fn medicine_inventory_trend(
    conn: &Connection,
    medicine_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<InventoryTrendReport, ReportError> {
    validate_range(start, end)?;
    let medicine = medicine_ref(conn, medicine_id)?;

    let points: Vec<(NaiveDate, i64)> =
        repository::movements_for_medicine(conn, medicine_id, start, end)?
            .into_iter()
            .filter(|m| m.status == MovementStatus::Received)
            .map(|m| (m.order_date, m.quantity))
            .collect();

    let (monthly_data, weekly_data_by_month) = monthly_with_weekly(&points);
    let total_orders = monthly_data.values.iter().sum();

    Ok(InventoryTrendReport {
        medicine,
        monthly_data,
        weekly_data_by_month,
        total_orders,
    })
}

/// Dispensed quantity per month for one medicine, reached through
/// bill → prescription joins. Bills whose joins resolve to a zero
/// dispensed quantity contribute nothing.
pub fn medicine_prescription_trend(
    conn: &Connection,
    medicine_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PrescriptionTrendReport, ReportError> {
    validate_range(start, end)?;
    let medicine = medicine_ref(conn, medicine_id)?;

    let mut points: Vec<(NaiveDate, i64)> = Vec::new();
    for bill in repository::bills_in_range(conn, start, end)? {
        let dispensed = dispensed_for_bill(&bill, medicine_id, |rx_id| {
            repository::get_prescription(conn, rx_id)
        })?;
        if dispensed > 0 {
            points.push((bill.generation_date, dispensed));
        }
    }

    let (monthly_data, weekly_data_by_month) = monthly_with_weekly(&points);
    let total_prescriptions_quantity = monthly_data.values.iter().sum();

    Ok(PrescriptionTrendReport {
        medicine,
        monthly_data,
        weekly_data_by_month,
        total_prescriptions_quantity,
    })
}

/// Histogram of doctor running ratings over the fixed bins.
///
/// A rating of exactly 5.0 lands in the top bin even though the general
/// rule is half-open. Ratings below 1.5 fall into no bin and are
/// excluded from the distribution.
pub fn doctor_rating_distribution(
    conn: &Connection,
) -> Result<BTreeMap<String, u32>, ReportError> {
    let mut distribution: BTreeMap<String, u32> = RATING_BINS
        .iter()
        .map(|(min, max)| (format!("{min:.1}-{max:.1}"), 0))
        .collect();

    for doctor in repository::get_all_doctors(conn)? {
        for (min, max) in RATING_BINS {
            let in_bin = doctor.rating >= min && doctor.rating < max;
            let exact_top = max == 5.0 && doctor.rating == 5.0;
            if in_bin || exact_top {
                if let Some(count) = distribution.get_mut(&format!("{min:.1}-{max:.1}")) {
                    *count += 1;
                }
                break;
            }
        }
    }

    Ok(distribution)
}

/// Doctors on the rating × consultation-count plane, split by thresholds.
pub fn doctor_quadrants(
    conn: &Connection,
    thresholds: QuadrantThresholds,
) -> Result<QuadrantReport<DoctorPerformance>, ReportError> {
    let consultations = repository::get_all_consultations(conn)?;
    let doctors = repository::get_all_doctors(conn)?;
    let departments = repository::get_all_departments(conn)?;

    let population = doctor_performance(&consultations, &doctors, &departments);
    Ok(classify(population, thresholds))
}

/// Departments on the avg-rating × total-consultations plane.
pub fn department_quadrants(
    conn: &Connection,
    thresholds: QuadrantThresholds,
) -> Result<QuadrantReport<DepartmentPerformance>, ReportError> {
    let consultations = repository::get_all_consultations(conn)?;
    let doctors = repository::get_all_doctors(conn)?;
    let departments = repository::get_all_departments(conn)?;

    let population = department_performance(&consultations, &doctors, &departments);
    Ok(classify(population, thresholds))
}

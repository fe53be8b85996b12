use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use super::aggregates::mean;
use crate::db::DatabaseError;
use crate::models::{Bill, BillItemType, Consultation, Department, Doctor, Prescription};

/// Department label used when a doctor's department reference cannot be
/// resolved. Doctor-rooted reports keep such doctors under this label;
/// department-rooted aggregation drops them instead, because a
/// department average needs a real grouping key.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// A doctor enriched with department name and consultation volume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPerformance {
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub department: String,
    pub rating: f64,
    pub consultations: i64,
}

/// A department aggregated over its doctors' consultations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPerformance {
    pub department_id: Uuid,
    pub department_name: String,
    pub avg_rating: f64,
    pub consultations: i64,
    pub doctor_count: i64,
}

/// Resolve consultation → doctor → department, one row per doctor that
/// has at least one consultation. Consultations pointing at a deleted
/// doctor are dropped; a doctor without a resolvable department is kept
/// under [`UNKNOWN_DEPARTMENT`].
pub fn doctor_performance(
    consultations: &[Consultation],
    doctors: &[Doctor],
    departments: &[Department],
) -> Vec<DoctorPerformance> {
    let doctor_index: HashMap<Uuid, &Doctor> = doctors.iter().map(|d| (d.id, d)).collect();
    let department_index: HashMap<Uuid, &Department> =
        departments.iter().map(|d| (d.id, d)).collect();

    let mut counts: HashMap<Uuid, i64> = HashMap::new();
    for c in consultations {
        *counts.entry(c.doctor_id).or_default() += 1;
    }

    let mut rows: Vec<DoctorPerformance> = counts
        .into_iter()
        .filter_map(|(doctor_id, count)| {
            let doctor = doctor_index.get(&doctor_id)?;
            let department = doctor
                .department_id
                .and_then(|d| department_index.get(&d))
                .map(|d| d.name.clone())
                .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string());
            Some(DoctorPerformance {
                doctor_id,
                doctor_name: doctor.name.clone(),
                department,
                rating: doctor.rating,
                consultations: count,
            })
        })
        .collect();

    rows.sort_by(|a, b| a.doctor_name.cmp(&b.doctor_name));
    rows
}

/// Group consultations by their doctor's department. The average rating
/// is the mean of *distinct* doctor ratings, so a doctor seeing many
/// patients does not weight the department by consultation volume.
pub fn department_performance(
    consultations: &[Consultation],
    doctors: &[Doctor],
    departments: &[Department],
) -> Vec<DepartmentPerformance> {
    let doctor_index: HashMap<Uuid, &Doctor> = doctors.iter().map(|d| (d.id, d)).collect();
    let department_index: HashMap<Uuid, &Department> =
        departments.iter().map(|d| (d.id, d)).collect();

    struct Accumulator {
        consultations: i64,
        doctor_ratings: HashMap<Uuid, f64>,
    }
    let mut groups: HashMap<Uuid, Accumulator> = HashMap::new();

    for c in consultations {
        let Some(doctor) = doctor_index.get(&c.doctor_id) else {
            continue;
        };
        // A department-less doctor cannot contribute to a department average.
        let Some(dept_id) = doctor.department_id.filter(|d| department_index.contains_key(d))
        else {
            continue;
        };
        let acc = groups.entry(dept_id).or_insert_with(|| Accumulator {
            consultations: 0,
            doctor_ratings: HashMap::new(),
        });
        acc.consultations += 1;
        acc.doctor_ratings.insert(doctor.id, doctor.rating);
    }

    let mut rows: Vec<DepartmentPerformance> = groups
        .into_iter()
        .filter_map(|(dept_id, acc)| {
            let department = department_index.get(&dept_id)?;
            let ratings: Vec<f64> = acc.doctor_ratings.values().copied().collect();
            Some(DepartmentPerformance {
                department_id: dept_id,
                department_name: department.name.clone(),
                avg_rating: mean(&ratings).unwrap_or(0.0),
                consultations: acc.consultations,
                doctor_count: acc.doctor_ratings.len() as i64,
            })
        })
        .collect();

    rows.sort_by(|a, b| a.department_name.cmp(&b.department_name));
    rows
}

/// Dispensed quantity of one medicine reachable from a bill: medication
/// line items → prescription → entries for that medicine. A line item
/// whose prescription cannot be resolved contributes zero — billing may
/// reference purged prescriptions and that must not abort the report.
pub fn dispensed_for_bill<F>(
    bill: &Bill,
    medicine_id: i64,
    mut resolve: F,
) -> Result<i64, DatabaseError>
where
    F: FnMut(&Uuid) -> Result<Option<Prescription>, DatabaseError>,
{
    let mut total = 0;
    for item in &bill.items {
        if item.item_type != BillItemType::Medication {
            continue;
        }
        let Some(rx_id) = item.prescription_id else {
            continue;
        };
        if let Some(rx) = resolve(&rx_id)? {
            total += rx
                .entries
                .iter()
                .filter(|e| e.medicine_id == medicine_id)
                .map(|e| e.dispensed_qty)
                .sum::<i64>();
        }
    }
    Ok(total)
}

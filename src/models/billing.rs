use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::BillItemType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    pub generation_date: NaiveDate,
    pub items: Vec<BillItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillItem {
    pub id: Uuid,
    pub item_type: BillItemType,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub prescription_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub consultation_id: Option<Uuid>,
    pub entries: Vec<PrescriptionEntry>,
}

/// One prescribed medicine on a prescription. `dispensed_qty` is the
/// authoritative consumed figure, distinct from the ordered `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionEntry {
    pub id: Uuid,
    pub medicine_id: i64,
    pub quantity: i64,
    pub dispensed_qty: i64,
}

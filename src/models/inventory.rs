use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::MovementStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub id: i64,
    pub name: String,
}

/// A stock movement logged against a medicine. Only movements with
/// `status = Received` count toward the consumption trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: Uuid,
    pub medicine_id: i64,
    pub quantity: i64,
    pub total_cost: Option<f64>,
    pub order_date: NaiveDate,
    pub supplier: Option<String>,
    pub status: MovementStatus,
}

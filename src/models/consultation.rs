use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ConsultationStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub booked_date_time: DateTime<Utc>,
    pub status: ConsultationStatus,
    pub feedback: Option<Feedback>,
}

/// Patient feedback embedded on a completed consultation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub rating: i64,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

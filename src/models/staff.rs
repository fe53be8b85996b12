use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A doctor record. `rating` is a running mean over received feedback,
/// weighted by `num_ratings`; the pair is always mutated together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub department_id: Option<Uuid>,
    pub specialization: Option<String>,
    pub rating: f64,
    pub num_ratings: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
}

use serde::{Deserialize, Serialize};

use super::joins::{DepartmentPerformance, DoctorPerformance};

/// Two independent classification axes. `rating` is compared against
/// the entity's quality score, `volume` against its consultation count.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantThresholds {
    #[serde(rename = "ratingThreshold")]
    pub rating: f64,
    #[serde(rename = "consultationThreshold")]
    pub volume: i64,
}

/// An entity that can be placed on the rating × volume plane.
pub trait QuadrantScore {
    fn rating_score(&self) -> f64;
    fn volume_score(&self) -> i64;
}

impl QuadrantScore for DoctorPerformance {
    fn rating_score(&self) -> f64 {
        self.rating
    }
    fn volume_score(&self) -> i64 {
        self.consultations
    }
}

impl QuadrantScore for DepartmentPerformance {
    fn rating_score(&self) -> f64 {
        self.avg_rating
    }
    fn volume_score(&self) -> i64 {
        self.consultations
    }
}

#[derive(Debug, Serialize)]
pub struct QuadrantBucket<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> Default for QuadrantBucket<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
        }
    }
}

/// Four disjoint buckets plus the unclassified flat series used for
/// scatter-plot rendering.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantReport<T> {
    pub high_volume_high_rating: QuadrantBucket<T>,
    pub high_volume_low_rating: QuadrantBucket<T>,
    pub low_volume_high_rating: QuadrantBucket<T>,
    pub low_volume_low_rating: QuadrantBucket<T>,
    pub graph_data: Vec<T>,
}

/// Partition a scored population into four quadrants.
///
/// Thresholds are inclusive on the high side: an entity sitting exactly
/// on both thresholds classifies as high-volume & high-rating.
pub fn classify<T>(population: Vec<T>, thresholds: QuadrantThresholds) -> QuadrantReport<T>
where
    T: QuadrantScore + Clone,
{
    let mut report = QuadrantReport {
        high_volume_high_rating: QuadrantBucket::default(),
        high_volume_low_rating: QuadrantBucket::default(),
        low_volume_high_rating: QuadrantBucket::default(),
        low_volume_low_rating: QuadrantBucket::default(),
        graph_data: population.clone(),
    };

    for entity in population {
        let high_rating = entity.rating_score() >= thresholds.rating;
        let high_volume = entity.volume_score() >= thresholds.volume;

        let bucket = match (high_volume, high_rating) {
            (true, true) => &mut report.high_volume_high_rating,
            (true, false) => &mut report.high_volume_low_rating,
            (false, true) => &mut report.low_volume_high_rating,
            (false, false) => &mut report.low_volume_low_rating,
        };
        bucket.items.push(entity);
    }

    report.high_volume_high_rating.count = report.high_volume_high_rating.items.len();
    report.high_volume_low_rating.count = report.high_volume_low_rating.items.len();
    report.low_volume_high_rating.count = report.low_volume_high_rating.items.len();
    report.low_volume_low_rating.count = report.low_volume_low_rating.items.len();
    report
}

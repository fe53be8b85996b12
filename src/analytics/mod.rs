//! Analytics core: turns operational records into chart-ready reports.
//!
//! The pipeline is pure where it can be: bucketing, aggregation and the
//! join helpers operate on in-memory collections, and only the report
//! assemblers in [`reports`] touch the store. Dates bucket by calendar
//! period (ISO weeks start on Monday), series are ascending, and empty
//! buckets are never emitted.

pub mod aggregates;
pub mod bucketing;
pub mod joins;
pub mod quadrant;
pub mod reports;
pub mod types;

pub use quadrant::{QuadrantReport, QuadrantThresholds};
pub use reports::{
    bed_occupancy_trend, department_quadrants, doctor_quadrants, doctor_rating_distribution,
    medicine_inventory_trend, medicine_prescription_trend,
};
pub use types::{
    InventoryTrendReport, OccupancyTrendReport, PrescriptionTrendReport, ReportError,
};

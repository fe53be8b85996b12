//! Wardflow: hospital operations analytics service.
//!
//! Operational records (consultations, inventory, billing, beds) live
//! in a local SQLite store; the analytics core turns them into
//! chart-ready trend, distribution and quadrant reports served over a
//! JSON HTTP API.

pub mod analytics;
pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod occupancy;
pub mod ratings;

//! Facility endpoint: room and bed counts.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::{facility_statistics, FacilityStatistics};

/// `GET /api/facility/statistics`
pub async fn statistics(State(ctx): State<ApiContext>) -> Result<Json<FacilityStatistics>, ApiError> {
    let conn = ctx.db()?;
    Ok(Json(facility_statistics(&conn)?))
}

//! Feedback endpoints: submission, listing, filtering by rating.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::ratings::{
    comments_by_rating, feedback_overview, submit_feedback, FeedbackOverview, FeedbackReceipt,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub patient_id: Uuid,
    pub rating: i64,
    pub comments: Option<String>,
}

/// `POST /api/consultations/:id/feedback`
pub async fn submit(
    State(ctx): State<ApiContext>,
    Path(consultation_id): Path<Uuid>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackReceipt>, ApiError> {
    let conn = ctx.db()?;
    let receipt = submit_feedback(&conn, &consultation_id, &req.patient_id, req.rating, req.comments)?;
    Ok(Json(receipt))
}

/// `GET /api/feedback` — all feedback with the overall mean rating.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<FeedbackOverview>, ApiError> {
    let conn = ctx.db()?;
    Ok(Json(feedback_overview(&conn)?))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsResponse {
    pub rating: i64,
    pub comments: Vec<String>,
}

/// `GET /api/feedback/by-rating/:rating`
pub async fn by_rating(
    State(ctx): State<ApiContext>,
    Path(rating): Path<i64>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let conn = ctx.db()?;
    let comments = comments_by_rating(&conn, rating)?;
    Ok(Json(CommentsResponse { rating, comments }))
}

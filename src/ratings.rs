//! Feedback intake: validates a patient's consultation feedback, stores
//! it on the consultation, and folds the rating into the doctor's
//! running mean in the same call.

use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{repository, DatabaseError};
use crate::models::{Doctor, Feedback};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("rating {0} outside the allowed range {MIN_RATING}..={MAX_RATING}")]
    InvalidRating(i64),

    #[error("consultation {0} not found")]
    ConsultationNotFound(Uuid),

    #[error("doctor {0} not found")]
    DoctorNotFound(Uuid),

    #[error("consultation does not belong to the submitting patient")]
    PatientMismatch,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Outcome of a feedback submission: the stored feedback plus the
/// doctor's rating state after folding it in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReceipt {
    pub consultation_id: Uuid,
    pub feedback: Feedback,
    pub doctor_rating: f64,
    pub doctor_num_ratings: i64,
}

/// Attach feedback to a consultation and update its doctor's running
/// mean. Overwriting existing feedback is allowed; the new rating still
/// counts as one more observation, matching the store's single-UPDATE
/// arithmetic.
pub fn submit_feedback(
    conn: &Connection,
    consultation_id: &Uuid,
    patient_id: &Uuid,
    rating: i64,
    comments: Option<String>,
) -> Result<FeedbackReceipt, FeedbackError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(FeedbackError::InvalidRating(rating));
    }

    let consultation = repository::get_consultation(conn, consultation_id)?
        .ok_or(FeedbackError::ConsultationNotFound(*consultation_id))?;
    if consultation.patient_id != *patient_id {
        return Err(FeedbackError::PatientMismatch);
    }

    let feedback = Feedback {
        rating,
        comments,
        created_at: Utc::now(),
    };
    repository::set_feedback(conn, consultation_id, &feedback)?;

    let doctor = apply_to_doctor(conn, &consultation.doctor_id, rating)?;

    Ok(FeedbackReceipt {
        consultation_id: *consultation_id,
        feedback,
        doctor_rating: doctor.rating,
        doctor_num_ratings: doctor.num_ratings,
    })
}

fn apply_to_doctor(conn: &Connection, doctor_id: &Uuid, rating: i64) -> Result<Doctor, FeedbackError> {
    match repository::apply_rating(conn, doctor_id, rating) {
        Ok(doctor) => Ok(doctor),
        Err(DatabaseError::NotFound { .. }) => Err(FeedbackError::DoctorNotFound(*doctor_id)),
        Err(e) => Err(e.into()),
    }
}

/// All stored feedback with the overall mean rating, oldest first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackOverview {
    pub feedbacks: Vec<Feedback>,
    pub overall_rating: Option<f64>,
}

pub fn feedback_overview(conn: &Connection) -> Result<FeedbackOverview, FeedbackError> {
    let feedbacks = repository::get_all_feedback(conn)?;
    let ratings: Vec<f64> = feedbacks.iter().map(|f| f.rating as f64).collect();
    let overall_rating = crate::analytics::aggregates::mean(&ratings);
    Ok(FeedbackOverview {
        feedbacks,
        overall_rating,
    })
}

/// Comments of feedback entries with exactly the given rating.
pub fn comments_by_rating(conn: &Connection, rating: i64) -> Result<Vec<String>, FeedbackError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(FeedbackError::InvalidRating(rating));
    }
    Ok(repository::feedback_comments_by_rating(conn, rating)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::{Consultation, ConsultationStatus};
    use chrono::TimeZone;

    fn seed(conn: &Connection, rating: f64, num: i64) -> Consultation {
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: "Dr. Seed".into(),
            department_id: None,
            specialization: None,
            rating,
            num_ratings: num,
        };
        repository::insert_doctor(conn, &doctor).unwrap();

        let consultation = Consultation {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            doctor_id: doctor.id,
            booked_date_time: Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap(),
            status: ConsultationStatus::Completed,
            feedback: None,
        };
        repository::insert_consultation(conn, &consultation).unwrap();
        consultation
    }

    #[test]
    fn submit_updates_running_mean() {
        let conn = open_memory_database().unwrap();
        let c = seed(&conn, 4.0, 2);

        let receipt =
            submit_feedback(&conn, &c.id, &c.patient_id, 5, Some("Great".into())).unwrap();
        assert!((receipt.doctor_rating - 13.0 / 3.0).abs() < 1e-9);
        assert_eq!(receipt.doctor_num_ratings, 3);

        let stored = repository::get_consultation(&conn, &c.id).unwrap().unwrap();
        assert_eq!(stored.feedback.unwrap().rating, 5);
    }

    #[test]
    fn rating_bounds_are_enforced() {
        let conn = open_memory_database().unwrap();
        let c = seed(&conn, 4.0, 1);
        for bad in [0, 6, -3] {
            assert!(matches!(
                submit_feedback(&conn, &c.id, &c.patient_id, bad, None),
                Err(FeedbackError::InvalidRating(_))
            ));
        }
    }

    #[test]
    fn unknown_consultation_rejected() {
        let conn = open_memory_database().unwrap();
        assert!(matches!(
            submit_feedback(&conn, &Uuid::new_v4(), &Uuid::new_v4(), 4, None),
            Err(FeedbackError::ConsultationNotFound(_))
        ));
    }

    #[test]
    fn wrong_patient_rejected() {
        let conn = open_memory_database().unwrap();
        let c = seed(&conn, 4.0, 1);
        assert!(matches!(
            submit_feedback(&conn, &c.id, &Uuid::new_v4(), 4, None),
            Err(FeedbackError::PatientMismatch)
        ));
    }

    #[test]
    fn overview_reports_overall_mean() {
        let conn = open_memory_database().unwrap();
        for rating in [5, 3] {
            let c = seed(&conn, 0.0, 0);
            submit_feedback(&conn, &c.id, &c.patient_id, rating, None).unwrap();
        }

        let overview = feedback_overview(&conn).unwrap();
        assert_eq!(overview.feedbacks.len(), 2);
        assert_eq!(overview.overall_rating, Some(4.0));
    }

    #[test]
    fn empty_overview_has_no_mean() {
        let conn = open_memory_database().unwrap();
        let overview = feedback_overview(&conn).unwrap();
        assert!(overview.feedbacks.is_empty());
        assert_eq!(overview.overall_rating, None);
    }

    #[test]
    fn comments_by_rating_validates_bounds() {
        let conn = open_memory_database().unwrap();
        assert!(matches!(
            comments_by_rating(&conn, 9),
            Err(FeedbackError::InvalidRating(9))
        ));
        assert!(comments_by_rating(&conn, 3).unwrap().is_empty());
    }
}

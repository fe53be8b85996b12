use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::{column_parse_error, DatabaseError};
use crate::models::{Consultation, ConsultationStatus, Feedback};

pub fn insert_consultation(conn: &Connection, c: &Consultation) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO consultations
         (id, patient_id, doctor_id, booked_date_time, status,
          feedback_rating, feedback_comments, feedback_created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            c.id.to_string(),
            c.patient_id.to_string(),
            c.doctor_id.to_string(),
            c.booked_date_time,
            c.status.as_str(),
            c.feedback.as_ref().map(|f| f.rating),
            c.feedback.as_ref().and_then(|f| f.comments.clone()),
            c.feedback.as_ref().map(|f| f.created_at),
        ],
    )?;
    Ok(())
}

fn consultation_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Consultation> {
    let status: ConsultationStatus = row
        .get::<_, String>(4)?
        .parse()
        .map_err(|e| column_parse_error(4, e))?;
    let feedback = match row.get::<_, Option<i64>>(5)? {
        Some(rating) => Some(Feedback {
            rating,
            comments: row.get(6)?,
            created_at: row.get::<_, DateTime<Utc>>(7)?,
        }),
        None => None,
    };
    Ok(Consultation {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
        patient_id: Uuid::parse_str(&row.get::<_, String>(1)?).unwrap_or_default(),
        doctor_id: Uuid::parse_str(&row.get::<_, String>(2)?).unwrap_or_default(),
        booked_date_time: row.get(3)?,
        status,
        feedback,
    })
}

const CONSULTATION_COLUMNS: &str = "id, patient_id, doctor_id, booked_date_time, status,
          feedback_rating, feedback_comments, feedback_created_at";

pub fn get_consultation(conn: &Connection, id: &Uuid) -> Result<Option<Consultation>, DatabaseError> {
    conn.query_row(
        &format!("SELECT {CONSULTATION_COLUMNS} FROM consultations WHERE id = ?1"),
        params![id.to_string()],
        consultation_from_row,
    )
    .optional()
    .map_err(DatabaseError::from)
}

pub fn get_all_consultations(conn: &Connection) -> Result<Vec<Consultation>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONSULTATION_COLUMNS} FROM consultations ORDER BY booked_date_time"
    ))?;
    let rows = stmt.query_map([], consultation_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Attach feedback to a consultation, overwriting any previous feedback.
pub fn set_feedback(
    conn: &Connection,
    consultation_id: &Uuid,
    feedback: &Feedback,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE consultations
         SET feedback_rating = ?1, feedback_comments = ?2, feedback_created_at = ?3
         WHERE id = ?4",
        params![
            feedback.rating,
            feedback.comments,
            feedback.created_at,
            consultation_id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "consultation".into(),
            id: consultation_id.to_string(),
        });
    }
    Ok(())
}

/// Comments of all feedback entries carrying exactly the given rating.
pub fn feedback_comments_by_rating(
    conn: &Connection,
    rating: i64,
) -> Result<Vec<String>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT feedback_comments FROM consultations
         WHERE feedback_rating = ?1 AND feedback_comments IS NOT NULL
         ORDER BY feedback_created_at",
    )?;
    let rows = stmt.query_map(params![rating], |row| row.get::<_, String>(0))?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// All feedback entries across consultations, oldest first.
pub fn get_all_feedback(conn: &Connection) -> Result<Vec<Feedback>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT feedback_rating, feedback_comments, feedback_created_at
         FROM consultations
         WHERE feedback_rating IS NOT NULL
         ORDER BY feedback_created_at",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Feedback {
            rating: row.get(0)?,
            comments: row.get(1)?,
            created_at: row.get::<_, DateTime<Utc>>(2)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Department, Doctor};

pub fn insert_department(conn: &Connection, dept: &Department) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO departments (id, name) VALUES (?1, ?2)",
        params![dept.id.to_string(), dept.name],
    )?;
    Ok(())
}

pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (id, name, department_id, specialization, rating, num_ratings)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            doctor.id.to_string(),
            doctor.name,
            doctor.department_id.map(|d| d.to_string()),
            doctor.specialization,
            doctor.rating,
            doctor.num_ratings,
        ],
    )?;
    Ok(())
}

fn doctor_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
        name: row.get(1)?,
        department_id: row
            .get::<_, Option<String>>(2)?
            .and_then(|d| Uuid::parse_str(&d).ok()),
        specialization: row.get(3)?,
        rating: row.get(4)?,
        num_ratings: row.get(5)?,
    })
}

pub fn get_doctor(conn: &Connection, id: &Uuid) -> Result<Option<Doctor>, DatabaseError> {
    conn.query_row(
        "SELECT id, name, department_id, specialization, rating, num_ratings
         FROM doctors WHERE id = ?1",
        params![id.to_string()],
        doctor_from_row,
    )
    .optional()
    .map_err(DatabaseError::from)
}

pub fn get_all_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, department_id, specialization, rating, num_ratings FROM doctors",
    )?;
    let rows = stmt.query_map([], doctor_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn get_all_departments(conn: &Connection) -> Result<Vec<Department>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name FROM departments")?;
    let rows = stmt.query_map([], |row| {
        Ok(Department {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            name: row.get(1)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Fold a new feedback rating into the doctor's running mean.
///
/// new mean = (mean * weight + rating) / (weight + 1); weight + 1.
/// A single UPDATE statement, so concurrent submissions cannot lose an
/// update: SQLite serializes writers and the arithmetic happens inside
/// the statement, not in application code.
pub fn apply_rating(conn: &Connection, doctor_id: &Uuid, rating: i64) -> Result<Doctor, DatabaseError> {
    let changed = conn.execute(
        "UPDATE doctors
         SET rating = (rating * num_ratings + ?1) / (num_ratings + 1.0),
             num_ratings = num_ratings + 1
         WHERE id = ?2",
        params![rating as f64, doctor_id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "doctor".into(),
            id: doctor_id.to_string(),
        });
    }
    get_doctor(conn, doctor_id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "doctor".into(),
        id: doctor_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn doctor(dept: Option<Uuid>, rating: f64, num: i64) -> Doctor {
        Doctor {
            id: Uuid::new_v4(),
            name: "Dr. Test".into(),
            department_id: dept,
            specialization: None,
            rating,
            num_ratings: num,
        }
    }

    #[test]
    fn insert_and_fetch_doctor() {
        let conn = open_memory_database().unwrap();
        let doc = doctor(None, 4.5, 10);
        insert_doctor(&conn, &doc).unwrap();

        let fetched = get_doctor(&conn, &doc.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Dr. Test");
        assert_eq!(fetched.num_ratings, 10);
        assert!(fetched.department_id.is_none());
    }

    #[test]
    fn apply_rating_updates_mean_and_weight() {
        let conn = open_memory_database().unwrap();
        let doc = doctor(None, 4.0, 2);
        insert_doctor(&conn, &doc).unwrap();

        let updated = apply_rating(&conn, &doc.id, 5).unwrap();
        assert!((updated.rating - 13.0 / 3.0).abs() < 1e-9);
        assert_eq!(updated.num_ratings, 3);
    }

    #[test]
    fn apply_rating_from_zero_weight() {
        let conn = open_memory_database().unwrap();
        let doc = doctor(None, 0.0, 0);
        insert_doctor(&conn, &doc).unwrap();

        let updated = apply_rating(&conn, &doc.id, 4).unwrap();
        assert!((updated.rating - 4.0).abs() < 1e-9);
        assert_eq!(updated.num_ratings, 1);
    }

    #[test]
    fn apply_rating_unknown_doctor_fails() {
        let conn = open_memory_database().unwrap();
        let missing = Uuid::new_v4();
        assert!(matches!(
            apply_rating(&conn, &missing, 5),
            Err(DatabaseError::NotFound { .. })
        ));
    }
}

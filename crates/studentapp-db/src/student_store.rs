use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;

use studentapp_core::{MarksEntry, NewMarks, Store, StoreError, Student, StudentId};

#[derive(sqlx::FromRow)]
struct StudentRow {
    id: i64,
    name: String,
}

#[derive(sqlx::FromRow)]
struct MarksRow {
    id: i64,
    student_id: i64,
    subject: String,
    marks: f64,
}

impl From<MarksRow> for MarksEntry {
    fn from(row: MarksRow) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            subject: row.subject,
            marks: row.marks,
        }
    }
}

fn db_error(e: sqlx::Error) -> StoreError {
    tracing::error!(error = %e, "SQLite store operation failed");
    StoreError::Database(e.to_string())
}

/// SQLite implementation of Store.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn marks_for(&self, student_id: StudentId) -> Result<Vec<MarksEntry>, StoreError> {
        let rows = sqlx::query_as::<_, MarksRow>(
            "SELECT id, student_id, subject, marks FROM marks WHERE student_id = ? ORDER BY id",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let students = sqlx::query_as::<_, StudentRow>("SELECT id, name FROM student ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let rows = sqlx::query_as::<_, MarksRow>(
            "SELECT id, student_id, subject, marks FROM marks ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let mut marks_by_student: HashMap<StudentId, Vec<MarksEntry>> = HashMap::new();
        for row in rows {
            marks_by_student
                .entry(row.student_id)
                .or_default()
                .push(row.into());
        }

        Ok(students
            .into_iter()
            .map(|s| Student {
                marks: marks_by_student.remove(&s.id).unwrap_or_default(),
                id: s.id,
                name: s.name,
            })
            .collect())
    }

    async fn get_student(&self, id: StudentId) -> Result<Option<Student>, StoreError> {
        let row = sqlx::query_as::<_, StudentRow>("SELECT id, name FROM student WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        match row {
            Some(row) => Ok(Some(Student {
                marks: self.marks_for(row.id).await?,
                id: row.id,
                name: row.name,
            })),
            None => Ok(None),
        }
    }

    async fn create_student(&self, name: &str) -> Result<Student, StoreError> {
        let result = sqlx::query("INSERT INTO student (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(Student {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            marks: Vec::new(),
        })
    }

    async fn update_student_name(&self, id: StudentId, name: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE student SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_student(&self, id: StudentId) -> Result<bool, StoreError> {
        // marks rows go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM student WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_marks(&self, marks: NewMarks) -> Result<MarksEntry, StoreError> {
        let result =
            sqlx::query("INSERT INTO marks (student_id, subject, marks) VALUES (?, ?, ?)")
                .bind(marks.student_id)
                .bind(&marks.subject)
                .bind(marks.marks)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    let missing_owner = e
                        .as_database_error()
                        .is_some_and(|db| db.is_foreign_key_violation());
                    if missing_owner {
                        StoreError::MissingStudent(marks.student_id)
                    } else {
                        db_error(e)
                    }
                })?;

        Ok(MarksEntry {
            id: result.last_insert_rowid(),
            student_id: marks.student_id,
            subject: marks.subject,
            marks: marks.marks,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

use async_trait::async_trait;

use crate::error::StoreError;
use crate::student::{MarksEntry, NewMarks, Student, StudentId};

/// Durable CRUD over students and their marks.
///
/// Reads always return students with their marks attached. Lookups of a
/// single student return `Ok(None)` when it does not exist.
#[async_trait]
pub trait Store: Send + Sync {
    /// Get all students, ordered by id.
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;

    /// Get a student by ID.
    async fn get_student(&self, id: StudentId) -> Result<Option<Student>, StoreError>;

    /// Insert a new student with no marks.
    async fn create_student(&self, name: &str) -> Result<Student, StoreError>;

    /// Rename a student. Returns false if no student has this id.
    async fn update_student_name(&self, id: StudentId, name: &str) -> Result<bool, StoreError>;

    /// Delete a student and every marks entry it owns.
    /// Returns false if no student has this id.
    async fn delete_student(&self, id: StudentId) -> Result<bool, StoreError>;

    /// Record a marks entry. Fails with `MissingStudent` if the owner is unknown.
    async fn create_marks(&self, marks: NewMarks) -> Result<MarksEntry, StoreError>;

    /// Connectivity check used by the readiness endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release underlying connections.
    async fn close(&self);
}

// In-memory implementation for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::RwLock;

    #[derive(Default)]
    struct Tables {
        students: BTreeMap<StudentId, String>,
        marks: Vec<MarksEntry>,
        last_student_id: StudentId,
        last_marks_id: i64,
    }

    impl Tables {
        fn student(&self, id: StudentId, name: &str) -> Student {
            Student {
                id,
                name: name.to_string(),
                marks: self
                    .marks
                    .iter()
                    .filter(|m| m.student_id == id)
                    .cloned()
                    .collect(),
            }
        }
    }

    /// In-memory store for testing.
    #[derive(Default)]
    pub struct InMemoryStore {
        tables: RwLock<Tables>,
        failing: bool,
    }

    impl InMemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// A store whose every operation fails with a database error.
        pub fn failing() -> Self {
            Self {
                tables: RwLock::default(),
                failing: true,
            }
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.failing {
                return Err(StoreError::Database("store unavailable".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Store for InMemoryStore {
        async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
            self.check()?;
            let tables = self.tables.read().unwrap();
            Ok(tables
                .students
                .iter()
                .map(|(id, name)| tables.student(*id, name))
                .collect())
        }

        async fn get_student(&self, id: StudentId) -> Result<Option<Student>, StoreError> {
            self.check()?;
            let tables = self.tables.read().unwrap();
            Ok(tables
                .students
                .get(&id)
                .map(|name| tables.student(id, name)))
        }

        async fn create_student(&self, name: &str) -> Result<Student, StoreError> {
            self.check()?;
            let mut tables = self.tables.write().unwrap();
            tables.last_student_id += 1;
            let id = tables.last_student_id;
            tables.students.insert(id, name.to_string());
            Ok(Student {
                id,
                name: name.to_string(),
                marks: Vec::new(),
            })
        }

        async fn update_student_name(
            &self,
            id: StudentId,
            name: &str,
        ) -> Result<bool, StoreError> {
            self.check()?;
            let mut tables = self.tables.write().unwrap();
            match tables.students.get_mut(&id) {
                Some(existing) => {
                    *existing = name.to_string();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete_student(&self, id: StudentId) -> Result<bool, StoreError> {
            self.check()?;
            let mut tables = self.tables.write().unwrap();
            if tables.students.remove(&id).is_none() {
                return Ok(false);
            }
            tables.marks.retain(|m| m.student_id != id);
            Ok(true)
        }

        async fn create_marks(&self, marks: NewMarks) -> Result<MarksEntry, StoreError> {
            self.check()?;
            let mut tables = self.tables.write().unwrap();
            if !tables.students.contains_key(&marks.student_id) {
                return Err(StoreError::MissingStudent(marks.student_id));
            }
            tables.last_marks_id += 1;
            let entry = MarksEntry {
                id: tables.last_marks_id,
                student_id: marks.student_id,
                subject: marks.subject,
                marks: marks.marks,
            };
            tables.marks.push(entry.clone());
            Ok(entry)
        }

        async fn ping(&self) -> Result<(), StoreError> {
            self.check()
        }

        async fn close(&self) {}
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn english(student_id: StudentId, marks: f64) -> NewMarks {
            NewMarks {
                student_id,
                subject: "English".to_string(),
                marks,
            }
        }

        #[tokio::test]
        async fn test_create_and_get_student() {
            let store = InMemoryStore::new();

            let created = store.create_student("ABC").await.unwrap();
            assert_eq!(created.id, 1);
            assert!(created.marks.is_empty());

            let fetched = store.get_student(1).await.unwrap().unwrap();
            assert_eq!(fetched, created);
            assert!(store.get_student(2).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_marks_attached_to_owner() {
            let store = InMemoryStore::new();
            let abc = store.create_student("ABC").await.unwrap();
            let xyz = store.create_student("XYZ").await.unwrap();

            store.create_marks(english(abc.id, 99.0)).await.unwrap();
            store.create_marks(english(xyz.id, 89.0)).await.unwrap();

            let students = store.list_students().await.unwrap();
            assert_eq!(students.len(), 2);
            assert_eq!(students[0].marks.len(), 1);
            assert_eq!(students[0].marks[0].marks, 99.0);
            assert_eq!(students[1].marks[0].student_id, xyz.id);
        }

        #[tokio::test]
        async fn test_create_marks_for_missing_student() {
            let store = InMemoryStore::new();
            let err = store.create_marks(english(7, 50.0)).await.unwrap_err();
            assert!(matches!(err, StoreError::MissingStudent(7)));
        }

        #[tokio::test]
        async fn test_update_and_delete() {
            let store = InMemoryStore::new();
            let student = store.create_student("ABC").await.unwrap();
            store.create_marks(english(student.id, 40.0)).await.unwrap();

            assert!(store.update_student_name(student.id, "ABD").await.unwrap());
            assert!(!store.update_student_name(99, "nobody").await.unwrap());
            assert_eq!(
                store.get_student(student.id).await.unwrap().unwrap().name,
                "ABD"
            );

            assert!(store.delete_student(student.id).await.unwrap());
            assert!(!store.delete_student(student.id).await.unwrap());
            assert!(store.list_students().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_failing_store() {
            let store = InMemoryStore::failing();
            assert!(store.ping().await.is_err());
            assert!(store.list_students().await.is_err());
            assert!(store.create_student("ABC").await.is_err());
        }
    }
}

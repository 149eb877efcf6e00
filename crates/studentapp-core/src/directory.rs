use std::sync::Arc;

use crate::error::StoreError;
use crate::rank::{rank_students, RankRecord};
use crate::storage::Store;
use crate::student::{Student, StudentId};

/// Student lookups and mutations, plus the rank list built on top of them.
#[derive(Clone)]
pub struct StudentDirectory {
    store: Arc<dyn Store>,
}

impl StudentDirectory {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<Student>, StoreError> {
        tracing::info!("Fetching all students");
        self.store.list_students().await
    }

    pub async fn get_by_id(&self, id: StudentId) -> Result<Option<Student>, StoreError> {
        tracing::info!(id, "Fetching student");
        self.store.get_student(id).await
    }

    pub async fn create(&self, name: &str) -> Result<Student, StoreError> {
        tracing::info!("Creating student");
        self.store.create_student(name).await
    }

    /// Rename a student. Callers check existence first; an unknown id
    /// returns `Ok(false)`.
    pub async fn update_name(&self, id: StudentId, name: &str) -> Result<bool, StoreError> {
        tracing::info!(id, "Updating student");
        self.store.update_student_name(id, name).await
    }

    /// Delete a student and its marks. Callers check existence first.
    pub async fn delete(&self, id: StudentId) -> Result<bool, StoreError> {
        tracing::info!(id, "Deleting student");
        self.store.delete_student(id).await
    }

    pub async fn rank_list(&self) -> Result<Vec<RankRecord>, StoreError> {
        tracing::info!("Fetching students for the rank list");
        let students = self.store.list_students().await?;
        Ok(rank_students(&students))
    }
}

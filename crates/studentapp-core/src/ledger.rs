use std::sync::Arc;

use crate::error::StoreError;
use crate::storage::Store;
use crate::student::{MarksEntry, NewMarks};

/// Records marks entries. Entries are never updated or deleted here.
#[derive(Clone)]
pub struct MarksLedger {
    store: Arc<dyn Store>,
}

impl MarksLedger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, marks: NewMarks) -> Result<MarksEntry, StoreError> {
        tracing::info!(student_id = marks.student_id, "Recording marks");
        self.store.create_marks(marks).await
    }
}

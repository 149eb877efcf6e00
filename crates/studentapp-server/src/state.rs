use std::sync::Arc;

use studentapp_core::{MarksLedger, Store, StudentDirectory};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub directory: StudentDirectory,
    pub ledger: MarksLedger,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            directory: StudentDirectory::new(store.clone()),
            ledger: MarksLedger::new(store.clone()),
            store,
        }
    }
}

//! Studentapp Core - Domain models, ranking, validation and the storage trait.
//!
//! This crate has no dependencies on other studentapp crates. The database
//! and HTTP layers build on the types and traits defined here.

pub mod directory;
pub mod error;
pub mod ledger;
pub mod rank;
pub mod storage;
pub mod student;
pub mod validation;

// Re-exports for convenience
pub use directory::StudentDirectory;
pub use error::{FieldError, StoreError, ValidationErrors};
pub use ledger::MarksLedger;
pub use rank::{rank_students, RankRecord};
pub use storage::Store;
pub use student::{MarksEntry, NewMarks, Student, StudentId};
pub use validation::Validator;

#[cfg(any(test, feature = "test-utils"))]
pub use storage::memory::InMemoryStore;

use serde::Serialize;
use thiserror::Error;

use crate::student::StudentId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Student not found: {0}")]
    MissingStudent(StudentId),

    #[error("Database error: {0}")]
    Database(String),
}

/// Where a rejected value came from in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
    pub location: Location,
}

impl FieldError {
    pub fn body(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            location: Location::Body,
        }
    }

    pub fn params(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            location: Location::Params,
        }
    }
}

/// All field errors found while validating one request.
#[derive(Error, Debug, Clone, Default, PartialEq)]
#[error("Validation failed for {} field(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Ok if nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

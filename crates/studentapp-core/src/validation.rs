use serde_json::Value;

use crate::error::{FieldError, ValidationErrors};
use crate::student::{round_marks, NewMarks, StudentId};

/// Highest score a single marks entry may carry.
pub const MAX_MARKS: f64 = 100.0;

const MARKS_RANGE: &str = "marks must be between 0 and 100";

/// Validator for incoming request fields.
///
/// Request bodies arrive as raw JSON values so that a field of the wrong type
/// is reported against that field.
pub struct Validator;

impl Validator {
    /// Validate a student name. Missing, null and blank names are rejected.
    pub fn validate_name(name: Option<&Value>) -> Result<String, ValidationErrors> {
        match present(name) {
            None => Err(FieldError::body("name", "name is required").into()),
            Some(Value::String(name)) => match non_blank(name) {
                Some(name) => Ok(name.to_string()),
                None => Err(FieldError::body("name", "name is required").into()),
            },
            Some(_) => Err(FieldError::body("name", "name must be a string").into()),
        }
    }

    /// Parse a student id taken from the request path.
    pub fn parse_student_id(raw: &str) -> Result<StudentId, ValidationErrors> {
        raw.trim()
            .parse::<StudentId>()
            .map_err(|_| FieldError::params("id", "id must be an integer").into())
    }

    /// Validate a score. Returns every message that applies.
    pub fn validate_score(marks: f64) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if marks < 0.0 {
            errors.push(FieldError::body(
                "marks",
                "marks field cannot have negative values",
            ));
        }
        if !marks.is_finite() || !(0.0..=MAX_MARKS).contains(&marks) {
            errors.push(FieldError::body("marks", MARKS_RANGE));
        }
        errors
    }

    /// Validate all fields of a marks request at once.
    ///
    /// `marks` may be a JSON number or a numeric string. The stored score is
    /// rounded to two decimal places.
    pub fn validate_new_marks(
        student_id: Option<&Value>,
        subject: Option<&Value>,
        marks: Option<&Value>,
    ) -> Result<NewMarks, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let student_id = match present(student_id) {
            None => {
                errors.push(FieldError::body(
                    "studentId",
                    "student id field is required",
                ));
                None
            }
            Some(value) => {
                let id = value.as_i64();
                if id.is_none() {
                    errors.push(FieldError::body(
                        "studentId",
                        "student id must be an integer",
                    ));
                }
                id
            }
        };

        let subject = match present(subject) {
            Some(Value::String(subject)) => {
                let subject = non_blank(subject);
                if subject.is_none() {
                    errors.push(FieldError::body("subject", "subject field is required"));
                }
                subject
            }
            Some(_) => {
                errors.push(FieldError::body("subject", "subject must be a string"));
                None
            }
            None => {
                errors.push(FieldError::body("subject", "subject field is required"));
                None
            }
        };

        let marks = match present(marks) {
            None => {
                errors.push(FieldError::body("marks", "marks field is required"));
                None
            }
            Some(value) => match score_of(value) {
                Some(m) => {
                    Self::validate_score(m)
                        .into_iter()
                        .for_each(|e| errors.push(e));
                    Some(m)
                }
                None => {
                    errors.push(FieldError::body("marks", MARKS_RANGE));
                    None
                }
            },
        };

        match (student_id, subject, marks) {
            (Some(student_id), Some(subject), Some(marks)) if errors.is_empty() => Ok(NewMarks {
                student_id,
                subject: subject.to_string(),
                marks: round_marks(marks),
            }),
            _ => Err(errors),
        }
    }
}

/// Treat an explicit JSON `null` the same as an absent field.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn score_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|m| m.is_finite()),
        _ => None,
    }
}

fn non_blank(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn messages(errors: &ValidationErrors) -> Vec<&str> {
        errors.errors().iter().map(|e| e.message.as_str()).collect()
    }

    fn fields(errors: &ValidationErrors) -> Vec<&str> {
        errors.errors().iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_name() {
        assert_eq!(Validator::validate_name(Some(&json!("ABC"))).unwrap(), "ABC");
        assert_eq!(Validator::validate_name(Some(&json!("  ABC "))).unwrap(), "ABC");
    }

    #[test]
    fn test_invalid_name() {
        for name in [None, Some(json!(null)), Some(json!("")), Some(json!("   "))] {
            let err = Validator::validate_name(name.as_ref()).unwrap_err();
            assert_eq!(messages(&err), vec!["name is required"]);
            assert_eq!(err.errors()[0].field, "name");
        }
    }

    #[test]
    fn test_name_of_wrong_type() {
        for name in [json!(42), json!(true), json!(["ABC"])] {
            let err = Validator::validate_name(Some(&name)).unwrap_err();
            assert_eq!(fields(&err), vec!["name"]);
            assert_eq!(messages(&err), vec!["name must be a string"]);
        }
    }

    #[test]
    fn test_parse_student_id() {
        assert_eq!(Validator::parse_student_id("42").unwrap(), 42);
        assert!(Validator::parse_student_id("abc").is_err());
        assert!(Validator::parse_student_id("").is_err());
        assert!(Validator::parse_student_id("1.5").is_err());
    }

    #[test]
    fn test_valid_scores() {
        assert!(Validator::validate_score(0.0).is_empty());
        assert!(Validator::validate_score(55.5).is_empty());
        assert!(Validator::validate_score(100.0).is_empty());
    }

    #[test]
    fn test_score_above_range() {
        let errors = Validator::validate_score(150.0);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "marks must be between 0 and 100");
    }

    #[test]
    fn test_negative_score_reports_both_rules() {
        let errors = Validator::validate_score(-5.0);
        let msgs: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            msgs,
            vec![
                "marks field cannot have negative values",
                "marks must be between 0 and 100"
            ]
        );
    }

    #[test]
    fn test_non_finite_score() {
        assert!(!Validator::validate_score(f64::NAN).is_empty());
        assert!(!Validator::validate_score(f64::INFINITY).is_empty());
    }

    #[test]
    fn test_validate_new_marks() {
        let marks = Validator::validate_new_marks(
            Some(&json!(1)),
            Some(&json!("English")),
            Some(&json!(99)),
        )
        .unwrap();
        assert_eq!(
            marks,
            NewMarks {
                student_id: 1,
                subject: "English".to_string(),
                marks: 99.0,
            }
        );
    }

    #[test]
    fn test_validate_new_marks_collects_every_field() {
        let err = Validator::validate_new_marks(None, Some(&json!(" ")), Some(&json!(null)))
            .unwrap_err();
        assert_eq!(fields(&err), vec!["studentId", "subject", "marks"]);
        assert_eq!(
            messages(&err),
            vec![
                "student id field is required",
                "subject field is required",
                "marks field is required"
            ]
        );
    }

    #[test]
    fn test_validate_new_marks_rejects_out_of_range() {
        let err = Validator::validate_new_marks(
            Some(&json!(1)),
            Some(&json!("Maths")),
            Some(&json!(101.0)),
        )
        .unwrap_err();
        assert_eq!(messages(&err), vec!["marks must be between 0 and 100"]);
    }

    #[test]
    fn test_numeric_string_marks_are_range_checked() {
        let err = Validator::validate_new_marks(
            Some(&json!(1)),
            Some(&json!("Maths")),
            Some(&json!("150")),
        )
        .unwrap_err();
        assert_eq!(fields(&err), vec!["marks"]);
        assert_eq!(messages(&err), vec!["marks must be between 0 and 100"]);

        let marks = Validator::validate_new_marks(
            Some(&json!(1)),
            Some(&json!("Maths")),
            Some(&json!(" 75.5 ")),
        )
        .unwrap();
        assert_eq!(marks.marks, 75.5);
    }

    #[test]
    fn test_non_numeric_marks_report_on_marks_field() {
        for marks in [json!("abc"), json!(true), json!({"value": 50})] {
            let err =
                Validator::validate_new_marks(Some(&json!(1)), Some(&json!("Maths")), Some(&marks))
                    .unwrap_err();
            assert_eq!(fields(&err), vec!["marks"]);
            assert_eq!(messages(&err), vec!["marks must be between 0 and 100"]);
        }
    }

    #[test]
    fn test_student_id_must_be_an_integer() {
        for student_id in [json!("1"), json!(1.5), json!([1])] {
            let err = Validator::validate_new_marks(
                Some(&student_id),
                Some(&json!("Maths")),
                Some(&json!(50)),
            )
            .unwrap_err();
            assert_eq!(fields(&err), vec!["studentId"]);
            assert_eq!(messages(&err), vec!["student id must be an integer"]);
        }
    }

    #[test]
    fn test_subject_of_wrong_type() {
        let err =
            Validator::validate_new_marks(Some(&json!(1)), Some(&json!(7)), Some(&json!(50)))
                .unwrap_err();
        assert_eq!(fields(&err), vec!["subject"]);
        assert_eq!(messages(&err), vec!["subject must be a string"]);
    }

    #[test]
    fn test_stored_score_is_rounded_to_hundredths() {
        let marks = Validator::validate_new_marks(
            Some(&json!(1)),
            Some(&json!("Maths")),
            Some(&json!(66.666)),
        )
        .unwrap();
        assert_eq!(marks.marks, 66.67);
    }
}

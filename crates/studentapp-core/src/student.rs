use serde::{Deserialize, Serialize};

/// Store-assigned student identifier.
pub type StudentId = i64;

/// A student together with every marks entry it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub marks: Vec<MarksEntry>,
}

/// Scores are summed and compared in hundredths of a mark.
const SCALE: f64 = 100.0;

impl Student {
    /// Sum of all scores in hundredths, 0 when the student has no marks.
    pub fn total_hundredths(&self) -> i64 {
        self.marks.iter().map(|m| to_hundredths(m.marks)).sum()
    }

    /// Sum of all scores, 0 when the student has no marks.
    pub fn total_marks(&self) -> f64 {
        from_hundredths(self.total_hundredths())
    }
}

/// Convert a score to whole hundredths, rounding half away from zero.
pub fn to_hundredths(marks: f64) -> i64 {
    (marks * SCALE).round() as i64
}

pub fn from_hundredths(hundredths: i64) -> f64 {
    hundredths as f64 / SCALE
}

/// Round a score to two decimal places.
pub fn round_marks(marks: f64) -> f64 {
    from_hundredths(to_hundredths(marks))
}

/// One recorded score for a subject. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksEntry {
    pub id: i64,
    pub student_id: StudentId,
    pub subject: String,
    pub marks: f64,
}

/// A validated marks entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMarks {
    pub student_id: StudentId,
    pub subject: String,
    pub marks: f64,
}

use serde::{Deserialize, Serialize};

use crate::student::{from_hundredths, Student};

/// One line of the rank list. Derived on every query, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRecord {
    pub student_name: String,
    pub total_marks: f64,
    pub rank: u32,
}

/// Rank students by total marks, highest first.
///
/// Equal totals share a rank and the next lower total gets the previous rank
/// plus one, so totals `[99, 89, 89, 70]` rank as `[1, 2, 2, 3]`. Students
/// with equal totals keep their input order.
pub fn rank_students(students: &[Student]) -> Vec<RankRecord> {
    // Totals are compared as integer hundredths so that equal decimal sums tie.
    let mut scored: Vec<(i64, RankRecord)> = students
        .iter()
        .map(|student| {
            let total = student.total_hundredths();
            let record = RankRecord {
                student_name: student.name.clone(),
                total_marks: from_hundredths(total),
                rank: 0,
            };
            (total, record)
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut previous: Option<(i64, u32)> = None;
    for (total, record) in &mut scored {
        record.rank = match previous {
            Some((prev_total, rank)) if prev_total == *total => rank,
            Some((_, rank)) => rank + 1,
            None => 1,
        };
        previous = Some((*total, record.rank));

        tracing::debug!(
            rank = record.rank,
            name = %record.student_name,
            total_marks = record.total_marks,
            "Ranked student"
        );
    }

    scored.into_iter().map(|(_, record)| record).collect()
}

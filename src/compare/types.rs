//! Discrepancy records produced by the comparator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder for a value the candidate document does not have
pub const MISSING_IN_STUDENT: &str = "Missing in student";

/// Placeholder for a value the reference document does not have
pub const MISSING_IN_SOLUTION: &str = "Missing in solution";

/// One difference between the reference (solution) and candidate (student)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// Dotted path with node ids replaced by node names
    pub path: String,
    pub solution: Value,
    pub student: Value,
}

impl Discrepancy {
    pub fn missing_in_student(path: String, solution: Value) -> Self {
        Self {
            path,
            solution,
            student: Value::String(MISSING_IN_STUDENT.to_string()),
        }
    }

    pub fn missing_in_solution(path: String, student: Value) -> Self {
        Self {
            path,
            solution: Value::String(MISSING_IN_SOLUTION.to_string()),
            student,
        }
    }

    pub fn is_missing_in_student(&self) -> bool {
        self.student.as_str() == Some(MISSING_IN_STUDENT)
    }

    pub fn is_missing_in_solution(&self) -> bool {
        self.solution.as_str() == Some(MISSING_IN_SOLUTION)
    }
}

/// Everything found for one candidate document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub differences: Vec<Discrepancy>,
}

impl ComparisonReport {
    pub fn is_clean(&self) -> bool {
        self.differences.is_empty()
    }
}

//! Recursive structural comparison of two JSON documents.
//!
//! The reference (solution) drives key enumeration; keys only the candidate
//! (student) has are reported after the reference keys of the same mapping.
//! Every pair of value kinds has a defined outcome:
//!
//! | reference | candidate       | outcome                                   |
//! |-----------|-----------------|-------------------------------------------|
//! | mapping   | mapping         | recurse                                   |
//! | sequence  | sequence        | one record if the multisets differ        |
//! | null      | absent or null  | nothing                                   |
//! | any       | absent or null  | "Missing in student"                      |
//! | absent    | any             | "Missing in solution"                     |
//! | any other pair              || one record unless the values are equal   |
//!
//! Mixed kinds (mapping against sequence, sequence against scalar, ...) are
//! never equal. Numbers compare by value, so `2` equals `2.0`.

use serde_json::{Map, Value};

use super::resolver::NameResolver;
use super::types::{ComparisonReport, Discrepancy};

/// Path used when the documents themselves are not mappings
pub const ROOT_PATH: &str = "$";

/// Compare a candidate document against the reference
pub fn compare_documents(solution: &Value, student: &Value, resolver: &NameResolver) -> ComparisonReport {
    let mut differ = Differ {
        resolver,
        differences: Vec::new(),
    };

    match (solution, student) {
        (Value::Object(solution), Value::Object(student)) => differ.compare_maps("", solution, student),
        _ => differ.compare_values(ROOT_PATH.to_string(), solution, Some(student)),
    }

    ComparisonReport {
        differences: differ.differences,
    }
}

struct Differ<'r> {
    resolver: &'r NameResolver,
    differences: Vec<Discrepancy>,
}

impl Differ<'_> {
    fn compare_maps(&mut self, path: &str, solution: &Map<String, Value>, student: &Map<String, Value>) {
        for (key, solution_value) in solution {
            self.compare_values(join_path(path, key), solution_value, student.get(key));
        }

        for (key, student_value) in student {
            if !solution.contains_key(key) {
                let path = self.resolver.resolve(&join_path(path, key));
                self.differences
                    .push(Discrepancy::missing_in_solution(path, student_value.clone()));
            }
        }
    }

    fn compare_values(&mut self, path: String, solution: &Value, student: Option<&Value>) {
        match (solution, student) {
            (Value::Object(solution), Some(Value::Object(student))) => {
                self.compare_maps(&path, solution, student);
            }
            (Value::Array(solution_items), Some(Value::Array(student_items))) => {
                if !same_multiset(solution_items, student_items) {
                    self.record(&path, solution.clone(), Value::Array(student_items.clone()));
                }
            }
            _ => {
                let student = student.filter(|value| !value.is_null());
                match student {
                    None if solution.is_null() => {}
                    None => {
                        let path = self.resolver.resolve(&path);
                        self.differences
                            .push(Discrepancy::missing_in_student(path, solution.clone()));
                    }
                    Some(student) if !values_equal(solution, student) => {
                        self.record(&path, solution.clone(), student.clone());
                    }
                    Some(_) => {}
                }
            }
        }
    }

    fn record(&mut self, path: &str, solution: Value, student: Value) {
        self.differences.push(Discrepancy {
            path: self.resolver.resolve(path),
            solution,
            student,
        });
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

/// Equality with numbers compared by value
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        _ => a == b,
    }
}

/// Order-insensitive comparison of two sequences
///
/// Elements are ordered by their canonical serialization, which is total for
/// every value kind including mappings.
fn same_multiset(a: &[Value], b: &[Value]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut a: Vec<String> = a.iter().map(canonical_form).collect();
    let mut b: Vec<String> = b.iter().map(canonical_form).collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Compact JSON with mapping keys sorted at every level
pub fn canonical_form(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|x, y| x.0.cmp(y.0));
            let body: Vec<String> = entries
                .into_iter()
                .map(|(key, value)| format!("{}:{}", Value::String(key.clone()), canonical_form(value)))
                .collect();
            format!("{{{}}}", body.join(","))
        }
        Value::Array(items) => {
            let body: Vec<String> = items.iter().map(canonical_form).collect();
            format!("[{}]", body.join(","))
        }
        scalar => scalar.to_string(),
    }
}

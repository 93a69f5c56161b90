//! Structural comparison of topology documents.
//!
//! Documents are compared as plain JSON values so that reference files
//! written by older tooling, or with a slightly different schema, still load.

pub mod types;
pub mod resolver;
pub mod differ;

pub use types::*;
pub use resolver::{node_names, NameResolver};
pub use differ::{canonical_form, compare_documents};

use serde_json::Value;

/// Compare with a resolver built from both documents' node tables
pub fn compare_with_names(solution: &Value, student: &Value) -> ComparisonReport {
    let resolver = NameResolver::from_documents(solution, student);
    compare_documents(solution, student, &resolver)
}

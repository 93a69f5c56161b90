//! Node id to display name substitution for discrepancy paths.
//!
//! A path segment is replaced when it exactly equals a node id of the
//! reference document, otherwise of the candidate document. A field name that
//! happens to equal a node id is rewritten too; ids are expected to be
//! numeric and field names never are.

use std::collections::HashMap;

use serde_json::Value;

/// Id to name tables for one reference/candidate pair
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    solution: HashMap<String, String>,
    student: HashMap<String, String>,
}

impl NameResolver {
    pub fn new(solution: HashMap<String, String>, student: HashMap<String, String>) -> Self {
        Self { solution, student }
    }

    /// Build both tables from the `nodes` maps of two topology documents
    pub fn from_documents(solution: &Value, student: &Value) -> Self {
        Self::new(node_names(solution), node_names(student))
    }

    /// Resolve one path segment
    pub fn resolve_segment<'a>(&'a self, segment: &'a str) -> &'a str {
        self.solution
            .get(segment)
            .or_else(|| self.student.get(segment))
            .map(String::as_str)
            .unwrap_or(segment)
    }

    /// Resolve every segment of a dotted path
    pub fn resolve(&self, path: &str) -> String {
        path.split('.')
            .map(|segment| self.resolve_segment(segment))
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Id to name table from a document's `nodes` map
///
/// Nodes without a string `name` are left out.
pub fn node_names(document: &Value) -> HashMap<String, String> {
    document
        .get("nodes")
        .and_then(Value::as_object)
        .map(|nodes| {
            nodes
                .iter()
                .filter_map(|(id, node)| {
                    let name = node.get("name")?.as_str()?;
                    Some((id.clone(), name.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

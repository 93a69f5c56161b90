//! Report generation for grading results.
//!
//! Generates both JSON and human-readable text reports, and writes topology
//! documents with the same JSON layout.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::compare::ComparisonReport;

/// Serialize any document as pretty JSON with the given indent width
pub fn to_json_string<T: Serialize>(value: &T, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize document to JSON")?;
    String::from_utf8(buf).context("Serialized JSON is not valid UTF-8")
}

/// Write any document as pretty JSON
pub fn write_json<T: Serialize>(value: &T, output_path: &Path, indent: usize) -> Result<()> {
    let json = to_json_string(value, indent)?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON to {}", output_path.display()))?;
    Ok(())
}

/// Render a discrepancy value for the text report
///
/// Strings are shown verbatim, everything else as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Render the human-readable report
pub fn render_text_report(report: &ComparisonReport) -> String {
    if report.is_clean() {
        return "No differences found.\n".to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push("Differences found:".to_string());
    lines.push(String::new());

    for diff in &report.differences {
        lines.push(format!("Difference in {}:", diff.path));
        lines.push(format!("  Solution: {}", render_value(&diff.solution)));
        lines.push(format!("  Student: {}", render_value(&diff.student)));
        lines.push(String::new());
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Generate human-readable text report
pub fn generate_text_report(report: &ComparisonReport, output_path: &Path) -> Result<()> {
    fs::write(output_path, render_text_report(report))
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Generate JSON report
pub fn generate_json_report(report: &ComparisonReport, output_path: &Path, indent: usize) -> Result<()> {
    write_json(report, output_path, indent)?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Print a one-line summary to stdout
pub fn print_summary(candidate: &str, report: &ComparisonReport) {
    if report.is_clean() {
        println!("{}: no differences", candidate);
        return;
    }

    let missing_in_student = report
        .differences
        .iter()
        .filter(|d| d.is_missing_in_student())
        .count();
    let missing_in_solution = report
        .differences
        .iter()
        .filter(|d| d.is_missing_in_solution())
        .count();

    println!(
        "{}: {} differences ({} missing in student, {} missing in solution)",
        candidate,
        report.differences.len(),
        missing_in_student,
        missing_in_solution
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Discrepancy;
    use serde_json::json;

    #[test]
    fn test_clean_report() {
        assert_eq!(render_text_report(&ComparisonReport::default()), "No differences found.\n");
    }

    #[test]
    fn test_text_report_layout() {
        let report = ComparisonReport {
            differences: vec![
                Discrepancy {
                    path: "routers.R1.hostname".to_string(),
                    solution: json!("R1"),
                    student: json!("Router1"),
                },
                Discrepancy::missing_in_student("routers.R1.static_routes".to_string(), json!(["0.0.0.0 0.0.0.0 10.0.0.1"])),
            ],
        };

        assert_eq!(
            render_text_report(&report),
            "Differences found:\n\n\
             Difference in routers.R1.hostname:\n  Solution: R1\n  Student: Router1\n\n\
             Difference in routers.R1.static_routes:\n  Solution: [\"0.0.0.0 0.0.0.0 10.0.0.1\"]\n  Student: Missing in student\n\n"
        );
    }

    #[test]
    fn test_json_indent() {
        let report = ComparisonReport::default();
        assert_eq!(to_json_string(&report, 4).unwrap(), "{\n    \"differences\": []\n}");
        assert_eq!(
            to_json_string(&json!({"a": {"b": 1}}), 2).unwrap(),
            "{\n  \"a\": {\n    \"b\": 1\n  }\n}"
        );
    }

    #[test]
    fn test_reports_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let report = ComparisonReport {
            differences: vec![Discrepancy::missing_in_solution("x".to_string(), json!(1))],
        };

        let txt = dir.path().join("report.txt");
        let json_path = dir.path().join("report.json");
        generate_text_report(&report, &txt).unwrap();
        generate_json_report(&report, &json_path, 4).unwrap();

        assert!(fs::read_to_string(&txt).unwrap().contains("Difference in x:"));
        let loaded: ComparisonReport = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(loaded, report);
    }
}

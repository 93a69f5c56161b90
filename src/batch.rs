//! Directory-level drivers for extraction and grading.
//!
//! Files are processed in parallel. A failure is logged and counted against
//! the offending file only; the rest of the batch carries on.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, Context, Result};
use rayon::prelude::*;
use serde_json::Value;

use crate::compare::{compare_with_names, ComparisonReport};
use crate::config::{ExtractionSettings, GradingConfig, ReportSettings};
use crate::report;
use crate::topology::extract_file;

/// A comparison input that could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome counts for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files that produced output
    pub processed: Vec<PathBuf>,
    /// Files skipped because of an error
    pub failed: Vec<PathBuf>,
}

impl BatchSummary {
    fn from_results(results: Vec<(PathBuf, bool)>) -> Self {
        let mut summary = Self::default();
        for (path, ok) in results {
            if ok {
                summary.processed.push(path);
            } else {
                summary.failed.push(path);
            }
        }
        summary
    }
}

/// Sorted list of files in `dir` with the given extension
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list directory '{}'", dir.display()))?
            .path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Load one topology document as a plain JSON value
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DocumentError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Extract one lab export and write `<stem>.json` into `output_dir`
pub fn extract_one(
    source: &Path,
    output_dir: &Path,
    settings: &ExtractionSettings,
    json_indent: usize,
) -> Result<PathBuf> {
    let extraction = extract_file(source, settings)
        .with_context(|| format!("Failed to extract {}", source.display()))?;

    for warning in &extraction.warnings {
        log::debug!("{}: {}", source.display(), warning);
    }

    let output_path = output_dir.join(format!("{}.json", file_stem(source)));
    report::write_json(&extraction.topology, &output_path, json_indent)?;

    log::info!("JSON file saved: {}", output_path.display());
    Ok(output_path)
}

/// Extract every lab export found in `source_dir`
pub fn extract_directory(source_dir: &Path, output_dir: &Path, config: &GradingConfig) -> Result<BatchSummary> {
    if !source_dir.is_dir() {
        return Err(eyre!("The source folder '{}' does not exist", source_dir.display()));
    }

    let extension = config.extraction.extension();
    let sources = list_files(source_dir, extension)?;
    if sources.is_empty() {
        log::warn!("No .{} files found in the folder '{}'", extension, source_dir.display());
        return Ok(BatchSummary::default());
    }
    log::info!("Found {} .{} file(s) in the folder '{}'", sources.len(), extension, source_dir.display());

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory '{}'", output_dir.display()))?;

    let results: Vec<(PathBuf, bool)> = sources
        .par_iter()
        .map(|source| {
            match extract_one(source, output_dir, &config.extraction, config.report.json_indent) {
                Ok(_) => (source.clone(), true),
                Err(e) => {
                    log::warn!("Skipping {}: {:#}", source.display(), e);
                    (source.clone(), false)
                }
            }
        })
        .collect();

    Ok(BatchSummary::from_results(results))
}

/// Compare one candidate document and write its reports
pub fn grade_one(
    solution: &Value,
    candidate: &Path,
    output_dir: &Path,
    settings: &ReportSettings,
) -> Result<ComparisonReport> {
    let student = load_document(candidate)?;
    let comparison = compare_with_names(solution, &student);

    let stem = file_stem(candidate);
    if settings.write_text {
        report::generate_text_report(&comparison, &output_dir.join(format!("report_{}.txt", stem)))?;
    }
    if settings.write_json {
        report::generate_json_report(
            &comparison,
            &output_dir.join(format!("report_{}.json", stem)),
            settings.json_indent,
        )?;
    }

    Ok(comparison)
}

/// Grade every parsed document in `parsed_dir` against the solution
///
/// The solution file itself is skipped when it lives in `parsed_dir`.
pub fn grade_directory(
    parsed_dir: &Path,
    solution_file: &Path,
    output_dir: &Path,
    settings: &ReportSettings,
) -> Result<(BatchSummary, Vec<(PathBuf, ComparisonReport)>)> {
    let solution = load_document(solution_file)
        .with_context(|| format!("Failed to load the solution file: {}", solution_file.display()))?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory '{}'", output_dir.display()))?;

    let solution_name = solution_file.file_name();
    let candidates: Vec<PathBuf> = list_files(parsed_dir, "json")?
        .into_iter()
        .filter(|path| path.file_name() != solution_name)
        .collect();
    log::info!("Grading {} document(s) from '{}'", candidates.len(), parsed_dir.display());

    let results: Vec<(PathBuf, Option<ComparisonReport>)> = candidates
        .par_iter()
        .map(|candidate| match grade_one(&solution, candidate, output_dir, settings) {
            Ok(comparison) => (candidate.clone(), Some(comparison)),
            Err(e) => {
                log::warn!("Error loading {}: {:#}", candidate.display(), e);
                (candidate.clone(), None)
            }
        })
        .collect();

    let summary = BatchSummary::from_results(
        results.iter().map(|(path, r)| (path.clone(), r.is_some())).collect(),
    );
    let reports = results
        .into_iter()
        .filter_map(|(path, r)| r.map(|r| (path, r)))
        .collect();

    Ok((summary, reports))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.unl", "a.unl", "c.json", "d.UNL.bak"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.unl")).unwrap();

        let files = list_files(dir.path(), "unl").unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.unl", "b.unl"]);
    }

    #[test]
    fn test_load_document_errors() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{not json").unwrap();

        assert!(matches!(load_document(&bad), Err(DocumentError::Json { .. })));
        assert!(matches!(
            load_document(&dir.path().join("absent.json")),
            Err(DocumentError::Io { .. })
        ));
    }

    #[test]
    fn test_missing_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_directory(&dir.path().join("nope"), dir.path(), &GradingConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let summary = extract_directory(dir.path(), &dir.path().join("out"), &GradingConfig::default()).unwrap();
        assert_eq!(summary, BatchSummary::default());
    }
}

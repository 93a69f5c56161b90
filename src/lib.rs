//! # Labgrade - Topology extraction and grading for router lab exports
//!
//! This library turns lab export files (`.unl`) from a network emulation
//! platform into canonical, comparable topology documents, and grades a
//! student's document against an instructor's solution.
//!
//! ## Overview
//!
//! A lab export embeds every router's configuration as a base64 payload.
//! Extraction decodes each payload, reads the configuration dump line by
//! line, and assembles a JSON document listing nodes, interfaces, networks
//! and router settings. Grading walks the solution document and the student
//! document side by side and reports every difference, with node ids in
//! paths replaced by node names.
//!
//! ## Architecture
//!
//! - `ios`: router configuration schema and the line-oriented config parser
//! - `unl_parser`: lab export markup reader
//! - `topology`: topology document schema and extraction
//! - `compare`: structural comparator and node name resolution
//! - `report`: text and JSON report rendering
//! - `batch`: directory-level extraction and grading, in parallel
//! - `config` / `config_loader`: optional YAML grading configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use labgrade::{compare, config::ExtractionSettings, topology};
//!
//! let settings = ExtractionSettings::default();
//! let solution = topology::extract_file(Path::new("solution.unl"), &settings)?.topology;
//! let student = topology::extract_file(Path::new("student.unl"), &settings)?.topology;
//!
//! let report = compare::compare_with_names(
//!     &serde_json::to_value(&solution)?,
//!     &serde_json::to_value(&student)?,
//! );
//! for diff in &report.differences {
//!     println!("{}: {} vs {}", diff.path, diff.solution, diff.student);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Module-level failures are typed `thiserror` enums. The batch layer and the
//! binaries use `color_eyre` for reporting with context. No single file,
//! payload or comparison failure aborts a batch.

pub mod config;
pub mod config_loader;
pub mod ios;
pub mod unl_parser;
pub mod topology;
pub mod compare;
pub mod report;
pub mod batch;

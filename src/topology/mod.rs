//! Lab topology extraction.
//!
//! This module turns a parsed lab export into a topology document: the
//! node and interface inventory plus the decoded configuration of every
//! router.

pub mod types;
pub mod extractor;

// Re-export key types and functions for easier access
pub use types::*;
pub use extractor::{decode_payload, extract_file, extract_topology, Extraction, ExtractionWarning, PayloadDecodeError};

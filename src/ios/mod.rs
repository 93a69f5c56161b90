//! Router configuration extraction.
//!
//! Turns a decoded router configuration dump into a [`RouterConfig`]
//! document.

pub mod types;
pub mod config_parser;

pub use types::*;
pub use config_parser::{parse_config_text, ConfigParser, Context};

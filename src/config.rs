use serde::{Deserialize, Serialize};

/// Largest JSON indent accepted for written documents
const MAX_JSON_INDENT: usize = 16;

/// Grading configuration, loaded from an optional YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradingConfig {
    #[serde(default)]
    pub extraction: ExtractionSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

impl GradingConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.extraction.router_icon.trim().is_empty() {
            return Err(ValidationError::InvalidExtraction(
                "router_icon cannot be empty".to_string(),
            ));
        }

        if self.extraction.source_extension.trim_start_matches('.').is_empty() {
            return Err(ValidationError::InvalidExtraction(
                "source_extension cannot be empty".to_string(),
            ));
        }

        if self.report.json_indent > MAX_JSON_INDENT {
            return Err(ValidationError::InvalidReport(format!(
                "json_indent must be at most {}, got {}",
                MAX_JSON_INDENT, self.report.json_indent
            )));
        }

        if !self.report.write_text && !self.report.write_json {
            return Err(ValidationError::InvalidReport(
                "at least one of write_text and write_json must be enabled".to_string(),
            ));
        }

        Ok(())
    }
}

/// How lab exports are read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Node icon that marks a node as a router
    #[serde(default = "default_router_icon")]
    pub router_icon: String,
    /// File extension of lab exports, without the dot
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
}

impl ExtractionSettings {
    /// Extension without a leading dot
    pub fn extension(&self) -> &str {
        self.source_extension.trim_start_matches('.')
    }
}

/// How documents and reports are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Spaces per indentation level in written JSON
    #[serde(default = "default_json_indent")]
    pub json_indent: usize,
    #[serde(default = "default_true")]
    pub write_text: bool,
    #[serde(default = "default_true")]
    pub write_json: bool,
}

fn default_router_icon() -> String {
    "Router.png".to_string()
}

fn default_source_extension() -> String {
    "unl".to_string()
}

fn default_json_indent() -> usize {
    4
}

fn default_true() -> bool {
    true
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid extraction configuration: {0}")]
    InvalidExtraction(String),
    #[error("Invalid report configuration: {0}")]
    InvalidReport(String),
}

/// Default implementations
impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            router_icon: default_router_icon(),
            source_extension: default_source_extension(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            json_indent: default_json_indent(),
            write_text: true,
            write_json: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: GradingConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.extraction.router_icon, "Router.png");
        assert_eq!(config.extraction.extension(), "unl");
        assert_eq!(config.report.json_indent, 4);
        assert!(config.report.write_text && config.report.write_json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections() {
        let yaml = r#"
extraction:
  source_extension: ".xml"
report:
  write_text: false
"#;
        let config: GradingConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.extraction.router_icon, "Router.png");
        assert_eq!(config.extraction.extension(), "xml");
        assert!(!config.report.write_text);
        assert!(config.report.write_json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = GradingConfig::default();
        config.extraction.router_icon = "  ".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidExtraction(_))));

        let mut config = GradingConfig::default();
        config.extraction.source_extension = ".".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidExtraction(_))));

        let mut config = GradingConfig::default();
        config.report.json_indent = 64;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidReport(_))));

        let mut config = GradingConfig::default();
        config.report.write_text = false;
        config.report.write_json = false;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidReport(_))));
    }
}

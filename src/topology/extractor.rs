//! Assembles a [`TopologyDocument`] from a parsed lab export.

use std::collections::HashMap;
use std::path::Path;
use std::string::FromUtf8Error;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{debug, warn};

use crate::config::ExtractionSettings;
use crate::ios::{parse_config_text, RouterConfig};
use crate::unl_parser::{parse_unl_file, UnlLab, UnlParseError};

use super::types::{ConfiguredRouter, InterfaceInfo, NodeInfo, RouterEntry, TopologyDocument, UNKNOWN_NETWORK};

/// Failure to turn one embedded payload into configuration text
#[derive(Debug, thiserror::Error)]
pub enum PayloadDecodeError {
    #[error("payload is empty")]
    Empty,

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Non-fatal conditions met while extracting one lab
#[derive(Debug)]
pub enum ExtractionWarning {
    MissingConfigsSection,
    PayloadDecode {
        node_id: String,
        error: PayloadDecodeError,
    },
}

impl std::fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionWarning::MissingConfigsSection => write!(f, "<configs> section missing"),
            ExtractionWarning::PayloadDecode { node_id, error } => {
                write!(f, "decoding error for node {}: {}", node_id, error)
            }
        }
    }
}

/// Extracted document plus the warnings raised on the way
#[derive(Debug)]
pub struct Extraction {
    pub topology: TopologyDocument,
    pub warnings: Vec<ExtractionWarning>,
}

/// Decode one base64 payload into configuration text
///
/// Whitespace inside the payload (line wrapping in the export) is ignored.
pub fn decode_payload(payload: &str) -> Result<String, PayloadDecodeError> {
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(PayloadDecodeError::Empty);
    }

    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Build the topology document for an already parsed lab
pub fn extract_topology(lab: &UnlLab, settings: &ExtractionSettings) -> Extraction {
    let mut warnings = Vec::new();

    let network_names: HashMap<&str, String> = lab
        .networks
        .iter()
        .filter_map(|network| {
            let id = network.id.as_deref()?;
            let name = network
                .name
                .clone()
                .unwrap_or_else(|| format!("Network_{}", id));
            Some((id, name))
        })
        .collect();

    let mut router_configs: HashMap<String, RouterConfig> = HashMap::new();
    match &lab.configs {
        Some(configs) => {
            for config in configs {
                let node_id = config.id.clone().unwrap_or_default();
                match decode_payload(&config.payload) {
                    Ok(text) => {
                        router_configs.insert(node_id, parse_config_text(&text));
                    }
                    Err(error) => {
                        warn!("Decoding error for node {}: {}", node_id, error);
                        warnings.push(ExtractionWarning::PayloadDecode { node_id, error });
                    }
                }
            }
        }
        None => warnings.push(ExtractionWarning::MissingConfigsSection),
    }

    let mut topology = TopologyDocument::default();

    for node in &lab.nodes {
        let node_id = node.id.clone().unwrap_or_default();
        let node_name = node.name.clone().unwrap_or_else(|| "Unknown".to_string());
        let icon = node.icon.clone().unwrap_or_default();

        let mut interfaces = indexmap::IndexMap::new();
        for iface in &node.interfaces {
            let name = iface
                .name
                .clone()
                .unwrap_or_else(|| format!("e{}", interfaces.len()));
            let network_name = iface
                .network_id
                .as_deref()
                .and_then(|id| network_names.get(id))
                .cloned()
                .unwrap_or_else(|| UNKNOWN_NETWORK.to_string());

            interfaces.insert(
                name.clone(),
                InterfaceInfo {
                    id: iface.id.clone(),
                    name,
                    network_id: iface.network_id.clone(),
                    network_name,
                },
            );
        }

        topology.nodes.insert(
            node_id.clone(),
            NodeInfo {
                name: node_name.clone(),
                icon: icon.clone(),
                interfaces,
            },
        );

        if icon != settings.router_icon {
            continue;
        }

        let entry = match router_configs.get(&node_id).cloned() {
            Some(config) => RouterEntry::Configured(ConfiguredRouter {
                config,
                name: node_name,
            }),
            None => {
                debug!("Router {} ({}) has no configuration payload", node_id, node_name);
                RouterEntry::missing(node_name)
            }
        };
        topology.routers.insert(node_id, entry);
    }

    Extraction { topology, warnings }
}

/// Read and extract one lab export file
pub fn extract_file(path: &Path, settings: &ExtractionSettings) -> Result<Extraction, UnlParseError> {
    let lab = parse_unl_file(path)?;
    let extraction = extract_topology(&lab, settings);

    if extraction
        .warnings
        .iter()
        .any(|w| matches!(w, ExtractionWarning::MissingConfigsSection))
    {
        warn!("<configs> section missing in file {}", path.display());
    }

    Ok(extraction)
}

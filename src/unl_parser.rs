use std::fs;
use std::path::Path;

use xml::attribute::OwnedAttribute;
use xml::reader::{EventReader, XmlEvent};

/// Errors that can occur while reading a lab export
#[derive(Debug, thiserror::Error)]
pub enum UnlParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed lab markup: {0}")]
    MalformedContainer(#[from] xml::reader::Error),
}

/// A declared network segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlNetwork {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// An interface declared under a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlInterface {
    pub id: Option<String>,
    pub name: Option<String>,
    pub network_id: Option<String>,
}

/// A declared node (router, switch, host, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlNode {
    pub id: Option<String>,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub interfaces: Vec<UnlInterface>,
}

/// An embedded, still encoded configuration payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlConfig {
    pub id: Option<String>,
    pub payload: String,
}

/// Raw contents of one lab export, in document order
#[derive(Debug, Clone, Default)]
pub struct UnlLab {
    pub networks: Vec<UnlNetwork>,
    pub nodes: Vec<UnlNode>,
    /// `None` when the export has no `configs` section at all
    pub configs: Option<Vec<UnlConfig>>,
}

fn attr(attributes: &[OwnedAttribute], key: &str) -> Option<String> {
    attributes
        .iter()
        .find(|a| a.name.local_name == key)
        .map(|a| a.value.clone())
}

/// Incremental builder driven by markup events
#[derive(Default)]
struct LabBuilder {
    lab: UnlLab,
    depth: usize,
    /// Indices into `lab.nodes` of the nodes currently open
    open_nodes: Vec<usize>,
    /// Depth of the first `configs` element while it is open
    configs_depth: Option<usize>,
    current_config: Option<UnlConfig>,
}

impl LabBuilder {
    fn start(&mut self, tag: &str, attributes: &[OwnedAttribute]) {
        self.depth += 1;

        match tag {
            "network" => self.lab.networks.push(UnlNetwork {
                id: attr(attributes, "id"),
                name: attr(attributes, "name"),
            }),
            "node" => {
                self.lab.nodes.push(UnlNode {
                    id: attr(attributes, "id"),
                    name: attr(attributes, "name"),
                    icon: attr(attributes, "icon"),
                    interfaces: Vec::new(),
                });
                self.open_nodes.push(self.lab.nodes.len() - 1);
            }
            "interface" => {
                let iface = UnlInterface {
                    id: attr(attributes, "id"),
                    name: attr(attributes, "name"),
                    network_id: attr(attributes, "network_id"),
                };
                // Nested nodes report their interfaces to every enclosing node
                for &idx in &self.open_nodes {
                    self.lab.nodes[idx].interfaces.push(iface.clone());
                }
            }
            "configs" if self.lab.configs.is_none() => {
                self.lab.configs = Some(Vec::new());
                self.configs_depth = Some(self.depth);
            }
            "config" if self.configs_depth.map(|d| d + 1) == Some(self.depth) => {
                self.current_config = Some(UnlConfig {
                    id: attr(attributes, "id"),
                    payload: String::new(),
                });
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(config) = self.current_config.as_mut() {
            config.payload.push_str(text);
        }
    }

    fn end(&mut self, tag: &str) {
        match tag {
            "node" => {
                self.open_nodes.pop();
            }
            "configs" if self.configs_depth == Some(self.depth) => {
                self.configs_depth = None;
            }
            "config" => {
                if let (Some(config), Some(configs)) =
                    (self.current_config.take(), self.lab.configs.as_mut())
                {
                    configs.push(config);
                }
            }
            _ => {}
        }

        self.depth = self.depth.saturating_sub(1);
    }
}

/// Parse lab export markup from a string
pub fn parse_unl(content: &str) -> Result<UnlLab, UnlParseError> {
    let mut builder = LabBuilder::default();

    for event in EventReader::from_str(content) {
        match event? {
            XmlEvent::StartElement { name, attributes, .. } => {
                builder.start(&name.local_name, &attributes);
            }
            XmlEvent::EndElement { name } => builder.end(&name.local_name),
            XmlEvent::Characters(text) | XmlEvent::CData(text) | XmlEvent::Whitespace(text) => {
                builder.text(&text);
            }
            _ => {}
        }
    }

    Ok(builder.lab)
}

/// Parse a lab export file from disk
pub fn parse_unl_file(path: &Path) -> Result<UnlLab, UnlParseError> {
    let content = fs::read_to_string(path).map_err(|source| UnlParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_unl(&content)
}

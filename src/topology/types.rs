//! Topology document type definitions.
//!
//! A topology document is what one lab export is reduced to: every node with
//! its wired interfaces, plus the decoded configuration of every router.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ios::RouterConfig;

/// Label stored in place of a configuration a router does not have
pub const MISSING_CONFIGURATION: &str = "Missing configuration";

/// Network label for interfaces wired to an undeclared network
pub const UNKNOWN_NETWORK: &str = "Unknown Network";

/// Canonical description of one lab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyDocument {
    #[serde(default)]
    pub nodes: IndexMap<String, NodeInfo>,
    #[serde(default)]
    pub routers: IndexMap<String, RouterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub interfaces: IndexMap<String, InterfaceInfo>,
}

/// One interface and the network it is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceInfo {
    pub id: Option<String>,
    pub name: String,
    pub network_id: Option<String>,
    pub network_name: String,
}

/// Router slot in a topology document
///
/// Either side of a comparison may hold either case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouterEntry {
    /// `{"config": "Missing configuration", "name": ...}`
    Missing(MissingConfig),
    Configured(ConfiguredRouter),
}

impl RouterEntry {
    pub fn missing(name: impl Into<String>) -> Self {
        RouterEntry::Missing(MissingConfig {
            config: MISSING_CONFIGURATION.to_string(),
            name: name.into(),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            RouterEntry::Missing(missing) => &missing.name,
            RouterEntry::Configured(router) => &router.name,
        }
    }

    /// Decoded configuration, if the router had one
    pub fn config(&self) -> Option<&RouterConfig> {
        match self {
            RouterEntry::Configured(router) => Some(&router.config),
            RouterEntry::Missing(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MissingConfig {
    pub config: String,
    pub name: String,
}

/// Decoded configuration with the node's display name appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredRouter {
    #[serde(flatten)]
    pub config: RouterConfig,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_entry_shape() {
        let entry = RouterEntry::missing("R3");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"config": "Missing configuration", "name": "R3"})
        );
        assert_eq!(entry.name(), "R3");
        assert!(entry.config().is_none());
    }

    #[test]
    fn test_configured_entry_appends_name_last() {
        let entry = RouterEntry::Configured(ConfiguredRouter {
            config: RouterConfig::default(),
            name: "R1".to_string(),
        });

        let value = serde_json::to_value(&entry).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.last().unwrap().as_str(), "name");
        assert_eq!(value["hostname"], serde_json::Value::Null);
    }

    #[test]
    fn test_router_entry_deserializes_both_shapes() {
        let missing: RouterEntry =
            serde_json::from_value(json!({"config": "Missing configuration", "name": "R2"})).unwrap();
        assert!(matches!(missing, RouterEntry::Missing(_)));

        let configured: RouterEntry =
            serde_json::from_value(json!({"hostname": "R1", "name": "R1"})).unwrap();
        match configured {
            RouterEntry::Configured(router) => {
                assert_eq!(router.config.hostname.as_deref(), Some("R1"));
                assert_eq!(router.name, "R1");
            }
            other => panic!("unexpected entry: {:?}", other),
        }
    }
}

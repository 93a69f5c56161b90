//! Router configuration document types.
//!
//! Field names and nesting form the interchange format consumed by the
//! comparator and by previously generated solution files, so they must not
//! be renamed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Structured view of one decoded router configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub interfaces: IndexMap<String, InterfaceConfig>,
    #[serde(default)]
    pub routing: Routing,
    #[serde(default)]
    pub static_routes: Vec<String>,
    #[serde(default)]
    pub dhcp_pools: IndexMap<String, DhcpPool>,
    #[serde(default)]
    pub protocols: Protocols,
    #[serde(default)]
    pub lines: Lines,
    #[serde(default)]
    pub settings: Settings,
}

/// Per-interface settings; unset fields are omitted from the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Routing {
    #[serde(default)]
    pub rip: Rip,
}

/// RIP process settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rip {
    #[serde(default)]
    pub version: Option<u8>,
    #[serde(default)]
    pub redistribute_connected: bool,
    #[serde(default)]
    pub redistribute_static: bool,
    #[serde(default)]
    pub flash_update_threshold: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpPool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_router: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_server: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocols {
    #[serde(default)]
    pub ip_forward: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lines {
    #[serde(default)]
    pub console: ConsoleLine,
    #[serde(default)]
    pub vty: VtyLine,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleLine {
    #[serde(default)]
    pub logging_synchronous: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VtyLine {
    #[serde(default)]
    pub login: bool,
    #[serde(default)]
    pub transport_input: Option<String>,
}

/// Global device settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub service_timestamps: ServiceTimestamps,
    #[serde(default)]
    pub password_encryption: bool,
    #[serde(default)]
    pub clock_timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTimestamps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

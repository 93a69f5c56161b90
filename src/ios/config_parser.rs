//! Line-oriented parser for decoded router configuration dumps.
//!
//! The dump grammar is keyword-prefixed and irregular, so the parser makes a
//! single pass over the text and carries a small [`Context`] that decides how
//! the next line is read. Dispatch order for every line:
//!
//! 1. global `version` (only outside RIP) and `router rip`
//! 2. RIP context (consumes every line until `!`)
//! 3. static routes and `ip dhcp pool`
//! 4. DHCP pool context (`network`, `default-router`, `dns-server`, `!`)
//! 5. global settings (`hostname`, `service ...`, `clock timezone`,
//!    `ip forward-protocol`, `line con`, `line vty`)
//! 6. `interface` and interface context
//!
//! Lines that match nothing are ignored; a dump is graded best-effort.

use super::types::{DhcpPool, InterfaceConfig, RouterConfig};

/// Which block of the dump the current line belongs to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Context {
    #[default]
    Global,
    Rip,
    DhcpPool(String),
    Interface(String),
}

/// Outcome of offering one line to a dispatch stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Consumed,
    Pass,
}

/// Streaming state machine over configuration lines
#[derive(Debug, Default)]
pub struct ConfigParser {
    config: RouterConfig,
    context: Context,
}

impl ConfigParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current block context
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Feed a single raw line
    pub fn feed_line(&mut self, raw: &str) {
        let line = raw.trim();

        let stages: [fn(&mut Self, &str) -> Step; 6] = [
            Self::block_openers,
            Self::rip_line,
            Self::routes_and_pools,
            Self::pool_line,
            Self::global_line,
            Self::interface_line,
        ];

        for stage in stages {
            if stage(self, line) == Step::Consumed {
                return;
            }
        }
    }

    pub fn finish(self) -> RouterConfig {
        self.config
    }

    fn block_openers(&mut self, line: &str) -> Step {
        if line.starts_with("version") && self.context != Context::Rip {
            if let Some(version) = token(line, 1) {
                self.config.version = Some(version.to_string());
            }
            return Step::Consumed;
        }

        if line.starts_with("router rip") {
            self.context = Context::Rip;
            self.config.routing.rip.version = Some(2);
            return Step::Consumed;
        }

        Step::Pass
    }

    fn rip_line(&mut self, line: &str) -> Step {
        if self.context != Context::Rip {
            return Step::Pass;
        }

        let rip = &mut self.config.routing.rip;
        if line == "!" {
            self.context = Context::Global;
        } else if line.contains("redistribute connected") {
            rip.redistribute_connected = true;
        } else if line.contains("redistribute static") {
            rip.redistribute_static = true;
        } else if line.starts_with("network") {
            if let Some(network) = token(line, 1) {
                rip.network = Some(network.to_string());
            }
        } else if line.contains("flash-update-threshold") {
            if let Some(threshold) = line.split_whitespace().last() {
                rip.flash_update_threshold = Some(threshold.to_string());
            }
        }

        // Nothing inside a RIP block leaks into other contexts
        Step::Consumed
    }

    fn routes_and_pools(&mut self, line: &str) -> Step {
        for keyword in ["ip route", "ipv6 route"] {
            if line.starts_with(keyword) {
                let route = after_keyword(line, keyword);
                self.config.static_routes.push(route.to_string());
                return Step::Consumed;
            }
        }

        if line.starts_with("ip dhcp pool") {
            let name = after_keyword(line, "ip dhcp pool").to_string();
            self.config.dhcp_pools.insert(name.clone(), DhcpPool::default());
            self.context = Context::DhcpPool(name);
            return Step::Consumed;
        }

        Step::Pass
    }

    fn pool_line(&mut self, line: &str) -> Step {
        let Context::DhcpPool(name) = &self.context else {
            return Step::Pass;
        };

        if line == "!" {
            self.context = Context::Global;
            return Step::Consumed;
        }

        let Some(pool) = self.config.dhcp_pools.get_mut(name) else {
            return Step::Pass;
        };

        if line.starts_with("network") {
            pool.network = Some(after_keyword(line, "network").to_string());
        } else if line.starts_with("default-router") {
            pool.default_router = Some(after_keyword(line, "default-router").to_string());
        } else if line.starts_with("dns-server") {
            pool.dns_server = Some(after_keyword(line, "dns-server").to_string());
        } else {
            return Step::Pass;
        }

        Step::Consumed
    }

    fn global_line(&mut self, line: &str) -> Step {
        let settings = &mut self.config.settings;

        if line.starts_with("hostname") {
            if let Some(hostname) = token(line, 1) {
                self.config.hostname = Some(hostname.to_string());
            }
        } else if line.starts_with("service timestamps") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            let value = parts[2..].join(" ");
            if parts.contains(&"debug") {
                settings.service_timestamps.debug = Some(value.clone());
            }
            if parts.contains(&"log") {
                settings.service_timestamps.log = Some(value);
            }
        } else if line == "no service password-encryption" {
            settings.password_encryption = false;
        } else if line == "service password-encryption" {
            settings.password_encryption = true;
        } else if line.starts_with("clock timezone") {
            settings.clock_timezone = Some(tokens_from(line, 2));
        } else if line.starts_with("ip forward-protocol") {
            if let Some(protocol) = token(line, 2) {
                self.config.protocols.ip_forward = Some(protocol.to_string());
            }
        } else if line.starts_with("line con") {
            self.config.lines.console.logging_synchronous = line.contains("logging synchronous");
        } else if line.starts_with("line vty") {
            let vty = &mut self.config.lines.vty;
            vty.login = line.contains("login");
            vty.transport_input = if line.contains("transport input") {
                line.split_whitespace().last().map(str::to_string)
            } else {
                None
            };
        } else {
            return Step::Pass;
        }

        Step::Consumed
    }

    fn interface_line(&mut self, line: &str) -> Step {
        if line.starts_with("interface") {
            if let Some(name) = token(line, 1) {
                self.config
                    .interfaces
                    .insert(name.to_string(), InterfaceConfig::default());
                self.context = Context::Interface(name.to_string());
            }
            return Step::Consumed;
        }

        let Context::Interface(name) = &self.context else {
            return Step::Pass;
        };
        let Some(iface) = self.config.interfaces.get_mut(name) else {
            return Step::Pass;
        };

        if line == "no shutdown" || line == "shutdown" {
            iface.status = Some(line.to_string());
        } else if line.contains("description") {
            iface.description = Some(after_keyword(line, "description").to_string());
        } else if line.contains("ip address dhcp") {
            iface.ip_address = Some("dhcp".to_string());
        } else if line.contains("ip address") {
            iface.ip_address = Some(tokens_from(line, 2));
        } else if line.contains("ipv6 address") {
            if let Some(address) = token(line, 2) {
                iface.ipv6_address = Some(address.to_string());
            }
        } else {
            return Step::Pass;
        }

        Step::Consumed
    }
}

/// Parse a full decoded configuration dump
pub fn parse_config_text(text: &str) -> RouterConfig {
    let mut parser = ConfigParser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

fn token(line: &str, index: usize) -> Option<&str> {
    line.split_whitespace().nth(index)
}

fn tokens_from(line: &str, start: usize) -> String {
    line.split_whitespace().skip(start).collect::<Vec<_>>().join(" ")
}

/// Text following the first occurrence of `keyword`, trimmed
fn after_keyword<'a>(line: &'a str, keyword: &str) -> &'a str {
    line.split_once(keyword)
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ios::types::{InterfaceConfig, Rip};

    #[test]
    fn test_interface_block() {
        let config = parse_config_text(
            "interface Fa0/0\n description LAN link\n ip address 192.168.1.1 255.255.255.0\n no shutdown\n",
        );

        assert_eq!(
            config.interfaces["Fa0/0"],
            InterfaceConfig {
                status: Some("no shutdown".to_string()),
                description: Some("LAN link".to_string()),
                ip_address: Some("192.168.1.1 255.255.255.0".to_string()),
                ipv6_address: None,
            }
        );
    }

    #[test]
    fn test_rip_block() {
        let config = parse_config_text("router rip\n network 192.168.1.0\n redistribute connected\n!\n");

        assert_eq!(
            config.routing.rip,
            Rip {
                version: Some(2),
                redistribute_connected: true,
                redistribute_static: false,
                flash_update_threshold: None,
                network: Some("192.168.1.0".to_string()),
            }
        );
    }

    #[test]
    fn test_version_inside_rip_does_not_override_global() {
        let config = parse_config_text(
            "version 15.1\nrouter rip\n version 2\n flash-update-threshold 10\n redistribute static\n!\nversion 12.4\n",
        );

        assert_eq!(config.version.as_deref(), Some("12.4"));
        assert_eq!(config.routing.rip.version, Some(2));
        assert_eq!(config.routing.rip.flash_update_threshold.as_deref(), Some("10"));
        assert!(config.routing.rip.redistribute_static);
    }

    #[test]
    fn test_rip_context_swallows_other_keywords() {
        let config = parse_config_text("router rip\n hostname Inside\n!\nhostname Outside\n");
        assert_eq!(config.hostname.as_deref(), Some("Outside"));
        assert_eq!(parse_config_text("router rip\nhostname R1\n").hostname, None);
    }

    #[test]
    fn test_dhcp_pool_block() {
        let config = parse_config_text(
            "ip dhcp pool LAN\n network 192.168.1.0 255.255.255.0\n default-router 192.168.1.1\n dns-server 8.8.8.8\n!\n",
        );

        let pool = &config.dhcp_pools["LAN"];
        assert_eq!(pool.network.as_deref(), Some("192.168.1.0 255.255.255.0"));
        assert_eq!(pool.default_router.as_deref(), Some("192.168.1.1"));
        assert_eq!(pool.dns_server.as_deref(), Some("8.8.8.8"));
    }

    #[test]
    fn test_dhcp_pool_closed_by_bang() {
        let mut parser = ConfigParser::new();
        parser.feed_line("ip dhcp pool GUEST");
        assert_eq!(parser.context(), &Context::DhcpPool("GUEST".to_string()));
        parser.feed_line("!");
        assert_eq!(parser.context(), &Context::Global);
        parser.feed_line("network 10.0.0.0 255.0.0.0");

        let config = parser.finish();
        assert_eq!(config.dhcp_pools["GUEST"], DhcpPool::default());
    }

    #[test]
    fn test_static_routes_keep_order() {
        let config = parse_config_text(
            "ip route 0.0.0.0 0.0.0.0 10.0.0.1\nipv6 route ::/0 2001:db8::1\nip route 10.1.0.0 255.255.0.0 Fa0/1\n",
        );
        assert_eq!(
            config.static_routes,
            vec![
                "0.0.0.0 0.0.0.0 10.0.0.1",
                "::/0 2001:db8::1",
                "10.1.0.0 255.255.0.0 Fa0/1"
            ]
        );
    }

    #[test]
    fn test_interface_context_switches_without_exit() {
        let config = parse_config_text(
            "interface Gi0/0\n shutdown\n!\ninterface Gi0/1\n ip address dhcp\n ipv6 address 2001:db8::1/64\n",
        );

        assert_eq!(config.interfaces["Gi0/0"].status.as_deref(), Some("shutdown"));
        assert_eq!(config.interfaces["Gi0/1"].ip_address.as_deref(), Some("dhcp"));
        assert_eq!(
            config.interfaces["Gi0/1"].ipv6_address.as_deref(),
            Some("2001:db8::1/64")
        );
        assert_eq!(config.interfaces["Gi0/1"].status, None);
    }

    #[test]
    fn test_global_lines_after_interfaces() {
        let config = parse_config_text(
            "interface Fa0/0\n no shutdown\n!\nhostname R2\nip forward-protocol nd\nline con 0 logging synchronous\nline vty 0 4 login transport input ssh\n",
        );

        assert_eq!(config.hostname.as_deref(), Some("R2"));
        assert_eq!(config.protocols.ip_forward.as_deref(), Some("nd"));
        assert!(config.lines.console.logging_synchronous);
        assert!(config.lines.vty.login);
        assert_eq!(config.lines.vty.transport_input.as_deref(), Some("ssh"));
    }

    #[test]
    fn test_vty_without_transport() {
        let config = parse_config_text("line vty 0 4\n");
        assert!(!config.lines.vty.login);
        assert_eq!(config.lines.vty.transport_input, None);
    }

    #[test]
    fn test_settings() {
        let config = parse_config_text(
            "service timestamps debug datetime msec\nservice timestamps log datetime msec\nno service password-encryption\nclock timezone CET 1 0\n",
        );

        let settings = &config.settings;
        assert_eq!(settings.service_timestamps.debug.as_deref(), Some("debug datetime msec"));
        assert_eq!(settings.service_timestamps.log.as_deref(), Some("log datetime msec"));
        assert!(!settings.password_encryption);
        assert_eq!(settings.clock_timezone.as_deref(), Some("CET 1 0"));

        assert!(parse_config_text("service password-encryption\n").settings.password_encryption);
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        let config = parse_config_text("!\nbanner motd #hi#\n\n   \nend\nhostname\nversion\n");
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let text = "version 15.1\nhostname R1\ninterface Fa0/0\n ip address 10.0.0.1 255.0.0.0\n!\nip route 0.0.0.0 0.0.0.0 10.0.0.254\n";
        assert_eq!(parse_config_text(text), parse_config_text(text));
    }

    #[test]
    fn test_crlf_and_indentation() {
        let config = parse_config_text("hostname   R9\r\n   interface Se0/0/0\r\n      no shutdown\r\n");
        assert_eq!(config.hostname.as_deref(), Some("R9"));
        assert_eq!(config.interfaces["Se0/0/0"].status.as_deref(), Some("no shutdown"));
    }
}

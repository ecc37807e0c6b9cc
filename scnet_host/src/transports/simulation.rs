//! Simulation transport implementation.
//!
//! The `SimTransport` implements the `LinkTransport` trait to provide a
//! software-emulated multi-drop bus for development and testing without
//! physical hardware. The emulated topology and fault behavior are
//! configurable through builder methods; the struct is `Clone` so a
//! configured instance can serve as the blueprint inside a transport
//! factory closure.

use scnet_common::clock;
use scnet_common::config::{ChannelAddress, ChannelSpec};
use scnet_common::error::{codes, LinkError};
use scnet_common::node::{AccessLevel, NodeInfo, NodeType};
use scnet_common::transport::LinkTransport;
use tracing::{debug, info};

/// Response deadline for one bus enumeration pass, in milliseconds.
const ENUMERATION_DEADLINE_MS: f64 = 5_000.0;

/// Simulation transport implementing the LinkTransport trait.
#[derive(Debug, Clone)]
pub struct SimTransport {
    /// Emulated node topology, reported by `enumerate()`.
    nodes: Vec<NodeInfo>,
    /// Injected open failure (code, message).
    fail_open: Option<(u32, String)>,
    /// Injected enumeration failure (addr, code, message).
    fail_enumeration: Option<(u16, u32, String)>,
    /// Emulated per-node probe time in milliseconds.
    probe_delay_ms: f64,
    /// Channel acquired flag.
    open: bool,
    /// Clock reading at open time, for timeout accounting.
    opened_at_ms: f64,
}

impl SimTransport {
    /// Create a simulation transport with the default two-node topology.
    pub fn new() -> Self {
        Self {
            nodes: default_topology(),
            fail_open: None,
            fail_enumeration: None,
            probe_delay_ms: 0.0,
            open: false,
            opened_at_ms: 0.0,
        }
    }

    /// Replace the emulated topology.
    pub fn with_nodes(mut self, nodes: Vec<NodeInfo>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Make `open()` fail with the given code and message.
    pub fn fail_open(mut self, code: u32, message: impl Into<String>) -> Self {
        self.fail_open = Some((code, message.into()));
        self
    }

    /// Make `enumerate()` fail with the given address, code, and message.
    pub fn fail_enumeration(
        mut self,
        addr: u16,
        code: u32,
        message: impl Into<String>,
    ) -> Self {
        self.fail_enumeration = Some((addr, code, message.into()));
        self
    }

    /// Set the emulated per-node probe time. `enumerate()` fails with
    /// `TIMEOUT` when the summed probe times plus the time already spent
    /// since `open()` exceed the enumeration deadline.
    pub fn with_probe_delay_ms(mut self, ms: f64) -> Self {
        self.probe_delay_ms = ms;
        self
    }
}

impl Default for SimTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkTransport for SimTransport {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn open(&mut self, spec: &ChannelSpec) -> Result<(), LinkError> {
        if let Some((code, message)) = &self.fail_open {
            return Err(LinkError::new(0, *code, message.clone()));
        }

        // Path addresses containing "reject" emulate an absent adapter, so
        // the CLI failure path can be exercised without builder access.
        if let ChannelAddress::Path(path) = &spec.address {
            if path.contains("reject") {
                return Err(LinkError::new(
                    0,
                    codes::PORT_UNAVAILABLE,
                    format!("no adapter at {path}"),
                ));
            }
        }

        self.open = true;
        self.opened_at_ms = clock::now_ms();
        info!(
            "Simulated channel {} open at {} ({} bps)",
            spec.index, spec.address, spec.rate
        );
        Ok(())
    }

    fn enumerate(&mut self) -> Result<Vec<NodeInfo>, LinkError> {
        if !self.open {
            return Err(LinkError::from_code(0, codes::ENUMERATION_FAILED));
        }

        if let Some((addr, code, message)) = &self.fail_enumeration {
            return Err(LinkError::new(*addr, *code, message.clone()));
        }

        // The deadline runs from the moment the channel was acquired, so
        // time already spent on the open handshake counts against it.
        let elapsed_ms = clock::now_ms() - self.opened_at_ms;
        let probe_total_ms = self.probe_delay_ms * self.nodes.len() as f64;
        if elapsed_ms + probe_total_ms > ENUMERATION_DEADLINE_MS {
            let stalled = self.nodes.first().map_or(0, |n| n.address);
            return Err(LinkError::new(
                stalled,
                codes::TIMEOUT,
                format!("no response within {ENUMERATION_DEADLINE_MS} ms"),
            ));
        }

        let mut nodes = self.nodes.clone();
        nodes.sort_by_key(|n| n.address);
        debug!(
            "Enumerated {} simulated node(s) in {:.3} ms",
            nodes.len(),
            elapsed_ms + probe_total_ms
        );
        Ok(nodes)
    }

    fn close(&mut self) {
        if self.open {
            debug!("Simulated channel closed");
        }
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

/// Build a plausible servo node identity for the given bus address.
pub fn sim_node(address: u16, node_type: NodeType, access_level: AccessLevel) -> NodeInfo {
    NodeInfo {
        address,
        node_type,
        user_id: format!("axis-{address}"),
        firmware_version: "1.6.8".to_string(),
        hardware_version: "K1".to_string(),
        serial_number: 43_012_800 + address as u32,
        model: match node_type {
            NodeType::ServoAdvanced => "SC-2341P-ADV".to_string(),
            NodeType::ServoBasic => "SC-2341P-STD".to_string(),
            _ => "UNKNOWN".to_string(),
        },
        access_level,
    }
}

/// Default topology: two controllable servo nodes with full access.
fn default_topology() -> Vec<NodeInfo> {
    vec![
        sim_node(0, NodeType::ServoAdvanced, AccessLevel::Full),
        sim_node(1, NodeType::ServoBasic, AccessLevel::Full),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(address: &str) -> ChannelSpec {
        ChannelSpec::new(0, address.parse().unwrap())
    }

    #[test]
    fn open_then_enumerate_reports_default_topology() {
        let mut sim = SimTransport::new();
        sim.open(&spec("1")).unwrap();
        let nodes = sim.enumerate().unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.node_type.is_supported()));
        assert!(nodes.iter().all(|n| n.access_level.is_full()));
    }

    #[test]
    fn enumerate_is_address_ascending() {
        let mut sim = SimTransport::new().with_nodes(vec![
            sim_node(7, NodeType::ServoBasic, AccessLevel::Full),
            sim_node(2, NodeType::ServoBasic, AccessLevel::Full),
            sim_node(4, NodeType::ServoBasic, AccessLevel::Full),
        ]);
        sim.open(&spec("1")).unwrap();
        let addrs: Vec<u16> = sim.enumerate().unwrap().iter().map(|n| n.address).collect();
        assert_eq!(addrs, vec![2, 4, 7]);
    }

    #[test]
    fn enumerate_requires_open_channel() {
        let mut sim = SimTransport::new();
        let err = sim.enumerate().unwrap_err();
        assert_eq!(err.code, codes::ENUMERATION_FAILED);
    }

    #[test]
    fn injected_open_failure() {
        let mut sim = SimTransport::new().fail_open(codes::OPEN_FAILED, "busy");
        let err = sim.open(&spec("1")).unwrap_err();
        assert_eq!(err.code, codes::OPEN_FAILED);
        assert!(!sim.is_open());
    }

    #[test]
    fn reject_path_is_refused() {
        let mut sim = SimTransport::new();
        let err = sim.open(&spec("/dev/reject0")).unwrap_err();
        assert_eq!(err.code, codes::PORT_UNAVAILABLE);
    }

    #[test]
    fn injected_enumeration_failure_names_the_address() {
        let mut sim = SimTransport::new().fail_enumeration(3, codes::NO_RESPONSE, "silent node");
        sim.open(&spec("1")).unwrap();
        let err = sim.enumerate().unwrap_err();
        assert_eq!(err.addr, 3);
        assert_eq!(err.code, codes::NO_RESPONSE);
    }

    #[test]
    fn slow_probes_hit_the_deadline() {
        let mut sim = SimTransport::new().with_probe_delay_ms(4_000.0);
        sim.open(&spec("1")).unwrap();
        let err = sim.enumerate().unwrap_err();
        assert_eq!(err.code, codes::TIMEOUT);
    }

    #[test]
    fn deadline_counts_time_spent_since_open() {
        // Probes alone fit the budget; the time burned between open and
        // enumerate pushes the total over it.
        let mut sim = SimTransport::new()
            .with_nodes(vec![sim_node(0, NodeType::ServoBasic, AccessLevel::Full)])
            .with_probe_delay_ms(ENUMERATION_DEADLINE_MS - 1.0);
        sim.open(&spec("1")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let err = sim.enumerate().unwrap_err();
        assert_eq!(err.code, codes::TIMEOUT);
    }

    #[test]
    fn close_is_idempotent() {
        let mut sim = SimTransport::new();
        sim.open(&spec("1")).unwrap();
        sim.close();
        assert!(!sim.is_open());
        sim.close();
        assert!(!sim.is_open());
    }
}

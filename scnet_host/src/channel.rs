//! Link channel and node handles.
//!
//! A `LinkChannel` owns one physical channel's open/close state and the set
//! of nodes discovered on it. Node handles are created during channel-open
//! enumeration and destroyed when the channel closes; their validity is
//! enforced by ownership (the channel owns them and clears them on close),
//! not by runtime checks.

use scnet_common::config::ChannelSpec;
use scnet_common::consts::MAX_NODES_PER_CHANNEL;
use scnet_common::error::{codes, LinkError};
use scnet_common::node::{AccessLevel, NodeInfo, NodeType};
use scnet_common::transport::LinkTransport;
use tracing::{debug, info, warn};

/// Open state of a link channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpenState {
    /// Created, no open attempt yet, or explicitly closed.
    Closed = 0,
    /// Open attempt in progress.
    Opening = 1,
    /// Transport acquired and nodes enumerated.
    Open = 2,
    /// Open attempt failed; holds no nodes.
    Faulted = 3,
}

impl OpenState {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Closed),
            1 => Some(Self::Opening),
            2 => Some(Self::Open),
            3 => Some(Self::Faulted),
            _ => None,
        }
    }
}

impl Default for OpenState {
    fn default() -> Self {
        Self::Closed
    }
}

/// One physical device discovered on a link channel.
///
/// Holds the identity snapshot reported at enumeration plus a non-owning
/// back-reference (by index) to the owning channel. Valid only while that
/// channel is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeHandle {
    channel_index: usize,
    node_index: usize,
    info: NodeInfo,
}

impl NodeHandle {
    /// Index of the owning channel within the network manager.
    pub fn channel_index(&self) -> usize {
        self.channel_index
    }

    /// Position of this node in the channel's enumeration order.
    pub fn node_index(&self) -> usize {
        self.node_index
    }

    /// Bus address the node responded on.
    pub fn address(&self) -> u16 {
        self.info.address
    }

    /// Device model family.
    pub fn node_type(&self) -> NodeType {
        self.info.node_type
    }

    /// Access level granted to this host.
    pub fn access_level(&self) -> AccessLevel {
        self.info.access_level
    }

    /// Full identity snapshot (for operator-facing reporting).
    pub fn info(&self) -> &NodeInfo {
        &self.info
    }

    /// True if the host can grant control authority over this device type.
    pub fn is_supported_type(&self) -> bool {
        self.info.node_type.is_supported()
    }

    /// True if the host holds full control authority over this node.
    pub fn has_full_access(&self) -> bool {
        self.info.access_level.is_full()
    }
}

/// One physical communication channel and its discovered node set.
///
/// Invariants: `nodes` is populated only while the state is `Open`, and
/// `node_count() == nodes().len()` always holds.
pub struct LinkChannel {
    spec: ChannelSpec,
    state: OpenState,
    transport: Option<Box<dyn LinkTransport>>,
    nodes: Vec<NodeHandle>,
}

impl LinkChannel {
    /// Create a closed channel for the given spec.
    pub fn new(spec: ChannelSpec) -> Self {
        Self {
            spec,
            state: OpenState::Closed,
            transport: None,
            nodes: Vec::new(),
        }
    }

    /// Open the channel: acquire the transport, enumerate the bus, and
    /// populate the node set in ascending bus-address order.
    ///
    /// On failure the channel transitions to `Faulted`, holds no nodes,
    /// and the transport is released.
    ///
    /// # Errors
    /// Returns the [`LinkError`] reported by the transport, or an
    /// enumeration error if the transport reports more than
    /// [`MAX_NODES_PER_CHANNEL`] nodes.
    pub fn open(&mut self, mut transport: Box<dyn LinkTransport>) -> Result<(), LinkError> {
        self.state = OpenState::Opening;
        debug!(
            "Opening channel {} at {} via '{}' transport",
            self.spec.index,
            self.spec.address,
            transport.name()
        );

        if let Err(e) = transport.open(&self.spec) {
            warn!("Channel {} open failed: {}", self.spec.index, e);
            self.state = OpenState::Faulted;
            return Err(e);
        }

        let mut infos = match transport.enumerate() {
            Ok(infos) => infos,
            Err(e) => {
                warn!("Channel {} enumeration failed: {}", self.spec.index, e);
                transport.close();
                self.state = OpenState::Faulted;
                return Err(e);
            }
        };

        if infos.len() > MAX_NODES_PER_CHANNEL {
            let e = LinkError::new(
                0,
                codes::ENUMERATION_FAILED,
                format!(
                    "{} nodes found, at most {MAX_NODES_PER_CHANNEL} supported per channel",
                    infos.len()
                ),
            );
            warn!("Channel {} enumeration failed: {}", self.spec.index, e);
            transport.close();
            self.state = OpenState::Faulted;
            return Err(e);
        }

        // Canonical node ordering: ascending bus address.
        infos.sort_by_key(|n| n.address);

        let channel_index = self.spec.index;
        self.nodes = infos
            .into_iter()
            .enumerate()
            .map(|(node_index, info)| NodeHandle {
                channel_index,
                node_index,
                info,
            })
            .collect();
        self.transport = Some(transport);
        self.state = OpenState::Open;

        info!(
            "Channel {} open: {} node(s) found",
            self.spec.index,
            self.nodes.len()
        );
        Ok(())
    }

    /// Close the channel, releasing the transport and invalidating all
    /// node handles. Idempotent; always safe, including after a failed
    /// open.
    pub fn close(&mut self) {
        if let Some(transport) = self.transport.as_mut() {
            transport.close();
        }
        self.transport = None;
        self.nodes.clear();
        if self.state != OpenState::Closed {
            debug!("Channel {} closed", self.spec.index);
        }
        self.state = OpenState::Closed;
    }

    /// The channel's immutable specification.
    pub fn spec(&self) -> &ChannelSpec {
        &self.spec
    }

    /// Current open state.
    pub fn state(&self) -> OpenState {
        self.state
    }

    /// True while the channel is open.
    pub fn is_open(&self) -> bool {
        self.state == OpenState::Open
    }

    /// Number of nodes discovered on this channel.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Discovered nodes, in enumeration (ascending bus address) order.
    pub fn nodes(&self) -> &[NodeHandle] {
        &self.nodes
    }
}

//! Network manager.
//!
//! Owns the collection of link channels and drives the open-all/close-all
//! lifecycle. Channels are held in an explicit registry indexed by
//! configuration order — no process-wide inventory table.

use crate::channel::LinkChannel;
use crate::registry::TransportRegistry;
use scnet_common::config::{ChannelAddress, ChannelSpec};
use scnet_common::consts::MAX_CHANNELS;
use scnet_common::error::HostError;
use tracing::{info, warn};

/// Single entry point for "open channels, enumerate nodes".
///
/// Opening is deliberately not transactional: `open_all` fails fast on the
/// first channel that cannot open and leaves earlier channels open. The
/// caller is responsible for `close_all` on its failure path; dropping the
/// manager closes everything as a backstop.
pub struct NetworkManager {
    registry: TransportRegistry,
    transport_name: String,
    channels: Vec<LinkChannel>,
}

impl NetworkManager {
    /// Create a manager that opens channels with the named transport.
    pub fn new(registry: TransportRegistry, transport_name: impl Into<String>) -> Self {
        Self {
            registry,
            transport_name: transport_name.into(),
            channels: Vec::new(),
        }
    }

    /// Register a channel spec at the given index. No I/O is performed.
    ///
    /// Indices must be assigned contiguously from zero; reconfiguring an
    /// existing index replaces its spec if the channel is closed.
    ///
    /// # Errors
    /// Returns `HostError::Config` if `index` is outside the supported
    /// range, skips ahead of the configured set, or names an open channel.
    pub fn configure_channel(
        &mut self,
        index: usize,
        address: ChannelAddress,
    ) -> Result<(), HostError> {
        self.configure_channel_spec(ChannelSpec::new(index, address))
    }

    /// Register a fully-specified channel spec. See [`Self::configure_channel`].
    pub fn configure_channel_spec(&mut self, spec: ChannelSpec) -> Result<(), HostError> {
        let index = spec.index;
        if index >= MAX_CHANNELS {
            return Err(HostError::Config(format!(
                "channel index {index} out of range (max {MAX_CHANNELS})"
            )));
        }
        if index > self.channels.len() {
            return Err(HostError::Config(format!(
                "channel index {index} skips ahead of {} configured channel(s)",
                self.channels.len()
            )));
        }

        info!("Configured channel {} at {}", index, spec.address);
        if index == self.channels.len() {
            self.channels.push(LinkChannel::new(spec));
        } else {
            if self.channels[index].is_open() {
                return Err(HostError::Config(format!(
                    "channel {index} is open; close it before reconfiguring"
                )));
            }
            self.channels[index] = LinkChannel::new(spec);
        }
        Ok(())
    }

    /// Open the first `count` configured channels in index order.
    ///
    /// Opening a channel includes enumerating its attached nodes. Fails
    /// fast on the first channel that cannot open; channels opened earlier
    /// are left open for the caller to close.
    ///
    /// # Errors
    /// `HostError::Config` if `count` is zero or exceeds the configured
    /// set; `HostError::Link` or `HostError::TransportNotFound` from the
    /// failing channel.
    pub fn open_all(&mut self, count: usize) -> Result<(), HostError> {
        if count == 0 {
            return Err(HostError::Config("open_all with zero channels".into()));
        }
        if count > self.channels.len() {
            return Err(HostError::Config(format!(
                "open_all({count}) exceeds {} configured channel(s)",
                self.channels.len()
            )));
        }

        info!("Opening {} channel(s)...", count);
        for channel in self.channels.iter_mut().take(count) {
            let transport = self.registry.create(&self.transport_name)?;
            channel.open(transport)?;
        }
        info!("  ... channels are open");
        Ok(())
    }

    /// Close every channel in index order. Idempotent: closing an
    /// already-closed channel is a no-op.
    pub fn close_all(&mut self) {
        for channel in &mut self.channels {
            channel.close();
        }
    }

    /// Borrow the channel at `index`.
    ///
    /// # Panics
    /// Out-of-range indices are a programming error (indices are
    /// statically known to the caller), not a recoverable condition.
    pub fn channel(&self, index: usize) -> &LinkChannel {
        &self.channels[index]
    }

    /// Mutably borrow the channel at `index`.
    ///
    /// # Panics
    /// Same contract as [`Self::channel`].
    pub fn channel_mut(&mut self, index: usize) -> &mut LinkChannel {
        &mut self.channels[index]
    }

    /// Number of configured channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Iterate configured channels in index order.
    pub fn channels(&self) -> impl Iterator<Item = &LinkChannel> {
        self.channels.iter()
    }

    /// Total node count across all open channels.
    pub fn total_node_count(&self) -> usize {
        self.channels.iter().map(|c| c.node_count()).sum()
    }
}

impl Drop for NetworkManager {
    fn drop(&mut self) {
        // Release transports on every exit path, including unwinds.
        if self.channels.iter().any(|c| c.is_open()) {
            warn!("NetworkManager dropped with open channels; closing");
        }
        self.close_all();
    }
}

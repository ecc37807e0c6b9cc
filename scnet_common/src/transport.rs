//! `LinkTransport` trait and factory types.
//!
//! This module defines:
//! - `LinkTransport` trait - Interface for pluggable bus transports
//! - `TransportFactory` type alias - Factory closure type
//!
//! The physical serial transport (byte-level send/receive, framing,
//! checksum) lives behind this trait. The host orchestration layer never
//! sees bytes, only opened channels and enumerated node identities.

use crate::config::ChannelSpec;
use crate::error::LinkError;
use crate::node::NodeInfo;

/// Trait defining the interface for bus transports.
///
/// The network manager drives transports through this trait, enabling
/// pluggable backends (simulation, serial hardware, etc.).
///
/// # Lifecycle
///
/// 1. `open()` - acquire the physical channel described by the `ChannelSpec`
/// 2. `enumerate()` - probe the bus for responding devices (open channel
///    required)
/// 3. `close()` - release the channel; always safe, including after a
///    failed `open()`
///
/// Each operation blocks the calling thread until complete or failed; any
/// internal retry or timeout policy is bounded using the clock service
/// (`crate::clock::now_ms`) as its time source.
pub trait LinkTransport: Send {
    /// Returns the transport's unique identifier (e.g. "simulation").
    fn name(&self) -> &'static str;

    /// Returns the transport's semantic version.
    fn version(&self) -> &'static str;

    /// Acquire the physical channel described by `spec`.
    ///
    /// # Errors
    /// Returns [`LinkError`] with the originating address if the channel
    /// cannot be acquired.
    fn open(&mut self, spec: &ChannelSpec) -> Result<(), LinkError>;

    /// Probe the bus for responding devices and report their identities.
    ///
    /// Only legal while the channel is open. The returned sequence is in
    /// ascending bus-address order, the canonical node ordering.
    ///
    /// # Errors
    /// Returns [`LinkError`] if the probe fails part-way; the caller must
    /// treat the channel as faulted and hold no nodes.
    fn enumerate(&mut self) -> Result<Vec<NodeInfo>, LinkError>;

    /// Release the channel. Idempotent; never fails.
    fn close(&mut self);

    /// True while the channel is acquired.
    fn is_open(&self) -> bool;
}

/// Factory closure for creating transport instances.
///
/// Closure-based so callers can capture a configured blueprint (the
/// simulation transport relies on this for topology injection in tests).
pub type TransportFactory = Box<dyn Fn() -> Box<dyn LinkTransport> + Send + Sync>;

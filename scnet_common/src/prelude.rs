//! Prelude module for common re-exports.
//!
//! This module provides convenient re-exports of commonly used types
//! so that consumers can do `use scnet_common::prelude::*;` and get
//! the most important types without listing individual paths.
//!
//! # Usage
//!
//! ```rust
//! use scnet_common::prelude::*;
//! ```

// ─── Timing ─────────────────────────────────────────────────────────
pub use crate::clock::now_ms;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ChannelAddress, ChannelSpec, NetworkConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{DEFAULT_RATE, MAX_CHANNELS, MAX_NODES_PER_CHANNEL};

// ─── Node Identity ──────────────────────────────────────────────────
pub use crate::node::{AccessLevel, NodeInfo, NodeType};

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::{AxisFault, HostError, LinkError, ValidationFailure};

// ─── Transport ──────────────────────────────────────────────────────
pub use crate::transport::{LinkTransport, TransportFactory};

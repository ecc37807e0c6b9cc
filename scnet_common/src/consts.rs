//! System-wide constants for the scnet workspace.
//!
//! Single source of truth for all numeric limits and default values.
//! Imported by all crates — no duplication permitted.

/// Maximum number of configurable link channels (network controllers).
pub const MAX_CHANNELS: usize = 8;

/// Maximum number of addressable nodes on one multi-drop channel.
pub const MAX_NODES_PER_CHANNEL: usize = 16;

/// Default channel bit rate in bits per second.
pub const DEFAULT_RATE: u32 = 230_400;

/// Canonical host service name (used for dump-dir naming and logging).
pub const HOST_SERVICE_NAME: &str = "scnet";

//! Error taxonomy for the scnet workspace.
//!
//! Four categories with distinct propagation rules:
//!
//! - [`LinkError`] - transport/bus-level fault during open or enumeration;
//!   aborts the run before any control authority is granted.
//! - [`ValidationFailure`] - aggregate node-type or access-level mismatch;
//!   reported exhaustively, never downgraded to success.
//! - [`AxisFault`] - per-node control-sequence fault; localized to one
//!   controller, surfaced after the full run sequence completes.
//! - [`HostError::Config`] - invalid static configuration; a caller-side
//!   programming error, not expected at runtime with valid input.
//!
//! Truly unexpected faults propagate by unwinding and are caught
//! generically at the top level.

use thiserror::Error;

/// Numeric link error code space.
///
/// Codes are carried alongside the human-readable message so a fault can be
/// logged and attributed to a specific physical address.
pub mod codes {
    /// Physical transport could not be acquired.
    pub const OPEN_FAILED: u32 = 0x0001;
    /// Port exists but is held by another process.
    pub const PORT_UNAVAILABLE: u32 = 0x0002;
    /// Bus probe failed part-way through.
    pub const ENUMERATION_FAILED: u32 = 0x0010;
    /// No device answered at a probed address.
    pub const NO_RESPONSE: u32 = 0x0011;
    /// Response deadline exceeded.
    pub const TIMEOUT: u32 = 0x0012;
    /// A node reported an internal fault.
    pub const NODE_FAULT: u32 = 0x0020;
}

/// Transport/bus-level fault, attributed to a physical address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("link error: addr={addr}, code={code:#06x}, msg={message}")]
pub struct LinkError {
    /// Originating bus address (0 when the fault is channel-wide).
    pub addr: u16,
    /// Numeric error code from [`codes`].
    pub code: u32,
    /// Human-readable description.
    pub message: String,
}

impl LinkError {
    /// Create a link error for the given address and code.
    pub fn new(addr: u16, code: u32, message: impl Into<String>) -> Self {
        Self {
            addr,
            code,
            message: message.into(),
        }
    }

    /// Create a link error whose message is rendered from the code alone.
    pub fn from_code(addr: u16, code: u32) -> Self {
        Self::new(addr, code, crate::diag::describe_code(code))
    }
}

/// Fault raised by one node's control sequence while it was running.
///
/// Does not roll back or abort peer controllers already scheduled to run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("axis fault: addr={addr}, msg={message}")]
pub struct AxisFault {
    /// Bus address of the faulting node.
    pub addr: u16,
    /// Human-readable description.
    pub message: String,
}

impl AxisFault {
    /// Create an axis fault for the given node address.
    pub fn new(addr: u16, message: impl Into<String>) -> Self {
        Self {
            addr,
            message: message.into(),
        }
    }
}

/// Aggregate validation failure category.
///
/// When both categories hold, type mismatch takes precedence in reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// At least one discovered node is not a supported servo model.
    #[error("unsupported node type on the network; attach only servo nodes")]
    NodeType,
    /// At least one servo node is not under full host control.
    #[error("full access is not granted on all nodes")]
    AccessLevel,
}

/// Umbrella error type for host-side operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Invalid static configuration (bad channel index, bad count).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport/bus-level fault.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// No transport registered under the requested name.
    #[error("transport not found: {0}")]
    TransportNotFound(String),

    /// Aggregate validation failure.
    #[error("validation failed: {0}")]
    Validation(ValidationFailure),

    /// Per-node control-sequence fault.
    #[error(transparent)]
    Axis(#[from] AxisFault),
}

//! # SCNET Host Library
//!
//! Host-side orchestration for a multi-drop serial network of servo-drive
//! nodes: open channels, enumerate the attached nodes, validate type and
//! access level across the whole node set, and drive each validated node's
//! control sequence in turn. Transports implement the `LinkTransport` trait
//! defined in `scnet_common::transport`.
//!
//! # Module Structure
//!
//! - [`registry`] - Transport factory registration
//! - [`transports`] - Transport implementations
//! - [`channel`] - Link channel and node handles
//! - [`manager`] - Network manager (open-all / close-all lifecycle)
//! - [`axis`] - Per-node axis controller
//! - [`orchestrate`] - Validation and orchestration driver
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                       scnet_host (single crate)                   │
//! │  ┌──────────────┐    ┌─────────────────┐    ┌──────────────────┐  │
//! │  │ Orchestrator │───►│ NetworkManager  │───►│ TransportRegistry│  │
//! │  │ (validate +  │    │ (LinkChannels)  │    └──────────────────┘  │
//! │  │  run axes)   │    └───────┬─────────┘                          │
//! │  └──────┬───────┘            ▼                                    │
//! │         │            ┌────────────────┐                           │
//! │         └───────────►│ LinkTransport  │ (trait object)            │
//! │      AxisController  │ trait          │                           │
//! │                      └────────────────┘                           │
//! └───────────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod axis;
pub mod channel;
pub mod manager;
pub mod orchestrate;
pub mod registry;
pub mod transports;

// Re-export key types for convenience
pub use crate::axis::{AxisController, ControlSequence, RunState};
pub use crate::channel::{LinkChannel, NodeHandle, OpenState};
pub use crate::manager::NetworkManager;
pub use crate::orchestrate::{Outcome, ValidationReport};
pub use crate::registry::TransportRegistry;

//! SCNET Common Library
//!
//! This crate provides the shared types and services used by every crate in
//! the scnet workspace: the node identity model, the error taxonomy, the
//! configuration layer, the monotonic clock service used for timeouts and
//! log timestamps, and the transport trait behind which the physical serial
//! link is hidden.
//!
//! # Module Structure
//!
//! - [`consts`] - System-wide constants and limits
//! - [`clock`] - Monotonic millisecond time base
//! - [`diag`] - Diagnostic path and identity helpers
//! - [`node`] - Node identity model (type, access level, info)
//! - [`error`] - Error taxonomy for the whole workspace
//! - [`config`] - Channel specification and network configuration loading
//! - [`transport`] - `LinkTransport` trait for pluggable bus backends
//! - [`prelude`] - Common re-exports for convenience

#![deny(missing_docs)]

pub mod clock;
pub mod config;
pub mod consts;
pub mod diag;
pub mod error;
pub mod node;
pub mod prelude;
pub mod transport;

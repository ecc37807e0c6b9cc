//! Transport implementations.
//!
//! This module contains all bus transport implementations:
//!
//! - [`simulation`] - Software simulation transport for development and
//!   testing
//!
//! # Adding New Transports
//!
//! 1. Create a new submodule under `transports/`
//! 2. Implement the `LinkTransport` trait from `scnet_common::transport`
//! 3. Register the transport in `TransportRegistry::with_builtin()`
//! 4. Add export and documentation

pub mod simulation;

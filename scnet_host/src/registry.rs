//! Transport registry.
//!
//! Provides a `TransportRegistry` struct for registering and retrieving
//! transport factories. This uses constructor-injection rather than global
//! state.

use scnet_common::error::HostError;
use scnet_common::transport::{LinkTransport, TransportFactory};
use std::collections::HashMap;

/// Registry of available transport backends.
///
/// Constructed at startup, populated via `register()`, and passed to
/// `NetworkManager` by value. No global state — testable in isolation.
pub struct TransportRegistry {
    factories: HashMap<&'static str, TransportFactory>,
}

impl TransportRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with all built-in transports registered.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            "simulation",
            Box::new(|| {
                Box::new(crate::transports::simulation::SimTransport::new())
                    as Box<dyn LinkTransport>
            }),
        );
        registry
    }

    /// Register a transport factory.
    ///
    /// # Panics
    /// Panics if a transport with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: TransportFactory) {
        if self.factories.contains_key(name) {
            panic!("Transport '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Create a transport instance by name.
    ///
    /// # Errors
    /// Returns `HostError::TransportNotFound` if no transport with the
    /// given name is registered.
    pub fn create(&self, name: &str) -> Result<Box<dyn LinkTransport>, HostError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| HostError::TransportNotFound(name.to_string()))?;
        Ok(factory())
    }

    /// List all registered transport names.
    pub fn list(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for TransportRegistry {
    fn default() -> Self {
        Self::new()
    }
}

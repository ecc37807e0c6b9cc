//! Channel specification and network configuration loading.
//!
//! A [`ChannelSpec`] names one physical communication channel: its ordinal
//! index, its platform-specific address, and its bit rate. Addresses are
//! resolved to a [`ChannelAddress`] variant once at configuration time, so
//! nothing downstream branches on the platform's addressing style.
//!
//! [`NetworkConfig`] is the TOML file surface for multi-channel setups.
//!
//! # TOML Example
//!
//! ```toml
//! transport = "simulation"
//!
//! [[channels]]
//! address = "/dev/ttyUSB0"
//!
//! [[channels]]
//! address = "2"          # numeric hub port
//! rate = 115200
//! ```

use crate::consts::{DEFAULT_RATE, MAX_CHANNELS};
use crate::error::HostError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Platform-specific channel identifier, resolved once at configuration
/// time: a numeric hub port number or a device path string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelAddress {
    /// Numeric hub port (Windows-style COM port number).
    Number(u32),
    /// Device path (e.g. `/dev/ttyUSB0`).
    Path(String),
}

impl FromStr for ChannelAddress {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(HostError::Config("channel address is empty".into()));
        }
        match s.parse::<u32>() {
            Ok(n) => Ok(Self::Number(n)),
            Err(_) => Ok(Self::Path(s.to_string())),
        }
    }
}

impl fmt::Display for ChannelAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Path(p) => write!(f, "{p}"),
        }
    }
}

/// Specification of one link channel. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// Ordinal position within the network manager.
    pub index: usize,
    /// Physical channel identifier.
    pub address: ChannelAddress,
    /// Bit rate in bits per second.
    pub rate: u32,
}

impl ChannelSpec {
    /// Create a spec with the default bit rate.
    pub fn new(index: usize, address: ChannelAddress) -> Self {
        Self::with_rate(index, address, DEFAULT_RATE)
    }

    /// Create a spec with an explicit bit rate.
    pub fn with_rate(index: usize, address: ChannelAddress, rate: u32) -> Self {
        Self {
            index,
            address,
            rate,
        }
    }
}

/// One channel entry in a network configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelEntry {
    /// Channel address, numeric or path.
    pub address: String,
    /// Bit rate override; defaults to [`DEFAULT_RATE`].
    #[serde(default = "default_rate")]
    pub rate: u32,
}

fn default_rate() -> u32 {
    DEFAULT_RATE
}

/// Network configuration file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Transport backend name.
    #[serde(default = "default_transport")]
    pub transport: String,
    /// Configured channels, in index order.
    pub channels: Vec<ChannelEntry>,
}

fn default_transport() -> String {
    "simulation".to_string()
}

impl NetworkConfig {
    /// Load and validate a network configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `HostError::Config` if the file cannot be read, parsed, or
    /// fails semantic validation.
    pub fn load(path: &Path) -> Result<Self, HostError> {
        info!("Loading network configuration from {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| {
            HostError::Config(format!("Failed to read config file {path:?}: {e}"))
        })?;

        let config: NetworkConfig = toml::from_str(&content).map_err(|e| {
            HostError::Config(format!("Failed to parse config file {path:?}: {e}"))
        })?;

        config.validate()?;
        info!(
            "Loaded config: transport={}, {} channel(s)",
            config.transport,
            config.channels.len()
        );
        Ok(config)
    }

    /// Semantic validation: channel count bounds and non-empty addresses.
    pub fn validate(&self) -> Result<(), HostError> {
        if self.channels.is_empty() {
            return Err(HostError::Config("no channels configured".into()));
        }
        if self.channels.len() > MAX_CHANNELS {
            return Err(HostError::Config(format!(
                "{} channels configured, maximum is {}",
                self.channels.len(),
                MAX_CHANNELS
            )));
        }
        for (idx, entry) in self.channels.iter().enumerate() {
            if entry.address.trim().is_empty() {
                return Err(HostError::Config(format!(
                    "channel {idx} has an empty address"
                )));
            }
        }
        Ok(())
    }

    /// Resolve file entries into channel specs, in index order.
    pub fn channel_specs(&self) -> Result<Vec<ChannelSpec>, HostError> {
        self.channels
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let address: ChannelAddress = entry.address.parse()?;
                Ok(ChannelSpec::with_rate(index, address, entry.rate))
            })
            .collect()
    }
}

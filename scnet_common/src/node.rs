//! Node identity model.
//!
//! All enums use `#[repr(u8)]` for compact representation. A node's
//! identity snapshot is reported once during channel enumeration and passed
//! through unmodified for operator-facing reporting; only the type and
//! access level participate in control decisions.

use serde::{Deserialize, Serialize};

/// Device model family of a discovered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    /// Unrecognized or unreported device type.
    Unknown = 0,
    /// Basic servo drive model.
    ServoBasic = 1,
    /// Advanced servo drive model.
    ServoAdvanced = 2,
    /// I/O expansion module (not a controllable axis).
    IoExpander = 3,
}

impl NodeType {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::ServoBasic),
            2 => Some(Self::ServoAdvanced),
            3 => Some(Self::IoExpander),
            _ => None,
        }
    }

    /// True if the host can grant control authority over this device type.
    ///
    /// Basic and advanced servo models are both controllable; everything
    /// else fails type validation.
    #[inline]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::ServoBasic | Self::ServoAdvanced)
    }
}

impl Default for NodeType {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Degree of control authority the host currently holds over a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AccessLevel {
    /// Identity queries only.
    Informational = 0,
    /// Identity plus status monitoring; no motion commands.
    Monitor = 1,
    /// Full control authority.
    Full = 2,
}

impl AccessLevel {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Informational),
            1 => Some(Self::Monitor),
            2 => Some(Self::Full),
            _ => None,
        }
    }

    /// True if the host holds full control authority.
    #[inline]
    pub const fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl Default for AccessLevel {
    fn default() -> Self {
        Self::Informational
    }
}

/// Identity snapshot of one node, as reported during enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NodeInfo {
    /// Bus address the node responded on.
    pub address: u16,
    /// Device model family.
    pub node_type: NodeType,
    /// User-assigned short identifier.
    pub user_id: String,
    /// Firmware version string.
    pub firmware_version: String,
    /// Hardware version string.
    pub hardware_version: String,
    /// Factory serial number.
    pub serial_number: u32,
    /// Model designation string.
    pub model: String,
    /// Access level granted to this host.
    pub access_level: AccessLevel,
}

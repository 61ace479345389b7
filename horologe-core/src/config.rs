//! Intake configuration
//!
//! Which sources are fitted and how the wireless module is set up.
//! Configuration is stored in flash as postcard-serialized binary data
//! (with the `serde` feature).

use heapless::String;

use horologe_protocol::provision::{MAX_NAME_LEN, RESPONSE_TIMEOUT_MS};
use horologe_protocol::{ModuleProfile, PACKET_TIMEOUT_MS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name advertised by the module when none is configured
pub const DEFAULT_DEVICE_NAME: &str = "Horologe";

/// Link baud rate; the data load is tiny, slow is fine
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// Errors persisting or restoring configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output buffer too small or value not serializable
    Encode,
    /// Stored bytes are not a valid configuration
    Decode,
}

/// Wireless link settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// Device name set during provisioning
    pub name: String<MAX_NAME_LEN>,
    /// Module type, selects the AT directive set
    pub module: ModuleProfile,
    /// UART baud rate
    pub baudrate: u32,
    /// START-to-END limit for a request packet
    pub packet_timeout_ms: u32,
    /// Wait for each provisioning reply
    pub response_timeout_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        let mut name = String::new();
        // Fits: the default name is shorter than MAX_NAME_LEN
        let _ = name.push_str(DEFAULT_DEVICE_NAME);

        Self {
            name,
            module: ModuleProfile::default(),
            baudrate: DEFAULT_BAUDRATE,
            packet_timeout_ms: PACKET_TIMEOUT_MS,
            response_timeout_ms: RESPONSE_TIMEOUT_MS,
        }
    }
}

/// Fitted intake hardware
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntakeConfig {
    /// Wireless link, if a module is fitted
    pub link: Option<LinkConfig>,
    /// IR receiver fitted
    pub remote: bool,
    /// Mode switch fitted
    pub switch: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            link: Some(LinkConfig::default()),
            remote: false,
            switch: true,
        }
    }
}

#[cfg(feature = "serde")]
impl IntakeConfig {
    /// Serialize into `buf`, returning the used part
    pub fn to_slice<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Restore from stored bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)
    }
}

//! Session configuration.

use crate::consts;
use std::time::Duration;

/// Parameters used when opening and talking to a receiver.
///
/// The defaults match a stock IgorPlug-USB receiver, so most callers never
/// need anything but [`SessionConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// USB vendor ID to match (0x03EB for Atmel).
    pub vendor_id: u16,
    /// USB product ID to match.
    pub product_id: u16,
    /// Interface claimed when the driver is bound.
    pub interface: u8,
    /// Timeout applied to every control transfer.
    pub timeout: Duration,
    /// Largest body slice requested per transfer (1-256).
    pub max_chunk_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            vendor_id: consts::ATMEL_VID,
            product_id: consts::IGORPLUG_PID,
            interface: consts::DEFAULT_INTERFACE,
            timeout: Duration::from_millis(consts::DEFAULT_TIMEOUT_MS),
            max_chunk_len: consts::MAX_CHUNK_LEN,
        }
    }
}

impl SessionConfig {
    /// Match a device with custom vendor/product IDs (e.g. a reflashed clone).
    pub fn with_ids(mut self, vendor_id: u16, product_id: u16) -> Self {
        self.vendor_id = vendor_id;
        self.product_id = product_id;
        self
    }

    pub fn with_interface(mut self, interface: u8) -> Self {
        self.interface = interface;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the body chunk size, clamped to the protocol maximum.
    ///
    /// A value of zero is kept as-is; every body read then aborts as unsizable.
    pub fn with_max_chunk_len(mut self, max_chunk_len: usize) -> Self {
        self.max_chunk_len = max_chunk_len.min(consts::MAX_CHUNK_LEN);
        self
    }
}

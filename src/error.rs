use thiserror::Error;

/// Errors that can occur when talking to an IgorPlug-USB receiver.
///
/// The variants fall into three groups:
///
/// * the device is absent or could not be opened ([`Error::is_device_absent`]),
/// * a transfer failed while the device was presumed present,
/// * a read came back shorter than the protocol requires ([`Error::is_short_read`]).
#[derive(Error, Debug)]
pub enum Error {
    /// The host USB stack could not produce a device list.
    #[error("Unable to list USB devices: {0}")]
    DeviceListUnavailable(#[source] nusb::Error),
    /// No attached device matches the configured vendor/product ID.
    #[error("Device not found with VID/PID {vid:04X}:{pid:04X}")]
    DeviceNotFound {
        /// The vendor ID that was searched for.
        vid: u16,
        /// The product ID that was searched for.
        pid: u16,
    },
    /// The device was found but the operating system refused to open it.
    #[error("Failed to open device: {0}")]
    OpenFailed(#[source] nusb::Error),
    /// The driver could not be bound to the device interface.
    #[error("Failed to claim interface {interface}: {source}")]
    DriverBind {
        /// Interface number that was being claimed.
        interface: u8,
        /// Underlying USB error.
        #[source]
        source: nusb::Error,
    },
    /// The device went away while a transfer was in flight.
    #[error("Device disconnected during transfer")]
    Disconnected,
    /// A control transfer failed while the device was still reachable.
    #[error("Control transfer failed: {0}")]
    Transfer(#[source] nusb::transfer::TransferError),
    /// Fewer bytes were returned than the protocol requires.
    #[error("Short read (expected {expected} bytes, got {actual})")]
    ShortRead {
        /// Number of bytes that were requested.
        expected: usize,
        /// Number of bytes actually received.
        actual: usize,
    },
    /// Requested operation exceeds device or protocol limits.
    #[error("Requested operation size is too large (max {max}, got {actual})")]
    OperationTooLarge {
        /// Maximum allowed size for this operation.
        max: usize,
        /// Actual size requested.
        actual: usize,
    },
}

impl Error {
    /// True when the error means there is no device to talk to.
    ///
    /// These errors reset the repeat-suppression state and suppress the
    /// buffer acknowledgement, since there is nobody to acknowledge to.
    pub fn is_device_absent(&self) -> bool {
        matches!(
            self,
            Error::DeviceListUnavailable(_)
                | Error::DeviceNotFound { .. }
                | Error::OpenFailed(_)
                | Error::DriverBind { .. }
                | Error::Disconnected
        )
    }

    /// True for benign short or unsizable reads that mean "no new data".
    pub fn is_short_read(&self) -> bool {
        matches!(
            self,
            Error::ShortRead { .. } | Error::OperationTooLarge { .. }
        )
    }
}

impl From<nusb::transfer::TransferError> for Error {
    fn from(err: nusb::transfer::TransferError) -> Self {
        match err {
            nusb::transfer::TransferError::Disconnected => Error::Disconnected,
            other => Error::Transfer(other),
        }
    }
}

/// Result type alias for IgorPlug operations.
pub type Result<T> = std::result::Result<T, Error>;

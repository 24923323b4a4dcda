//! Device session: lazy open, close-on-error and the control-transfer primitive.

use crate::config::SessionConfig;
use crate::error::Result;
use crate::transport::{ControlData, ControlHandle, ControlSetup, UsbBackend};
use log::{debug, warn};
use std::fmt;

/// At most one open connection to a receiver.
///
/// The handle is opened on the first transfer and dropped as soon as any
/// transfer fails, so a wedged handle is never reused: the next transfer
/// reopens the device from scratch.
pub struct Session<B: UsbBackend> {
    backend: B,
    handle: Option<B::Handle>,
    config: SessionConfig,
}

impl<B: UsbBackend> fmt::Debug for Session<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

impl<B: UsbBackend> Session<B> {
    /// Creates a closed session. No I/O happens until the first transfer.
    pub fn new(backend: B, config: SessionConfig) -> Self {
        Session {
            backend,
            handle: None,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether a device handle is currently held.
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Opens the device unless it is already open.
    ///
    /// On failure the session stays closed and the error is one of the
    /// "device absent" kinds.
    pub fn ensure_open(&mut self) -> Result<()> {
        if self.handle.is_none() {
            self.handle = Some(self.open_device()?);
        }
        Ok(())
    }

    /// Releases the device handle. Does nothing when already closed.
    pub fn close(&mut self) {
        if self.handle.take().is_some() {
            debug!("Device closed");
        }
    }

    /// Runs one vendor control transfer of `data.len()` bytes, opening the device on demand.
    ///
    /// The direction follows the kind of `data`.
    ///
    /// Lengths beyond 16 bits are truncated, since `wLength` is 16 bits wide.
    /// Any failure closes the session before the error is returned. On success
    /// the number of bytes actually moved is returned, which may be less than
    /// requested.
    pub fn transfer(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        data: ControlData<'_>,
    ) -> Result<usize> {
        let length = match u16::try_from(data.len()) {
            Ok(len) => len,
            Err(_) => {
                warn!(
                    "Buffer size {} too big, truncated to 16 bits ({})",
                    data.len(),
                    u16::MAX
                );
                u16::MAX
            }
        };

        let mut handle = match self.handle.take() {
            Some(handle) => handle,
            None => self.open_device()?,
        };

        let setup = ControlSetup {
            direction: data.direction(),
            request,
            value,
            index,
            length,
        };
        match handle.control_transfer(setup, data) {
            Ok(n) => {
                self.handle = Some(handle);
                Ok(n)
            }
            Err(e) => {
                warn!("Transfer device failed (request 0x{:02X}): {}", request, e);
                drop(handle);
                debug!("Device closed");
                Err(e)
            }
        }
    }

    /// Device-to-host transfer into `buf`.
    pub fn read(&mut self, request: u8, value: u16, index: u16, buf: &mut [u8]) -> Result<usize> {
        self.transfer(request, value, index, ControlData::In(buf))
    }

    /// Host-to-device transfer of `data`.
    pub fn write(&mut self, request: u8, value: u16, index: u16, data: &[u8]) -> Result<usize> {
        self.transfer(request, value, index, ControlData::Out(data))
    }

    fn open_device(&mut self) -> Result<B::Handle> {
        match self.backend.open(&self.config) {
            Ok(handle) => {
                debug!("Device opened successfully");
                Ok(handle)
            }
            Err(e) => {
                debug!("Open device failed: {}", e);
                Err(e)
            }
        }
    }
}

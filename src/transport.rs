//! The USB transport seam and its `nusb` implementation.
//!
//! The session layer only needs three things from the platform: open a device
//! by VID/PID, run a vendor control transfer on it, and close it again.
//! [`UsbBackend`] and [`ControlHandle`] capture exactly that, so the protocol
//! engine can be driven by something other than real hardware.

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use log::{debug, info, trace};
use nusb::transfer::{ControlIn, ControlOut, ControlType, Recipient};
use nusb::MaybeFuture;
use std::time::Duration;

/// Direction of a control transfer's data stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device-to-host (IN).
    DeviceToHost,
    /// Host-to-device (OUT).
    HostToDevice,
}

/// Setup stage of one vendor/device control transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSetup {
    pub direction: Direction,
    /// Vendor request code (`bRequest`).
    pub request: u8,
    pub value: u16,
    pub index: u16,
    /// Data stage length (`wLength`).
    pub length: u16,
}

/// Data stage of a control transfer.
#[derive(Debug)]
pub enum ControlData<'a> {
    /// Device-to-host: filled by the device.
    In(&'a mut [u8]),
    /// Host-to-device: sent as is.
    Out(&'a [u8]),
}

impl ControlData<'_> {
    pub fn direction(&self) -> Direction {
        match self {
            ControlData::In(_) => Direction::DeviceToHost,
            ControlData::Out(_) => Direction::HostToDevice,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ControlData::In(buf) => buf.len(),
            ControlData::Out(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An opened device able to run vendor control transfers.
///
/// Dropping the handle closes the device.
pub trait ControlHandle {
    /// Runs a vendor-type, device-recipient control transfer and blocks until it completes.
    ///
    /// For [`ControlData::In`] up to `setup.length` bytes are written into the
    /// buffer; for [`ControlData::Out`] the first `setup.length` bytes are
    /// sent. Returns the number of bytes actually moved.
    /// Device loss must be reported as [`Error::Disconnected`].
    fn control_transfer(&mut self, setup: ControlSetup, data: ControlData<'_>) -> Result<usize>;
}

/// Source of device handles (the platform USB stack, or a test double).
pub trait UsbBackend {
    type Handle: ControlHandle;

    /// Finds the device matching `config`, binds the driver and opens it.
    ///
    /// Every failure here must be one of the "device absent" errors
    /// (see [`Error::is_device_absent`]).
    fn open(&mut self, config: &SessionConfig) -> Result<Self::Handle>;
}

/// Information about an attached receiver, as reported by the USB stack.
#[derive(Debug, Clone)]
pub struct ReceiverInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial_number: Option<String>,
    pub product_string: Option<String>,
    pub manufacturer_string: Option<String>,
}

impl From<&nusb::DeviceInfo> for ReceiverInfo {
    fn from(info: &nusb::DeviceInfo) -> Self {
        ReceiverInfo {
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
            serial_number: info.serial_number().map(|s| s.to_string()),
            product_string: info.product_string().map(|s| s.to_string()),
            manufacturer_string: info.manufacturer_string().map(|s| s.to_string()),
        }
    }
}

/// Find all attached devices with the given VID/PID.
///
/// The list is empty (not an error) when nothing matches.
pub fn find_devices(vid: u16, pid: u16) -> Result<Vec<ReceiverInfo>> {
    let devices = nusb::list_devices()
        .wait()
        .map_err(Error::DeviceListUnavailable)?
        .filter(|d| d.vendor_id() == vid && d.product_id() == pid)
        .map(|d| {
            debug!(
                "Found matching device: VID={:04X}, PID={:04X}, SN={:?}",
                d.vendor_id(),
                d.product_id(),
                d.serial_number()
            );
            ReceiverInfo::from(&d)
        })
        .collect();
    Ok(devices)
}

/// [`UsbBackend`] built on the `nusb` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct NusbBackend;

/// An opened receiver with its interface claimed.
pub struct NusbHandle {
    #[allow(dead_code)] // Kept to ensure the USB device stays open
    device: nusb::Device,
    interface: nusb::Interface,
    timeout: Duration,
}

impl std::fmt::Debug for NusbHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NusbHandle")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl UsbBackend for NusbBackend {
    type Handle = NusbHandle;

    fn open(&mut self, config: &SessionConfig) -> Result<NusbHandle> {
        let (vid, pid) = (config.vendor_id, config.product_id);
        let dev_info = nusb::list_devices()
            .wait()
            .map_err(Error::DeviceListUnavailable)?
            .find(|d| d.vendor_id() == vid && d.product_id() == pid)
            .ok_or(Error::DeviceNotFound { vid, pid })?;

        info!(
            "Using {:04X}:{:04X} (SN={:?}): {:?} - {:?}",
            vid,
            pid,
            dev_info.serial_number(),
            dev_info.product_string(),
            dev_info.manufacturer_string()
        );

        let device = dev_info.open().wait().map_err(Error::OpenFailed)?;
        let interface = device
            .claim_interface(config.interface)
            .wait()
            .map_err(|source| Error::DriverBind {
                interface: config.interface,
                source,
            })?;

        Ok(NusbHandle {
            device,
            interface,
            timeout: config.timeout,
        })
    }
}

impl ControlHandle for NusbHandle {
    fn control_transfer(&mut self, setup: ControlSetup, data: ControlData<'_>) -> Result<usize> {
        match data {
            ControlData::In(buf) => {
                let data = self
                    .interface
                    .control_in(
                        ControlIn {
                            control_type: ControlType::Vendor,
                            recipient: Recipient::Device,
                            request: setup.request,
                            value: setup.value,
                            index: setup.index,
                            length: setup.length,
                        },
                        self.timeout,
                    )
                    .wait()?;
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                trace!("Control IN 0x{:02X}: {:02X?}", setup.request, &buf[..n]);
                Ok(n)
            }
            ControlData::Out(data) => {
                let len = usize::from(setup.length).min(data.len());
                let data = &data[..len];
                trace!("Control OUT 0x{:02X}: {:02X?}", setup.request, data);
                self.interface
                    .control_out(
                        ControlOut {
                            control_type: ControlType::Vendor,
                            recipient: Recipient::Device,
                            request: setup.request,
                            value: setup.value,
                            index: setup.index,
                            data,
                        },
                        self.timeout,
                    )
                    .wait()?;
                Ok(len)
            }
        }
    }
}

//! # igorplug-usb
//!
//! A Rust crate for reading infrared remote-control diagrams from
//! IgorPlug-USB receivers (Atmel VID `0x03EB`, PID `0x0002`).
//!
//! The receiver keeps the timing diagram of the last infrared message in a
//! small circular buffer and exposes it through two vendor control requests.
//! This crate uses the `nusb` crate for cross-platform USB access.
//!
//! ## Features
//!
//! *   Lazy device handling: the receiver is opened by the first request and
//!     reopened after any failure (`IgorPlug::new`, `IgorPlug::with_config`).
//! *   Diagram retrieval:
//!     *   Header parsing and chunked paging of the on-device buffer.
//!     *   Circular buffer reassembly into chronological order.
//!     *   Repeat suppression through the device's message index.
//!     *   Buffer acknowledgement after every read (`poll`, `next_diagram`,
//!         `get_next_diagram`, `set_buffer_empty`).
//! *   Device discovery (`find_devices`, `find_all`).
//! *   The classic IgorPlug data-port, EEPROM and RS-232 calls, which the
//!     hardware does not implement and which always report
//!     `Status::NotImplemented`.
//! *   A [`UsbBackend`] seam so the protocol can be driven without hardware.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use igorplug_usb::{IgorPlug, Result};
//! use std::{thread, time::Duration};
//!
//! fn main() -> Result<()> {
//!     // Optional: Initialize logging
//!     // env_logger::init();
//!
//!     let mut receiver = IgorPlug::new();
//!     loop {
//!         if let Some(diagram) = receiver.next_diagram()? {
//!             println!("{} bytes: {:02X?}", diagram.len(), diagram.as_slice());
//!         }
//!         thread::sleep(Duration::from_millis(100));
//!     }
//! }
//! ```
//!
//! ## Hardware Setup Notes
//!
//! *   **Linux udev Rules:** Grant user permission to the receiver. Create `/etc/udev/rules.d/99-igorplug.rules`:
//!     ```udev
//!     SUBSYSTEM=="usb", ATTRS{idVendor}=="03eb", ATTRS{idProduct}=="0002", MODE="0666", GROUP="plugdev"
//!     ```
//!     Reload: `sudo udevadm control --reload-rules && sudo udevadm trigger`
//! *   **Windows:** the receiver needs a WinUSB driver (e.g. installed with Zadig).
//!
//! ## License
//!
//! This project is licensed under the WTFPL.

mod config;
mod consts;
pub mod device;
pub mod diagram;
mod error;
pub mod session;
pub mod transport;
mod unsupported;

pub use config::SessionConfig;
pub use device::{IgorPlug, Outcome, Poll, Status};
pub use diagram::{Diagram, DiagramHeader};
pub use error::{Error, Result};
pub use transport::{
    find_devices, ControlData, ControlHandle, ControlSetup, Direction, NusbBackend, ReceiverInfo,
    UsbBackend,
};
// Re-export only essential public constants
pub use consts::{
    ATMEL_VID, HEADER_LEN, IGORPLUG_PID, MAX_CHUNK_LEN, MAX_DIAGRAM_LEN,
    REQUEST_GET_INFRA_CODE, REQUEST_SET_INFRA_BUFFER_EMPTY,
};

/// Find all attached IgorPlug-USB receivers with the default IDs.
pub fn find_all() -> Result<Vec<ReceiverInfo>> {
    find_devices(consts::ATMEL_VID, consts::IGORPLUG_PID)
}

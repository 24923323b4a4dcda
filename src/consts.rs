//! Internal constants: USB identifiers, vendor request codes and protocol limits.

// Default Vendor/Product IDs
/// Atmel Corporation vendor ID used by IgorPlug-USB receivers.
pub const ATMEL_VID: u16 = 0x03EB;
/// Product ID of the IgorPlug-USB infrared receiver.
pub const IGORPLUG_PID: u16 = 0x0002;

// --- Vendor Requests (Control Transfer) ---
/// Host-to-device: mark the on-device infrared buffer as consumed.
pub const REQUEST_SET_INFRA_BUFFER_EMPTY: u8 = 0x01;
/// Device-to-host: read the diagram header or a slice of the buffer body.
pub const REQUEST_GET_INFRA_CODE: u8 = 0x02;

// --- Diagram Buffer Layout ---
/// Size of the header returned ahead of the circular buffer.
pub const HEADER_LEN: usize = 3;
/// Largest body slice the device hands out in a single transfer.
pub const MAX_CHUNK_LEN: usize = 256;
/// Largest diagram the device can hold.
pub const MAX_DIAGRAM_LEN: usize = 256;

// Defaults
pub const DEFAULT_INTERFACE: u8 = 0;
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

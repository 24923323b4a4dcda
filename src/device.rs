//! The IgorPlug-USB driver handle and the diagram retrieval protocol.

use crate::config::SessionConfig;
use crate::consts;
use crate::diagram::{Diagram, DiagramHeader};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::transport::{NusbBackend, UsbBackend};
use log::{debug, trace, warn};
use std::fmt;

/// Caller-facing result code, as returned by the classic IgorPlug API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The call completed; a diagram may or may not have been delivered.
    Ok,
    /// The receiver is absent, could not be opened, or did not acknowledge.
    DeviceNotPresent,
    /// The function is not supported by this hardware revision.
    NotImplemented,
}

/// What a single poll found on the receiver.
#[derive(Debug)]
pub enum Outcome {
    /// No receiver to talk to. The error says why.
    DeviceNotPresent(Error),
    /// Nothing new: empty buffer, repeated message, short or failed read.
    NoNewData,
    /// A diagram that has not been reported before.
    NewDiagram(Diagram),
}

/// Result of [`IgorPlug::poll`]: the read outcome plus the buffer acknowledgement.
#[derive(Debug)]
pub struct Poll {
    pub outcome: Outcome,
    /// Result of the clear-buffer request; `None` when it was skipped because
    /// the device is not present.
    pub ack: Option<Result<()>>,
}

impl Poll {
    /// Folds the outcome and the acknowledgement into one status.
    ///
    /// "Device not present" from the read wins; otherwise a failed
    /// acknowledgement is reported as "device not present".
    pub fn status(&self) -> Status {
        match (&self.outcome, &self.ack) {
            (Outcome::DeviceNotPresent(_), _) => Status::DeviceNotPresent,
            (_, Some(Err(_))) => Status::DeviceNotPresent,
            _ => Status::Ok,
        }
    }

    pub fn diagram(&self) -> Option<&Diagram> {
        match &self.outcome {
            Outcome::NewDiagram(diagram) => Some(diagram),
            _ => None,
        }
    }

    pub fn into_diagram(self) -> Option<Diagram> {
        match self.outcome {
            Outcome::NewDiagram(diagram) => Some(diagram),
            _ => None,
        }
    }
}

/// A handle to an IgorPlug-USB infrared receiver.
///
/// The device is opened lazily by the first request and reopened after any
/// failure. The handle remembers the index of the last delivered message so
/// that the same diagram is reported only once.
///
/// **Note:** one request at a time. Wrap the handle in a `Mutex` to share it
/// between threads.
pub struct IgorPlug<B: UsbBackend = NusbBackend> {
    session: Session<B>,
    last_message: Option<u8>,
}

impl<B: UsbBackend> fmt::Debug for IgorPlug<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgorPlug")
            .field("last_message", &self.last_message)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

impl IgorPlug<NusbBackend> {
    /// Creates a handle for the first stock receiver found. No I/O happens yet.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Creates a handle using custom IDs, interface, timeout or chunk size.
    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_backend(NusbBackend, config)
    }
}

impl Default for IgorPlug<NusbBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: UsbBackend> IgorPlug<B> {
    /// Creates a handle over any USB backend.
    pub fn with_backend(backend: B, config: SessionConfig) -> Self {
        IgorPlug {
            session: Session::new(backend, config),
            last_message: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        self.session.config()
    }

    pub fn backend(&self) -> &B {
        self.session.backend()
    }

    /// Whether a device handle is currently held.
    pub fn is_connected(&self) -> bool {
        self.session.is_open()
    }

    /// Opens the receiver now instead of on the first request.
    pub fn connect(&mut self) -> Result<()> {
        self.session.ensure_open()
    }

    /// Releases the device handle. The next request reopens it.
    pub fn close(&mut self) {
        self.session.close();
    }

    /// Index of the last delivered message, if any.
    pub fn last_message_index(&self) -> Option<u8> {
        self.last_message
    }

    /// Forgets the last delivered message, so the next diagram is reported as new.
    pub fn forget_last_message(&mut self) {
        self.last_message = None;
    }

    // --- Buffer Acknowledgement ---

    /// Tells the receiver its buffer has been consumed.
    pub fn clear_buffer(&mut self) -> Result<()> {
        let zero = [0u8; 1];
        self.session
            .write(consts::REQUEST_SET_INFRA_BUFFER_EMPTY, 0, 0, &zero)?;
        Ok(())
    }

    /// Status-code form of [`clear_buffer`](Self::clear_buffer).
    pub fn set_buffer_empty(&mut self) -> Status {
        match self.clear_buffer() {
            Ok(()) => Status::Ok,
            Err(_) => Status::DeviceNotPresent,
        }
    }

    // --- Diagram Retrieval ---

    /// Reads the receiver once and acknowledges its buffer.
    ///
    /// The acknowledgement is sent after every read, successful or not,
    /// unless the device turned out to be absent.
    pub fn poll(&mut self) -> Poll {
        let outcome = self.fetch();
        let ack = match outcome {
            Outcome::DeviceNotPresent(_) => None,
            _ => Some(self.clear_buffer()),
        };
        Poll { outcome, ack }
    }

    /// Returns the next new diagram, or `None` when nothing new arrived.
    ///
    /// Fails when the device is not present. A failed acknowledgement is
    /// reported as an error only when no diagram was decoded.
    pub fn next_diagram(&mut self) -> Result<Option<Diagram>> {
        let poll = self.poll();
        match poll.outcome {
            Outcome::DeviceNotPresent(e) => Err(e),
            Outcome::NewDiagram(diagram) => Ok(Some(diagram)),
            Outcome::NoNewData => match poll.ack {
                Some(Err(e)) => Err(e),
                _ => Ok(None),
            },
        }
    }

    /// Classic form: copies a new diagram into `out` and returns the status
    /// with the number of bytes written (0 when there is nothing new).
    pub fn get_next_diagram(
        &mut self,
        out: &mut [u8; consts::MAX_DIAGRAM_LEN],
    ) -> (Status, usize) {
        let poll = self.poll();
        let len = match poll.diagram() {
            Some(diagram) => {
                out[..diagram.len()].copy_from_slice(diagram);
                diagram.len()
            }
            None => 0,
        };
        (poll.status(), len)
    }

    fn fetch(&mut self) -> Outcome {
        let mut header_buf = [0u8; consts::HEADER_LEN];
        let received = match self
            .session
            .read(consts::REQUEST_GET_INFRA_CODE, 0, 0, &mut header_buf)
        {
            Ok(n) => n,
            Err(e) => {
                debug!("Header read failed: {}", e);
                self.last_message = None;
                return Outcome::DeviceNotPresent(e);
            }
        };

        let header = match DiagramHeader::parse(&header_buf[..received]) {
            Ok(header) => header,
            Err(e) => {
                debug!("Ignoring header: {}", e);
                return Outcome::NoNewData;
            }
        };
        trace!("Header: {:?}", header);

        if header.is_empty() {
            return Outcome::NoNewData;
        }

        let total = usize::from(header.total_length);
        let mut raw = [0u8; consts::MAX_DIAGRAM_LEN];
        if let Err(e) = self.read_body(&mut raw[..total]) {
            if e.is_short_read() {
                warn!("Diagram read aborted, discarding partial data: {}", e);
                return Outcome::NoNewData;
            }
            self.last_message = None;
            if e.is_device_absent() {
                return Outcome::DeviceNotPresent(e);
            }
            warn!("Diagram body read failed: {}", e);
            return Outcome::NoNewData;
        }

        if self.last_message == Some(header.message_index) {
            debug!("Message {} repeated, nothing new", header.message_index);
            return Outcome::NoNewData;
        }

        match Diagram::unwrap_circular(&raw[..total], header.start_offset()) {
            Ok(diagram) => {
                debug!(
                    "New diagram: message {}, {} bytes",
                    header.message_index,
                    diagram.len()
                );
                self.last_message = Some(header.message_index);
                Outcome::NewDiagram(diagram)
            }
            Err(e) => {
                warn!("Failed to reassemble diagram: {}", e);
                Outcome::NoNewData
            }
        }
    }

    /// Pages the circular buffer into `raw`.
    ///
    /// The body starts right after the header in the device's address space,
    /// so each chunk is requested at `received + HEADER_LEN`, passed in `value`.
    fn read_body(&mut self, raw: &mut [u8]) -> Result<()> {
        let max_chunk = self.session.config().max_chunk_len;
        let mut received = 0;
        while received < raw.len() {
            let remaining = raw.len() - received;
            if max_chunk == 0 || remaining > consts::MAX_CHUNK_LEN {
                return Err(Error::OperationTooLarge {
                    max: max_chunk,
                    actual: remaining,
                });
            }
            let chunk = remaining.min(max_chunk);
            // received < MAX_DIAGRAM_LEN, so the offset always fits in 16 bits
            let offset = (received + consts::HEADER_LEN) as u16;
            let n = self.session.read(
                consts::REQUEST_GET_INFRA_CODE,
                offset,
                0,
                &mut raw[received..received + chunk],
            )?;
            if n == 0 {
                return Err(Error::ShortRead {
                    expected: chunk,
                    actual: 0,
                });
            }
            received += n.min(chunk);
        }
        Ok(())
    }
}

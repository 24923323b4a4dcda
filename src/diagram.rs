//! Diagram header parsing and circular buffer reassembly.

use crate::consts;
use crate::error::{Error, Result};
use std::fmt;
use std::ops::Deref;

/// The 3-byte header the receiver returns ahead of its circular buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramHeader {
    /// Number of valid bytes currently held in the circular buffer.
    pub total_length: u8,
    /// Changes every time the receiver latches a complete message.
    pub message_index: u8,
    /// Buffer position the next byte will be written to.
    pub write_cursor: u8,
}

impl DiagramHeader {
    /// Parses a header, failing with [`Error::ShortRead`] on fewer than 3 bytes.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        match buf {
            [total_length, message_index, write_cursor, ..] => Ok(DiagramHeader {
                total_length: *total_length,
                message_index: *message_index,
                write_cursor: *write_cursor,
            }),
            _ => Err(Error::ShortRead {
                expected: consts::HEADER_LEN,
                actual: buf.len(),
            }),
        }
    }

    /// True when the receiver has nothing buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_length == 0
    }

    /// Offset of the oldest byte still held in the circular buffer.
    #[inline]
    pub fn start_offset(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            usize::from(self.write_cursor) % usize::from(self.total_length)
        }
    }
}

/// One reassembled infrared timing diagram, oldest byte first.
///
/// Backed by a fixed array of [`MAX_DIAGRAM_LEN`](crate::MAX_DIAGRAM_LEN)
/// bytes; it can never grow beyond what the receiver can hold.
#[derive(Clone, PartialEq, Eq)]
pub struct Diagram {
    bytes: [u8; consts::MAX_DIAGRAM_LEN],
    len: usize,
}

impl Diagram {
    /// Copies `data` into a new diagram.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        if data.len() > consts::MAX_DIAGRAM_LEN {
            return Err(Error::OperationTooLarge {
                max: consts::MAX_DIAGRAM_LEN,
                actual: data.len(),
            });
        }
        let mut bytes = [0u8; consts::MAX_DIAGRAM_LEN];
        bytes[..data.len()].copy_from_slice(data);
        Ok(Diagram {
            bytes,
            len: data.len(),
        })
    }

    /// Rebuilds the chronological byte order of a circular buffer.
    ///
    /// `raw` holds the physical buffer contents and `start` the position of the
    /// oldest byte; the output is `raw[start..]` followed by `raw[..start]`.
    pub fn unwrap_circular(raw: &[u8], start: usize) -> Result<Self> {
        if raw.len() > consts::MAX_DIAGRAM_LEN {
            return Err(Error::OperationTooLarge {
                max: consts::MAX_DIAGRAM_LEN,
                actual: raw.len(),
            });
        }
        let start = if raw.is_empty() { 0 } else { start % raw.len() };
        let (head, tail) = raw.split_at(start);
        let mut bytes = [0u8; consts::MAX_DIAGRAM_LEN];
        bytes[..tail.len()].copy_from_slice(tail);
        bytes[tail.len()..raw.len()].copy_from_slice(head);
        Ok(Diagram {
            bytes,
            len: raw.len(),
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Deref for Diagram {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for Diagram {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Debug for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagram")
            .field("len", &self.len)
            .field("bytes", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_fields() {
        let header = DiagramHeader::parse(&[5, 7, 2]).unwrap();
        assert_eq!(header.total_length, 5);
        assert_eq!(header.message_index, 7);
        assert_eq!(header.write_cursor, 2);
        assert_eq!(header.start_offset(), 2);
        assert!(!header.is_empty());
    }

    #[test]
    fn parse_short_header() {
        match DiagramHeader::parse(&[5, 7]) {
            Err(Error::ShortRead { expected, actual }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("Expected ShortRead, got: {:?}", other),
        }
    }

    #[test]
    fn cursor_wraps_modulo_length() {
        let header = DiagramHeader::parse(&[5, 0, 12]).unwrap();
        assert_eq!(header.start_offset(), 2);
        let empty = DiagramHeader::parse(&[0, 0, 12]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.start_offset(), 0);
    }

    #[test]
    fn unwrap_rotates_oldest_first() {
        let d = Diagram::unwrap_circular(b"ABCDE", 2).unwrap();
        assert_eq!(d.as_slice(), b"CDEAB");
        assert_eq!(d.len(), 5);
    }

    #[test]
    fn unwrap_is_a_pure_rotation() {
        for total in 1..=consts::MAX_DIAGRAM_LEN {
            let raw: Vec<u8> = (0..total).map(|i| (i * 7 + 3) as u8).collect();
            for cursor in 0..total {
                let d = Diagram::unwrap_circular(&raw, cursor).unwrap();
                assert_eq!(d.len(), total);
                let mut back = d.to_vec();
                back.rotate_right(cursor);
                assert_eq!(back, raw, "total={total} cursor={cursor}");
            }
        }
    }

    #[test]
    fn oversized_input_is_rejected() {
        let raw = [0u8; consts::MAX_DIAGRAM_LEN + 1];
        assert!(matches!(
            Diagram::unwrap_circular(&raw, 0),
            Err(Error::OperationTooLarge { max: 256, actual: 257 })
        ));
        assert!(Diagram::from_slice(&raw).is_err());
    }
}

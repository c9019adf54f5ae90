//! Alarm blob codec.
//!
//! Wire format (little-endian, byte-exact — previously persisted blobs
//! must keep decoding forever):
//! ```text
//! ┌────────────┬──────────────────────────────────────────────────┐
//! │ count (2B) │ count × record                                   │
//! │ LE u16     │                                                  │
//! └────────────┴──────────────────────────────────────────────────┘
//! record:
//! ┌───────────┬─────────────┬───────────────┬─────────────────────┐
//! │ hour (1B) │ minute (1B) │ name_len (2B) │ name bytes + NUL    │
//! │ u8        │ u8          │ LE u16, incl. │ (absent when        │
//! │           │             │ terminator;   │  name_len == 0)     │
//! │           │             │ 0 = no name   │                     │
//! └───────────┴─────────────┴───────────────┴─────────────────────┘
//! ```
//!
//! No padding, no checksum.  Decoding is deliberately tolerant: a
//! truncated or corrupted blob yields the longest valid prefix of
//! records rather than an error, so a bad flash sector costs the tail
//! of the alarm list, never the whole thing.  The `fired_today` flag is
//! transient scheduling state and is not persisted.

use super::registry::{clip_name, AlarmRecord};

/// Per-record fixed header: hour, minute, name_len.
const RECORD_HEADER: usize = 4;

/// Bounds-checked cursor over the persisted blob.  All reads go through
/// this; there is no external offset arithmetic to get wrong.
struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        let b = *self.buf.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    fn read_u16_le(&mut self) -> Option<u16> {
        let bytes = self.read_bytes(2)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.remaining() < len {
            return None;
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Some(slice)
    }
}

/// Encode the alarm list into its persisted form.
///
/// `hour`/`minute` are written as single bytes; range validation happened
/// at the command boundary before the records were ever constructed.
pub fn encode(records: &[AlarmRecord]) -> Vec<u8> {
    let count = records.len().min(usize::from(u16::MAX));
    let mut out = Vec::with_capacity(2 + count * (RECORD_HEADER + 32));

    out.extend_from_slice(&(count as u16).to_le_bytes());
    for record in &records[..count] {
        out.push(record.hour);
        out.push(record.minute);
        if record.name.is_empty() {
            out.extend_from_slice(&0u16.to_le_bytes());
        } else {
            // name_len counts the NUL terminator.
            let name_len = (record.name.len() + 1) as u16;
            out.extend_from_slice(&name_len.to_le_bytes());
            out.extend_from_slice(record.name.as_bytes());
            out.push(0);
        }
    }
    out
}

/// Decode a persisted blob back into alarm records.
///
/// Never fails: an empty buffer yields an empty list, and any
/// insufficient-bytes condition (truncated record header, `name_len`
/// overrunning the buffer, corrupted count) stops decoding and returns
/// the records parsed so far.  Decoded records are always disarmed.
pub fn decode(bytes: &[u8]) -> Vec<AlarmRecord> {
    let mut reader = ByteReader::new(bytes);
    let Some(count) = reader.read_u16_le() else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for _ in 0..count {
        if reader.remaining() < RECORD_HEADER {
            break;
        }
        // The header reads cannot fail after the remaining() check, but
        // every read stays checked anyway.
        let Some(hour) = reader.read_u8() else { break };
        let Some(minute) = reader.read_u8() else { break };
        let Some(name_len) = reader.read_u16_le() else {
            break;
        };

        let name = if name_len == 0 {
            ""
        } else {
            let Some(raw) = reader.read_bytes(usize::from(name_len)) else {
                break;
            };
            // Strip the trailing NUL; hand-written blobs without one
            // still decode.
            let trimmed = match raw.split_last() {
                Some((&0, rest)) => rest,
                _ => raw,
            };
            match core::str::from_utf8(trimmed) {
                Ok(s) => clip_name(s),
                // Mangled name payload: same policy as truncation —
                // keep the prefix parsed so far.
                Err(_) => break,
            }
        };
        records.push(AlarmRecord::new(hour, minute, name));
    }
    records
}

//! Deterministic wire-field helpers shared by the protocol messages.
//!
//! Every multi-field message is a concatenation of `(len: u32 BE, bytes)`
//! blocks. Encoders always emit canonical fixed-width values; decoders accept
//! any length up to the stated bound and reject trailing bytes, so the two
//! sides agree bit-for-bit on everything an honest peer produces.

use crate::{Error, Result};

/// Appends one `(len, bytes)` block to `out`.
pub(crate) fn put_block(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

/// Sequential reader over an encoded message.
pub(crate) struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Reads the next `(len, bytes)` block, enforcing `len <= max_len`.
    pub(crate) fn block(&mut self, max_len: usize) -> Result<&'a [u8]> {
        let header = self.take(4)?;
        let len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
        if len > max_len {
            return Err(Error::InvalidInput(format!(
                "field of {len} bytes exceeds limit of {max_len}"
            )));
        }
        self.take(len)
    }

    /// Reads exactly `n` raw bytes.
    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| Error::InvalidInput("message truncated".to_string()))?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Returns the unread remainder of the buffer.
    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let slice = &self.buf[self.pos..];
        self.pos = self.buf.len();
        slice
    }

    /// Fails unless the whole buffer has been consumed.
    pub(crate) fn finish(&self) -> Result<()> {
        if self.pos != self.buf.len() {
            return Err(Error::InvalidInput(format!(
                "{} trailing bytes after message",
                self.buf.len() - self.pos
            )));
        }
        Ok(())
    }
}

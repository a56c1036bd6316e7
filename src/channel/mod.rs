//! Reliable, ordered, length-prefixed byte messaging between the two parties.
//!
//! The protocols never touch a socket directly; they speak to a [`Channel`],
//! which frames whole messages and preserves FIFO order. [`StreamChannel`]
//! adapts any blocking byte stream (a `TcpStream`, a serial port, a test
//! cursor); [`LocalChannel`] connects two sessions inside one process, which
//! is how the two-party tests run committer and receiver on separate threads.

use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, Sender};

/// Maximum accepted payload, on both the read and the write side.
pub const MAX_PAYLOAD_LEN: usize = 16 * 1024 * 1024;

/// A bidirectional, ordered, message-framed byte channel.
///
/// All protocol suspension points go through these two calls; both may block.
/// Errors are surfaced as plain `io::Error` and propagated unchanged by the
/// sessions, which treat any failure as terminal.
pub trait Channel {
    /// Writes one framed message.
    fn write_with_size(&mut self, payload: &[u8]) -> io::Result<()>;

    /// Reads one framed message, resizing `buf` to the payload length.
    fn read_with_size_into(&mut self, buf: &mut Vec<u8>) -> io::Result<()>;
}

fn oversize(len: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("payload of {len} bytes exceeds limit of {MAX_PAYLOAD_LEN}"),
    )
}

/// Frames messages over any blocking byte stream as `<len: u32 BE> <payload>`.
#[derive(Debug)]
pub struct StreamChannel<S> {
    stream: S,
}

impl<S: Read + Write> StreamChannel<S> {
    /// Wraps a byte stream.
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Returns the wrapped stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> Channel for StreamChannel<S> {
    fn write_with_size(&mut self, payload: &[u8]) -> io::Result<()> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(oversize(payload.len()));
        }
        self.stream.write_all(&(payload.len() as u32).to_be_bytes())?;
        self.stream.write_all(payload)?;
        self.stream.flush()
    }

    fn read_with_size_into(&mut self, buf: &mut Vec<u8>) -> io::Result<()> {
        let mut header = [0u8; 4];
        self.stream.read_exact(&mut header)?;
        let len = u32::from_be_bytes(header) as usize;
        if len > MAX_PAYLOAD_LEN {
            return Err(oversize(len));
        }
        buf.resize(len, 0);
        self.stream.read_exact(buf)
    }
}

/// In-process channel endpoint; create pairs with [`LocalChannel::pair`].
///
/// Messages keep their framing implicitly (one `Vec<u8>` per message) and
/// arrive in FIFO order. A dropped peer surfaces as `BrokenPipe` on write and
/// `UnexpectedEof` on read.
#[derive(Debug)]
pub struct LocalChannel {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
}

impl LocalChannel {
    /// Creates two connected endpoints.
    pub fn pair() -> (LocalChannel, LocalChannel) {
        let (tx_a, rx_b) = mpsc::channel();
        let (tx_b, rx_a) = mpsc::channel();
        (
            LocalChannel { tx: tx_a, rx: rx_a },
            LocalChannel { tx: tx_b, rx: rx_b },
        )
    }
}

impl Channel for LocalChannel {
    fn write_with_size(&mut self, payload: &[u8]) -> io::Result<()> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(oversize(payload.len()));
        }
        self.tx
            .send(payload.to_vec())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "peer endpoint dropped"))
    }

    fn read_with_size_into(&mut self, buf: &mut Vec<u8>) -> io::Result<()> {
        let msg = self
            .rx
            .recv()
            .map_err(|_| io::Error::new(io::ErrorKind::UnexpectedEof, "peer endpoint dropped"))?;
        *buf = msg;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn stream_channel_frames_messages() {
        let mut channel = StreamChannel::new(Cursor::new(Vec::new()));
        channel.write_with_size(b"hello").unwrap();
        channel.write_with_size(b"").unwrap();

        let mut cursor = channel.into_inner();
        cursor.set_position(0);
        let mut channel = StreamChannel::new(cursor);

        let mut buf = Vec::new();
        channel.read_with_size_into(&mut buf).unwrap();
        assert_eq!(buf, b"hello");
        channel.read_with_size_into(&mut buf).unwrap();
        assert_eq!(buf, b"");
    }

    #[test]
    fn stream_channel_rejects_oversize_header() {
        let mut framed = Vec::new();
        framed.extend_from_slice(&(u32::MAX).to_be_bytes());
        let mut channel = StreamChannel::new(Cursor::new(framed));
        let mut buf = Vec::new();
        assert!(channel.read_with_size_into(&mut buf).is_err());
    }

    #[test]
    fn stream_channel_reports_truncated_payload() {
        let mut framed = Vec::new();
        framed.extend_from_slice(&8u32.to_be_bytes());
        framed.extend_from_slice(b"abc");
        let mut channel = StreamChannel::new(Cursor::new(framed));
        let mut buf = Vec::new();
        assert!(channel.read_with_size_into(&mut buf).is_err());
    }

    #[test]
    fn local_channel_is_fifo_both_ways() {
        let (mut a, mut b) = LocalChannel::pair();
        a.write_with_size(b"one").unwrap();
        a.write_with_size(b"two").unwrap();
        b.write_with_size(b"ack").unwrap();

        let mut buf = Vec::new();
        b.read_with_size_into(&mut buf).unwrap();
        assert_eq!(buf, b"one");
        b.read_with_size_into(&mut buf).unwrap();
        assert_eq!(buf, b"two");
        a.read_with_size_into(&mut buf).unwrap();
        assert_eq!(buf, b"ack");
    }

    #[test]
    fn dropped_peer_surfaces_as_io_error() {
        let (mut a, b) = LocalChannel::pair();
        drop(b);
        assert!(a.write_with_size(b"x").is_err());
        let mut buf = Vec::new();
        assert!(a.read_with_size_into(&mut buf).is_err());
    }
}

//! IRC line codec: frames a byte stream into [`Message`]s.
//!
//! Lines end in `\n`; a preceding `\r` is dropped. Clients in the wild send
//! both, and some send Latin-1, so invalid UTF-8 is decoded lossily instead
//! of failing the connection. Blank and unparseable lines are skipped.

use crate::message::Message;
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Maximum line length in bytes, including the terminator.
///
/// RFC 2812 says 512; the IRCv3 tag allowance brings that to 8191.
pub const MAX_LINE_LENGTH: usize = 8191;

/// Codec error: a framing failure or an I/O error.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A line exceeded [`MAX_LINE_LENGTH`].
    #[error("line exceeds maximum length ({MAX_LINE_LENGTH} bytes)")]
    LineTooLong,
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A tokio codec that frames IRC messages on line boundaries.
#[derive(Debug, Default)]
pub struct IrcCodec {
    /// Bytes already scanned for a newline.
    next_index: usize,
}

impl IrcCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for IrcCodec {
    type Item = Message;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let newline = src[self.next_index..].iter().position(|b| *b == b'\n');
            let Some(offset) = newline else {
                if src.len() > MAX_LINE_LENGTH {
                    return Err(CodecError::LineTooLong);
                }
                self.next_index = src.len();
                return Ok(None);
            };

            let end = self.next_index + offset;
            self.next_index = 0;
            if end + 1 > MAX_LINE_LENGTH {
                return Err(CodecError::LineTooLong);
            }

            let line = src.split_to(end);
            src.advance(1);
            let text = String::from_utf8_lossy(&line);
            if let Ok(msg) = Message::parse(&text) {
                return Ok(Some(msg));
            }
        }
    }
}

impl Encoder<Message> for IrcCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let wire = item.to_string();
        dst.reserve(wire.len() + 2);
        dst.put_slice(wire.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

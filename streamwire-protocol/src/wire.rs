//! Primitive wire encoding shared by commands and response models.
//!
//! All integers are little-endian. Names are a one byte length followed
//! by UTF-8 bytes, so no name on the wire exceeds 255 bytes.

use crate::error::{ProtocolError, ValidationError};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Bounds-checked cursor over a response payload.
///
/// Every read names the field it is decoding so a short buffer reports
/// exactly where the layout stopped matching.
#[derive(Debug)]
pub struct WireReader {
    buf: Bytes,
}

impl WireReader {
    pub fn new(buf: Bytes) -> Self {
        Self { buf }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn has_remaining(&self) -> bool {
        self.buf.has_remaining()
    }

    fn need(&self, field: &'static str, needed: usize) -> Result<(), ProtocolError> {
        if self.buf.remaining() < needed {
            return Err(ProtocolError::Truncated {
                field,
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    pub fn u8(&mut self, field: &'static str) -> Result<u8, ProtocolError> {
        self.need(field, 1)?;
        Ok(self.buf.get_u8())
    }

    pub fn u32(&mut self, field: &'static str) -> Result<u32, ProtocolError> {
        self.need(field, 4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn u64(&mut self, field: &'static str) -> Result<u64, ProtocolError> {
        self.need(field, 8)?;
        Ok(self.buf.get_u64_le())
    }

    /// Reads `len` raw bytes without copying.
    pub fn bytes(&mut self, field: &'static str, len: usize) -> Result<Bytes, ProtocolError> {
        self.need(field, len)?;
        Ok(self.buf.split_to(len))
    }

    /// Reads a `[len: u8][utf-8 bytes]` name.
    pub fn name(&mut self, field: &'static str) -> Result<String, ProtocolError> {
        let len = self.u8(field)? as usize;
        let raw = self.bytes(field, len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| ProtocolError::InvalidUtf8(field))
    }

    /// Fails unless the whole payload has been consumed.
    pub fn finish(self) -> Result<(), ProtocolError> {
        match self.buf.remaining() {
            0 => Ok(()),
            n => Err(ProtocolError::TrailingBytes(n)),
        }
    }
}

/// Writes a `[len: u8][bytes]` name.
///
/// Nothing is written when the name does not fit the one byte prefix.
pub fn put_name(buf: &mut BytesMut, name: &str) -> Result<(), ValidationError> {
    let len = u8::try_from(name.len()).map_err(|_| ValidationError::TextTooLong {
        field: "name",
        len: name.len(),
        max: crate::MAX_NAME_LENGTH,
    })?;
    buf.put_u8(len);
    buf.put_slice(name.as_bytes());
    Ok(())
}

/// A response entity that can be read from a payload.
pub trait WireDecode: Sized {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError>;

    /// Decodes a payload holding exactly one entity.
    fn from_bytes(payload: Bytes) -> Result<Self, ProtocolError> {
        let mut reader = WireReader::new(payload);
        let value = Self::decode_from(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}

/// A response entity that can be written the way the broker writes it.
pub trait WireEncode {
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError>;

    fn to_bytes(&self) -> Result<Bytes, ValidationError> {
        let mut buf = BytesMut::new();
        self.encode_to(&mut buf)?;
        Ok(buf.freeze())
    }
}

/// Decodes back-to-back entities until the payload is exhausted.
///
/// A partial entity at the end surfaces as `Truncated`.
pub fn decode_list<T: WireDecode>(payload: Bytes) -> Result<Vec<T>, ProtocolError> {
    let mut reader = WireReader::new(payload);
    let mut items = Vec::new();
    while reader.has_remaining() {
        items.push(T::decode_from(&mut reader)?);
    }
    Ok(items)
}

/// Encodes entities back-to-back, the layout `decode_list` reads.
pub fn encode_list<T: WireEncode>(items: &[T]) -> Result<Bytes, ValidationError> {
    let mut buf = BytesMut::new();
    for item in items {
        item.encode_to(&mut buf)?;
    }
    Ok(buf.freeze())
}

//! Request and response frames.
//!
//! Request (8 bytes header + body):
//!
//! ```text
//! +-------------+--------------+----------------+
//! | length      | command code | body           |
//! | u32 LE      | u32 LE       | length-4 bytes |
//! +-------------+--------------+----------------+
//! ```
//!
//! `length` counts the command code plus the body.
//!
//! Response (8 bytes header + payload):
//!
//! ```text
//! +-------------+--------------+-----------------+
//! | status      | length       | payload         |
//! | u32 LE      | u32 LE       | length bytes    |
//! +-------------+--------------+-----------------+
//! ```
//!
//! `status == 0` is success, anything else is a broker error code.

use crate::command::CommandCode;
use crate::error::ProtocolError;
use crate::MAX_PAYLOAD_SIZE;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Size of the request header (length + command code).
pub const REQUEST_HEADER_SIZE: usize = 8;

/// Size of the response header (status + length).
pub const RESPONSE_HEADER_SIZE: usize = 8;

/// Width of the command code, counted in the request length.
const COMMAND_CODE_SIZE: usize = 4;

/// Status of a successful response.
pub const STATUS_OK: u32 = 0;

/// An outbound command frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrame {
    /// Raw command code.
    pub code: u32,
    /// Encoded command body.
    pub body: Bytes,
}

impl RequestFrame {
    pub fn new(code: CommandCode, body: Bytes) -> Self {
        Self {
            code: code.as_u32(),
            body,
        }
    }

    /// Resolves the raw code against the known command set.
    pub fn command(&self) -> Result<CommandCode, ProtocolError> {
        CommandCode::try_from(self.code)
    }

    /// Encodes the frame into bytes.
    pub fn encode(&self) -> Result<BytesMut, ProtocolError> {
        let body_len = self.body.len() as u32;
        if body_len > MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::FrameTooLarge {
                size: body_len,
                max: MAX_PAYLOAD_SIZE,
            });
        }

        let mut buf = BytesMut::with_capacity(REQUEST_HEADER_SIZE + self.body.len());
        buf.put_u32_le((COMMAND_CODE_SIZE + self.body.len()) as u32);
        buf.put_u32_le(self.code);
        buf.put_slice(&self.body);
        Ok(buf)
    }

    /// Decodes a request frame, as a broker would.
    ///
    /// Returns `Ok(None)` if more data is needed.
    pub fn decode(buf: &mut BytesMut) -> Result<Option<Self>, ProtocolError> {
        if buf.len() < REQUEST_HEADER_SIZE {
            return Ok(None);
        }

        let length = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
        if length < COMMAND_CODE_SIZE {
            return Err(ProtocolError::Truncated {
                field: "request.length",
                needed: COMMAND_CODE_SIZE,
                remaining: length,
            });
        }
        let body_len = length - COMMAND_CODE_SIZE;
        if body_len > MAX_PAYLOAD_SIZE as usize {
            return Err(ProtocolError::FrameTooLarge {
                size: body_len as u32,
                max: MAX_PAYLOAD_SIZE,
            });
        }
        if buf.len() < REQUEST_HEADER_SIZE + body_len {
            return Ok(None);
        }

        buf.advance(4);
        let code = buf.get_u32_le();
        let body = buf.split_to(body_len).freeze();
        Ok(Some(Self { code, body }))
    }
}

/// Fixed header preceding every response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub status: u32,
    pub length: u32,
}

impl ResponseHeader {
    pub fn parse(raw: [u8; RESPONSE_HEADER_SIZE]) -> Self {
        Self {
            status: u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            length: u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn to_bytes(&self) -> [u8; RESPONSE_HEADER_SIZE] {
        let mut raw = [0u8; RESPONSE_HEADER_SIZE];
        raw[..4].copy_from_slice(&self.status.to_le_bytes());
        raw[4..].copy_from_slice(&self.length.to_le_bytes());
        raw
    }
}

/// An inbound response frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFrame {
    pub status: u32,
    pub payload: Bytes,
}

impl ResponseFrame {
    pub fn ok(payload: Bytes) -> Self {
        Self {
            status: STATUS_OK,
            payload,
        }
    }

    pub fn error(status: u32) -> Self {
        Self {
            status,
            payload: Bytes::new(),
        }
    }

    pub fn header(&self) -> ResponseHeader {
        ResponseHeader {
            status: self.status,
            length: self.payload.len() as u32,
        }
    }

    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(RESPONSE_HEADER_SIZE + self.payload.len());
        buf.put_slice(&self.header().to_bytes());
        buf.put_slice(&self.payload);
        buf
    }

    /// Returns `Ok(None)` if more data is needed.
    pub fn decode(buf: &mut BytesMut) -> Result<Option<Self>, ProtocolError> {
        if buf.len() < RESPONSE_HEADER_SIZE {
            return Ok(None);
        }

        let mut raw = [0u8; RESPONSE_HEADER_SIZE];
        raw.copy_from_slice(&buf[..RESPONSE_HEADER_SIZE]);
        let header = ResponseHeader::parse(raw);
        if header.length > MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::FrameTooLarge {
                size: header.length,
                max: MAX_PAYLOAD_SIZE,
            });
        }

        let total_len = RESPONSE_HEADER_SIZE + header.length as usize;
        if buf.len() < total_len {
            return Ok(None);
        }

        buf.advance(RESPONSE_HEADER_SIZE);
        let payload = buf.split_to(header.length as usize).freeze();
        Ok(Some(Self {
            status: header.status,
            payload,
        }))
    }
}

//! Stream, topic and consumer group identifiers.
//!
//! Wire layout:
//!
//! ```text
//! +------+--------+-------------------------------+
//! | kind | length | value                         |
//! | u8   | u8     | u32 LE (kind 1) / UTF-8 (2)   |
//! +------+--------+-------------------------------+
//! ```

use crate::error::{ProtocolError, ValidationError};
use crate::wire::{WireDecode, WireReader};
use crate::{MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind tag of a numeric identifier.
pub const NUMERIC_KIND: u8 = 1;

/// Kind tag of a named identifier.
pub const STRING_KIND: u8 = 2;

/// Byte width of a numeric identifier value.
pub const NUMERIC_LENGTH: u8 = 4;

/// Addresses a resource either by its numeric id or by its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Identifier {
    Numeric(u32),
    Named(String),
}

impl Identifier {
    pub fn numeric(id: u32) -> Self {
        Identifier::Numeric(id)
    }

    /// Creates a named identifier, rejecting names outside 1..=255 bytes.
    pub fn named(name: impl Into<String>) -> Result<Self, ValidationError> {
        let id = Identifier::Named(name.into());
        id.validate()?;
        Ok(id)
    }

    pub fn kind(&self) -> u8 {
        match self {
            Identifier::Numeric(_) => NUMERIC_KIND,
            Identifier::Named(_) => STRING_KIND,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Identifier::Named(name) = self {
            if name.len() > MAX_NAME_LENGTH {
                return Err(ValidationError::TextTooLong {
                    field: "identifier",
                    len: name.len(),
                    max: MAX_NAME_LENGTH,
                });
            }
            if name.len() < MIN_NAME_LENGTH {
                return Err(ValidationError::TextTooShort {
                    field: "identifier",
                    len: name.len(),
                    min: MIN_NAME_LENGTH,
                });
            }
        }
        Ok(())
    }

    /// Size of the encoded identifier in bytes.
    pub fn encoded_len(&self) -> usize {
        match self {
            Identifier::Numeric(_) => 2 + NUMERIC_LENGTH as usize,
            Identifier::Named(name) => 2 + name.len(),
        }
    }

    /// Appends the wire form.
    pub fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        match self {
            Identifier::Numeric(id) => {
                buf.put_u8(self.kind());
                buf.put_u8(NUMERIC_LENGTH);
                buf.put_u32_le(*id);
                Ok(())
            }
            Identifier::Named(name) => {
                self.validate()?;
                buf.put_u8(self.kind());
                crate::wire::put_name(buf, name)
            }
        }
    }

    pub fn to_bytes(&self) -> Result<Bytes, ValidationError> {
        self.validate()?;
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_to(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Decodes an identifier occupying the whole buffer.
    pub fn from_bytes(bytes: Bytes) -> Result<Self, ProtocolError> {
        <Self as WireDecode>::from_bytes(bytes)
    }
}

impl WireDecode for Identifier {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        let kind = reader.u8("identifier.kind")?;
        let length = reader.u8("identifier.length")?;
        match kind {
            NUMERIC_KIND => {
                if length != NUMERIC_LENGTH {
                    return Err(ProtocolError::InvalidIdentifierLength { kind, length });
                }
                Ok(Identifier::Numeric(reader.u32("identifier.value")?))
            }
            STRING_KIND => {
                if length == 0 {
                    return Err(ProtocolError::InvalidIdentifierLength { kind, length });
                }
                let raw = reader.bytes("identifier.value", length as usize)?;
                let name = String::from_utf8(raw.to_vec())
                    .map_err(|_| ProtocolError::InvalidUtf8("identifier.value"))?;
                Ok(Identifier::Named(name))
            }
            other => Err(ProtocolError::InvalidIdentifierKind(other)),
        }
    }
}

impl From<u32> for Identifier {
    fn from(id: u32) -> Self {
        Identifier::Numeric(id)
    }
}

impl FromStr for Identifier {
    type Err = ValidationError;

    /// Numeric text becomes a numeric id, anything else a name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<u32>() {
            Ok(id) => Ok(Identifier::Numeric(id)),
            Err(_) => Identifier::named(s),
        }
    }
}

impl TryFrom<&str> for Identifier {
    type Error = ValidationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(id) => write!(f, "{}", id),
            Identifier::Named(name) => write!(f, "{}", name),
        }
    }
}

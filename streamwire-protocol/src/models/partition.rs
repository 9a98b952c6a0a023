use crate::error::{ProtocolError, ValidationError};
use crate::wire::{WireDecode, WireEncode, WireReader};
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

/// Encoded size of a partition.
pub(crate) const PARTITION_LEN: usize = 40;

/// A topic partition, 40 bytes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub id: u32,
    pub created_at: u64,
    pub segments_count: u32,
    pub current_offset: u64,
    pub size_bytes: u64,
    pub messages_count: u64,
}

impl WireDecode for Partition {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        Ok(Self {
            id: reader.u32("partition.id")?,
            created_at: reader.u64("partition.created_at")?,
            segments_count: reader.u32("partition.segments_count")?,
            current_offset: reader.u64("partition.current_offset")?,
            size_bytes: reader.u64("partition.size_bytes")?,
            messages_count: reader.u64("partition.messages_count")?,
        })
    }
}

impl WireEncode for Partition {
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        buf.put_u32_le(self.id);
        buf.put_u64_le(self.created_at);
        buf.put_u32_le(self.segments_count);
        buf.put_u64_le(self.current_offset);
        buf.put_u64_le(self.size_bytes);
        buf.put_u64_le(self.messages_count);
        Ok(())
    }
}

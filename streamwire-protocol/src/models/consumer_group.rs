use crate::command::{EmptyReply, Reply};
use crate::error::{ProtocolError, ValidationError};
use crate::wire::{put_name, WireDecode, WireEncode, WireReader};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

/// A consumer group as listed by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerGroup {
    pub id: u32,
    pub name: String,
    pub partitions_count: u32,
    pub members_count: u32,
}

impl WireDecode for ConsumerGroup {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        let id = reader.u32("consumer_group.id")?;
        let partitions_count = reader.u32("consumer_group.partitions_count")?;
        let members_count = reader.u32("consumer_group.members_count")?;
        let name = reader.name("consumer_group.name")?;
        Ok(Self {
            id,
            name,
            partitions_count,
            members_count,
        })
    }
}

impl WireEncode for ConsumerGroup {
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        buf.put_u32_le(self.id);
        buf.put_u32_le(self.partitions_count);
        buf.put_u32_le(self.members_count);
        put_name(buf, &self.name)
    }
}

/// A group member and the partitions assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerGroupMember {
    pub id: u32,
    pub partitions: Vec<u32>,
}

impl WireDecode for ConsumerGroupMember {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        let id = reader.u32("consumer_group_member.id")?;
        let count = reader.u32("consumer_group_member.partitions_count")? as usize;
        // Bound the allocation by what the payload can actually hold.
        let mut partitions = Vec::with_capacity(count.min(reader.remaining() / 4));
        for _ in 0..count {
            partitions.push(reader.u32("consumer_group_member.partition")?);
        }
        Ok(Self { id, partitions })
    }
}

impl WireEncode for ConsumerGroupMember {
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        buf.put_u32_le(self.id);
        buf.put_u32_le(self.partitions.len() as u32);
        for partition in &self.partitions {
            buf.put_u32_le(*partition);
        }
        Ok(())
    }
}

/// A single consumer group together with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerGroupDetails {
    #[serde(flatten)]
    pub group: ConsumerGroup,
    pub members: Vec<ConsumerGroupMember>,
}

impl WireDecode for ConsumerGroupDetails {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        let group = ConsumerGroup::decode_from(reader)?;
        let mut members = Vec::new();
        while reader.has_remaining() {
            members.push(ConsumerGroupMember::decode_from(reader)?);
        }
        Ok(Self { group, members })
    }
}

impl WireEncode for ConsumerGroupDetails {
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        self.group.encode_to(buf)?;
        for member in &self.members {
            member.encode_to(buf)?;
        }
        Ok(())
    }
}

impl Reply for ConsumerGroupDetails {
    fn on_empty() -> EmptyReply<Self> {
        EmptyReply::NotFound
    }

    fn decode(payload: Bytes) -> Result<Self, ProtocolError> {
        Self::from_bytes(payload)
    }
}

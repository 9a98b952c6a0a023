use super::{encode_identifiers, validate_identifiers};
use crate::command::{Command, CommandCode};
use crate::error::ValidationError;
use crate::identifier::Identifier;
use crate::MAX_PARTITIONS_COUNT;
use bytes::{BufMut, BytesMut};

fn validate_partitions_count(count: u32) -> Result<(), ValidationError> {
    if count == 0 {
        return Err(ValidationError::InvalidPartitionsCount(count));
    }
    if count > MAX_PARTITIONS_COUNT {
        return Err(ValidationError::TooManyPartitions {
            count,
            max: MAX_PARTITIONS_COUNT,
        });
    }
    Ok(())
}

/// Appends partitions to a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePartitions {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
    pub partitions_count: u32,
}

impl Command for CreatePartitions {
    const CODE: CommandCode = CommandCode::CreatePartitions;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id])?;
        validate_partitions_count(self.partitions_count)
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id])?;
        buf.put_u32_le(self.partitions_count);
        Ok(())
    }
}

/// Removes the last `partitions_count` partitions of a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePartitions {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
    pub partitions_count: u32,
}

impl Command for DeletePartitions {
    const CODE: CommandCode = CommandCode::DeletePartitions;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id])?;
        validate_partitions_count(self.partitions_count)
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id])?;
        buf.put_u32_le(self.partitions_count);
        Ok(())
    }
}

use super::{encode_identifiers, validate_explicit_id, validate_identifiers, validate_name};
use crate::command::{Command, CommandCode};
use crate::error::ValidationError;
use crate::identifier::Identifier;
use crate::models::{ConsumerGroup, ConsumerGroupDetails};
use crate::wire::put_name;
use bytes::{BufMut, BytesMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetConsumerGroups {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
}

impl Command for GetConsumerGroups {
    const CODE: CommandCode = CommandCode::GetConsumerGroups;
    type Reply = Vec<ConsumerGroup>;

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id])
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetConsumerGroup {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
    pub group_id: Identifier,
}

impl Command for GetConsumerGroup {
    const CODE: CommandCode = CommandCode::GetConsumerGroup;
    type Reply = ConsumerGroupDetails;

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id, &self.group_id])
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id, &self.group_id])
    }
}

/// Creates a consumer group on a topic.
///
/// Body: `stream identifier | topic identifier | group_id u32 | name_len u8 | name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateConsumerGroup {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
    pub group_id: Option<u32>,
    pub name: String,
}

impl CreateConsumerGroup {
    pub fn new(stream_id: Identifier, topic_id: Identifier, name: impl Into<String>) -> Self {
        Self {
            stream_id,
            topic_id,
            group_id: None,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, group_id: u32) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

impl Command for CreateConsumerGroup {
    const CODE: CommandCode = CommandCode::CreateConsumerGroup;
    type Reply = Option<ConsumerGroupDetails>;

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id])?;
        validate_explicit_id("group_id", self.group_id)?;
        validate_name("consumer_group_name", &self.name)
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id])?;
        buf.put_u32_le(self.group_id.unwrap_or(0));
        put_name(buf, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConsumerGroup {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
    pub group_id: Identifier,
}

impl Command for DeleteConsumerGroup {
    const CODE: CommandCode = CommandCode::DeleteConsumerGroup;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id, &self.group_id])
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id, &self.group_id])
    }
}

/// Adds the calling connection to a consumer group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinConsumerGroup {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
    pub group_id: Identifier,
}

impl Command for JoinConsumerGroup {
    const CODE: CommandCode = CommandCode::JoinConsumerGroup;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id, &self.group_id])
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id, &self.group_id])
    }
}

/// Removes the calling connection from a consumer group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveConsumerGroup {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
    pub group_id: Identifier,
}

impl Command for LeaveConsumerGroup {
    const CODE: CommandCode = CommandCode::LeaveConsumerGroup;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id, &self.group_id])
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id, &self.group_id])
    }
}

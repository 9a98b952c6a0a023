use super::{encode_identifiers, validate_explicit_id, validate_identifiers, validate_name};
use crate::command::{Command, CommandCode};
use crate::error::ValidationError;
use crate::identifier::Identifier;
use crate::models::{CompressionAlgorithm, MaxTopicSize, MessageExpiry, Topic, TopicDetails};
use crate::wire::put_name;
use crate::MAX_PARTITIONS_COUNT;
use bytes::{BufMut, BytesMut};

fn validate_replication_factor(factor: Option<u8>) -> Result<(), ValidationError> {
    match factor {
        Some(0) => Err(ValidationError::InvalidReplicationFactor),
        _ => Ok(()),
    }
}

/// A custom duration must survive the trip to microseconds without
/// collapsing into the `0` or `u64::MAX` sentinels.
fn validate_message_expiry(expiry: MessageExpiry) -> Result<(), ValidationError> {
    match expiry {
        MessageExpiry::ExpireDuration(duration)
            if duration.as_micros() == 0 || duration.as_micros() >= u128::from(u64::MAX) =>
        {
            Err(ValidationError::InvalidExpiry("message_expiry"))
        }
        _ => Ok(()),
    }
}

/// Lists the topics of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTopics {
    pub stream_id: Identifier,
}

impl Command for GetTopics {
    const CODE: CommandCode = CommandCode::GetTopics;
    type Reply = Vec<Topic>;

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id])
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id])
    }
}

/// Fetches one topic with its partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTopic {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
}

impl Command for GetTopic {
    const CODE: CommandCode = CommandCode::GetTopic;
    type Reply = TopicDetails;

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id])
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id])
    }
}

/// Creates a topic inside a stream.
///
/// ```text
/// stream identifier | topic_id u32 | partitions_count u32 | compression u8 |
/// message_expiry u64 | max_topic_size u64 | replication_factor u8 |
/// name_len u8 | name
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTopic {
    pub stream_id: Identifier,
    pub topic_id: Option<u32>,
    pub partitions_count: u32,
    pub compression_algorithm: CompressionAlgorithm,
    pub message_expiry: MessageExpiry,
    pub max_topic_size: MaxTopicSize,
    pub replication_factor: Option<u8>,
    pub name: String,
}

impl CreateTopic {
    /// A single-partition topic with server defaults for everything else.
    pub fn new(stream_id: Identifier, name: impl Into<String>) -> Self {
        Self {
            stream_id,
            topic_id: None,
            partitions_count: 1,
            compression_algorithm: CompressionAlgorithm::default(),
            message_expiry: MessageExpiry::default(),
            max_topic_size: MaxTopicSize::default(),
            replication_factor: None,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, topic_id: u32) -> Self {
        self.topic_id = Some(topic_id);
        self
    }

    pub fn with_partitions(mut self, partitions_count: u32) -> Self {
        self.partitions_count = partitions_count;
        self
    }

    pub fn with_compression(mut self, algorithm: CompressionAlgorithm) -> Self {
        self.compression_algorithm = algorithm;
        self
    }

    pub fn with_message_expiry(mut self, expiry: MessageExpiry) -> Self {
        self.message_expiry = expiry;
        self
    }

    pub fn with_max_topic_size(mut self, size: MaxTopicSize) -> Self {
        self.max_topic_size = size;
        self
    }

    pub fn with_replication_factor(mut self, factor: u8) -> Self {
        self.replication_factor = Some(factor);
        self
    }
}

impl Command for CreateTopic {
    const CODE: CommandCode = CommandCode::CreateTopic;
    type Reply = Option<TopicDetails>;

    fn validate(&self) -> Result<(), ValidationError> {
        self.stream_id.validate()?;
        validate_explicit_id("topic_id", self.topic_id)?;
        if self.partitions_count > MAX_PARTITIONS_COUNT {
            return Err(ValidationError::TooManyPartitions {
                count: self.partitions_count,
                max: MAX_PARTITIONS_COUNT,
            });
        }
        validate_message_expiry(self.message_expiry)?;
        validate_replication_factor(self.replication_factor)?;
        validate_name("topic_name", &self.name)
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        self.stream_id.encode_to(buf)?;
        buf.put_u32_le(self.topic_id.unwrap_or(0));
        buf.put_u32_le(self.partitions_count);
        buf.put_u8(self.compression_algorithm.as_code());
        buf.put_u64_le(self.message_expiry.into());
        buf.put_u64_le(self.max_topic_size.into());
        buf.put_u8(self.replication_factor.unwrap_or(0));
        put_name(buf, &self.name)
    }
}

/// Replaces a topic's settings and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTopic {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
    pub compression_algorithm: CompressionAlgorithm,
    pub message_expiry: MessageExpiry,
    pub max_topic_size: MaxTopicSize,
    pub replication_factor: Option<u8>,
    pub name: String,
}

impl Command for UpdateTopic {
    const CODE: CommandCode = CommandCode::UpdateTopic;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id])?;
        validate_message_expiry(self.message_expiry)?;
        validate_replication_factor(self.replication_factor)?;
        validate_name("topic_name", &self.name)
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id])?;
        buf.put_u8(self.compression_algorithm.as_code());
        buf.put_u64_le(self.message_expiry.into());
        buf.put_u64_le(self.max_topic_size.into());
        buf.put_u8(self.replication_factor.unwrap_or(0));
        put_name(buf, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTopic {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
}

impl Command for DeleteTopic {
    const CODE: CommandCode = CommandCode::DeleteTopic;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id])
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id])
    }
}

/// Removes all messages of a topic, keeping the topic itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeTopic {
    pub stream_id: Identifier,
    pub topic_id: Identifier,
}

impl Command for PurgeTopic {
    const CODE: CommandCode = CommandCode::PurgeTopic;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id, &self.topic_id])
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id, &self.topic_id])
    }
}

use super::partition::PARTITION_LEN;
use super::{CompressionAlgorithm, MaxTopicSize, MessageExpiry, Partition};
use crate::command::{EmptyReply, Reply};
use crate::error::{ProtocolError, ValidationError};
use crate::wire::{put_name, WireDecode, WireEncode, WireReader};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

/// Encoded size of a topic with an empty name.
pub(crate) const TOPIC_MIN_LEN: usize = 51;

/// A topic as listed by the broker.
///
/// ```text
/// id u32 | created_at u64 | partitions_count u32 | message_expiry u64 |
/// compression u8 | max_topic_size u64 | replication_factor u8 |
/// size_bytes u64 | messages_count u64 | name_len u8 | name
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: u32,
    /// Creation time, microseconds since the Unix epoch.
    pub created_at: u64,
    pub name: String,
    pub size_bytes: u64,
    pub message_expiry: MessageExpiry,
    pub compression_algorithm: CompressionAlgorithm,
    pub max_topic_size: MaxTopicSize,
    pub replication_factor: u8,
    pub messages_count: u64,
    pub partitions_count: u32,
}

impl WireDecode for Topic {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        let id = reader.u32("topic.id")?;
        let created_at = reader.u64("topic.created_at")?;
        let partitions_count = reader.u32("topic.partitions_count")?;
        let message_expiry = MessageExpiry::from(reader.u64("topic.message_expiry")?);
        let compression_algorithm =
            CompressionAlgorithm::try_from(reader.u8("topic.compression_algorithm")?)?;
        let max_topic_size = MaxTopicSize::from(reader.u64("topic.max_topic_size")?);
        let replication_factor = reader.u8("topic.replication_factor")?;
        let size_bytes = reader.u64("topic.size_bytes")?;
        let messages_count = reader.u64("topic.messages_count")?;
        let name = reader.name("topic.name")?;

        Ok(Self {
            id,
            created_at,
            name,
            size_bytes,
            message_expiry,
            compression_algorithm,
            max_topic_size,
            replication_factor,
            messages_count,
            partitions_count,
        })
    }
}

impl WireEncode for Topic {
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        buf.put_u32_le(self.id);
        buf.put_u64_le(self.created_at);
        buf.put_u32_le(self.partitions_count);
        buf.put_u64_le(self.message_expiry.into());
        buf.put_u8(self.compression_algorithm.as_code());
        buf.put_u64_le(self.max_topic_size.into());
        buf.put_u8(self.replication_factor);
        buf.put_u64_le(self.size_bytes);
        buf.put_u64_le(self.messages_count);
        put_name(buf, &self.name)
    }
}

/// A single topic together with its partitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDetails {
    #[serde(flatten)]
    pub topic: Topic,
    pub partitions: Vec<Partition>,
}

impl WireDecode for TopicDetails {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        let topic = Topic::decode_from(reader)?;
        let count = topic.partitions_count as usize;
        let mut partitions = Vec::with_capacity(count.min(reader.remaining() / PARTITION_LEN));
        while reader.has_remaining() {
            partitions.push(Partition::decode_from(reader)?);
        }
        Ok(Self { topic, partitions })
    }
}

impl WireEncode for TopicDetails {
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        self.topic.encode_to(buf)?;
        for partition in &self.partitions {
            partition.encode_to(buf)?;
        }
        Ok(())
    }
}

impl Reply for TopicDetails {
    fn on_empty() -> EmptyReply<Self> {
        EmptyReply::NotFound
    }

    fn decode(payload: Bytes) -> Result<Self, ProtocolError> {
        Self::from_bytes(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{decode_list, encode_list};
    use proptest::prelude::*;
    use std::time::Duration;

    fn sample_topic() -> Topic {
        Topic {
            id: 3,
            created_at: 1_700_000_000_000_000,
            name: "orders".to_string(),
            size_bytes: 4096,
            message_expiry: MessageExpiry::ExpireDuration(Duration::from_secs(60)),
            compression_algorithm: CompressionAlgorithm::Gzip,
            max_topic_size: MaxTopicSize::Unlimited,
            replication_factor: 1,
            messages_count: 12,
            partitions_count: 2,
        }
    }

    fn sample_partition(id: u32) -> Partition {
        Partition {
            id,
            created_at: 1_700_000_000_000_001,
            segments_count: 1,
            current_offset: 5,
            size_bytes: 2048,
            messages_count: 6,
        }
    }

    #[test]
    fn test_topic_field_order() {
        let bytes = sample_topic().to_bytes().unwrap();

        assert_eq!(&bytes[0..4], &3u32.to_le_bytes());
        assert_eq!(&bytes[4..12], &1_700_000_000_000_000u64.to_le_bytes());
        assert_eq!(&bytes[12..16], &2u32.to_le_bytes());
        assert_eq!(&bytes[16..24], &60_000_000u64.to_le_bytes());
        assert_eq!(bytes[24], 2);
        assert_eq!(&bytes[25..33], &u64::MAX.to_le_bytes());
        assert_eq!(bytes[33], 1);
        assert_eq!(&bytes[34..42], &4096u64.to_le_bytes());
        assert_eq!(&bytes[42..50], &12u64.to_le_bytes());
        assert_eq!(bytes[50], 6);
        assert_eq!(&bytes[51..], b"orders");
    }

    #[test]
    fn test_topic_decode() {
        let topic = Topic::from_bytes(sample_topic().to_bytes().unwrap()).unwrap();
        assert_eq!(topic, sample_topic());
    }

    #[test]
    fn test_topic_truncated() {
        let bytes = sample_topic().to_bytes().unwrap();
        let err = Topic::from_bytes(bytes.slice(..bytes.len() - 1)).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Truncated {
                field: "topic.name",
                ..
            }
        ));
    }

    #[test]
    fn test_topic_trailing_byte() {
        let mut buf = BytesMut::from(&sample_topic().to_bytes().unwrap()[..]);
        buf.put_u8(0);
        assert!(matches!(
            Topic::from_bytes(buf.freeze()),
            Err(ProtocolError::TrailingBytes(1))
        ));
    }

    #[test]
    fn test_topic_details_with_partitions() {
        let details = TopicDetails {
            topic: sample_topic(),
            partitions: vec![sample_partition(1), sample_partition(2)],
        };
        let decoded = <TopicDetails as Reply>::decode(details.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, details);
    }

    #[test]
    fn test_topic_details_partial_partition() {
        let details = TopicDetails {
            topic: sample_topic(),
            partitions: vec![sample_partition(1)],
        };
        let bytes = details.to_bytes().unwrap();
        let err = TopicDetails::from_bytes(bytes.slice(..bytes.len() - 3)).unwrap_err();
        assert!(matches!(err, ProtocolError::Truncated { .. }));
    }

    #[test]
    fn test_topic_min_len() {
        let mut topic = sample_topic();
        topic.name.clear();
        assert_eq!(topic.to_bytes().unwrap().len(), TOPIC_MIN_LEN);
    }

    #[test]
    fn test_topic_details_huge_partitions_count_without_partitions() {
        let mut topic = sample_topic();
        topic.partitions_count = u32::MAX;
        let details = TopicDetails::from_bytes(topic.to_bytes().unwrap()).unwrap();
        assert_eq!(details.topic.partitions_count, u32::MAX);
        assert!(details.partitions.is_empty());
    }

    #[test]
    fn test_topic_details_empty_means_not_found() {
        assert_eq!(TopicDetails::on_empty(), EmptyReply::NotFound);
    }

    #[test]
    fn test_topic_list_empty_reply() {
        assert_eq!(<Vec<Topic> as Reply>::on_empty(), EmptyReply::Value(vec![]));
    }

    fn topic_strategy() -> impl Strategy<Value = Topic> {
        (
            any::<u32>(),
            any::<u64>(),
            "[a-z0-9-]{1,64}",
            any::<u64>(),
            any::<u64>(),
            prop_oneof![
                Just(CompressionAlgorithm::None),
                Just(CompressionAlgorithm::Gzip)
            ],
            any::<u64>(),
            any::<u8>(),
            any::<u64>(),
            any::<u32>(),
        )
            .prop_map(
                |(id, created_at, name, size, expiry, compression, max, rf, count, parts)| Topic {
                    id,
                    created_at,
                    name,
                    size_bytes: size,
                    message_expiry: MessageExpiry::from(expiry),
                    compression_algorithm: compression,
                    max_topic_size: MaxTopicSize::from(max),
                    replication_factor: rf,
                    messages_count: count,
                    partitions_count: parts,
                },
            )
    }

    proptest! {
        #[test]
        fn prop_topic_list_roundtrip(topics in prop::collection::vec(topic_strategy(), 0..8)) {
            let decoded: Vec<Topic> = decode_list(encode_list(&topics).unwrap()).unwrap();
            prop_assert_eq!(decoded, topics);
        }

        #[test]
        fn prop_topic_list_trailing_byte_fails(
            topics in prop::collection::vec(topic_strategy(), 0..8),
            extra in any::<u8>()
        ) {
            let mut buf = BytesMut::from(&encode_list(&topics).unwrap()[..]);
            buf.put_u8(extra);
            prop_assert!(decode_list::<Topic>(buf.freeze()).is_err());
        }
    }
}

use super::topic::TOPIC_MIN_LEN;
use super::Topic;
use crate::command::{EmptyReply, Reply};
use crate::error::{ProtocolError, ValidationError};
use crate::wire::{put_name, WireDecode, WireEncode, WireReader};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

/// A stream as listed by the broker.
///
/// ```text
/// id u32 | created_at u64 | topics_count u32 | size_bytes u64 |
/// messages_count u64 | name_len u8 | name
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub id: u32,
    pub created_at: u64,
    pub name: String,
    pub size_bytes: u64,
    pub messages_count: u64,
    pub topics_count: u32,
}

impl WireDecode for Stream {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        let id = reader.u32("stream.id")?;
        let created_at = reader.u64("stream.created_at")?;
        let topics_count = reader.u32("stream.topics_count")?;
        let size_bytes = reader.u64("stream.size_bytes")?;
        let messages_count = reader.u64("stream.messages_count")?;
        let name = reader.name("stream.name")?;

        Ok(Self {
            id,
            created_at,
            name,
            size_bytes,
            messages_count,
            topics_count,
        })
    }
}

impl WireEncode for Stream {
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        buf.put_u32_le(self.id);
        buf.put_u64_le(self.created_at);
        buf.put_u32_le(self.topics_count);
        buf.put_u64_le(self.size_bytes);
        buf.put_u64_le(self.messages_count);
        put_name(buf, &self.name)
    }
}

/// A single stream together with its topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDetails {
    #[serde(flatten)]
    pub stream: Stream,
    pub topics: Vec<Topic>,
}

impl WireDecode for StreamDetails {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        let stream = Stream::decode_from(reader)?;
        let count = stream.topics_count as usize;
        let mut topics = Vec::with_capacity(count.min(reader.remaining() / TOPIC_MIN_LEN));
        while reader.has_remaining() {
            topics.push(Topic::decode_from(reader)?);
        }
        Ok(Self { stream, topics })
    }
}

impl WireEncode for StreamDetails {
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        self.stream.encode_to(buf)?;
        for topic in &self.topics {
            topic.encode_to(buf)?;
        }
        Ok(())
    }
}

impl Reply for StreamDetails {
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
    use crate::models::{CompressionAlgorithm, MaxTopicSize, MessageExpiry};
    use crate::wire::{decode_list, encode_list};

    fn stream(id: u32, name: &str) -> Stream {
        Stream {
            id,
            created_at: 42,
            name: name.to_string(),
            size_bytes: 0,
            messages_count: 0,
            topics_count: 0,
        }
    }

    #[test]
    fn test_stream_layout() {
        let bytes = stream(9, "s").to_bytes().unwrap();
        assert_eq!(bytes.len(), 4 + 8 + 4 + 8 + 8 + 1 + 1);
        assert_eq!(&bytes[0..4], &9u32.to_le_bytes());
        assert_eq!(bytes[32], 1);
        assert_eq!(bytes[33], b's');
    }

    #[test]
    fn test_stream_list() {
        let streams = vec![stream(1, "alpha"), stream(2, "beta")];
        let decoded: Vec<Stream> = decode_list(encode_list(&streams).unwrap()).unwrap();
        assert_eq!(decoded, streams);
    }

    #[test]
    fn test_stream_details_with_topics() {
        let mut header = stream(1, "alpha");
        header.topics_count = 1;
        let details = StreamDetails {
            stream: header,
            topics: vec![Topic {
                id: 1,
                created_at: 43,
                name: "events".to_string(),
                size_bytes: 0,
                message_expiry: MessageExpiry::NeverExpire,
                compression_algorithm: CompressionAlgorithm::None,
                max_topic_size: MaxTopicSize::ServerDefault,
                replication_factor: 1,
                messages_count: 0,
                partitions_count: 1,
            }],
        };
        let decoded = <StreamDetails as Reply>::decode(details.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, details);
    }

    #[test]
    fn test_stream_details_huge_topics_count_without_topics() {
        let mut header = stream(1, "alpha");
        header.topics_count = u32::MAX;
        let details = StreamDetails::from_bytes(header.to_bytes().unwrap()).unwrap();
        assert_eq!(details.stream.topics_count, u32::MAX);
        assert!(details.topics.is_empty());
    }

    #[test]
    fn test_stream_details_empty_means_not_found() {
        assert_eq!(StreamDetails::on_empty(), EmptyReply::NotFound);
    }
}

//! Response models and the value types shared with requests.

mod consumer_group;
mod partition;
mod personal_access_token;
mod stream;
mod topic;

pub use consumer_group::{ConsumerGroup, ConsumerGroupDetails, ConsumerGroupMember};
pub use partition::Partition;
pub use personal_access_token::{PersonalAccessTokenInfo, RawPersonalAccessToken};
pub use stream::{Stream, StreamDetails};
pub use topic::{Topic, TopicDetails};

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Compression applied by the broker to a topic's messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionAlgorithm {
    #[default]
    None,
    Gzip,
}

impl CompressionAlgorithm {
    pub fn as_code(&self) -> u8 {
        match self {
            CompressionAlgorithm::None => 1,
            CompressionAlgorithm::Gzip => 2,
        }
    }
}

impl TryFrom<u8> for CompressionAlgorithm {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(CompressionAlgorithm::None),
            2 => Ok(CompressionAlgorithm::Gzip),
            other => Err(ProtocolError::InvalidCompressionAlgorithm(other)),
        }
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressionAlgorithm::None => write!(f, "none"),
            CompressionAlgorithm::Gzip => write!(f, "gzip"),
        }
    }
}

/// How long the broker keeps a topic's messages.
///
/// Encoded as microseconds: `0` defers to the server, `u64::MAX` never expires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageExpiry {
    #[default]
    ServerDefault,
    NeverExpire,
    ExpireDuration(Duration),
}

impl From<u64> for MessageExpiry {
    fn from(micros: u64) -> Self {
        match micros {
            0 => MessageExpiry::ServerDefault,
            u64::MAX => MessageExpiry::NeverExpire,
            micros => MessageExpiry::ExpireDuration(Duration::from_micros(micros)),
        }
    }
}

impl From<MessageExpiry> for u64 {
    fn from(expiry: MessageExpiry) -> Self {
        match expiry {
            MessageExpiry::ServerDefault => 0,
            MessageExpiry::NeverExpire => u64::MAX,
            MessageExpiry::ExpireDuration(duration) => {
                u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
            }
        }
    }
}

/// Upper bound on a topic's size in bytes.
///
/// `0` defers to the server, `u64::MAX` is unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxTopicSize {
    #[default]
    ServerDefault,
    Unlimited,
    Custom(u64),
}

impl From<u64> for MaxTopicSize {
    fn from(bytes: u64) -> Self {
        match bytes {
            0 => MaxTopicSize::ServerDefault,
            u64::MAX => MaxTopicSize::Unlimited,
            bytes => MaxTopicSize::Custom(bytes),
        }
    }
}

impl From<MaxTopicSize> for u64 {
    fn from(size: MaxTopicSize) -> Self {
        match size {
            MaxTopicSize::ServerDefault => 0,
            MaxTopicSize::Unlimited => u64::MAX,
            MaxTopicSize::Custom(bytes) => bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_codes() {
        assert_eq!(CompressionAlgorithm::None.as_code(), 1);
        assert_eq!(CompressionAlgorithm::Gzip.as_code(), 2);
        assert_eq!(
            CompressionAlgorithm::try_from(2).unwrap(),
            CompressionAlgorithm::Gzip
        );
        assert!(matches!(
            CompressionAlgorithm::try_from(0),
            Err(ProtocolError::InvalidCompressionAlgorithm(0))
        ));
    }

    #[test]
    fn test_message_expiry_sentinels() {
        assert_eq!(MessageExpiry::from(0), MessageExpiry::ServerDefault);
        assert_eq!(MessageExpiry::from(u64::MAX), MessageExpiry::NeverExpire);
        assert_eq!(
            MessageExpiry::from(1_500_000),
            MessageExpiry::ExpireDuration(Duration::from_millis(1500))
        );
        assert_eq!(
            u64::from(MessageExpiry::ExpireDuration(Duration::from_secs(2))),
            2_000_000
        );
    }

    #[test]
    fn test_max_topic_size_sentinels() {
        assert_eq!(MaxTopicSize::from(0), MaxTopicSize::ServerDefault);
        assert_eq!(MaxTopicSize::from(u64::MAX), MaxTopicSize::Unlimited);
        assert_eq!(u64::from(MaxTopicSize::Custom(1024)), 1024);
    }
}

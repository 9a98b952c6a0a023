//! Protocol error types and broker status codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Client-side contract violations detected before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is too long: {len} bytes (max {max})")]
    TextTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} is too short: {len} bytes (min {min})")]
    TextTooShort {
        field: &'static str,
        len: usize,
        min: usize,
    },

    #[error("invalid {0}: must be greater than zero")]
    InvalidId(&'static str),

    #[error("too many partitions: {count} (max {max})")]
    TooManyPartitions { count: u32, max: u32 },

    #[error("invalid partitions count: {0}")]
    InvalidPartitionsCount(u32),

    #[error("invalid replication factor: must be greater than zero")]
    InvalidReplicationFactor,

    #[error("invalid {0}: must be at least 1 microsecond and below u64::MAX microseconds")]
    InvalidExpiry(&'static str),
}

/// Errors raised while framing or decoding broker payloads.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("truncated payload reading {field}: need {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("{0} unexpected trailing bytes after payload")]
    TrailingBytes(usize),

    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    #[error("invalid identifier kind: {0}")]
    InvalidIdentifierKind(u8),

    #[error("invalid identifier length {length} for kind {kind}")]
    InvalidIdentifierLength { kind: u8, length: u8 },

    #[error("invalid compression algorithm: {0}")]
    InvalidCompressionAlgorithm(u8),

    #[error("unknown command code: {0}")]
    UnknownCommandCode(u32),

    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: u32, max: u32 },

    #[error("empty payload for {0}")]
    EmptyPayload(&'static str),
}

/// Status codes the broker returns in a response header.
///
/// Status `0` means success and never maps to an `ErrorCode`. Codes not
/// in the table are kept as `Unknown` so the raw value is not lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Generic
    Error,
    InvalidConfiguration,
    InvalidCommand,
    InvalidFormat,
    FeatureUnavailable,
    InvalidIdentifier,
    InvalidVersion,
    Disconnected,
    CannotEstablishConnection,
    ResourceNotFound,

    // Authentication and users
    Unauthenticated,
    Unauthorized,
    InvalidCredentials,
    InvalidUsername,
    InvalidPassword,
    InvalidUserStatus,
    UserAlreadyExists,
    UserInactive,
    InvalidPersonalAccessTokenName,
    PersonalAccessTokenAlreadyExists,
    PersonalAccessTokensLimitReached,
    InvalidPersonalAccessToken,
    PersonalAccessTokenExpired,

    // Clients
    ClientNotFound,
    InvalidClientId,

    // Streams
    StreamIdNotFound,
    StreamNameNotFound,
    StreamIdAlreadyExists,
    StreamNameAlreadyExists,
    InvalidStreamName,

    // Topics
    TopicIdNotFound,
    TopicNameNotFound,
    TopicIdAlreadyExists,
    TopicNameAlreadyExists,
    InvalidTopicName,
    TooManyPartitions,
    InvalidTopicSize,
    InvalidReplicationFactor,

    // Partitions
    PartitionNotFound,

    // Consumer groups
    ConsumerGroupIdNotFound,
    ConsumerGroupIdAlreadyExists,
    InvalidConsumerGroupId,
    ConsumerGroupNameNotFound,
    ConsumerGroupNameAlreadyExists,
    InvalidConsumerGroupName,
    ConsumerGroupMemberNotFound,

    Unknown(u32),
}

impl ErrorCode {
    /// Maps a non-zero wire status to its error kind.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => ErrorCode::Error,
            2 => ErrorCode::InvalidConfiguration,
            3 => ErrorCode::InvalidCommand,
            4 => ErrorCode::InvalidFormat,
            5 => ErrorCode::FeatureUnavailable,
            6 => ErrorCode::InvalidIdentifier,
            7 => ErrorCode::InvalidVersion,
            8 => ErrorCode::Disconnected,
            9 => ErrorCode::CannotEstablishConnection,
            20 => ErrorCode::ResourceNotFound,
            40 => ErrorCode::Unauthenticated,
            41 => ErrorCode::Unauthorized,
            42 => ErrorCode::InvalidCredentials,
            43 => ErrorCode::InvalidUsername,
            44 => ErrorCode::InvalidPassword,
            45 => ErrorCode::InvalidUserStatus,
            46 => ErrorCode::UserAlreadyExists,
            47 => ErrorCode::UserInactive,
            50 => ErrorCode::InvalidPersonalAccessTokenName,
            51 => ErrorCode::PersonalAccessTokenAlreadyExists,
            52 => ErrorCode::PersonalAccessTokensLimitReached,
            53 => ErrorCode::InvalidPersonalAccessToken,
            54 => ErrorCode::PersonalAccessTokenExpired,
            100 => ErrorCode::ClientNotFound,
            101 => ErrorCode::InvalidClientId,
            1009 => ErrorCode::StreamIdNotFound,
            1010 => ErrorCode::StreamNameNotFound,
            1011 => ErrorCode::StreamIdAlreadyExists,
            1012 => ErrorCode::StreamNameAlreadyExists,
            1013 => ErrorCode::InvalidStreamName,
            2010 => ErrorCode::TopicIdNotFound,
            2011 => ErrorCode::TopicNameNotFound,
            2012 => ErrorCode::TopicIdAlreadyExists,
            2013 => ErrorCode::TopicNameAlreadyExists,
            2014 => ErrorCode::InvalidTopicName,
            2015 => ErrorCode::TooManyPartitions,
            2016 => ErrorCode::InvalidTopicSize,
            2017 => ErrorCode::InvalidReplicationFactor,
            3007 => ErrorCode::PartitionNotFound,
            5000 => ErrorCode::ConsumerGroupIdNotFound,
            5001 => ErrorCode::ConsumerGroupIdAlreadyExists,
            5002 => ErrorCode::InvalidConsumerGroupId,
            5003 => ErrorCode::ConsumerGroupNameNotFound,
            5004 => ErrorCode::ConsumerGroupNameAlreadyExists,
            5005 => ErrorCode::InvalidConsumerGroupName,
            5006 => ErrorCode::ConsumerGroupMemberNotFound,
            other => ErrorCode::Unknown(other),
        }
    }

    /// Returns the wire status for this error kind.
    pub fn as_code(&self) -> u32 {
        match self {
            ErrorCode::Error => 1,
            ErrorCode::InvalidConfiguration => 2,
            ErrorCode::InvalidCommand => 3,
            ErrorCode::InvalidFormat => 4,
            ErrorCode::FeatureUnavailable => 5,
            ErrorCode::InvalidIdentifier => 6,
            ErrorCode::InvalidVersion => 7,
            ErrorCode::Disconnected => 8,
            ErrorCode::CannotEstablishConnection => 9,
            ErrorCode::ResourceNotFound => 20,
            ErrorCode::Unauthenticated => 40,
            ErrorCode::Unauthorized => 41,
            ErrorCode::InvalidCredentials => 42,
            ErrorCode::InvalidUsername => 43,
            ErrorCode::InvalidPassword => 44,
            ErrorCode::InvalidUserStatus => 45,
            ErrorCode::UserAlreadyExists => 46,
            ErrorCode::UserInactive => 47,
            ErrorCode::InvalidPersonalAccessTokenName => 50,
            ErrorCode::PersonalAccessTokenAlreadyExists => 51,
            ErrorCode::PersonalAccessTokensLimitReached => 52,
            ErrorCode::InvalidPersonalAccessToken => 53,
            ErrorCode::PersonalAccessTokenExpired => 54,
            ErrorCode::ClientNotFound => 100,
            ErrorCode::InvalidClientId => 101,
            ErrorCode::StreamIdNotFound => 1009,
            ErrorCode::StreamNameNotFound => 1010,
            ErrorCode::StreamIdAlreadyExists => 1011,
            ErrorCode::StreamNameAlreadyExists => 1012,
            ErrorCode::InvalidStreamName => 1013,
            ErrorCode::TopicIdNotFound => 2010,
            ErrorCode::TopicNameNotFound => 2011,
            ErrorCode::TopicIdAlreadyExists => 2012,
            ErrorCode::TopicNameAlreadyExists => 2013,
            ErrorCode::InvalidTopicName => 2014,
            ErrorCode::TooManyPartitions => 2015,
            ErrorCode::InvalidTopicSize => 2016,
            ErrorCode::InvalidReplicationFactor => 2017,
            ErrorCode::PartitionNotFound => 3007,
            ErrorCode::ConsumerGroupIdNotFound => 5000,
            ErrorCode::ConsumerGroupIdAlreadyExists => 5001,
            ErrorCode::InvalidConsumerGroupId => 5002,
            ErrorCode::ConsumerGroupNameNotFound => 5003,
            ErrorCode::ConsumerGroupNameAlreadyExists => 5004,
            ErrorCode::InvalidConsumerGroupName => 5005,
            ErrorCode::ConsumerGroupMemberNotFound => 5006,
            ErrorCode::Unknown(code) => *code,
        }
    }

    /// Returns whether the broker reports a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ErrorCode::ResourceNotFound
                | ErrorCode::ClientNotFound
                | ErrorCode::StreamIdNotFound
                | ErrorCode::StreamNameNotFound
                | ErrorCode::TopicIdNotFound
                | ErrorCode::TopicNameNotFound
                | ErrorCode::PartitionNotFound
                | ErrorCode::ConsumerGroupIdNotFound
                | ErrorCode::ConsumerGroupNameNotFound
                | ErrorCode::ConsumerGroupMemberNotFound
        )
    }

    /// Returns whether the broker rejected a create because the resource exists.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            ErrorCode::UserAlreadyExists
                | ErrorCode::PersonalAccessTokenAlreadyExists
                | ErrorCode::StreamIdAlreadyExists
                | ErrorCode::StreamNameAlreadyExists
                | ErrorCode::TopicIdAlreadyExists
                | ErrorCode::TopicNameAlreadyExists
                | ErrorCode::ConsumerGroupIdAlreadyExists
                | ErrorCode::ConsumerGroupNameAlreadyExists
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::Error => "error",
            ErrorCode::InvalidConfiguration => "invalid_configuration",
            ErrorCode::InvalidCommand => "invalid_command",
            ErrorCode::InvalidFormat => "invalid_format",
            ErrorCode::FeatureUnavailable => "feature_unavailable",
            ErrorCode::InvalidIdentifier => "invalid_identifier",
            ErrorCode::InvalidVersion => "invalid_version",
            ErrorCode::Disconnected => "disconnected",
            ErrorCode::CannotEstablishConnection => "cannot_establish_connection",
            ErrorCode::ResourceNotFound => "resource_not_found",
            ErrorCode::Unauthenticated => "unauthenticated",
            ErrorCode::Unauthorized => "unauthorized",
            ErrorCode::InvalidCredentials => "invalid_credentials",
            ErrorCode::InvalidUsername => "invalid_username",
            ErrorCode::InvalidPassword => "invalid_password",
            ErrorCode::InvalidUserStatus => "invalid_user_status",
            ErrorCode::UserAlreadyExists => "user_already_exists",
            ErrorCode::UserInactive => "user_inactive",
            ErrorCode::InvalidPersonalAccessTokenName => "invalid_personal_access_token_name",
            ErrorCode::PersonalAccessTokenAlreadyExists => "personal_access_token_already_exists",
            ErrorCode::PersonalAccessTokensLimitReached => "personal_access_tokens_limit_reached",
            ErrorCode::InvalidPersonalAccessToken => "invalid_personal_access_token",
            ErrorCode::PersonalAccessTokenExpired => "personal_access_token_expired",
            ErrorCode::ClientNotFound => "client_not_found",
            ErrorCode::InvalidClientId => "invalid_client_id",
            ErrorCode::StreamIdNotFound => "stream_id_not_found",
            ErrorCode::StreamNameNotFound => "stream_name_not_found",
            ErrorCode::StreamIdAlreadyExists => "stream_id_already_exists",
            ErrorCode::StreamNameAlreadyExists => "stream_name_already_exists",
            ErrorCode::InvalidStreamName => "invalid_stream_name",
            ErrorCode::TopicIdNotFound => "topic_id_not_found",
            ErrorCode::TopicNameNotFound => "topic_name_not_found",
            ErrorCode::TopicIdAlreadyExists => "topic_id_already_exists",
            ErrorCode::TopicNameAlreadyExists => "topic_name_already_exists",
            ErrorCode::InvalidTopicName => "invalid_topic_name",
            ErrorCode::TooManyPartitions => "too_many_partitions",
            ErrorCode::InvalidTopicSize => "invalid_topic_size",
            ErrorCode::InvalidReplicationFactor => "invalid_replication_factor",
            ErrorCode::PartitionNotFound => "partition_not_found",
            ErrorCode::ConsumerGroupIdNotFound => "consumer_group_id_not_found",
            ErrorCode::ConsumerGroupIdAlreadyExists => "consumer_group_id_already_exists",
            ErrorCode::InvalidConsumerGroupId => "invalid_consumer_group_id",
            ErrorCode::ConsumerGroupNameNotFound => "consumer_group_name_not_found",
            ErrorCode::ConsumerGroupNameAlreadyExists => "consumer_group_name_already_exists",
            ErrorCode::InvalidConsumerGroupName => "invalid_consumer_group_name",
            ErrorCode::ConsumerGroupMemberNotFound => "consumer_group_member_not_found",
            ErrorCode::Unknown(code) => return write!(f, "unknown_error_{}", code),
        };
        f.write_str(name)
    }
}

//! Command codes and the traits binding a request to its reply.
//!
//! Each request type implements [`Command`], which fixes its wire code,
//! how its body is validated and encoded, and the [`Reply`] type its
//! response payload decodes into. The pair `(Command, Reply)` is the
//! per-code serializer/deserializer registry.

use crate::error::{ProtocolError, ValidationError};
use crate::wire::{decode_list, WireDecode};
use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broker command codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandCode {
    // System
    Ping,

    // Personal access tokens
    GetPersonalAccessTokens,
    CreatePersonalAccessToken,
    DeletePersonalAccessToken,

    // Streams
    GetStream,
    GetStreams,
    CreateStream,
    DeleteStream,
    UpdateStream,
    PurgeStream,

    // Topics
    GetTopic,
    GetTopics,
    CreateTopic,
    DeleteTopic,
    UpdateTopic,
    PurgeTopic,

    // Partitions
    CreatePartitions,
    DeletePartitions,

    // Consumer groups
    GetConsumerGroup,
    GetConsumerGroups,
    CreateConsumerGroup,
    DeleteConsumerGroup,
    JoinConsumerGroup,
    LeaveConsumerGroup,
}

impl CommandCode {
    pub fn as_u32(&self) -> u32 {
        match self {
            CommandCode::Ping => 1,
            CommandCode::GetPersonalAccessTokens => 41,
            CommandCode::CreatePersonalAccessToken => 42,
            CommandCode::DeletePersonalAccessToken => 43,
            CommandCode::GetStream => 200,
            CommandCode::GetStreams => 201,
            CommandCode::CreateStream => 202,
            CommandCode::DeleteStream => 203,
            CommandCode::UpdateStream => 204,
            CommandCode::PurgeStream => 205,
            CommandCode::GetTopic => 300,
            CommandCode::GetTopics => 301,
            CommandCode::CreateTopic => 302,
            CommandCode::DeleteTopic => 303,
            CommandCode::UpdateTopic => 304,
            CommandCode::PurgeTopic => 305,
            CommandCode::CreatePartitions => 402,
            CommandCode::DeletePartitions => 403,
            CommandCode::GetConsumerGroup => 600,
            CommandCode::GetConsumerGroups => 601,
            CommandCode::CreateConsumerGroup => 602,
            CommandCode::DeleteConsumerGroup => 603,
            CommandCode::JoinConsumerGroup => 604,
            CommandCode::LeaveConsumerGroup => 605,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandCode::Ping => "ping",
            CommandCode::GetPersonalAccessTokens => "pat.list",
            CommandCode::CreatePersonalAccessToken => "pat.create",
            CommandCode::DeletePersonalAccessToken => "pat.delete",
            CommandCode::GetStream => "stream.get",
            CommandCode::GetStreams => "stream.list",
            CommandCode::CreateStream => "stream.create",
            CommandCode::DeleteStream => "stream.delete",
            CommandCode::UpdateStream => "stream.update",
            CommandCode::PurgeStream => "stream.purge",
            CommandCode::GetTopic => "topic.get",
            CommandCode::GetTopics => "topic.list",
            CommandCode::CreateTopic => "topic.create",
            CommandCode::DeleteTopic => "topic.delete",
            CommandCode::UpdateTopic => "topic.update",
            CommandCode::PurgeTopic => "topic.purge",
            CommandCode::CreatePartitions => "partition.create",
            CommandCode::DeletePartitions => "partition.delete",
            CommandCode::GetConsumerGroup => "consumer_group.get",
            CommandCode::GetConsumerGroups => "consumer_group.list",
            CommandCode::CreateConsumerGroup => "consumer_group.create",
            CommandCode::DeleteConsumerGroup => "consumer_group.delete",
            CommandCode::JoinConsumerGroup => "consumer_group.join",
            CommandCode::LeaveConsumerGroup => "consumer_group.leave",
        }
    }
}

impl TryFrom<u32> for CommandCode {
    type Error = ProtocolError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => CommandCode::Ping,
            41 => CommandCode::GetPersonalAccessTokens,
            42 => CommandCode::CreatePersonalAccessToken,
            43 => CommandCode::DeletePersonalAccessToken,
            200 => CommandCode::GetStream,
            201 => CommandCode::GetStreams,
            202 => CommandCode::CreateStream,
            203 => CommandCode::DeleteStream,
            204 => CommandCode::UpdateStream,
            205 => CommandCode::PurgeStream,
            300 => CommandCode::GetTopic,
            301 => CommandCode::GetTopics,
            302 => CommandCode::CreateTopic,
            303 => CommandCode::DeleteTopic,
            304 => CommandCode::UpdateTopic,
            305 => CommandCode::PurgeTopic,
            402 => CommandCode::CreatePartitions,
            403 => CommandCode::DeletePartitions,
            600 => CommandCode::GetConsumerGroup,
            601 => CommandCode::GetConsumerGroups,
            602 => CommandCode::CreateConsumerGroup,
            603 => CommandCode::DeleteConsumerGroup,
            604 => CommandCode::JoinConsumerGroup,
            605 => CommandCode::LeaveConsumerGroup,
            other => return Err(ProtocolError::UnknownCommandCode(other)),
        })
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u32())
    }
}

/// A request the broker understands.
pub trait Command {
    /// Wire code identifying this command.
    const CODE: CommandCode;

    /// What a successful response decodes into.
    type Reply: Reply;

    /// Checks client-side constraints. Runs before any byte is sent.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Appends the command body. Fails if a name does not fit its length prefix.
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError>;

    /// Validates, then encodes the command body.
    fn to_bytes(&self) -> Result<Bytes, ValidationError> {
        self.validate()?;
        let mut buf = BytesMut::new();
        self.encode_to(&mut buf)?;
        Ok(buf.freeze())
    }
}

/// Meaning of a successful response that carries no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReply<T> {
    /// The empty payload is a valid reply.
    Value(T),
    /// The addressed resource does not exist.
    NotFound,
    /// The reply must carry data; an empty payload is a protocol error.
    Missing,
}

/// The decoded form of a successful response.
pub trait Reply: Sized {
    fn on_empty() -> EmptyReply<Self>;

    /// Decodes a non-empty payload.
    fn decode(payload: Bytes) -> Result<Self, ProtocolError>;
}

/// Commands whose only result is success. Any payload is ignored.
impl Reply for () {
    fn on_empty() -> EmptyReply<Self> {
        EmptyReply::Value(())
    }

    fn decode(_payload: Bytes) -> Result<Self, ProtocolError> {
        Ok(())
    }
}

/// List replies: an empty payload is an empty list.
impl<T: WireDecode> Reply for Vec<T> {
    fn on_empty() -> EmptyReply<Self> {
        EmptyReply::Value(Vec::new())
    }

    fn decode(payload: Bytes) -> Result<Self, ProtocolError> {
        decode_list(payload)
    }
}

/// Replies the broker may omit, such as the details of a created resource.
impl<T: WireDecode> Reply for Option<T> {
    fn on_empty() -> EmptyReply<Self> {
        EmptyReply::Value(None)
    }

    fn decode(payload: Bytes) -> Result<Self, ProtocolError> {
        T::from_bytes(payload).map(Some)
    }
}

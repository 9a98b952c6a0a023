//! Request types, one per command code.

mod consumer_groups;
mod partitions;
mod personal_access_tokens;
mod streams;
mod system;
mod topics;

pub use consumer_groups::{
    CreateConsumerGroup, DeleteConsumerGroup, GetConsumerGroup, GetConsumerGroups,
    JoinConsumerGroup, LeaveConsumerGroup,
};
pub use partitions::{CreatePartitions, DeletePartitions};
pub use personal_access_tokens::{
    CreatePersonalAccessToken, DeletePersonalAccessToken, GetPersonalAccessTokens,
};
pub use streams::{CreateStream, DeleteStream, GetStream, GetStreams, PurgeStream, UpdateStream};
pub use system::Ping;
pub use topics::{CreateTopic, DeleteTopic, GetTopic, GetTopics, PurgeTopic, UpdateTopic};

use crate::error::ValidationError;
use crate::identifier::Identifier;
use crate::{MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use bytes::BytesMut;

fn validate_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.len();
    if len > max {
        return Err(ValidationError::TextTooLong { field, len, max });
    }
    if len < min {
        return Err(ValidationError::TextTooShort { field, len, min });
    }
    Ok(())
}

/// Stream, topic and consumer group names: 1..=255 bytes.
fn validate_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    validate_length(field, name, MIN_NAME_LENGTH, MAX_NAME_LENGTH)
}

/// An explicit id must be non-zero; zero on the wire asks the broker to assign one.
fn validate_explicit_id(field: &'static str, id: Option<u32>) -> Result<(), ValidationError> {
    match id {
        Some(0) => Err(ValidationError::InvalidId(field)),
        _ => Ok(()),
    }
}

fn validate_identifiers(ids: &[&Identifier]) -> Result<(), ValidationError> {
    ids.iter().try_for_each(|id| id.validate())
}

fn encode_identifiers(buf: &mut BytesMut, ids: &[&Identifier]) -> Result<(), ValidationError> {
    ids.iter().try_for_each(|id| id.encode_to(buf))
}

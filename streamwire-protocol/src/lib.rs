//! # streamwire-protocol
//!
//! Binary wire protocol for the streaming broker's TCP transport.
//!
//! This crate provides:
//! - Request/response framing with little-endian length prefixes
//! - Stream/topic identifiers and their wire encoding
//! - Command codes and per-command request serializers
//! - Response models and their decoders
//! - Broker status codes and client-side validation errors

pub mod command;
pub mod commands;
pub mod error;
pub mod frame;
pub mod identifier;
pub mod models;
pub mod wire;

pub use command::{Command, CommandCode, EmptyReply, Reply};
pub use error::{ErrorCode, ProtocolError, ValidationError};
pub use frame::{RequestFrame, ResponseFrame, ResponseHeader};
pub use identifier::Identifier;
pub use wire::{WireDecode, WireEncode, WireReader};

/// Default TCP port of the broker.
pub const DEFAULT_PORT: u16 = 8090;

/// Maximum length in bytes of any length-prefixed name on the wire.
pub const MAX_NAME_LENGTH: usize = 255;

/// Minimum length in bytes of stream, topic and consumer group names.
pub const MIN_NAME_LENGTH: usize = 1;

/// Bounds for personal access token names.
pub const MIN_PERSONAL_ACCESS_TOKEN_NAME_LENGTH: usize = 3;
pub const MAX_PERSONAL_ACCESS_TOKEN_NAME_LENGTH: usize = 30;

/// Maximum number of partitions a single command may create or delete.
pub const MAX_PARTITIONS_COUNT: u32 = 1000;

/// Default upper bound for a response payload (16 MiB).
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

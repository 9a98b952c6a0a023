//! streamwire - binary protocol client for TCP message-streaming brokers.
//!
//! Re-exports the wire protocol ([`protocol`]) and the async client ([`client`]).

pub use streamwire_client as client;
pub use streamwire_protocol as protocol;

pub use streamwire_client::{Client, ClientConfig, ClientError, ErrorKind};
pub use streamwire_protocol::{Command, ErrorCode, Identifier};

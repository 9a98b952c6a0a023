//! # streamwire-client
//!
//! Async client for streamwire brokers.
//!
//! This crate provides:
//! - A command transport over any `AsyncRead + AsyncWrite` stream
//! - Mapping of broker statuses and empty replies to [`ClientError`]
//! - A typed API for streams, topics, partitions, consumer groups and tokens

pub mod client;
pub mod config;
pub mod connection;
pub mod error;

pub use client::Client;
pub use config::ClientConfig;
pub use connection::Connection;
pub use error::{ClientError, ErrorKind};

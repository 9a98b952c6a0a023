//! High-level client API.

use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::error::ClientError;
use bytes::Bytes;
use std::time::Duration;
use streamwire_protocol::commands::*;
use streamwire_protocol::models::{
    ConsumerGroup, ConsumerGroupDetails, PersonalAccessTokenInfo, RawPersonalAccessToken, Stream,
    StreamDetails, Topic, TopicDetails,
};
use streamwire_protocol::{Command, CommandCode, EmptyReply, Identifier, ProtocolError, Reply};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

/// Typed client for a streamwire broker.
pub struct Client<S = TcpStream> {
    conn: Connection<S>,
}

impl Client<TcpStream> {
    /// Dials the broker described by `config`.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            conn: Connection::connect(config).await?,
        })
    }
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps an already established stream.
    pub fn new(stream: S) -> Self {
        Self {
            conn: Connection::new(stream),
        }
    }

    pub fn from_connection(conn: Connection<S>) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection<S> {
        &self.conn
    }

    pub fn into_connection(self) -> Connection<S> {
        self.conn
    }

    /// Validates, sends and decodes any command.
    ///
    /// Validation failures return before anything is written.
    pub async fn send<C: Command>(&mut self, command: &C) -> Result<C::Reply, ClientError> {
        let body = command.to_bytes()?;
        let payload = self.conn.exchange(C::CODE, body).await?;
        read_reply(C::CODE, payload)
    }

    // =========================================================================
    // System operations
    // =========================================================================

    /// Pings the broker. Succeeds with or without an authenticated session.
    pub async fn ping(&mut self) -> Result<(), ClientError> {
        self.send(&Ping).await
    }

    // =========================================================================
    // Stream operations
    // =========================================================================

    pub async fn get_streams(&mut self) -> Result<Vec<Stream>, ClientError> {
        self.send(&GetStreams).await
    }

    pub async fn get_stream(
        &mut self,
        stream_id: &Identifier,
    ) -> Result<StreamDetails, ClientError> {
        self.send(&GetStream {
            stream_id: stream_id.clone(),
        })
        .await
    }

    /// Creates a stream. `None` lets the broker assign the id.
    ///
    /// Returns the created stream when the broker echoes it back.
    pub async fn create_stream(
        &mut self,
        name: &str,
        stream_id: Option<u32>,
    ) -> Result<Option<StreamDetails>, ClientError> {
        self.send(&CreateStream {
            stream_id,
            name: name.to_string(),
        })
        .await
    }

    pub async fn update_stream(
        &mut self,
        stream_id: &Identifier,
        name: &str,
    ) -> Result<(), ClientError> {
        self.send(&UpdateStream {
            stream_id: stream_id.clone(),
            name: name.to_string(),
        })
        .await
    }

    pub async fn delete_stream(&mut self, stream_id: &Identifier) -> Result<(), ClientError> {
        self.send(&DeleteStream {
            stream_id: stream_id.clone(),
        })
        .await
    }

    pub async fn purge_stream(&mut self, stream_id: &Identifier) -> Result<(), ClientError> {
        self.send(&PurgeStream {
            stream_id: stream_id.clone(),
        })
        .await
    }

    // =========================================================================
    // Topic operations
    // =========================================================================

    pub async fn get_topics(&mut self, stream_id: &Identifier) -> Result<Vec<Topic>, ClientError> {
        self.send(&GetTopics {
            stream_id: stream_id.clone(),
        })
        .await
    }

    pub async fn get_topic(
        &mut self,
        stream_id: &Identifier,
        topic_id: &Identifier,
    ) -> Result<TopicDetails, ClientError> {
        self.send(&GetTopic {
            stream_id: stream_id.clone(),
            topic_id: topic_id.clone(),
        })
        .await
    }

    /// Creates a topic. Build the request with [`CreateTopic::new`] and its `with_*` methods.
    pub async fn create_topic(
        &mut self,
        request: &CreateTopic,
    ) -> Result<Option<TopicDetails>, ClientError> {
        self.send(request).await
    }

    pub async fn update_topic(&mut self, request: &UpdateTopic) -> Result<(), ClientError> {
        self.send(request).await
    }

    pub async fn delete_topic(
        &mut self,
        stream_id: &Identifier,
        topic_id: &Identifier,
    ) -> Result<(), ClientError> {
        self.send(&DeleteTopic {
            stream_id: stream_id.clone(),
            topic_id: topic_id.clone(),
        })
        .await
    }

    pub async fn purge_topic(
        &mut self,
        stream_id: &Identifier,
        topic_id: &Identifier,
    ) -> Result<(), ClientError> {
        self.send(&PurgeTopic {
            stream_id: stream_id.clone(),
            topic_id: topic_id.clone(),
        })
        .await
    }

    // =========================================================================
    // Partition operations
    // =========================================================================

    pub async fn create_partitions(
        &mut self,
        stream_id: &Identifier,
        topic_id: &Identifier,
        partitions_count: u32,
    ) -> Result<(), ClientError> {
        self.send(&CreatePartitions {
            stream_id: stream_id.clone(),
            topic_id: topic_id.clone(),
            partitions_count,
        })
        .await
    }

    pub async fn delete_partitions(
        &mut self,
        stream_id: &Identifier,
        topic_id: &Identifier,
        partitions_count: u32,
    ) -> Result<(), ClientError> {
        self.send(&DeletePartitions {
            stream_id: stream_id.clone(),
            topic_id: topic_id.clone(),
            partitions_count,
        })
        .await
    }

    // =========================================================================
    // Consumer group operations
    // =========================================================================

    pub async fn get_consumer_groups(
        &mut self,
        stream_id: &Identifier,
        topic_id: &Identifier,
    ) -> Result<Vec<ConsumerGroup>, ClientError> {
        self.send(&GetConsumerGroups {
            stream_id: stream_id.clone(),
            topic_id: topic_id.clone(),
        })
        .await
    }

    pub async fn get_consumer_group(
        &mut self,
        stream_id: &Identifier,
        topic_id: &Identifier,
        group_id: &Identifier,
    ) -> Result<ConsumerGroupDetails, ClientError> {
        self.send(&GetConsumerGroup {
            stream_id: stream_id.clone(),
            topic_id: topic_id.clone(),
            group_id: group_id.clone(),
        })
        .await
    }

    pub async fn create_consumer_group(
        &mut self,
        stream_id: &Identifier,
        topic_id: &Identifier,
        name: &str,
        group_id: Option<u32>,
    ) -> Result<Option<ConsumerGroupDetails>, ClientError> {
        self.send(&CreateConsumerGroup {
            stream_id: stream_id.clone(),
            topic_id: topic_id.clone(),
            group_id,
            name: name.to_string(),
        })
        .await
    }

    pub async fn delete_consumer_group(
        &mut self,
        stream_id: &Identifier,
        topic_id: &Identifier,
        group_id: &Identifier,
    ) -> Result<(), ClientError> {
        self.send(&DeleteConsumerGroup {
            stream_id: stream_id.clone(),
            topic_id: topic_id.clone(),
            group_id: group_id.clone(),
        })
        .await
    }

    pub async fn join_consumer_group(
        &mut self,
        stream_id: &Identifier,
        topic_id: &Identifier,
        group_id: &Identifier,
    ) -> Result<(), ClientError> {
        self.send(&JoinConsumerGroup {
            stream_id: stream_id.clone(),
            topic_id: topic_id.clone(),
            group_id: group_id.clone(),
        })
        .await
    }

    pub async fn leave_consumer_group(
        &mut self,
        stream_id: &Identifier,
        topic_id: &Identifier,
        group_id: &Identifier,
    ) -> Result<(), ClientError> {
        self.send(&LeaveConsumerGroup {
            stream_id: stream_id.clone(),
            topic_id: topic_id.clone(),
            group_id: group_id.clone(),
        })
        .await
    }

    // =========================================================================
    // Personal access token operations
    // =========================================================================

    pub async fn get_personal_access_tokens(
        &mut self,
    ) -> Result<Vec<PersonalAccessTokenInfo>, ClientError> {
        self.send(&GetPersonalAccessTokens).await
    }

    /// Issues a token. The secret in the reply is not retrievable later.
    pub async fn create_personal_access_token(
        &mut self,
        name: &str,
        expiry: Option<Duration>,
    ) -> Result<RawPersonalAccessToken, ClientError> {
        self.send(&CreatePersonalAccessToken {
            name: name.to_string(),
            expiry,
        })
        .await
    }

    pub async fn delete_personal_access_token(&mut self, name: &str) -> Result<(), ClientError> {
        self.send(&DeletePersonalAccessToken {
            name: name.to_string(),
        })
        .await
    }
}

/// Interprets a successful payload for the reply type of `command`.
fn read_reply<R: Reply>(command: CommandCode, payload: Bytes) -> Result<R, ClientError> {
    if !payload.is_empty() {
        return Ok(R::decode(payload)?);
    }
    match R::on_empty() {
        EmptyReply::Value(value) => Ok(value),
        EmptyReply::NotFound => Err(ClientError::NotFound { command }),
        EmptyReply::Missing => Err(ProtocolError::EmptyPayload(command.name()).into()),
    }
}

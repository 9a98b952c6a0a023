//! Command transport: one framed request, one framed response.

use crate::config::ClientConfig;
use crate::error::ClientError;
use bytes::{Bytes, BytesMut};
use streamwire_protocol::frame::RESPONSE_HEADER_SIZE;
use streamwire_protocol::{CommandCode, ErrorCode, ProtocolError, RequestFrame, ResponseHeader};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

/// A byte stream to a broker.
///
/// Every exchange takes `&mut self`, so a connection never has more than one
/// request in flight. Share it across tasks behind a lock.
#[derive(Debug)]
pub struct Connection<S> {
    stream: S,
    max_response_size: u32,
}

impl Connection<TcpStream> {
    /// Dials the configured broker.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        tracing::debug!("Connecting to {}...", config.server_address);

        let stream = tokio::time::timeout(
            config.connect_timeout,
            TcpStream::connect(config.server_address.as_str()),
        )
        .await
        .map_err(|_| {
            tracing::debug!("Connection timeout");
            ClientError::Timeout
        })?
        .map_err(|e| {
            tracing::debug!("Connection failed: {}", e);
            ClientError::Io(e)
        })?;

        tracing::debug!("TCP connected, configuring socket");
        stream.set_nodelay(config.nodelay)?;

        Ok(Self::new(stream).with_max_response_size(config.max_response_size))
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps an already established stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            max_response_size: streamwire_protocol::MAX_PAYLOAD_SIZE,
        }
    }

    pub fn with_max_response_size(mut self, size: u32) -> Self {
        self.max_response_size = size;
        self
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Sends one command and returns the successful response payload, which may be empty.
    ///
    /// The whole declared payload is read even for error statuses so the next
    /// exchange starts on a frame boundary. A payload over the size limit is
    /// refused unread; the connection is then out of sync and should be dropped.
    pub async fn exchange(&mut self, code: CommandCode, body: Bytes) -> Result<Bytes, ClientError> {
        let frame = RequestFrame::new(code, body).encode()?;
        tracing::trace!("Sending {} ({} bytes)", code, frame.len());
        self.stream.write_all(&frame).await?;
        self.stream.flush().await?;

        let mut raw = [0u8; RESPONSE_HEADER_SIZE];
        self.stream
            .read_exact(&mut raw)
            .await
            .map_err(|e| read_failed(code, e))?;
        let header = ResponseHeader::parse(raw);
        tracing::trace!(
            "Received header for {}: status={} length={}",
            code,
            header.status,
            header.length
        );

        if header.length > self.max_response_size {
            tracing::error!(
                "Response to {} declares {} bytes, limit is {}",
                code,
                header.length,
                self.max_response_size
            );
            return Err(ProtocolError::FrameTooLarge {
                size: header.length,
                max: self.max_response_size,
            }
            .into());
        }

        let mut payload = BytesMut::zeroed(header.length as usize);
        self.stream
            .read_exact(&mut payload)
            .await
            .map_err(|e| read_failed(code, e))?;

        if !header.is_ok() {
            return Err(broker_error(code, header.status, &payload));
        }
        Ok(payload.freeze())
    }
}

fn read_failed(code: CommandCode, err: std::io::Error) -> ClientError {
    tracing::error!("Failed to read response for {}: {}", code, err);
    err.into()
}

fn broker_error(code: CommandCode, status: u32, payload: &[u8]) -> ClientError {
    let error_code = ErrorCode::from_code(status);
    if error_code.is_already_exists() {
        tracing::debug!("{} rejected: {} ({})", code, error_code, status);
    } else {
        tracing::error!("{} failed: {} ({})", code, error_code, status);
    }
    ClientError::from_status(status, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamwire_protocol::ResponseFrame;
    use tokio_test::io::Builder;

    fn request(code: CommandCode, body: &[u8]) -> Vec<u8> {
        RequestFrame::new(code, Bytes::copy_from_slice(body))
            .encode()
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_exchange_writes_frame_and_reads_payload() {
        let mut expected = vec![8, 0, 0, 0, 0x2d, 0x01, 0, 0];
        expected.extend_from_slice(&[1, 2, 3, 4]);

        let mock = Builder::new()
            .write(&expected)
            .read(&ResponseFrame::ok(Bytes::from_static(b"abc")).encode())
            .build();
        let mut conn = Connection::new(mock);

        let payload = conn
            .exchange(CommandCode::GetTopics, Bytes::from_static(&[1, 2, 3, 4]))
            .await
            .unwrap();
        assert_eq!(&payload[..], b"abc");
    }

    #[tokio::test]
    async fn test_exchange_reads_split_response() {
        let mock = Builder::new()
            .write(&request(CommandCode::Ping, &[]))
            .read(&[0, 0, 0, 0, 2, 0])
            .read(&[0, 0, b'o'])
            .read(b"k")
            .build();
        let mut conn = Connection::new(mock);

        let payload = conn.exchange(CommandCode::Ping, Bytes::new()).await.unwrap();
        assert_eq!(&payload[..], b"ok");
    }

    #[tokio::test]
    async fn test_exchange_error_status_consumes_payload() {
        let mut response = ResponseHeader {
            status: 1009,
            length: 6,
        }
        .to_bytes()
        .to_vec();
        response.extend_from_slice(b"absent");

        let mock = Builder::new()
            .write(&request(CommandCode::DeleteStream, &[1, 4, 9, 0, 0, 0]))
            .read(&response)
            .write(&request(CommandCode::Ping, &[]))
            .read(&ResponseFrame::ok(Bytes::new()).encode())
            .build();
        let mut conn = Connection::new(mock);

        let err = conn
            .exchange(
                CommandCode::DeleteStream,
                Bytes::from_static(&[1, 4, 9, 0, 0, 0]),
            )
            .await
            .unwrap_err();
        match err {
            ClientError::Broker { code, reason } => {
                assert_eq!(code.as_code(), 1009);
                assert_eq!(reason, "absent");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // The stream is still aligned for the next exchange.
        let payload = conn.exchange(CommandCode::Ping, Bytes::new()).await.unwrap();
        assert!(payload.is_empty());
    }

    #[tokio::test]
    async fn test_exchange_rejects_oversized_response() {
        let header = ResponseHeader {
            status: 0,
            length: 1024,
        };
        let mock = Builder::new()
            .write(&request(CommandCode::GetStreams, &[]))
            .read(&header.to_bytes())
            .build();
        let mut conn = Connection::new(mock).with_max_response_size(512);

        let err = conn
            .exchange(CommandCode::GetStreams, Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Protocol(ProtocolError::FrameTooLarge {
                size: 1024,
                max: 512
            })
        ));
    }

    #[tokio::test]
    async fn test_exchange_closed_mid_payload() {
        let header = ResponseHeader {
            status: 0,
            length: 10,
        };
        let mock = Builder::new()
            .write(&request(CommandCode::GetStreams, &[]))
            .read(&header.to_bytes())
            .read(b"abc")
            .build();
        let mut conn = Connection::new(mock);

        let err = conn
            .exchange(CommandCode::GetStreams, Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ConnectionClosed));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_exchange_read_error() {
        let mock = Builder::new()
            .write(&request(CommandCode::Ping, &[]))
            .read_error(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset by peer",
            ))
            .build();
        let mut conn = Connection::new(mock);

        let err = conn.exchange(CommandCode::Ping, Bytes::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }
}

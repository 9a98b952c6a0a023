use super::{encode_identifiers, validate_explicit_id, validate_identifiers, validate_name};
use crate::command::{Command, CommandCode};
use crate::error::ValidationError;
use crate::identifier::Identifier;
use crate::models::{Stream, StreamDetails};
use crate::wire::put_name;
use bytes::{BufMut, BytesMut};

/// Fetches one stream with its topics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetStream {
    pub stream_id: Identifier,
}

impl Command for GetStream {
    const CODE: CommandCode = CommandCode::GetStream;
    type Reply = StreamDetails;

    fn validate(&self) -> Result<(), ValidationError> {
        self.stream_id.validate()
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        self.stream_id.encode_to(buf)
    }
}

/// Lists all streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetStreams;

impl Command for GetStreams {
    const CODE: CommandCode = CommandCode::GetStreams;
    type Reply = Vec<Stream>;

    fn encode_to(&self, _buf: &mut BytesMut) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Creates a stream.
///
/// Body: `stream_id u32 (0 = broker assigns) | name_len u8 | name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStream {
    pub stream_id: Option<u32>,
    pub name: String,
}

impl CreateStream {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            stream_id: None,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, stream_id: u32) -> Self {
        self.stream_id = Some(stream_id);
        self
    }
}

impl Command for CreateStream {
    const CODE: CommandCode = CommandCode::CreateStream;
    type Reply = Option<StreamDetails>;

    fn validate(&self) -> Result<(), ValidationError> {
        validate_explicit_id("stream_id", self.stream_id)?;
        validate_name("stream_name", &self.name)
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        buf.put_u32_le(self.stream_id.unwrap_or(0));
        put_name(buf, &self.name)
    }
}

/// Renames a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStream {
    pub stream_id: Identifier,
    pub name: String,
}

impl Command for UpdateStream {
    const CODE: CommandCode = CommandCode::UpdateStream;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        self.stream_id.validate()?;
        validate_name("stream_name", &self.name)
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        self.stream_id.encode_to(buf)?;
        put_name(buf, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteStream {
    pub stream_id: Identifier,
}

impl Command for DeleteStream {
    const CODE: CommandCode = CommandCode::DeleteStream;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id])
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id])
    }
}

/// Removes all messages from every topic of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeStream {
    pub stream_id: Identifier,
}

impl Command for PurgeStream {
    const CODE: CommandCode = CommandCode::PurgeStream;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifiers(&[&self.stream_id])
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        encode_identifiers(buf, &[&self.stream_id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_NAME_LENGTH;

    #[test]
    fn test_create_stream_layout() {
        let bytes = CreateStream::new("orders").with_id(5).to_bytes().unwrap();
        assert_eq!(&bytes[0..4], &5u32.to_le_bytes());
        assert_eq!(bytes[4], 6);
        assert_eq!(&bytes[5..], b"orders");
    }

    #[test]
    fn test_create_stream_without_id() {
        let bytes = CreateStream::new("orders").to_bytes().unwrap();
        assert_eq!(&bytes[0..4], &0u32.to_le_bytes());
    }

    #[test]
    fn test_create_stream_rejects_zero_id() {
        assert_eq!(
            CreateStream::new("orders").with_id(0).to_bytes(),
            Err(ValidationError::InvalidId("stream_id"))
        );
    }

    #[test]
    fn test_create_stream_name_too_long() {
        let err = CreateStream::new("x".repeat(MAX_NAME_LENGTH + 1))
            .to_bytes()
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TextTooLong {
                field: "stream_name",
                ..
            }
        ));
    }

    #[test]
    fn test_update_stream_layout() {
        let command = UpdateStream {
            stream_id: Identifier::numeric(1),
            name: "renamed".to_string(),
        };
        let bytes = command.to_bytes().unwrap();
        assert_eq!(&bytes[..6], &[1, 4, 1, 0, 0, 0]);
        assert_eq!(bytes[6], 7);
        assert_eq!(&bytes[7..], b"renamed");
    }

    #[test]
    fn test_identifier_only_commands() {
        let id = Identifier::named("orders").unwrap();
        let expected = id.to_bytes().unwrap();

        let get = GetStream {
            stream_id: id.clone(),
        };
        let delete = DeleteStream {
            stream_id: id.clone(),
        };
        let purge = PurgeStream { stream_id: id };
        assert_eq!(get.to_bytes().unwrap(), expected);
        assert_eq!(delete.to_bytes().unwrap(), expected);
        assert_eq!(purge.to_bytes().unwrap(), expected);
        assert!(GetStreams.to_bytes().unwrap().is_empty());
    }
}

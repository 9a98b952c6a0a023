use crate::command::{EmptyReply, Reply};
use crate::error::{ProtocolError, ValidationError};
use crate::wire::{put_name, WireDecode, WireEncode, WireReader};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

/// Metadata of a personal access token. The token itself is never listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalAccessTokenInfo {
    pub name: String,
    /// Expiry, microseconds since the Unix epoch. `None` never expires.
    pub expiry_at: Option<u64>,
}

impl WireDecode for PersonalAccessTokenInfo {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        let name = reader.name("personal_access_token.name")?;
        let expiry_at = match reader.u64("personal_access_token.expiry_at")? {
            0 => None,
            at => Some(at),
        };
        Ok(Self { name, expiry_at })
    }
}

impl WireEncode for PersonalAccessTokenInfo {
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        put_name(buf, &self.name)?;
        buf.put_u64_le(self.expiry_at.unwrap_or(0));
        Ok(())
    }
}

/// The secret returned once when a token is created.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPersonalAccessToken {
    pub token: String,
}

impl std::fmt::Debug for RawPersonalAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawPersonalAccessToken")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl WireDecode for RawPersonalAccessToken {
    fn decode_from(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        let token = reader.name("personal_access_token.token")?;
        Ok(Self { token })
    }
}

impl WireEncode for RawPersonalAccessToken {
    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        put_name(buf, &self.token)
    }
}

impl Reply for RawPersonalAccessToken {
    fn on_empty() -> EmptyReply<Self> {
        EmptyReply::Missing
    }

    fn decode(payload: Bytes) -> Result<Self, ProtocolError> {
        Self::from_bytes(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{decode_list, encode_list};

    #[test]
    fn test_token_info_list() {
        let tokens = vec![
            PersonalAccessTokenInfo {
                name: "ci".to_string(),
                expiry_at: None,
            },
            PersonalAccessTokenInfo {
                name: "deploy".to_string(),
                expiry_at: Some(1_800_000_000_000_000),
            },
        ];
        let bytes = encode_list(&tokens).unwrap();
        assert_eq!(&bytes[3..11], &0u64.to_le_bytes());

        let decoded: Vec<PersonalAccessTokenInfo> = decode_list(bytes).unwrap();
        assert_eq!(decoded, tokens);
    }

    #[test]
    fn test_raw_token() {
        let raw = RawPersonalAccessToken {
            token: "s3cr3t".to_string(),
        };
        let decoded = <RawPersonalAccessToken as Reply>::decode(raw.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, raw);
        assert!(!format!("{:?}", decoded).contains("s3cr3t"));
    }

    #[test]
    fn test_raw_token_must_not_be_empty() {
        assert!(matches!(
            RawPersonalAccessToken::on_empty(),
            EmptyReply::Missing
        ));
    }
}

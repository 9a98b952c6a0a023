use super::validate_length;
use crate::command::{Command, CommandCode};
use crate::error::ValidationError;
use crate::models::{PersonalAccessTokenInfo, RawPersonalAccessToken};
use crate::wire::put_name;
use crate::{MAX_PERSONAL_ACCESS_TOKEN_NAME_LENGTH, MIN_PERSONAL_ACCESS_TOKEN_NAME_LENGTH};
use bytes::{BufMut, BytesMut};
use std::time::Duration;

fn validate_token_name(name: &str) -> Result<(), ValidationError> {
    validate_length(
        "personal_access_token_name",
        name,
        MIN_PERSONAL_ACCESS_TOKEN_NAME_LENGTH,
        MAX_PERSONAL_ACCESS_TOKEN_NAME_LENGTH,
    )
}

/// Lists the tokens of the authenticated user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetPersonalAccessTokens;

impl Command for GetPersonalAccessTokens {
    const CODE: CommandCode = CommandCode::GetPersonalAccessTokens;
    type Reply = Vec<PersonalAccessTokenInfo>;

    fn encode_to(&self, _buf: &mut BytesMut) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Issues a new token. The broker returns the secret exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePersonalAccessToken {
    pub name: String,
    /// Lifetime of the token. `None` never expires.
    pub expiry: Option<Duration>,
}

impl Command for CreatePersonalAccessToken {
    const CODE: CommandCode = CommandCode::CreatePersonalAccessToken;
    type Reply = RawPersonalAccessToken;

    fn validate(&self) -> Result<(), ValidationError> {
        validate_token_name(&self.name)?;
        // `0` on the wire means the token never expires.
        match self.expiry {
            Some(expiry) if expiry.as_micros() == 0 => {
                Err(ValidationError::InvalidExpiry("personal_access_token_expiry"))
            }
            _ => Ok(()),
        }
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        put_name(buf, &self.name)?;
        let micros = self
            .expiry
            .map(|expiry| u64::try_from(expiry.as_micros()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        buf.put_u64_le(micros);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePersonalAccessToken {
    pub name: String,
}

impl Command for DeletePersonalAccessToken {
    const CODE: CommandCode = CommandCode::DeletePersonalAccessToken;
    type Reply = ();

    fn validate(&self) -> Result<(), ValidationError> {
        validate_token_name(&self.name)
    }

    fn encode_to(&self, buf: &mut BytesMut) -> Result<(), ValidationError> {
        put_name(buf, &self.name)
    }
}

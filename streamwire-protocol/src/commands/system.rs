use crate::command::{Command, CommandCode};
use crate::error::ValidationError;
use bytes::BytesMut;

/// Liveness check. Accepted with or without an authenticated session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ping;

impl Command for Ping {
    const CODE: CommandCode = CommandCode::Ping;
    type Reply = ();

    fn encode_to(&self, _buf: &mut BytesMut) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_has_no_body() {
        assert!(Ping.to_bytes().unwrap().is_empty());
        assert_eq!(Ping::CODE.as_u32(), 1);
    }
}

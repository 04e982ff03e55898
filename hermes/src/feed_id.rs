use std::fmt;

use crate::HermesError;

/// A Pyth price feed identifier.
///
/// The canonical text form is 64 hex characters, optionally `0x`-prefixed, e.g.
/// `0xef0d8b6fda2ceba41da15d4095d1da392a0d2f8ed0c6c7bc0f4cfac8c280b56d` for
/// SOL/USD. On the wire and on-chain it is the raw 32 bytes.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeedId([u8; 32]);

impl FeedId {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parses the hex text form, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, HermesError> {
        let stripped = input.strip_prefix("0x").unwrap_or(input);

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(stripped, &mut bytes)
            .or(Err(HermesError::InvalidFeedId(input.to_string())))?;

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The unprefixed hex form the price service expects in query parameters.
    pub fn to_unprefixed_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

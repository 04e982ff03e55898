use std::fmt;

#[derive(Debug)]
pub enum ReceiverError {
    /// The payload ended before a length-prefixed field it promised.
    TruncatedPayload,
    /// The payload does not start with the accumulator update magic (`PNAU`).
    BadMagic([u8; 4]),
    UnsupportedMajorVersion(u8),
    UnsupportedProofType(u8),
    /// The update's message is not a price feed message.
    UnsupportedMessageType(u8),
    /// The embedded VAA is too short to carry a guardian set index.
    VaaTooShort,
    /// Instruction argument serialization failed.
    Encode(std::io::Error),
}

impl fmt::Display for ReceiverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiverError::TruncatedPayload => write!(f, "truncated accumulator update payload"),
            ReceiverError::BadMagic(magic) => {
                write!(f, "bad accumulator update magic: {magic:02x?}")
            }
            ReceiverError::UnsupportedMajorVersion(v) => {
                write!(f, "unsupported accumulator update major version: {v}")
            }
            ReceiverError::UnsupportedProofType(t) => {
                write!(f, "unsupported accumulator update proof type: {t}")
            }
            ReceiverError::UnsupportedMessageType(t) => {
                write!(f, "unsupported price update message type: {t}")
            }
            ReceiverError::VaaTooShort => write!(f, "embedded VAA is too short"),
            ReceiverError::Encode(e) => write!(f, "failed to encode instruction args: {e}"),
        }
    }
}

impl std::error::Error for ReceiverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReceiverError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

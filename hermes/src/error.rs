use std::fmt;

#[derive(Debug)]
pub enum HermesError {
    /// The feed id text form was not 64 hex characters (plus optional `0x`).
    InvalidFeedId(String),
    /// The price service responded with a non-success HTTP status.
    BadStatus(reqwest::StatusCode),
    /// The request itself failed (connection, timeout, malformed response body).
    Http(reqwest::Error),
    /// A payload in the response was not valid base64.
    InvalidPayload(base64::DecodeError),
}

impl fmt::Display for HermesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HermesError::InvalidFeedId(input) => {
                write!(f, "invalid price feed id: {input}")
            }
            HermesError::BadStatus(status) => {
                write!(f, "price service returned {status}")
            }
            HermesError::Http(e) => write!(f, "price service request failed: {e}"),
            HermesError::InvalidPayload(e) => {
                write!(f, "price update payload is not valid base64: {e}")
            }
        }
    }
}

impl std::error::Error for HermesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HermesError::Http(e) => Some(e),
            HermesError::InvalidPayload(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HermesError {
    fn from(e: reqwest::Error) -> Self {
        HermesError::Http(e)
    }
}

impl From<base64::DecodeError> for HermesError {
    fn from(e: base64::DecodeError) -> Self {
        HermesError::InvalidPayload(e)
    }
}

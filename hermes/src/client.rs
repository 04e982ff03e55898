use base64::{
    engine::general_purpose::STANDARD as BASE64,
    Engine,
};

use crate::{
    FeedId,
    HermesError,
};

pub const DEFAULT_HERMES_URL: &str = "https://hermes.pyth.network";

const LATEST_VAAS_PATH: &str = "/api/latest_vaas";

/// Client for the Hermes price service HTTP API.
pub struct HermesClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for HermesClient {
    fn default() -> Self {
        Self::new(DEFAULT_HERMES_URL)
    }
}

impl HermesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the latest signed update payload for each feed.
    ///
    /// The service responds with one base64 string per accumulator payload;
    /// a single payload may carry updates for several of the requested feeds.
    pub async fn latest_update_data(&self, feeds: &[FeedId]) -> Result<Vec<Vec<u8>>, HermesError> {
        let query: Vec<(&str, String)> = feeds
            .iter()
            .map(|feed| ("ids[]", feed.to_unprefixed_hex()))
            .collect();

        let response = self
            .http
            .get(format!("{}{LATEST_VAAS_PATH}", self.base_url))
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HermesError::BadStatus(response.status()));
        }

        let encoded: Vec<String> = response.json().await?;
        decode_payloads(&encoded)
    }
}

/// Decodes the base64 payloads from a `latest_vaas` response body.
pub fn decode_payloads(encoded: &[String]) -> Result<Vec<Vec<u8>>, HermesError> {
    encoded
        .iter()
        .map(|payload| Ok(BASE64.decode(payload)?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_response_payloads() {
        // A `latest_vaas` body is a plain JSON array of base64 strings.
        let body = r#"["UE5BVQ==", "AAECAw=="]"#;
        let encoded: Vec<String> = serde_json::from_str(body).unwrap();
        let decoded = decode_payloads(&encoded).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0], b"PNAU");
        assert_eq!(decoded[1], [0, 1, 2, 3]);
    }

    #[test]
    fn rejects_invalid_base64() {
        let encoded = vec!["not base64!!".to_string()];
        assert!(matches!(
            decode_payloads(&encoded),
            Err(HermesError::InvalidPayload(_))
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HermesClient::new("https://hermes.pyth.network/");
        assert_eq!(client.base_url, DEFAULT_HERMES_URL);
    }
}

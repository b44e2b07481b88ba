//! Read-only queries against the dapp through the node's inspect endpoint.
use alloy_primitives::Bytes;
use reqwest::{Method, StatusCode};
use rollups_utils::http_client::{HttpClient, HttpClientError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::config::{DecodeMode, InspectConfig, InspectMethod};

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Unknown decode mode: {0}")]
    UnknownDecodeMode(String),

    #[error("Inspect request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Inspect response has no reports")]
    NoReports,

    #[error(transparent)]
    Http(#[from] HttpClientError),

    #[error("Failed to parse inspect response: {0}")]
    Parse(String),

    #[error("Report payload is not valid hex: {0}")]
    InvalidHex(String),

    #[error("Report payload is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InspectReport {
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InspectResponse {
    pub status: String,
    #[serde(default)]
    pub exception_payload: Option<String>,
    #[serde(default)]
    pub reports: Vec<InspectReport>,
    #[serde(default)]
    pub processed_input_count: u64,
}

impl InspectResponse {
    /// All report payloads joined into one `0x`-prefixed hex string.
    pub fn aggregated_payload(&self) -> String {
        let body: String = self.reports.iter().map(|report| strip_hex_prefix(&report.payload)).collect();
        format!("0x{}", body)
    }

    pub fn first_payload(&self) -> Result<&str, InspectError> {
        self.reports.first().map(|report| report.payload.as_str()).ok_or(InspectError::NoReports)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectOutput {
    Hex(String),
    Text(String),
    Bytes(Bytes),
}

impl InspectOutput {
    pub fn decode(payload: &str, mode: DecodeMode) -> Result<Self, InspectError> {
        match mode {
            DecodeMode::NoDecode => Ok(InspectOutput::Hex(payload.to_string())),
            DecodeMode::Utf8 => {
                let bytes = decode_hex(payload)?;
                String::from_utf8(bytes)
                    .map(InspectOutput::Text)
                    .map_err(|e| InspectError::InvalidUtf8(e.to_string()))
            }
            DecodeMode::Uint8Array => decode_hex(payload).map(|bytes| InspectOutput::Bytes(Bytes::from(bytes))),
        }
    }
}

impl std::fmt::Display for InspectOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InspectOutput::Hex(hex) => write!(f, "{}", hex),
            InspectOutput::Text(text) => write!(f, "{}", text),
            InspectOutput::Bytes(bytes) => write!(f, "{:?}", bytes.as_ref()),
        }
    }
}

fn strip_hex_prefix(payload: &str) -> &str {
    payload.strip_prefix("0x").or_else(|| payload.strip_prefix("0X")).unwrap_or(payload)
}

fn decode_hex(payload: &str) -> Result<Vec<u8>, InspectError> {
    hex::decode(strip_hex_prefix(payload)).map_err(|e| InspectError::InvalidHex(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct InspectClient {
    client: HttpClient,
}

impl InspectClient {
    pub fn new(node_url: &Url) -> Result<Self, InspectError> {
        Ok(Self { client: HttpClient::new(node_url.as_str())? })
    }

    /// Sends the request and returns the raw response. Any status other than 200 is an error.
    pub async fn inspect_raw(&self, payload: &str, method: InspectMethod) -> Result<InspectResponse, InspectError> {
        let request = self.client.request().path("inspect");
        let request = match method {
            InspectMethod::Get => request.method(Method::GET).path(payload),
            InspectMethod::Post => request.method(Method::POST).raw_body(payload.as_bytes().to_vec()),
        };
        debug!(url = %request.url(), method = %method, "Sending inspect request");

        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(InspectError::Status { status: status.as_u16(), body });
        }

        let bytes = response.bytes().await.map_err(HttpClientError::from)?;
        serde_json::from_slice(&bytes).map_err(|e| InspectError::Parse(e.to_string()))
    }

    pub async fn inspect(&self, payload: &str, config: InspectConfig) -> Result<InspectOutput, InspectError> {
        let response = self.inspect_raw(payload, config.method).await?;
        info!(
            status = %response.status,
            reports = response.reports.len(),
            processed_input_count = response.processed_input_count,
            "Inspect completed"
        );

        let payload = if config.aggregate { response.aggregated_payload() } else { response.first_payload()?.to_string() };
        InspectOutput::decode(&payload, config.decode)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use httpmock::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn response(payloads: &[&str]) -> serde_json::Value {
        json!({
            "status": "Accepted",
            "exception_payload": null,
            "reports": payloads.iter().map(|p| json!({ "payload": p })).collect::<Vec<_>>(),
            "processed_input_count": 3
        })
    }

    fn config(aggregate: bool, decode: DecodeMode, method: InspectMethod) -> InspectConfig {
        InspectConfig { aggregate, decode, method }
    }

    fn client(server: &MockServer) -> InspectClient {
        InspectClient::new(&Url::parse(&server.base_url()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn aggregate_concatenates_report_payloads() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/inspect/balance");
            then.status(200).json_body(response(&["0xAA", "0xBB"]));
        });

        let output = client(&server)
            .inspect("balance", config(true, DecodeMode::NoDecode, InspectMethod::Get))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(output, InspectOutput::Hex("0xAABB".to_string()));
    }

    #[tokio::test]
    async fn first_report_is_decoded_as_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/inspect/hello");
            then.status(200).json_body(response(&["0x68656c6c6f", "0x00"]));
        });

        let output =
            client(&server).inspect("hello", config(false, DecodeMode::Utf8, InspectMethod::Get)).await.unwrap();

        assert_eq!(output, InspectOutput::Text("hello".to_string()));
    }

    #[tokio::test]
    async fn post_sends_payload_as_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/inspect").body("{\"action\":\"balance\"}");
            then.status(200).json_body(response(&["0x0102"]));
        });

        let output = client(&server)
            .inspect("{\"action\":\"balance\"}", config(false, DecodeMode::Uint8Array, InspectMethod::Post))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(output, InspectOutput::Bytes(Bytes::from_static(&[1, 2])));
    }

    #[tokio::test]
    async fn non_ok_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/inspect/x");
            then.status(500).body("machine halted");
        });

        let error = client(&server).inspect("x", InspectConfig::default()).await.unwrap_err();

        assert_matches!(error, InspectError::Status { status: 500, body } if body == "machine halted");
    }

    #[tokio::test]
    async fn missing_reports_is_an_error_unless_aggregating() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/inspect/empty");
            then.status(200).json_body(response(&[]));
        });
        let client = client(&server);

        let error = client.inspect("empty", InspectConfig::default()).await.unwrap_err();
        assert_matches!(error, InspectError::NoReports);

        let output = client.inspect("empty", config(true, DecodeMode::NoDecode, InspectMethod::Get)).await.unwrap();
        assert_eq!(output, InspectOutput::Hex("0x".to_string()));
    }

    #[rstest]
    #[case("0xzz", DecodeMode::Uint8Array)]
    #[case("0xff", DecodeMode::Utf8)]
    fn undecodable_payloads_fail(#[case] payload: &str, #[case] mode: DecodeMode) {
        assert!(InspectOutput::decode(payload, mode).is_err());
    }
}

//! Client-wide defaults and the per-call overrides layered on top of them.
//!
//! Every public operation takes an `Option`-only options struct. It is merged over [`SdkConfig`]
//! exactly once when the call starts, and the merged value is what the call uses until it returns.
use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{address, Address};
use url::Url;

use crate::error::ConfigError;
use crate::inspect::InspectError;
use crate::retry::RetryPolicy;

pub const DEFAULT_NODE_URL: &str = "http://localhost:8080";
pub const DEFAULT_DAPP_ADDRESS: Address = address!("70ac08179605AF2D9e75782b8DEcDD3c22aA4D0C");
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(3000);
pub const DEFAULT_DELAY_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_SYNC: bool = true;
pub const DEFAULT_AGGREGATE: bool = false;

/// Timing of the input-result polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingParams {
    /// Wait before the first retry after the indexer reports the input as not found.
    pub initial_delay: Duration,
    /// Wait between any two later polls.
    pub delay_interval: Duration,
}

impl Default for PollingParams {
    fn default() -> Self {
        Self { initial_delay: DEFAULT_INITIAL_DELAY, delay_interval: DEFAULT_DELAY_INTERVAL }
    }
}

/// How inspect report payloads are handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display, strum_macros::EnumString)]
pub enum DecodeMode {
    /// `0x`-prefixed hex string.
    #[default]
    #[strum(serialize = "no-decode")]
    NoDecode,
    #[strum(serialize = "utf-8")]
    Utf8,
    #[strum(serialize = "uint8Array")]
    Uint8Array,
}

impl DecodeMode {
    pub fn parse(raw: &str) -> Result<Self, InspectError> {
        DecodeMode::from_str(raw).map_err(|_| InspectError::UnknownDecodeMode(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum InspectMethod {
    /// Payload in the URL path: `GET {node}/inspect/{payload}`.
    #[default]
    Get,
    /// Payload as the request body: `POST {node}/inspect`.
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectConfig {
    pub aggregate: bool,
    pub decode: DecodeMode,
    pub method: InspectMethod,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self { aggregate: DEFAULT_AGGREGATE, decode: DecodeMode::default(), method: InspectMethod::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    pub node_url: Url,
    pub dapp_address: Address,
    pub polling: PollingParams,
    /// Whether submissions wait for the input to be processed.
    pub sync: bool,
    pub inspect: InspectConfig,
    /// Retry policy of point lookups (`get_notice`, `get_voucher`, ...).
    pub lookup_retry: RetryPolicy,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            node_url: Url::parse(DEFAULT_NODE_URL).expect("default node URL is valid"),
            dapp_address: DEFAULT_DAPP_ADDRESS,
            polling: PollingParams::default(),
            sync: DEFAULT_SYNC,
            inspect: InspectConfig::default(),
            lookup_retry: RetryPolicy::default(),
        }
    }
}

impl SdkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_url.cannot_be_a_base() {
            return Err(ConfigError::Invalid { field: "node_url", message: format!("{} is not a base URL", self.node_url) });
        }
        validate_polling(&self.polling)?;
        if self.lookup_retry.max_attempts == Some(0) {
            return Err(ConfigError::Invalid { field: "lookup_retry", message: "max_attempts must be at least 1".into() });
        }
        Ok(())
    }
}

fn validate_polling(polling: &PollingParams) -> Result<(), ConfigError> {
    if polling.delay_interval.is_zero() {
        return Err(ConfigError::Invalid { field: "delay_interval", message: "must be greater than zero".into() });
    }
    Ok(())
}

/// Per-call overrides for submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceOptions {
    pub sync: Option<bool>,
    pub initial_delay: Option<Duration>,
    pub delay_interval: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceSettings {
    pub sync: bool,
    pub polling: PollingParams,
}

impl AdvanceOptions {
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = Some(sync);
        self
    }

    pub fn resolve(&self, config: &SdkConfig) -> Result<AdvanceSettings, ConfigError> {
        let polling = PollingParams {
            initial_delay: self.initial_delay.unwrap_or(config.polling.initial_delay),
            delay_interval: self.delay_interval.unwrap_or(config.polling.delay_interval),
        };
        validate_polling(&polling)?;
        Ok(AdvanceSettings { sync: self.sync.unwrap_or(config.sync), polling })
    }
}

/// Per-call overrides for inspect requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InspectOptions {
    pub aggregate: Option<bool>,
    pub decode: Option<DecodeMode>,
    pub method: Option<InspectMethod>,
}

impl InspectOptions {
    pub fn resolve(&self, defaults: &InspectConfig) -> InspectConfig {
        InspectConfig {
            aggregate: self.aggregate.unwrap_or(defaults.aggregate),
            decode: self.decode.unwrap_or(defaults.decode),
            method: self.method.unwrap_or(defaults.method),
        }
    }
}

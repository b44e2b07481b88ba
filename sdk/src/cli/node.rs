use clap::Args;
use url::Url;

use crate::config::{DEFAULT_DELAY_INTERVAL, DEFAULT_INITIAL_DELAY};

#[derive(Debug, Clone, Args)]
pub struct NodeCliArgs {
    /// Base URL of the rollups node. The GraphQL and inspect endpoints hang off it.
    #[arg(env = "CARTESI_NODE_URL", long, default_value = "http://localhost:8080")]
    pub node_url: Url,

    /// Address of the dapp contract.
    #[arg(env = "CARTESI_DAPP_ADDRESS", long)]
    pub dapp_address: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct PollingCliArgs {
    /// Wait in milliseconds before the first retry when the node has not indexed the input yet.
    #[arg(env = "CARTESI_POLL_INITIAL_DELAY_MS", long, default_value_t = DEFAULT_INITIAL_DELAY.as_millis() as u64)]
    pub initial_delay_ms: u64,

    /// Wait in milliseconds between later polls.
    #[arg(env = "CARTESI_POLL_INTERVAL_MS", long, default_value_t = DEFAULT_DELAY_INTERVAL.as_millis() as u64)]
    pub delay_interval_ms: u64,

    /// Return as soon as the transaction is mined instead of waiting for the input to be processed.
    #[arg(env = "CARTESI_NO_SYNC", long)]
    pub no_sync: bool,
}

#[derive(Debug, Clone, Args)]
pub struct InspectCliArgs {
    /// Concatenate every report payload instead of returning the first one.
    #[arg(env = "CARTESI_INSPECT_AGGREGATE", long)]
    pub aggregate: bool,

    /// One of `no-decode`, `utf-8` or `uint8Array`.
    #[arg(env = "CARTESI_INSPECT_DECODE", long, default_value = "no-decode")]
    pub decode: String,

    /// `get` or `post`.
    #[arg(env = "CARTESI_INSPECT_METHOD", long, default_value = "get")]
    pub inspect_method: String,
}

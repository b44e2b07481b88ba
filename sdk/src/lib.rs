//! Client SDK for Cartesi rollups dapps.
//!
//! [`RollupsClient`] bundles the two backends a dapp client needs: an [`IndexerClient`] that reads
//! inputs and outputs from the node, and a [`RollupsChainClient`] that sends transactions to the
//! rollups contracts. Every operation is a method on it and takes an `Option`-only options
//! struct merged over [`SdkConfig`] for that call.
pub mod advance;
pub mod cli;
pub mod config;
pub mod deposits;
pub mod error;
pub mod inspect;
mod notices;
pub mod params;
pub mod poller;
mod queries;
pub mod retry;
mod vouchers;

use std::sync::Arc;

use alloy_primitives::Address;
pub use rollups_chain_client_interface::{RollupsChainClient, RollupsContracts, SubmissionReceipt};
use rollups_ethereum_client::EthereumRollupsClient;
use rollups_graphql_client::GraphQlIndexerClient;
pub use rollups_indexer_client_interface::{
    CompletionStatus, IndexerClient, Input, InputOutputs, Notice, Proof, Report, Voucher,
};
use tracing::info;

pub use crate::advance::{AdvanceOutcome, Erc20Deposit, Erc721Deposit, EtherDeposit, ProcessedInput, SubmittedInput};
pub use crate::config::{AdvanceOptions, DecodeMode, InspectMethod, InspectOptions, SdkConfig};
pub use crate::error::{SdkError, SdkResult};
use crate::inspect::{InspectClient, InspectOutput};
use crate::params::RollupsParams;
pub use crate::poller::poll_input_result;

pub struct RollupsClient {
    indexer: Arc<dyn IndexerClient>,
    chain: Arc<dyn RollupsChainClient>,
    inspect: InspectClient,
    config: SdkConfig,
}

impl RollupsClient {
    pub fn new(
        config: SdkConfig,
        indexer: Arc<dyn IndexerClient>,
        chain: Arc<dyn RollupsChainClient>,
    ) -> SdkResult<Self> {
        config.validate()?;
        let inspect = InspectClient::new(&config.node_url)?;
        Ok(Self { indexer, chain, inspect, config })
    }

    /// GraphQL indexer on the node plus an alloy client signing with the configured key. Without a
    /// key the chain client is read-only: queries, inspect and view calls work, submissions fail.
    pub fn from_params(params: RollupsParams) -> SdkResult<Self> {
        let indexer = GraphQlIndexerClient::new(&params.sdk.node_url)?;
        let chain: Arc<dyn RollupsChainClient> = match params.ethereum.private_key {
            Some(_) => Arc::new(EthereumRollupsClient::new_with_args(&params.ethereum)?),
            None => Arc::new(EthereumRollupsClient::new_read_only(&params.ethereum)),
        };
        info!(
            graphql = %indexer.endpoint(),
            rpc = %params.ethereum.rpc_url,
            dapp = %params.sdk.dapp_address,
            signer = %chain.signer_address(),
            read_only = params.ethereum.private_key.is_none(),
            "Rollups client initialized"
        );
        Self::new(params.sdk, Arc::new(indexer), chain)
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn dapp(&self) -> Address {
        self.config.dapp_address
    }

    pub fn indexer(&self) -> &dyn IndexerClient {
        self.indexer.as_ref()
    }

    pub fn chain(&self) -> &dyn RollupsChainClient {
        self.chain.as_ref()
    }

    /// Runs an inspect query. Inspect requests never change the dapp state and are not retried.
    pub async fn inspect(&self, payload: &str, options: InspectOptions) -> SdkResult<InspectOutput> {
        let config = options.resolve(&self.config.inspect);
        Ok(self.inspect.inspect(payload, config).await?)
    }
}

use alloy_primitives::{address, Address, Bytes, B256, U256};
use async_trait::async_trait;
use mockall::automock;
use rollups_indexer_client_interface::Proof;
use serde::{Deserialize, Serialize};

/// Addresses of the rollups entry-point contracts on the base layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupsContracts {
    pub input_box: Address,
    pub ether_portal: Address,
    pub erc20_portal: Address,
    pub erc721_portal: Address,
    pub dapp_address_relay: Address,
}

impl Default for RollupsContracts {
    /// Deterministic deployment addresses of the v1 rollups contracts.
    fn default() -> Self {
        Self {
            input_box: address!("59b22D57D4f067708AB0c00552767405926dc768"),
            ether_portal: address!("Ffdbe43d4c855BF7e0f105c400A50857f53AB044"),
            erc20_portal: address!("9C21AEb2093C32DDbC53eEF24B873BDCd1aDa1DB"),
            erc721_portal: address!("237F8DD094C0e47f4236f12b4Fa01d6Dae89fb87"),
            dapp_address_relay: address!("F5DE34d6BbC0446E2a45719E718efEbaaE179daE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

/// Mined transaction, reduced to what callers need to correlate it with rollup inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    /// Logs in the order the transaction emitted them.
    pub logs: Vec<ReceiptLog>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChainClientError {
    #[error("RPC error during {operation}: {message}")]
    Rpc { operation: String, message: String },

    #[error("Contract call {operation} failed: {message}")]
    Contract { operation: String, message: String },

    #[error("Transaction {transaction_hash} for {operation} was reverted")]
    Reverted { operation: String, transaction_hash: B256 },

    #[error("Invalid chain client configuration: {0}")]
    Config(String),
}

impl ChainClientError {
    pub fn rpc(operation: impl Into<String>, error: impl std::fmt::Display) -> Self {
        ChainClientError::Rpc { operation: operation.into(), message: error.to_string() }
    }

    pub fn contract(operation: impl Into<String>, error: impl std::fmt::Display) -> Self {
        ChainClientError::Contract { operation: operation.into(), message: error.to_string() }
    }
}

/// Base-layer side of the rollup: entry points that register inputs and the dapp contract that
/// executes vouchers and validates notices.
///
/// Every method that sends a transaction waits for its receipt before returning. None of them
/// retry.
#[automock]
#[async_trait]
pub trait RollupsChainClient: Send + Sync {
    /// Account that signs every transaction sent by this client.
    fn signer_address(&self) -> Address;

    fn contracts(&self) -> RollupsContracts;

    async fn add_input(&self, dapp: Address, payload: Bytes) -> Result<SubmissionReceipt, ChainClientError>;

    async fn erc20_allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256, ChainClientError>;

    async fn erc20_approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<SubmissionReceipt, ChainClientError>;

    async fn erc20_deposit(
        &self,
        token: Address,
        dapp: Address,
        amount: U256,
        exec_layer_data: Bytes,
    ) -> Result<SubmissionReceipt, ChainClientError>;

    /// Operator approved for `token_id`, or the zero address when there is none.
    async fn erc721_get_approved(&self, token: Address, token_id: U256) -> Result<Address, ChainClientError>;

    async fn erc721_approve(
        &self,
        token: Address,
        to: Address,
        token_id: U256,
    ) -> Result<SubmissionReceipt, ChainClientError>;

    async fn erc721_deposit(
        &self,
        token: Address,
        dapp: Address,
        token_id: U256,
        base_layer_data: Bytes,
        exec_layer_data: Bytes,
    ) -> Result<SubmissionReceipt, ChainClientError>;

    async fn ether_deposit(
        &self,
        dapp: Address,
        value: U256,
        exec_layer_data: Bytes,
    ) -> Result<SubmissionReceipt, ChainClientError>;

    async fn relay_dapp_address(&self, dapp: Address) -> Result<SubmissionReceipt, ChainClientError>;

    async fn was_voucher_executed(
        &self,
        dapp: Address,
        input_index: u64,
        voucher_index: u64,
    ) -> Result<bool, ChainClientError>;

    async fn execute_voucher(
        &self,
        dapp: Address,
        destination: Address,
        payload: Bytes,
        proof: Proof,
    ) -> Result<SubmissionReceipt, ChainClientError>;

    async fn validate_notice(&self, dapp: Address, payload: Bytes, proof: Proof) -> Result<bool, ChainClientError>;
}

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{address, keccak256, Address, Bytes, B256, U256};
use rollups_chain_client_interface::{MockRollupsChainClient, ReceiptLog, RollupsContracts, SubmissionReceipt};
use rollups_indexer_client_interface::IndexerClient;
use rollups_sdk::config::PollingParams;
use rollups_sdk::retry::RetryPolicy;
use rollups_sdk::{RollupsClient, SdkConfig};
use url::Url;

pub const DAPP: Address = address!("70ac08179605AF2D9e75782b8DEcDD3c22aA4D0C");
pub const SIGNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const TOKEN: Address = address!("ae7f61eCf06C65405560166b259C54031428A9C4");

pub fn contracts() -> RollupsContracts {
    RollupsContracts::default()
}

/// `InputAdded` log of the input box registering input `index` for the dapp.
pub fn input_added(index: u64) -> ReceiptLog {
    ReceiptLog {
        address: contracts().input_box,
        topics: vec![
            keccak256("InputAdded(address,uint256,address,bytes)".as_bytes()),
            DAPP.into_word(),
            B256::from(U256::from(index)),
        ],
        data: Bytes::from(vec![0u8; 128]),
    }
}

pub fn receipt(tx: u8, logs: Vec<ReceiptLog>) -> SubmissionReceipt {
    SubmissionReceipt { transaction_hash: B256::repeat_byte(tx), block_number: Some(tx as u64), logs }
}

/// Chain mock with the signer and default contracts wired in.
pub fn chain_mock() -> MockRollupsChainClient {
    let mut chain = MockRollupsChainClient::new();
    chain.expect_signer_address().return_const(SIGNER);
    chain.expect_contracts().return_const(contracts());
    chain
}

pub fn fast_config(node_url: &str) -> SdkConfig {
    SdkConfig {
        node_url: Url::parse(node_url).unwrap(),
        dapp_address: DAPP,
        polling: PollingParams { initial_delay: Duration::from_millis(20), delay_interval: Duration::from_millis(10) },
        lookup_retry: RetryPolicy::fixed(Duration::from_millis(10), Some(3)),
        ..Default::default()
    }
}

pub fn client(
    config: SdkConfig,
    indexer: impl IndexerClient + 'static,
    chain: MockRollupsChainClient,
) -> RollupsClient {
    RollupsClient::new(config, Arc::new(indexer), Arc::new(chain)).unwrap()
}

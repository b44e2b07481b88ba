use alloy_primitives::Bytes;
use rollups_chain_client_interface::ChainClientError;
use rollups_indexer_client_interface::{CompletionStatus, IndexerError};
use rollups_utils::http_client::HttpClientError;
use thiserror::Error;

use crate::inspect::InspectError;

pub type SdkResult<T> = Result<T, SdkError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Indexer error: {0}")]
    Indexer(#[from] IndexerError),

    #[error("Chain client error: {0}")]
    Chain(#[from] ChainClientError),

    #[error("HTTP client error: {0}")]
    Http(#[from] HttpClientError),

    #[error("Inspect error: {0}")]
    Inspect(#[from] InspectError),

    /// The dapp finished processing the input without accepting it. `message` is the hex payload
    /// of the last report when the dapp produced one, `Advance error: <STATUS>` otherwise.
    #[error("{message}")]
    Rejected { input_index: u64, status: CompletionStatus, last_report: Option<Bytes>, message: String },

    #[error("Voucher {voucher_index} of input {input_index} has no proof yet")]
    MissingVoucherProof { input_index: u64, voucher_index: u64 },

    #[error("Notice {notice_index} of input {input_index} has no proof yet")]
    MissingNoticeProof { input_index: u64, notice_index: u64 },

    #[error("Could not find the input index in the receipt of {transaction_hash}")]
    InputIndexNotFound { transaction_hash: String },

    #[error("Invalid deposit payload: {0}")]
    DepositPayload(String),
}

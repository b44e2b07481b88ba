use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Processing state of an input as reported by the indexer.
///
/// An input starts as [`CompletionStatus::Unprocessed`] and moves exactly once to one of the
/// terminal states.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display, strum_macros::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionStatus {
    Unprocessed,
    Accepted,
    Rejected,
    Exception,
    MachineHalted,
    CycleLimitExceeded,
    TimeLimitExceeded,
    PayloadLengthLimitExceeded,
}

impl CompletionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CompletionStatus::Unprocessed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub index: u64,
    pub status: CompletionStatus,
    pub msg_sender: Option<Address>,
    /// Block timestamp (seconds) of the transaction that added the input.
    pub timestamp: Option<u64>,
    pub block_number: Option<u64>,
    pub payload: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputValidityProof {
    pub input_index_within_epoch: u64,
    pub output_index_within_input: u64,
    pub output_hashes_root_hash: B256,
    pub vouchers_epoch_root_hash: B256,
    pub notices_epoch_root_hash: B256,
    pub machine_state_hash: B256,
    pub output_hash_in_output_hashes_siblings: Vec<B256>,
    pub output_hashes_in_epoch_siblings: Vec<B256>,
}

/// Evidence that an output belongs to a closed epoch. Only present once the epoch is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub validity: OutputValidityProof,
    pub context: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub index: u64,
    pub input_index: u64,
    pub payload: Bytes,
    pub proof: Option<Proof>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub index: u64,
    pub input_index: u64,
    pub payload: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    pub index: u64,
    pub input_index: u64,
    pub destination: Address,
    pub payload: Bytes,
    pub proof: Option<Proof>,
}

/// Outputs produced by processing one input, in the order the indexer returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputOutputs {
    pub notices: Vec<Notice>,
    pub reports: Vec<Report>,
    pub vouchers: Vec<Voucher>,
}

impl InputOutputs {
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty() && self.reports.is_empty() && self.vouchers.is_empty()
    }
}

/// Snapshot of an input together with its outputs, as seen by a single indexer lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputWithOutputs {
    pub input: Input,
    pub outputs: InputOutputs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexerErrorKind {
    /// The requested resource is not indexed yet. Callers may retry.
    NotFound,
    /// Anything else. Never retried.
    Fatal,
}

#[derive(Debug, thiserror::Error)]
pub enum IndexerError {
    #[error("{entity} not found: {message}")]
    NotFound { entity: String, message: String },

    #[error("Indexer query {operation} failed: {message}")]
    Query { operation: String, message: String },

    #[error("Network error during {operation}: {message}")]
    Network { operation: String, message: String },

    #[error("Indexer API error during {operation} (status {status}): {message}")]
    Api { operation: String, status: u16, message: String },

    #[error("Failed to parse response during {operation}: {message}")]
    Parse { operation: String, message: String },
}

impl IndexerError {
    pub fn kind(&self) -> IndexerErrorKind {
        match self {
            IndexerError::NotFound { .. } => IndexerErrorKind::NotFound,
            _ => IndexerErrorKind::Fatal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == IndexerErrorKind::NotFound
    }

    pub fn not_found(entity: impl Into<String>, message: impl Into<String>) -> Self {
        IndexerError::NotFound { entity: entity.into(), message: message.into() }
    }

    pub fn query(operation: impl Into<String>, message: impl Into<String>) -> Self {
        IndexerError::Query { operation: operation.into(), message: message.into() }
    }

    pub fn parse(operation: impl Into<String>, message: impl Into<String>) -> Self {
        IndexerError::Parse { operation: operation.into(), message: message.into() }
    }
}

/// Read access to the rollups indexer.
///
/// Every lookup for a single resource returns [`IndexerError::NotFound`] while the indexer has not
/// seen that resource yet, so callers can tell "not yet" apart from real failures without looking
/// at error messages.
#[automock]
#[async_trait]
pub trait IndexerClient: Send + Sync {
    /// Input with all of its notices, reports and vouchers.
    async fn get_input_result(&self, input_index: u64) -> Result<InputWithOutputs, IndexerError>;

    async fn get_input(&self, input_index: u64) -> Result<Input, IndexerError>;

    async fn get_inputs(&self) -> Result<Vec<Input>, IndexerError>;

    async fn get_notice(&self, input_index: u64, notice_index: u64) -> Result<Notice, IndexerError>;

    /// Notices of one input, or every notice when `input_index` is `None`.
    async fn get_notices(&self, input_index: Option<u64>) -> Result<Vec<Notice>, IndexerError>;

    async fn get_report(&self, input_index: u64, report_index: u64) -> Result<Report, IndexerError>;

    async fn get_reports(&self, input_index: Option<u64>) -> Result<Vec<Report>, IndexerError>;

    async fn get_voucher(&self, input_index: u64, voucher_index: u64) -> Result<Voucher, IndexerError>;

    async fn get_vouchers(&self, input_index: Option<u64>) -> Result<Vec<Voucher>, IndexerError>;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("UNPROCESSED", CompletionStatus::Unprocessed)]
    #[case("ACCEPTED", CompletionStatus::Accepted)]
    #[case("REJECTED", CompletionStatus::Rejected)]
    #[case("CYCLE_LIMIT_EXCEEDED", CompletionStatus::CycleLimitExceeded)]
    #[case("PAYLOAD_LENGTH_LIMIT_EXCEEDED", CompletionStatus::PayloadLengthLimitExceeded)]
    fn completion_status_matches_indexer_names(#[case] raw: &str, #[case] expected: CompletionStatus) {
        assert_eq!(CompletionStatus::from_str(raw).unwrap(), expected);
        assert_eq!(expected.to_string(), raw);
        let decoded: CompletionStatus = serde_json::from_str(&format!("\"{}\"", raw)).unwrap();
        assert_eq!(decoded, expected);
    }

    #[rstest]
    fn unknown_status_name_is_rejected() {
        assert_eq!(CompletionStatus::from_str("accepted"), Err(strum::ParseError::VariantNotFound));
    }

    #[rstest]
    fn only_unprocessed_is_not_terminal() {
        assert!(!CompletionStatus::Unprocessed.is_terminal());
        assert!(CompletionStatus::Accepted.is_terminal());
        assert!(CompletionStatus::Exception.is_terminal());
    }

    #[rstest]
    #[case(IndexerError::not_found("input", "input not found"), IndexerErrorKind::NotFound)]
    #[case(IndexerError::query("getInputResult", "boom"), IndexerErrorKind::Fatal)]
    #[case(IndexerError::parse("getInputResult", "bad json"), IndexerErrorKind::Fatal)]
    #[case(
        IndexerError::Network { operation: "getInput".into(), message: "connection refused".into() },
        IndexerErrorKind::Fatal
    )]
    fn error_kind_is_tagged(#[case] error: IndexerError, #[case] kind: IndexerErrorKind) {
        assert_eq!(error.kind(), kind);
    }
}

use alloy_primitives::{Address, Bytes, B256};
use rollups_indexer_client_interface::{
    CompletionStatus, Input, InputOutputs, Notice, OutputValidityProof, Proof, Report, Voucher,
};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub operation_name: &'a str,
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputIndexVariables {
    pub input_index: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeVariables {
    pub input_index: u64,
    pub notice_index: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportVariables {
    pub input_index: u64,
    pub report_index: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherVariables {
    pub input_index: u64,
    pub voucher_index: u64,
}

#[derive(Debug, Serialize)]
pub struct NoVariables {}

/// Relay-style connection. The indexer may return `null` edges, which are dropped.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Option<Edge<T>>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub fn into_nodes<U: From<T>>(self) -> Vec<U> {
        self.edges.into_iter().flatten().map(|edge| U::from(edge.node)).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct InputRef {
    pub index: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityNode {
    pub input_index_within_epoch: u64,
    pub output_index_within_input: u64,
    pub output_hashes_root_hash: B256,
    pub vouchers_epoch_root_hash: B256,
    pub notices_epoch_root_hash: B256,
    pub machine_state_hash: B256,
    pub output_hash_in_output_hashes_siblings: Vec<B256>,
    pub output_hashes_in_epoch_siblings: Vec<B256>,
}

#[derive(Debug, Deserialize)]
pub struct ProofNode {
    pub validity: ValidityNode,
    pub context: Bytes,
}

impl From<ProofNode> for Proof {
    fn from(value: ProofNode) -> Self {
        let v = value.validity;
        Proof {
            validity: OutputValidityProof {
                input_index_within_epoch: v.input_index_within_epoch,
                output_index_within_input: v.output_index_within_input,
                output_hashes_root_hash: v.output_hashes_root_hash,
                vouchers_epoch_root_hash: v.vouchers_epoch_root_hash,
                notices_epoch_root_hash: v.notices_epoch_root_hash,
                machine_state_hash: v.machine_state_hash,
                output_hash_in_output_hashes_siblings: v.output_hash_in_output_hashes_siblings,
                output_hashes_in_epoch_siblings: v.output_hashes_in_epoch_siblings,
            },
            context: value.context,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NoticeNode {
    pub index: u64,
    pub input: InputRef,
    pub payload: Bytes,
    #[serde(default)]
    pub proof: Option<ProofNode>,
}

impl From<NoticeNode> for Notice {
    fn from(value: NoticeNode) -> Self {
        Notice {
            index: value.index,
            input_index: value.input.index,
            payload: value.payload,
            proof: value.proof.map(Proof::from),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportNode {
    pub index: u64,
    pub input: InputRef,
    pub payload: Bytes,
}

impl From<ReportNode> for Report {
    fn from(value: ReportNode) -> Self {
        Report { index: value.index, input_index: value.input.index, payload: value.payload }
    }
}

#[derive(Debug, Deserialize)]
pub struct VoucherNode {
    pub index: u64,
    pub input: InputRef,
    pub destination: Address,
    pub payload: Bytes,
    #[serde(default)]
    pub proof: Option<ProofNode>,
}

impl From<VoucherNode> for Voucher {
    fn from(value: VoucherNode) -> Self {
        Voucher {
            index: value.index,
            input_index: value.input.index,
            destination: value.destination,
            payload: value.payload,
            proof: value.proof.map(Proof::from),
        }
    }
}

/// `BigInt` scalars arrive either as JSON numbers or as decimal strings depending on the node
/// version.
fn big_int<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputNode {
    pub index: u64,
    pub status: CompletionStatus,
    #[serde(default)]
    pub msg_sender: Option<Address>,
    #[serde(default, deserialize_with = "big_int")]
    pub timestamp: Option<u64>,
    #[serde(default, deserialize_with = "big_int")]
    pub block_number: Option<u64>,
    pub payload: Bytes,
}

impl From<InputNode> for Input {
    fn from(value: InputNode) -> Self {
        Input {
            index: value.index,
            status: value.status,
            msg_sender: value.msg_sender,
            timestamp: value.timestamp,
            block_number: value.block_number,
            payload: value.payload,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InputResultNode {
    #[serde(flatten)]
    pub input: InputNode,
    #[serde(default)]
    pub notices: Option<Connection<NoticeNode>>,
    #[serde(default)]
    pub reports: Option<Connection<ReportNode>>,
    #[serde(default)]
    pub vouchers: Option<Connection<VoucherNode>>,
}

impl InputResultNode {
    pub fn into_parts(self) -> (Input, InputOutputs) {
        let outputs = InputOutputs {
            notices: self.notices.map(Connection::into_nodes).unwrap_or_default(),
            reports: self.reports.map(Connection::into_nodes).unwrap_or_default(),
            vouchers: self.vouchers.map(Connection::into_nodes).unwrap_or_default(),
        };
        (Input::from(self.input), outputs)
    }
}

#[derive(Debug, Deserialize)]
pub struct InputResultData {
    pub input: Option<InputResultNode>,
}

#[derive(Debug, Deserialize)]
pub struct InputData {
    pub input: Option<InputNode>,
}

#[derive(Debug, Deserialize)]
pub struct InputsData {
    pub inputs: Option<Connection<InputNode>>,
}

#[derive(Debug, Deserialize)]
pub struct NoticeData {
    pub notice: Option<NoticeNode>,
}

#[derive(Debug, Deserialize)]
pub struct NoticesData {
    pub notices: Option<Connection<NoticeNode>>,
}

#[derive(Debug, Deserialize)]
pub struct ReportData {
    pub report: Option<ReportNode>,
}

#[derive(Debug, Deserialize)]
pub struct ReportsData {
    pub reports: Option<Connection<ReportNode>>,
}

#[derive(Debug, Deserialize)]
pub struct VoucherData {
    pub voucher: Option<VoucherNode>,
}

#[derive(Debug, Deserialize)]
pub struct VouchersData {
    pub vouchers: Option<Connection<VoucherNode>>,
}

/// Outputs nested under `input(index:)` for the `*ByInput` queries.
#[derive(Debug, Deserialize)]
pub struct InputOutputsNode {
    #[serde(default)]
    pub notices: Option<Connection<NoticeNode>>,
    #[serde(default)]
    pub reports: Option<Connection<ReportNode>>,
    #[serde(default)]
    pub vouchers: Option<Connection<VoucherNode>>,
}

#[derive(Debug, Deserialize)]
pub struct InputOutputsData {
    pub input: Option<InputOutputsNode>,
}

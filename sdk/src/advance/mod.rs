//! Sending inputs to the rollup: raw payloads, token deposits and the dapp address relay.
//!
//! Each submission waits for its receipt, reads the assigned input index from it, and then either
//! returns right away or polls the indexer until the input is processed, depending on `sync`.
pub mod index;

use alloy_primitives::{Address, Bytes, B256, U256};
use rollups_chain_client_interface::SubmissionReceipt;
use rollups_indexer_client_interface::InputOutputs;
use serde::Serialize;
use tracing::info;

pub use self::index::{extract_input_index, index_location, EntryPoint, IndexLocation, WordPosition};
use crate::config::{AdvanceOptions, AdvanceSettings};
use crate::error::{SdkError, SdkResult};
use crate::poller::poll_input_result;
use crate::RollupsClient;

/// A mined submission, together with the input index it was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedInput {
    pub entry_point: EntryPoint,
    pub receipt: SubmissionReceipt,
    input_index: Option<u64>,
}

impl SubmittedInput {
    pub fn new(entry_point: EntryPoint, receipt: SubmissionReceipt, input_box: Address, dapp: Address) -> Self {
        let input_index = extract_input_index(entry_point, &receipt, input_box, dapp);
        Self { entry_point, receipt, input_index }
    }

    /// `None` when the receipt carries no `InputAdded` log for the dapp.
    pub fn input_index(&self) -> Option<u64> {
        self.input_index
    }

    pub fn transaction_hash(&self) -> B256 {
        self.receipt.transaction_hash
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedInput {
    pub input_index: u64,
    pub transaction_hash: B256,
    pub outputs: InputOutputs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// `sync` was off: the transaction is mined, the input has not been waited for.
    Submitted(SubmittedInput),
    /// `sync` was on: the dapp accepted the input and produced these outputs.
    Processed(ProcessedInput),
}

impl AdvanceOutcome {
    pub fn outputs(&self) -> Option<&InputOutputs> {
        match self {
            AdvanceOutcome::Processed(processed) => Some(&processed.outputs),
            AdvanceOutcome::Submitted(_) => None,
        }
    }

    pub fn input_index(&self) -> Option<u64> {
        match self {
            AdvanceOutcome::Processed(processed) => Some(processed.input_index),
            AdvanceOutcome::Submitted(submitted) => submitted.input_index(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc20Deposit {
    pub token: Address,
    pub amount: U256,
    pub exec_layer_data: Bytes,
}

impl Erc20Deposit {
    pub fn new(token: Address, amount: U256) -> Self {
        Self { token, amount, exec_layer_data: Bytes::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc721Deposit {
    pub token: Address,
    pub token_id: U256,
    pub base_layer_data: Bytes,
    pub exec_layer_data: Bytes,
}

impl Erc721Deposit {
    pub fn new(token: Address, token_id: U256) -> Self {
        Self { token, token_id, base_layer_data: Bytes::new(), exec_layer_data: Bytes::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtherDeposit {
    pub value: U256,
    pub exec_layer_data: Bytes,
}

impl EtherDeposit {
    pub fn new(value: U256) -> Self {
        Self { value, exec_layer_data: Bytes::new() }
    }
}

impl RollupsClient {
    /// Adds `payload` to the input box for the configured dapp.
    pub async fn advance_input(&self, payload: impl Into<Bytes>, options: AdvanceOptions) -> SdkResult<AdvanceOutcome> {
        let settings = options.resolve(self.config())?;
        let receipt = self.chain().add_input(self.dapp(), payload.into()).await?;
        self.finish_submission(EntryPoint::InputBox, receipt, settings).await
    }

    /// Deposits ERC20 tokens through the portal. When the portal's allowance is below
    /// `deposit.amount`, the missing difference is approved first and the approval is mined before
    /// the deposit is sent.
    pub async fn deposit_erc20(&self, deposit: Erc20Deposit, options: AdvanceOptions) -> SdkResult<AdvanceOutcome> {
        let settings = options.resolve(self.config())?;
        let chain = self.chain();
        let portal = chain.contracts().erc20_portal;

        let allowance = chain.erc20_allowance(deposit.token, chain.signer_address(), portal).await?;
        if allowance < deposit.amount {
            let missing = deposit.amount - allowance;
            info!(token = %deposit.token, allowance = %allowance, missing = %missing, "Raising ERC20 portal allowance");
            chain.erc20_approve(deposit.token, portal, missing).await?;
        }

        let receipt =
            chain.erc20_deposit(deposit.token, self.dapp(), deposit.amount, deposit.exec_layer_data).await?;
        self.finish_submission(EntryPoint::Erc20Portal, receipt, settings).await
    }

    /// Deposits an ERC721 token through the portal, approving the portal for the token first
    /// unless it already is.
    pub async fn deposit_erc721(&self, deposit: Erc721Deposit, options: AdvanceOptions) -> SdkResult<AdvanceOutcome> {
        let settings = options.resolve(self.config())?;
        let chain = self.chain();
        let portal = chain.contracts().erc721_portal;

        let approved = chain.erc721_get_approved(deposit.token, deposit.token_id).await?;
        if approved != portal {
            info!(token = %deposit.token, token_id = %deposit.token_id, "Approving ERC721 portal");
            chain.erc721_approve(deposit.token, portal, deposit.token_id).await?;
        }

        let receipt = chain
            .erc721_deposit(
                deposit.token,
                self.dapp(),
                deposit.token_id,
                deposit.base_layer_data,
                deposit.exec_layer_data,
            )
            .await?;
        self.finish_submission(EntryPoint::Erc721Portal, receipt, settings).await
    }

    pub async fn deposit_ether(&self, deposit: EtherDeposit, options: AdvanceOptions) -> SdkResult<AdvanceOutcome> {
        let settings = options.resolve(self.config())?;
        let receipt = self.chain().ether_deposit(self.dapp(), deposit.value, deposit.exec_layer_data).await?;
        self.finish_submission(EntryPoint::EtherPortal, receipt, settings).await
    }

    /// Tells the dapp its own address through the relay.
    pub async fn relay_dapp_address(&self, options: AdvanceOptions) -> SdkResult<AdvanceOutcome> {
        let settings = options.resolve(self.config())?;
        let receipt = self.chain().relay_dapp_address(self.dapp()).await?;
        self.finish_submission(EntryPoint::DAppAddressRelay, receipt, settings).await
    }

    async fn finish_submission(
        &self,
        entry_point: EntryPoint,
        receipt: SubmissionReceipt,
        settings: AdvanceSettings,
    ) -> SdkResult<AdvanceOutcome> {
        let submitted = SubmittedInput::new(entry_point, receipt, self.chain().contracts().input_box, self.dapp());
        info!(
            log_type = "completed",
            category = "submission",
            entry_point = %entry_point,
            tx_hash = %submitted.transaction_hash(),
            input_index = ?submitted.input_index(),
            "Input submitted."
        );

        if !settings.sync {
            return Ok(AdvanceOutcome::Submitted(submitted));
        }

        let input_index = submitted.input_index().ok_or_else(|| SdkError::InputIndexNotFound {
            transaction_hash: submitted.transaction_hash().to_string(),
        })?;
        let outputs = poll_input_result(self.indexer(), input_index, settings.polling).await?;
        Ok(AdvanceOutcome::Processed(ProcessedInput {
            input_index,
            transaction_hash: submitted.transaction_hash(),
            outputs,
        }))
    }
}

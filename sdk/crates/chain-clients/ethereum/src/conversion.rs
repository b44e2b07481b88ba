use alloy::rpc::types::TransactionReceipt;
use rollups_chain_client_interface::{ChainClientError, ReceiptLog, SubmissionReceipt};
use rollups_indexer_client_interface::Proof;

use crate::bindings;

pub(crate) fn to_sol_proof(proof: Proof) -> bindings::Proof {
    let validity = proof.validity;
    bindings::Proof {
        validity: bindings::OutputValidityProof {
            inputIndexWithinEpoch: validity.input_index_within_epoch,
            outputIndexWithinInput: validity.output_index_within_input,
            outputHashesRootHash: validity.output_hashes_root_hash,
            vouchersEpochRootHash: validity.vouchers_epoch_root_hash,
            noticesEpochRootHash: validity.notices_epoch_root_hash,
            machineStateHash: validity.machine_state_hash,
            outputHashInOutputHashesSiblings: validity.output_hash_in_output_hashes_siblings,
            outputHashesInEpochSiblings: validity.output_hashes_in_epoch_siblings,
        },
        context: proof.context,
    }
}

/// Reduces a mined receipt to a [`SubmissionReceipt`], failing when the transaction reverted.
pub(crate) fn to_submission_receipt(
    operation: &str,
    receipt: TransactionReceipt,
) -> Result<SubmissionReceipt, ChainClientError> {
    if !receipt.status() {
        return Err(ChainClientError::Reverted {
            operation: operation.to_string(),
            transaction_hash: receipt.transaction_hash,
        });
    }

    let logs = receipt
        .inner
        .logs()
        .iter()
        .map(|log| ReceiptLog {
            address: log.address(),
            topics: log.topics().to_vec(),
            data: log.data().data.clone(),
        })
        .collect();

    Ok(SubmissionReceipt { transaction_hash: receipt.transaction_hash, block_number: receipt.block_number, logs })
}

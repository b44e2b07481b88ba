//! Voucher readiness and execution against the dapp contract.
use alloy_primitives::{Address, Bytes};
use rollups_chain_client_interface::SubmissionReceipt;
use rollups_indexer_client_interface::{Proof, Voucher};
use tracing::{debug, info};

use crate::error::{SdkError, SdkResult};
use crate::RollupsClient;

impl RollupsClient {
    /// Vouchers the dapp contract has not executed yet. Checks are sent one at a time and the
    /// first failing check fails the whole listing.
    pub async fn unexecuted_vouchers(&self) -> SdkResult<Vec<Voucher>> {
        let vouchers = self.get_vouchers(None).await?;
        let total = vouchers.len();

        let mut pending = Vec::new();
        for voucher in vouchers {
            if !self.was_voucher_executed(voucher.input_index, voucher.index).await? {
                pending.push(voucher);
            }
        }
        debug!(total, unexecuted = pending.len(), "Checked voucher execution status");
        Ok(pending)
    }

    /// Unexecuted vouchers whose proof is already available, refetched with that proof.
    pub async fn ready_vouchers(&self) -> SdkResult<Vec<Voucher>> {
        let mut ready = Vec::new();
        for voucher in self.unexecuted_vouchers().await? {
            let voucher = self.get_voucher(voucher.input_index, voucher.index).await?;
            if voucher.proof.is_none() {
                debug!(input_index = voucher.input_index, voucher_index = voucher.index, "Voucher has no proof yet");
                continue;
            }
            ready.push(voucher);
        }
        Ok(ready)
    }

    /// Fetches the voucher and executes it. Fails before touching the chain when the epoch holding
    /// the voucher is not closed yet.
    pub async fn execute_voucher(&self, input_index: u64, voucher_index: u64) -> SdkResult<SubmissionReceipt> {
        let voucher = self.get_voucher(input_index, voucher_index).await?;
        let proof = voucher.proof.ok_or(SdkError::MissingVoucherProof { input_index, voucher_index })?;
        self.execute_voucher_with_proof(voucher.destination, voucher.payload, proof).await
    }

    pub async fn execute_voucher_with_proof(
        &self,
        destination: Address,
        payload: Bytes,
        proof: Proof,
    ) -> SdkResult<SubmissionReceipt> {
        let input_index_within_epoch = proof.validity.input_index_within_epoch;
        let receipt = self.chain().execute_voucher(self.dapp(), destination, payload, proof).await?;
        info!(
            log_type = "completed",
            category = "voucher",
            destination = %destination,
            input_index_within_epoch,
            tx_hash = %receipt.transaction_hash,
            "Voucher executed."
        );
        Ok(receipt)
    }

    pub async fn was_voucher_executed(&self, input_index: u64, voucher_index: u64) -> SdkResult<bool> {
        Ok(self.chain().was_voucher_executed(self.dapp(), input_index, voucher_index).await?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use alloy_primitives::{address, B256};
    use assert_matches::assert_matches;
    use mockall::predicate::eq;
    use rollups_chain_client_interface::{ChainClientError, MockRollupsChainClient};
    use rollups_indexer_client_interface::{MockIndexerClient, OutputValidityProof};
    use tracing_test::traced_test;

    use crate::config::{SdkConfig, DEFAULT_DAPP_ADDRESS};
    use crate::retry::RetryPolicy;

    use super::*;

    const DESTINATION: Address = address!("ae7f61eCf06C65405560166b259C54031428A9C4");

    pub(crate) fn proof() -> Proof {
        Proof {
            validity: OutputValidityProof {
                input_index_within_epoch: 0,
                output_index_within_input: 0,
                output_hashes_root_hash: B256::repeat_byte(1),
                vouchers_epoch_root_hash: B256::repeat_byte(2),
                notices_epoch_root_hash: B256::repeat_byte(3),
                machine_state_hash: B256::repeat_byte(4),
                output_hash_in_output_hashes_siblings: vec![B256::repeat_byte(5)],
                output_hashes_in_epoch_siblings: vec![B256::repeat_byte(6)],
            },
            context: Bytes::new(),
        }
    }

    fn voucher(input_index: u64, index: u64, proof: Option<Proof>) -> Voucher {
        Voucher { index, input_index, destination: DESTINATION, payload: Bytes::from_static(&[0xa9, 0x05]), proof }
    }

    fn receipt() -> SubmissionReceipt {
        SubmissionReceipt { transaction_hash: B256::repeat_byte(0xee), block_number: Some(1), logs: vec![] }
    }

    fn client(indexer: MockIndexerClient, chain: MockRollupsChainClient) -> RollupsClient {
        let config = SdkConfig { lookup_retry: RetryPolicy::none(), ..Default::default() };
        RollupsClient::new(config, Arc::new(indexer), Arc::new(chain)).unwrap()
    }

    #[tokio::test]
    async fn ready_vouchers_skip_executed_and_unproven() {
        let mut indexer = MockIndexerClient::new();
        indexer
            .expect_get_vouchers()
            .with(eq(None))
            .returning(|_| Ok(vec![voucher(0, 0, None), voucher(1, 0, None), voucher(2, 1, None)]));
        indexer.expect_get_voucher().with(eq(1), eq(0)).times(1).returning(|i, v| Ok(voucher(i, v, Some(proof()))));
        indexer.expect_get_voucher().with(eq(2), eq(1)).times(1).returning(|i, v| Ok(voucher(i, v, None)));

        let mut chain = MockRollupsChainClient::new();
        chain
            .expect_was_voucher_executed()
            .withf(|dapp, input, _| *dapp == DEFAULT_DAPP_ADDRESS && *input == 0)
            .returning(|_, _, _| Ok(true));
        chain.expect_was_voucher_executed().returning(|_, _, _| Ok(false));

        let ready = client(indexer, chain).ready_vouchers().await.unwrap();

        assert_eq!(ready.len(), 1);
        assert_eq!((ready[0].input_index, ready[0].index), (1, 0));
        assert!(ready[0].proof.is_some());
    }

    #[tokio::test]
    async fn failing_execution_check_fails_the_listing() {
        let mut indexer = MockIndexerClient::new();
        indexer.expect_get_vouchers().returning(|_| Ok(vec![voucher(0, 0, None), voucher(1, 0, None)]));
        let mut chain = MockRollupsChainClient::new();
        chain
            .expect_was_voucher_executed()
            .times(1)
            .returning(|_, _, _| Err(ChainClientError::rpc("wasVoucherExecuted", "connection refused")));

        let error = client(indexer, chain).unexecuted_vouchers().await.unwrap_err();

        assert_matches!(error, SdkError::Chain(ChainClientError::Rpc { .. }));
    }

    #[tokio::test]
    async fn executing_without_proof_makes_no_chain_call() {
        let mut indexer = MockIndexerClient::new();
        indexer.expect_get_voucher().returning(|i, v| Ok(voucher(i, v, None)));
        let mut chain = MockRollupsChainClient::new();
        chain.expect_execute_voucher().never();

        let error = client(indexer, chain).execute_voucher(3, 1).await.unwrap_err();

        assert_matches!(error, SdkError::MissingVoucherProof { input_index: 3, voucher_index: 1 });
    }

    #[traced_test]
    #[tokio::test]
    async fn executing_with_proof_calls_the_dapp() {
        let mut indexer = MockIndexerClient::new();
        indexer.expect_get_voucher().returning(|i, v| {
            let mut proof = proof();
            proof.validity.input_index_within_epoch = 4;
            Ok(voucher(i, v, Some(proof)))
        });
        let mut chain = MockRollupsChainClient::new();
        chain
            .expect_execute_voucher()
            .withf(|dapp, destination, payload, _| {
                *dapp == DEFAULT_DAPP_ADDRESS && *destination == DESTINATION && &payload[..] == [0xa9, 0x05]
            })
            .times(1)
            .returning(|_, _, _, _| Ok(receipt()));

        let executed = client(indexer, chain).execute_voucher(9, 0).await.unwrap();

        assert_eq!(executed.transaction_hash, B256::repeat_byte(0xee));
        assert!(logs_contain("input_index_within_epoch=4"));
    }

    #[tokio::test]
    async fn reverted_execution_is_surfaced() {
        let mut chain = MockRollupsChainClient::new();
        chain.expect_execute_voucher().returning(|_, _, _, _| {
            Err(ChainClientError::Reverted { operation: "executeVoucher".into(), transaction_hash: B256::repeat_byte(0xee) })
        });

        let error = client(MockIndexerClient::new(), chain)
            .execute_voucher_with_proof(DESTINATION, Bytes::new(), proof())
            .await
            .unwrap_err();

        assert_matches!(error, SdkError::Chain(ChainClientError::Reverted { .. }));
    }
}

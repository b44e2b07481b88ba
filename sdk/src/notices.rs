use alloy_primitives::Bytes;
use rollups_indexer_client_interface::Proof;
use tracing::info;

use crate::error::{SdkError, SdkResult};
use crate::RollupsClient;

impl RollupsClient {
    /// Checks a notice against the claim stored in the dapp contract. The notice must already
    /// carry a proof, which only exists once its epoch has been closed.
    pub async fn validate_notice(&self, input_index: u64, notice_index: u64) -> SdkResult<bool> {
        let notice = self.get_notice(input_index, notice_index).await?;
        let proof = notice.proof.ok_or(SdkError::MissingNoticeProof { input_index, notice_index })?;
        let valid = self.validate_notice_with_proof(notice.payload, proof).await?;
        info!(input_index, notice_index, valid, "Notice validated");
        Ok(valid)
    }

    pub async fn validate_notice_with_proof(&self, payload: Bytes, proof: Proof) -> SdkResult<bool> {
        Ok(self.chain().validate_notice(self.dapp(), payload, proof).await?)
    }
}

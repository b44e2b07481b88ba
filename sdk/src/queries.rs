//! Indexer reads exposed on [`RollupsClient`].
//!
//! Point lookups go through [`retry_not_found`] with the configured lookup policy, since an output
//! is often queried right after its input was submitted. List queries are sent once.
use rollups_indexer_client_interface::{Input, InputWithOutputs, Notice, Report, Voucher};

use crate::error::SdkResult;
use crate::retry::retry_not_found;
use crate::RollupsClient;

impl RollupsClient {
    pub async fn get_input(&self, input_index: u64) -> SdkResult<Input> {
        let target = format!("input {}", input_index);
        Ok(retry_not_found(&self.config().lookup_retry, &target, || self.indexer().get_input(input_index)).await?)
    }

    /// Input together with its outputs, whatever its status. Use [`crate::poll_input_result`] to
    /// wait for it to be processed.
    pub async fn get_input_result(&self, input_index: u64) -> SdkResult<InputWithOutputs> {
        let target = format!("input result {}", input_index);
        Ok(retry_not_found(&self.config().lookup_retry, &target, || self.indexer().get_input_result(input_index))
            .await?)
    }

    pub async fn get_inputs(&self) -> SdkResult<Vec<Input>> {
        Ok(self.indexer().get_inputs().await?)
    }

    pub async fn get_notice(&self, input_index: u64, notice_index: u64) -> SdkResult<Notice> {
        let target = format!("notice {}/{}", input_index, notice_index);
        Ok(retry_not_found(&self.config().lookup_retry, &target, || {
            self.indexer().get_notice(input_index, notice_index)
        })
        .await?)
    }

    /// All notices, or only those of `input_index`.
    pub async fn get_notices(&self, input_index: Option<u64>) -> SdkResult<Vec<Notice>> {
        Ok(self.indexer().get_notices(input_index).await?)
    }

    pub async fn get_report(&self, input_index: u64, report_index: u64) -> SdkResult<Report> {
        let target = format!("report {}/{}", input_index, report_index);
        Ok(retry_not_found(&self.config().lookup_retry, &target, || {
            self.indexer().get_report(input_index, report_index)
        })
        .await?)
    }

    pub async fn get_reports(&self, input_index: Option<u64>) -> SdkResult<Vec<Report>> {
        Ok(self.indexer().get_reports(input_index).await?)
    }

    pub async fn get_voucher(&self, input_index: u64, voucher_index: u64) -> SdkResult<Voucher> {
        let target = format!("voucher {}/{}", input_index, voucher_index);
        Ok(retry_not_found(&self.config().lookup_retry, &target, || {
            self.indexer().get_voucher(input_index, voucher_index)
        })
        .await?)
    }

    pub async fn get_vouchers(&self, input_index: Option<u64>) -> SdkResult<Vec<Voucher>> {
        Ok(self.indexer().get_vouchers(input_index).await?)
    }
}

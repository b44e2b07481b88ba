//! [`IndexerClient`] backed by the rollups node GraphQL endpoint.

pub mod client;
pub mod documents;
pub mod types;

use async_trait::async_trait;
use rollups_indexer_client_interface::{
    IndexerClient, IndexerError, Input, InputWithOutputs, Notice, Report, Voucher,
};
use rollups_utils::http_client::HttpClientError;
use url::Url;

use crate::client::GraphQlTransport;
use crate::types::{
    InputData, InputIndexVariables, InputOutputsData, InputResultData, InputsData, NoVariables, NoticeData,
    NoticeVariables, NoticesData, ReportData, ReportVariables, ReportsData, VoucherData, VoucherVariables,
    VouchersData,
};

#[derive(Debug, Clone)]
pub struct GraphQlIndexerClient {
    transport: GraphQlTransport,
}

impl GraphQlIndexerClient {
    pub fn new(node_url: &Url) -> Result<Self, HttpClientError> {
        Ok(Self { transport: GraphQlTransport::new(node_url)? })
    }

    pub fn endpoint(&self) -> Url {
        self.transport.endpoint()
    }

    async fn outputs_of_input(&self, operation: &str, document: &str, input_index: u64) -> Result<InputOutputsData, IndexerError> {
        self.transport.query(operation, document, InputIndexVariables { input_index }).await
    }
}

fn missing(entity: &str) -> IndexerError {
    IndexerError::not_found(entity, format!("{} not found", entity))
}

#[async_trait]
impl IndexerClient for GraphQlIndexerClient {
    async fn get_input_result(&self, input_index: u64) -> Result<InputWithOutputs, IndexerError> {
        let data: InputResultData = self
            .transport
            .query("getInputResult", documents::GET_INPUT_RESULT, InputIndexVariables { input_index })
            .await?;
        let (input, outputs) = data.input.ok_or_else(|| missing("input"))?.into_parts();
        tracing::trace!(
            input_index,
            status = %input.status,
            notices = outputs.notices.len(),
            reports = outputs.reports.len(),
            vouchers = outputs.vouchers.len(),
            "Fetched input result"
        );
        Ok(InputWithOutputs { input, outputs })
    }

    async fn get_input(&self, input_index: u64) -> Result<Input, IndexerError> {
        let data: InputData =
            self.transport.query("input", documents::GET_INPUT, InputIndexVariables { input_index }).await?;
        data.input.map(Input::from).ok_or_else(|| missing("input"))
    }

    async fn get_inputs(&self) -> Result<Vec<Input>, IndexerError> {
        let data: InputsData = self.transport.query("inputs", documents::GET_INPUTS, NoVariables {}).await?;
        Ok(data.inputs.map(|c| c.into_nodes()).unwrap_or_default())
    }

    async fn get_notice(&self, input_index: u64, notice_index: u64) -> Result<Notice, IndexerError> {
        let data: NoticeData = self
            .transport
            .query("notice", &documents::get_notice(), NoticeVariables { input_index, notice_index })
            .await?;
        data.notice.map(Notice::from).ok_or_else(|| missing("notice"))
    }

    async fn get_notices(&self, input_index: Option<u64>) -> Result<Vec<Notice>, IndexerError> {
        match input_index {
            Some(input_index) => {
                let data = self.outputs_of_input("noticesByInput", documents::GET_NOTICES_BY_INPUT, input_index).await?;
                let node = data.input.ok_or_else(|| missing("input"))?;
                Ok(node.notices.map(|c| c.into_nodes()).unwrap_or_default())
            }
            None => {
                let data: NoticesData = self.transport.query("notices", documents::GET_NOTICES, NoVariables {}).await?;
                Ok(data.notices.map(|c| c.into_nodes()).unwrap_or_default())
            }
        }
    }

    async fn get_report(&self, input_index: u64, report_index: u64) -> Result<Report, IndexerError> {
        let data: ReportData = self
            .transport
            .query("report", documents::GET_REPORT, ReportVariables { input_index, report_index })
            .await?;
        data.report.map(Report::from).ok_or_else(|| missing("report"))
    }

    async fn get_reports(&self, input_index: Option<u64>) -> Result<Vec<Report>, IndexerError> {
        match input_index {
            Some(input_index) => {
                let data = self.outputs_of_input("reportsByInput", documents::GET_REPORTS_BY_INPUT, input_index).await?;
                let node = data.input.ok_or_else(|| missing("input"))?;
                Ok(node.reports.map(|c| c.into_nodes()).unwrap_or_default())
            }
            None => {
                let data: ReportsData = self.transport.query("reports", documents::GET_REPORTS, NoVariables {}).await?;
                Ok(data.reports.map(|c| c.into_nodes()).unwrap_or_default())
            }
        }
    }

    async fn get_voucher(&self, input_index: u64, voucher_index: u64) -> Result<Voucher, IndexerError> {
        let data: VoucherData = self
            .transport
            .query("voucher", &documents::get_voucher(), VoucherVariables { input_index, voucher_index })
            .await?;
        data.voucher.map(Voucher::from).ok_or_else(|| missing("voucher"))
    }

    async fn get_vouchers(&self, input_index: Option<u64>) -> Result<Vec<Voucher>, IndexerError> {
        match input_index {
            Some(input_index) => {
                let data =
                    self.outputs_of_input("vouchersByInput", documents::GET_VOUCHERS_BY_INPUT, input_index).await?;
                let node = data.input.ok_or_else(|| missing("input"))?;
                Ok(node.vouchers.map(|c| c.into_nodes()).unwrap_or_default())
            }
            None => {
                let data: VouchersData =
                    self.transport.query("vouchers", documents::GET_VOUCHERS, NoVariables {}).await?;
                Ok(data.vouchers.map(|c| c.into_nodes()).unwrap_or_default())
            }
        }
    }
}

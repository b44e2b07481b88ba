//! Waits for the indexer to finish processing an input.
//!
//! The loop is driven by the input's status alone:
//!
//! - not found: the indexer has not seen the input yet. Wait and query again.
//! - `UNPROCESSED`: the dapp is still working on it. Wait and query again.
//! - `ACCEPTED`: return the outputs, which may be empty.
//! - any other status: fail with [`SdkError::Rejected`].
//!
//! There is no attempt ceiling. Wrap the future in `tokio::time::timeout` to bound it.
use alloy_primitives::Bytes;
use rollups_indexer_client_interface::{CompletionStatus, IndexerClient, InputOutputs, InputWithOutputs};
use tracing::{debug, info};

use crate::config::PollingParams;
use crate::error::{SdkError, SdkResult};

pub async fn poll_input_result(
    indexer: &dyn IndexerClient,
    input_index: u64,
    polling: PollingParams,
) -> SdkResult<InputOutputs> {
    let mut not_found_retries: u64 = 0;
    let mut polls: u64 = 0;

    loop {
        polls += 1;
        debug!(input_index, poll = polls, "Querying input result");

        let delay = match indexer.get_input_result(input_index).await {
            Ok(InputWithOutputs { input, outputs }) => match input.status {
                CompletionStatus::Unprocessed => polling.delay_interval,
                CompletionStatus::Accepted => {
                    info!(
                        input_index,
                        notices = outputs.notices.len(),
                        reports = outputs.reports.len(),
                        vouchers = outputs.vouchers.len(),
                        "Input accepted"
                    );
                    return Ok(outputs);
                }
                status => return Err(rejection(input_index, status, &outputs)),
            },
            Err(e) if e.is_not_found() => {
                not_found_retries += 1;
                if not_found_retries == 1 {
                    polling.initial_delay
                } else {
                    polling.delay_interval
                }
            }
            Err(e) => return Err(e.into()),
        };

        tokio::time::sleep(delay).await;
    }
}

fn rejection(input_index: u64, status: CompletionStatus, outputs: &InputOutputs) -> SdkError {
    let last_report: Option<Bytes> = outputs.reports.last().map(|report| report.payload.clone());
    let message = match &last_report {
        Some(payload) => payload.to_string(),
        None => format!("Advance error: {}", status),
    };
    info!(input_index, status = %status, "Input was not accepted");
    SdkError::Rejected { input_index, status, last_report, message }
}

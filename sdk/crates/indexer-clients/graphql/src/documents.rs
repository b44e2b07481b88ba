//! GraphQL documents understood by the rollups indexer (`{node}/graphql`).

const PROOF_FIELDS: &str = "proof {
      validity {
        inputIndexWithinEpoch
        outputIndexWithinInput
        outputHashesRootHash
        vouchersEpochRootHash
        noticesEpochRootHash
        machineStateHash
        outputHashInOutputHashesSiblings
        outputHashesInEpochSiblings
      }
      context
    }";

pub const GET_INPUT_RESULT: &str = "query getInputResult($inputIndex: Int!) {
  input(index: $inputIndex) {
    index
    status
    msgSender
    timestamp
    blockNumber
    payload
    notices { edges { node { index input { index } payload } } }
    reports { edges { node { index input { index } payload } } }
    vouchers { edges { node { index input { index } destination payload } } }
  }
}";

pub const GET_INPUT: &str = "query input($inputIndex: Int!) {
  input(index: $inputIndex) {
    index
    status
    msgSender
    timestamp
    blockNumber
    payload
  }
}";

pub const GET_INPUTS: &str = "query inputs {
  inputs { edges { node { index status msgSender timestamp blockNumber payload } } }
}";

pub const GET_NOTICES: &str = "query notices {
  notices { edges { node { index input { index } payload } } }
}";

pub const GET_NOTICES_BY_INPUT: &str = "query noticesByInput($inputIndex: Int!) {
  input(index: $inputIndex) {
    notices { edges { node { index input { index } payload } } }
  }
}";

pub const GET_REPORT: &str = "query report($reportIndex: Int!, $inputIndex: Int!) {
  report(reportIndex: $reportIndex, inputIndex: $inputIndex) {
    index
    input { index }
    payload
  }
}";

pub const GET_REPORTS: &str = "query reports {
  reports { edges { node { index input { index } payload } } }
}";

pub const GET_REPORTS_BY_INPUT: &str = "query reportsByInput($inputIndex: Int!) {
  input(index: $inputIndex) {
    reports { edges { node { index input { index } payload } } }
  }
}";

pub const GET_VOUCHERS: &str = "query vouchers {
  vouchers { edges { node { index input { index } destination payload } } }
}";

pub const GET_VOUCHERS_BY_INPUT: &str = "query vouchersByInput($inputIndex: Int!) {
  input(index: $inputIndex) {
    vouchers { edges { node { index input { index } destination payload } } }
  }
}";

/// Single notice lookup, including its proof when the epoch is closed.
pub fn get_notice() -> String {
    format!(
        "query notice($noticeIndex: Int!, $inputIndex: Int!) {{
  notice(noticeIndex: $noticeIndex, inputIndex: $inputIndex) {{
    index
    input {{ index }}
    payload
    {}
  }}
}}",
        PROOF_FIELDS
    )
}

/// Single voucher lookup, including its proof when the epoch is closed.
pub fn get_voucher() -> String {
    format!(
        "query voucher($voucherIndex: Int!, $inputIndex: Int!) {{
  voucher(voucherIndex: $voucherIndex, inputIndex: $inputIndex) {{
    index
    input {{ index }}
    destination
    payload
    {}
  }}
}}",
        PROOF_FIELDS
    )
}

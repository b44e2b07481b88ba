mod common;

use alloy_primitives::{Address, Bytes, U256};
use assert_matches::assert_matches;
use common::{chain_mock, client, fast_config, input_added, receipt, DAPP, SIGNER, TOKEN};
use httpmock::prelude::*;
use mockall::predicate::eq;
use mockall::Sequence;
use rollups_graphql_client::GraphQlIndexerClient;
use rollups_indexer_client_interface::{
    CompletionStatus, Input, InputOutputs, InputWithOutputs, MockIndexerClient, Notice,
};
use rollups_sdk::deposits::Erc20DepositInput;
use rollups_sdk::{AdvanceOptions, AdvanceOutcome, Erc20Deposit, Erc721Deposit, EtherDeposit, SdkError};
use serde_json::json;
use url::Url;

fn accepted(index: u64, notices: Vec<Notice>) -> InputWithOutputs {
    InputWithOutputs {
        input: Input {
            index,
            status: CompletionStatus::Accepted,
            msg_sender: Some(SIGNER),
            timestamp: None,
            block_number: None,
            payload: Bytes::new(),
        },
        outputs: InputOutputs { notices, ..Default::default() },
    }
}

fn notice(input_index: u64, payload: impl Into<Bytes>) -> Notice {
    Notice { index: 0, input_index, payload: payload.into(), proof: None }
}

#[tokio::test]
async fn echo_dapp_returns_hello_notice() {
    let server = MockServer::start();
    let graphql = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .json_body_partial(r#"{"operationName": "getInputResult", "variables": {"inputIndex": 5}}"#);
        then.status(200).json_body(json!({
            "data": {
                "input": {
                    "index": 5,
                    "status": "ACCEPTED",
                    "msgSender": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
                    "payload": "0x68656c6c6f",
                    "notices": { "edges": [ { "node": { "index": 0, "input": { "index": 5 }, "payload": "0x68656c6c6f" } } ] },
                    "reports": { "edges": [] },
                    "vouchers": { "edges": [] }
                }
            }
        }));
    });

    let mut chain = chain_mock();
    chain
        .expect_add_input()
        .withf(|dapp, payload| *dapp == DAPP && &payload[..] == b"hello")
        .times(1)
        .returning(|_, _| Ok(receipt(1, vec![input_added(5)])));

    let indexer = GraphQlIndexerClient::new(&Url::parse(&server.base_url()).unwrap()).unwrap();
    let client = client(fast_config(&server.base_url()), indexer, chain);

    let outcome = client.advance_input(b"hello".to_vec(), AdvanceOptions::default()).await.unwrap();

    graphql.assert();
    let outputs = outcome.outputs().unwrap();
    assert_eq!(outputs.notices.len(), 1);
    assert_eq!(String::from_utf8(outputs.notices[0].payload.to_vec()).unwrap(), "hello");
    assert_eq!(outcome.input_index(), Some(5));
}

#[tokio::test]
async fn async_mode_returns_receipt_without_polling() {
    let mut chain = chain_mock();
    chain.expect_add_input().returning(|_, _| Ok(receipt(2, vec![input_added(9)])));
    let mut indexer = MockIndexerClient::new();
    indexer.expect_get_input_result().never();

    let client = client(fast_config("http://localhost:8080"), indexer, chain);
    let outcome = client.advance_input(Bytes::from_static(b"x"), AdvanceOptions::default().sync(false)).await.unwrap();

    assert_matches!(&outcome, AdvanceOutcome::Submitted(submitted) if submitted.input_index() == Some(9));
}

#[tokio::test]
async fn sync_mode_needs_an_input_index() {
    let mut chain = chain_mock();
    chain.expect_add_input().returning(|_, _| Ok(receipt(3, vec![])));

    let client = client(fast_config("http://localhost:8080"), MockIndexerClient::new(), chain);
    let error = client.advance_input(Bytes::new(), AdvanceOptions::default()).await.unwrap_err();

    assert_matches!(error, SdkError::InputIndexNotFound { .. });
}

#[tokio::test]
async fn erc20_deposit_approves_missing_allowance_first() {
    let amount = U256::from(500u64);
    let mut seq = Sequence::new();
    let mut chain = chain_mock();
    let portal = chain_portal();
    chain
        .expect_erc20_allowance()
        .with(eq(TOKEN), eq(SIGNER), eq(portal))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(U256::ZERO));
    chain
        .expect_erc20_approve()
        .with(eq(TOKEN), eq(portal), eq(amount))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(receipt(4, vec![])));
    chain
        .expect_erc20_deposit()
        .withf(move |token, dapp, value, _| *token == TOKEN && *dapp == DAPP && *value == amount)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _| Ok(receipt(5, vec![input_added(1)])));

    // what the wallet dapp decodes from the portal payload and echoes as a notice
    let mut packed = vec![1u8];
    packed.extend_from_slice(TOKEN.as_slice());
    packed.extend_from_slice(SIGNER.as_slice());
    packed.extend_from_slice(&amount.to_be_bytes::<32>());
    let deposit_notice = Erc20DepositInput::decode(&packed).unwrap().notice();

    let mut indexer = MockIndexerClient::new();
    let notice_payload = deposit_notice.clone();
    indexer
        .expect_get_input_result()
        .with(eq(1))
        .returning(move |i| Ok(accepted(i, vec![notice(i, notice_payload.clone().into_bytes())])));

    let client = client(fast_config("http://localhost:8080"), indexer, chain);
    let outcome = client.deposit_erc20(Erc20Deposit::new(TOKEN, amount), AdvanceOptions::default()).await.unwrap();

    let payload = outcome.outputs().unwrap().notices[0].payload.to_vec();
    assert_eq!(String::from_utf8(payload).unwrap(), deposit_notice);
    assert_eq!(
        deposit_notice,
        "Received an 500 ERC20(0xae7f61ecf06c65405560166b259c54031428a9c4) deposit from \
         0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266."
    );
}

#[tokio::test]
async fn erc20_deposit_tops_up_partial_allowance() {
    let mut chain = chain_mock();
    chain.expect_erc20_allowance().returning(|_, _, _| Ok(U256::from(200u64)));
    chain.expect_erc20_approve().with(eq(TOKEN), eq(chain_portal()), eq(U256::from(300u64))).times(1).returning(
        |_, _, _| Ok(receipt(6, vec![])),
    );
    chain.expect_erc20_deposit().times(1).returning(|_, _, _, _| Ok(receipt(7, vec![input_added(2)])));

    let client = client(fast_config("http://localhost:8080"), MockIndexerClient::new(), chain);
    let outcome = client
        .deposit_erc20(Erc20Deposit::new(TOKEN, U256::from(500u64)), AdvanceOptions::default().sync(false))
        .await
        .unwrap();

    assert_eq!(outcome.input_index(), Some(2));
}

#[tokio::test]
async fn erc20_deposit_skips_approval_when_allowance_suffices() {
    let mut chain = chain_mock();
    chain.expect_erc20_allowance().returning(|_, _, _| Ok(U256::from(1000u64)));
    chain.expect_erc20_approve().never();
    chain.expect_erc20_deposit().times(1).returning(|_, _, _, _| Ok(receipt(8, vec![input_added(3)])));

    let client = client(fast_config("http://localhost:8080"), MockIndexerClient::new(), chain);
    client
        .deposit_erc20(Erc20Deposit::new(TOKEN, U256::from(500u64)), AdvanceOptions::default().sync(false))
        .await
        .unwrap();
}

#[tokio::test]
async fn erc721_deposit_approves_portal_once() {
    let token_id = U256::from(7u64);
    let mut seq = Sequence::new();
    let mut chain = chain_mock();
    let portal = common::contracts().erc721_portal;
    chain
        .expect_erc721_get_approved()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(Address::ZERO));
    chain
        .expect_erc721_approve()
        .with(eq(TOKEN), eq(portal), eq(token_id))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(receipt(9, vec![])));
    chain
        .expect_erc721_deposit()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _, _| Ok(receipt(10, vec![input_added(4)])));

    let client = client(fast_config("http://localhost:8080"), MockIndexerClient::new(), chain);
    let outcome = client
        .deposit_erc721(Erc721Deposit::new(TOKEN, token_id), AdvanceOptions::default().sync(false))
        .await
        .unwrap();

    assert_eq!(outcome.input_index(), Some(4));
}

#[tokio::test]
async fn ether_deposit_and_relay_surface_input_index() {
    let mut chain = chain_mock();
    chain
        .expect_ether_deposit()
        .with(eq(DAPP), eq(U256::from(10u64)), eq(Bytes::new()))
        .returning(|_, _, _| Ok(receipt(11, vec![input_added(12)])));
    chain.expect_relay_dapp_address().with(eq(DAPP)).returning(|_| Ok(receipt(12, vec![input_added(13)])));

    let client = client(fast_config("http://localhost:8080"), MockIndexerClient::new(), chain);
    let options = AdvanceOptions::default().sync(false);

    let ether = client.deposit_ether(EtherDeposit::new(U256::from(10u64)), options).await.unwrap();
    let relay = client.relay_dapp_address(options).await.unwrap();

    assert_eq!(ether.input_index(), Some(12));
    assert_eq!(relay.input_index(), Some(13));
}

#[tokio::test]
async fn rejected_input_surfaces_last_report() {
    let mut chain = chain_mock();
    chain.expect_add_input().returning(|_, _| Ok(receipt(13, vec![input_added(0)])));
    let mut indexer = MockIndexerClient::new();
    indexer.expect_get_input_result().returning(|i| {
        let mut result = accepted(i, vec![]);
        result.input.status = CompletionStatus::Rejected;
        result.outputs.reports = vec![rollups_indexer_client_interface::Report {
            index: 0,
            input_index: i,
            payload: Bytes::from_static(&[0xde, 0xad]),
        }];
        Ok(result)
    });

    let client = client(fast_config("http://localhost:8080"), indexer, chain);
    let error = client.advance_input(Bytes::new(), AdvanceOptions::default()).await.unwrap_err();

    assert_eq!(error.to_string(), "0xdead");
}

fn chain_portal() -> Address {
    common::contracts().erc20_portal
}

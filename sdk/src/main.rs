#![allow(clippy::print_stdout)]

use std::str::FromStr as _;

use alloy_primitives::{Bytes, U256};
use clap::Parser as _;
use color_eyre::eyre::{eyre, Result};
use dotenvy::dotenv;
use rollups_sdk::cli::{Cli, Commands};
use rollups_sdk::params::RollupsParams;
use rollups_sdk::{AdvanceOptions, Erc20Deposit, Erc721Deposit, EtherDeposit, InspectOptions, RollupsClient};
use rollups_utils::logging::init_logging;
use serde::Serialize;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    let params = RollupsParams::try_from(&cli.args)?;
    let client = RollupsClient::from_params(params)?;

    info!("Executing command: {:?}", cli.command);
    if let Err(e) = run(&client, cli.command).await {
        error!(error = %e, error_chain = ?e, "Command failed");
        return Err(e);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_u256(field: &str, raw: &str) -> Result<U256> {
    U256::from_str(raw).map_err(|e| eyre!("invalid {}: {}: {}", field, raw, e))
}

async fn run(client: &RollupsClient, command: Commands) -> Result<()> {
    let options = AdvanceOptions::default();
    match command {
        Commands::Send { payload, hex } => {
            let payload = if hex { Bytes::from_str(&payload)? } else { Bytes::from(payload.into_bytes()) };
            print_json(&client.advance_input(payload, options).await?)
        }
        Commands::DepositEther { value } => {
            let deposit = EtherDeposit::new(parse_u256("value", &value)?);
            print_json(&client.deposit_ether(deposit, options).await?)
        }
        Commands::DepositErc20 { token, amount } => {
            let token = rollups_sdk::params::parse_address("token", &token)?;
            let deposit = Erc20Deposit::new(token, parse_u256("amount", &amount)?);
            print_json(&client.deposit_erc20(deposit, options).await?)
        }
        Commands::DepositErc721 { token, token_id } => {
            let token = rollups_sdk::params::parse_address("token", &token)?;
            let deposit = Erc721Deposit::new(token, parse_u256("token id", &token_id)?);
            print_json(&client.deposit_erc721(deposit, options).await?)
        }
        Commands::RelayAddress => print_json(&client.relay_dapp_address(options).await?),
        Commands::Inspect { payload } => {
            println!("{}", client.inspect(&payload, InspectOptions::default()).await?);
            Ok(())
        }
        Commands::Input { index } => print_json(&client.get_input(index).await?),
        Commands::Inputs => print_json(&client.get_inputs().await?),
        Commands::Notices { input_index } => print_json(&client.get_notices(input_index).await?),
        Commands::Reports { input_index } => print_json(&client.get_reports(input_index).await?),
        Commands::Vouchers { input_index } => print_json(&client.get_vouchers(input_index).await?),
        Commands::ReadyVouchers => print_json(&client.ready_vouchers().await?),
        Commands::ExecuteVoucher { input_index, voucher_index } => {
            print_json(&client.execute_voucher(input_index, voucher_index).await?)
        }
        Commands::ValidateNotice { input_index, notice_index } => {
            let valid = client.validate_notice(input_index, notice_index).await?;
            println!("{}", valid);
            Ok(())
        }
    }
}

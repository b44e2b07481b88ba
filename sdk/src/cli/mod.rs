use clap::{Args, Parser, Subcommand};

pub mod ethereum;
pub mod node;

use ethereum::{ContractsCliArgs, EthereumCliArgs};
use node::{InspectCliArgs, NodeCliArgs, PollingCliArgs};

#[derive(Parser, Debug)]
#[command(
    name = "rollups",
    about = "Client for Cartesi rollups dapps",
    long_about = "Sends inputs and deposits to a Cartesi rollups dapp, reads its outputs from the node, \
    executes vouchers and runs inspect queries.",
    after_help = "Examples:\n  \
    rollups send hello\n  \
    rollups deposit-erc20 --token 0xae7f61eCf06C65405560166b259C54031428A9C4 --amount 500\n  \
    rollups inspect --decode utf-8 balance"
)]
pub struct Cli {
    #[command(flatten)]
    pub args: RollupsCliArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct RollupsCliArgs {
    #[clap(flatten)]
    pub node_args: NodeCliArgs,

    #[clap(flatten)]
    pub ethereum_args: EthereumCliArgs,

    #[clap(flatten)]
    pub contracts_args: ContractsCliArgs,

    #[clap(flatten)]
    pub polling_args: PollingCliArgs,

    #[clap(flatten)]
    pub inspect_args: InspectCliArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an input to the input box
    Send {
        payload: String,
        /// Treat the payload as 0x-prefixed hex instead of text.
        #[arg(long)]
        hex: bool,
    },
    /// Deposit ether through the ether portal (value in wei)
    DepositEther {
        #[arg(long)]
        value: String,
    },
    /// Deposit ERC20 tokens, approving the portal first when needed
    DepositErc20 {
        #[arg(long)]
        token: String,
        #[arg(long)]
        amount: String,
    },
    /// Deposit an ERC721 token, approving the portal first when needed
    DepositErc721 {
        #[arg(long)]
        token: String,
        #[arg(long)]
        token_id: String,
    },
    /// Send the dapp its own address through the relay
    RelayAddress,
    /// Run an inspect query
    Inspect { payload: String },
    /// Show an input
    Input { index: u64 },
    /// List inputs
    Inputs,
    /// List notices, optionally of a single input
    Notices {
        #[arg(long)]
        input_index: Option<u64>,
    },
    /// List reports, optionally of a single input
    Reports {
        #[arg(long)]
        input_index: Option<u64>,
    },
    /// List vouchers, optionally of a single input
    Vouchers {
        #[arg(long)]
        input_index: Option<u64>,
    },
    /// List vouchers that are proven and not executed yet
    ReadyVouchers,
    /// Execute a voucher
    ExecuteVoucher { input_index: u64, voucher_index: u64 },
    /// Check a notice against the dapp contract
    ValidateNotice { input_index: u64, notice_index: u64 },
}

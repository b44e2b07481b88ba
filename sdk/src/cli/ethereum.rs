use clap::Args;
use url::Url;

#[derive(Debug, Clone, Args)]
pub struct EthereumCliArgs {
    /// The URL of the base layer RPC node.
    #[arg(env = "CARTESI_RPC_URL", long, default_value = "http://localhost:8545")]
    pub rpc_url: Url,

    /// The private key of the account that signs submissions. Queries and inspect run without it.
    #[arg(env = "CARTESI_PRIVATE_KEY", long)]
    pub private_key: Option<String>,
}

/// Overrides for the rollups contract addresses. Unset values fall back to the deterministic
/// deployment addresses.
#[derive(Debug, Clone, Args)]
pub struct ContractsCliArgs {
    #[arg(env = "CARTESI_INPUT_BOX_ADDRESS", long)]
    pub input_box_address: Option<String>,

    #[arg(env = "CARTESI_ETHER_PORTAL_ADDRESS", long)]
    pub ether_portal_address: Option<String>,

    #[arg(env = "CARTESI_ERC20_PORTAL_ADDRESS", long)]
    pub erc20_portal_address: Option<String>,

    #[arg(env = "CARTESI_ERC721_PORTAL_ADDRESS", long)]
    pub erc721_portal_address: Option<String>,

    #[arg(env = "CARTESI_DAPP_ADDRESS_RELAY_ADDRESS", long)]
    pub dapp_address_relay_address: Option<String>,
}

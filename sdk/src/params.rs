//! Validated settings built from the CLI arguments.
use std::str::FromStr as _;
use std::time::Duration;

use alloy_primitives::Address;
use rollups_chain_client_interface::RollupsContracts;
use rollups_ethereum_client::EthereumValidatedArgs;

use crate::cli::ethereum::ContractsCliArgs;
use crate::cli::RollupsCliArgs;
use crate::config::{DecodeMode, InspectConfig, InspectMethod, PollingParams, SdkConfig, DEFAULT_DAPP_ADDRESS};
use crate::error::ConfigError;
use crate::retry::RetryPolicy;

#[derive(Debug, Clone)]
pub struct RollupsParams {
    pub sdk: SdkConfig,
    pub ethereum: EthereumValidatedArgs,
}

pub fn parse_address(field: &'static str, raw: &str) -> Result<Address, ConfigError> {
    Address::from_str(raw.trim()).map_err(|e| ConfigError::Invalid { field, message: format!("{}: {}", raw, e) })
}

fn address_or(field: &'static str, raw: Option<&String>, default: Address) -> Result<Address, ConfigError> {
    raw.map(|raw| parse_address(field, raw)).transpose().map(|address| address.unwrap_or(default))
}

impl TryFrom<&ContractsCliArgs> for RollupsContracts {
    type Error = ConfigError;

    fn try_from(args: &ContractsCliArgs) -> Result<Self, Self::Error> {
        let defaults = RollupsContracts::default();
        Ok(RollupsContracts {
            input_box: address_or("input_box_address", args.input_box_address.as_ref(), defaults.input_box)?,
            ether_portal: address_or("ether_portal_address", args.ether_portal_address.as_ref(), defaults.ether_portal)?,
            erc20_portal: address_or("erc20_portal_address", args.erc20_portal_address.as_ref(), defaults.erc20_portal)?,
            erc721_portal: address_or(
                "erc721_portal_address",
                args.erc721_portal_address.as_ref(),
                defaults.erc721_portal,
            )?,
            dapp_address_relay: address_or(
                "dapp_address_relay_address",
                args.dapp_address_relay_address.as_ref(),
                defaults.dapp_address_relay,
            )?,
        })
    }
}

impl TryFrom<&RollupsCliArgs> for SdkConfig {
    type Error = ConfigError;

    fn try_from(args: &RollupsCliArgs) -> Result<Self, Self::Error> {
        let decode = DecodeMode::parse(&args.inspect_args.decode)
            .map_err(|e| ConfigError::Invalid { field: "decode", message: e.to_string() })?;
        let method = InspectMethod::from_str(&args.inspect_args.inspect_method.to_lowercase()).map_err(|_| {
            ConfigError::Invalid {
                field: "inspect_method",
                message: format!("{} is neither get nor post", args.inspect_args.inspect_method),
            }
        })?;

        let config = SdkConfig {
            node_url: args.node_args.node_url.clone(),
            dapp_address: address_or("dapp_address", args.node_args.dapp_address.as_ref(), DEFAULT_DAPP_ADDRESS)?,
            polling: PollingParams {
                initial_delay: Duration::from_millis(args.polling_args.initial_delay_ms),
                delay_interval: Duration::from_millis(args.polling_args.delay_interval_ms),
            },
            sync: !args.polling_args.no_sync,
            inspect: InspectConfig { aggregate: args.inspect_args.aggregate, decode, method },
            lookup_retry: RetryPolicy::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<&RollupsCliArgs> for EthereumValidatedArgs {
    type Error = ConfigError;

    fn try_from(args: &RollupsCliArgs) -> Result<Self, Self::Error> {
        Ok(EthereumValidatedArgs {
            rpc_url: args.ethereum_args.rpc_url.clone(),
            private_key: args.ethereum_args.private_key.clone(),
            contracts: RollupsContracts::try_from(&args.contracts_args)?,
        })
    }
}

impl TryFrom<&RollupsCliArgs> for RollupsParams {
    type Error = ConfigError;

    fn try_from(args: &RollupsCliArgs) -> Result<Self, Self::Error> {
        Ok(RollupsParams { sdk: SdkConfig::try_from(args)?, ethereum: EthereumValidatedArgs::try_from(args)? })
    }
}

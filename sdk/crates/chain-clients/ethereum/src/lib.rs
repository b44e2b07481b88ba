pub mod bindings;
mod conversion;

use alloy::network::{Ethereum, EthereumWallet};
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::{Client, Http};
use async_trait::async_trait;
use rollups_chain_client_interface::{ChainClientError, RollupsChainClient, RollupsContracts, SubmissionReceipt};
use rollups_indexer_client_interface::Proof;
use tracing::{debug, info};
use url::Url;

use crate::bindings::{IDAppAddressRelay, IERC20Portal, IERC721Portal, IEtherPortal, ICartesiDApp, IInputBox, IERC20, IERC721};
use crate::conversion::{to_sol_proof, to_submission_receipt};

#[derive(Clone, Debug)]
pub struct EthereumValidatedArgs {
    pub rpc_url: Url,

    /// Without a key the client only serves view calls.
    pub private_key: Option<String>,

    pub contracts: RollupsContracts,
}

/// [`RollupsChainClient`] talking JSON-RPC over HTTP. When built with a signer, `P` carries a
/// wallet filler and every transaction is signed by [`EthereumRollupsClient::signer_address`].
pub struct EthereumRollupsClient<P> {
    provider: P,
    signer_address: Option<Address>,
    contracts: RollupsContracts,
}

impl EthereumRollupsClient<()> {
    /// Client signing with a local private key, with gas, nonce and chain id filled in by the
    /// provider.
    pub fn new_with_args(
        args: &EthereumValidatedArgs,
    ) -> Result<EthereumRollupsClient<impl Provider<Http<Client>, Ethereum> + Clone>, ChainClientError> {
        let private_key = args
            .private_key
            .as_deref()
            .ok_or_else(|| ChainClientError::Config("a private key is required to sign transactions".to_string()))?;
        let signer: PrivateKeySigner =
            private_key.parse().map_err(|e| ChainClientError::Config(format!("invalid private key: {}", e)))?;
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let provider = ProviderBuilder::new().with_recommended_fillers().wallet(wallet).on_http(args.rpc_url.clone());

        Ok(EthereumRollupsClient { provider, signer_address: Some(signer_address), contracts: args.contracts })
    }

    /// Client without a wallet. View calls work, every transaction fails with
    /// [`ChainClientError::Config`] before reaching the node.
    pub fn new_read_only(
        args: &EthereumValidatedArgs,
    ) -> EthereumRollupsClient<impl Provider<Http<Client>, Ethereum> + Clone> {
        let provider = ProviderBuilder::new().with_recommended_fillers().on_http(args.rpc_url.clone());
        EthereumRollupsClient { provider, signer_address: None, contracts: args.contracts }
    }
}

impl<P> EthereumRollupsClient<P>
where
    P: Provider<Http<Client>, Ethereum> + Clone,
{
    /// Wraps an already configured provider. `signer_address` must be the account its wallet signs
    /// with.
    pub fn with_provider(provider: P, signer_address: Address, contracts: RollupsContracts) -> Self {
        Self { provider, signer_address: Some(signer_address), contracts }
    }

    fn require_signer(&self, operation: &str) -> Result<Address, ChainClientError> {
        self.signer_address
            .ok_or_else(|| ChainClientError::Config(format!("{} needs a private key to sign the transaction", operation)))
    }

    async fn confirm(
        &self,
        operation: &str,
        pending: PendingTransactionBuilder<Http<Client>, Ethereum>,
    ) -> Result<SubmissionReceipt, ChainClientError> {
        let tx_hash = *pending.tx_hash();
        debug!(operation = %operation, tx_hash = %tx_hash, "Waiting for transaction receipt");
        let receipt = pending.get_receipt().await.map_err(|e| ChainClientError::rpc(operation, e))?;
        let receipt = to_submission_receipt(operation, receipt)?;
        info!(
            log_type = "completed",
            category = "submission",
            operation = %operation,
            tx_hash = %receipt.transaction_hash,
            block_number = ?receipt.block_number,
            "Transaction mined."
        );
        Ok(receipt)
    }
}

#[async_trait]
impl<P> RollupsChainClient for EthereumRollupsClient<P>
where
    P: Provider<Http<Client>, Ethereum> + Clone + Send + Sync + 'static,
{
    /// Zero address for a read-only client.
    fn signer_address(&self) -> Address {
        self.signer_address.unwrap_or(Address::ZERO)
    }

    fn contracts(&self) -> RollupsContracts {
        self.contracts
    }

    async fn add_input(&self, dapp: Address, payload: Bytes) -> Result<SubmissionReceipt, ChainClientError> {
        info!(log_type = "starting", category = "submission", operation = "addInput", dapp = %dapp, "Adding input.");
        self.require_signer("addInput")?;
        let input_box = IInputBox::new(self.contracts.input_box, self.provider.clone());
        let pending =
            input_box.addInput(dapp, payload).send().await.map_err(|e| ChainClientError::contract("addInput", e))?;
        self.confirm("addInput", pending).await
    }

    async fn erc20_allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256, ChainClientError> {
        let erc20 = IERC20::new(token, self.provider.clone());
        let allowance =
            erc20.allowance(owner, spender).call().await.map_err(|e| ChainClientError::contract("allowance", e))?;
        Ok(allowance._0)
    }

    async fn erc20_approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<SubmissionReceipt, ChainClientError> {
        info!(
            log_type = "starting",
            category = "approval",
            token = %token,
            spender = %spender,
            amount = %amount,
            "Approving ERC20 allowance."
        );
        self.require_signer("approve")?;
        let erc20 = IERC20::new(token, self.provider.clone());
        let pending =
            erc20.approve(spender, amount).send().await.map_err(|e| ChainClientError::contract("approve", e))?;
        self.confirm("approve", pending).await
    }

    async fn erc20_deposit(
        &self,
        token: Address,
        dapp: Address,
        amount: U256,
        exec_layer_data: Bytes,
    ) -> Result<SubmissionReceipt, ChainClientError> {
        info!(
            log_type = "starting",
            category = "submission",
            operation = "depositERC20Tokens",
            token = %token,
            amount = %amount,
            "Depositing ERC20 tokens."
        );
        self.require_signer("depositERC20Tokens")?;
        let portal = IERC20Portal::new(self.contracts.erc20_portal, self.provider.clone());
        let pending = portal
            .depositERC20Tokens(token, dapp, amount, exec_layer_data)
            .send()
            .await
            .map_err(|e| ChainClientError::contract("depositERC20Tokens", e))?;
        self.confirm("depositERC20Tokens", pending).await
    }

    async fn erc721_get_approved(&self, token: Address, token_id: U256) -> Result<Address, ChainClientError> {
        let erc721 = IERC721::new(token, self.provider.clone());
        let approved =
            erc721.getApproved(token_id).call().await.map_err(|e| ChainClientError::contract("getApproved", e))?;
        Ok(approved._0)
    }

    async fn erc721_approve(
        &self,
        token: Address,
        to: Address,
        token_id: U256,
    ) -> Result<SubmissionReceipt, ChainClientError> {
        info!(
            log_type = "starting",
            category = "approval",
            token = %token,
            to = %to,
            token_id = %token_id,
            "Approving ERC721 transfer."
        );
        self.require_signer("approve")?;
        let erc721 = IERC721::new(token, self.provider.clone());
        let pending =
            erc721.approve(to, token_id).send().await.map_err(|e| ChainClientError::contract("approve", e))?;
        self.confirm("approve", pending).await
    }

    async fn erc721_deposit(
        &self,
        token: Address,
        dapp: Address,
        token_id: U256,
        base_layer_data: Bytes,
        exec_layer_data: Bytes,
    ) -> Result<SubmissionReceipt, ChainClientError> {
        info!(
            log_type = "starting",
            category = "submission",
            operation = "depositERC721Token",
            token = %token,
            token_id = %token_id,
            "Depositing ERC721 token."
        );
        self.require_signer("depositERC721Token")?;
        let portal = IERC721Portal::new(self.contracts.erc721_portal, self.provider.clone());
        let pending = portal
            .depositERC721Token(token, dapp, token_id, base_layer_data, exec_layer_data)
            .send()
            .await
            .map_err(|e| ChainClientError::contract("depositERC721Token", e))?;
        self.confirm("depositERC721Token", pending).await
    }

    async fn ether_deposit(
        &self,
        dapp: Address,
        value: U256,
        exec_layer_data: Bytes,
    ) -> Result<SubmissionReceipt, ChainClientError> {
        info!(
            log_type = "starting",
            category = "submission",
            operation = "depositEther",
            value = %value,
            "Depositing ether."
        );
        self.require_signer("depositEther")?;
        let portal = IEtherPortal::new(self.contracts.ether_portal, self.provider.clone());
        let pending = portal
            .depositEther(dapp, exec_layer_data)
            .value(value)
            .send()
            .await
            .map_err(|e| ChainClientError::contract("depositEther", e))?;
        self.confirm("depositEther", pending).await
    }

    async fn relay_dapp_address(&self, dapp: Address) -> Result<SubmissionReceipt, ChainClientError> {
        info!(log_type = "starting", category = "submission", operation = "relayDAppAddress", dapp = %dapp, "Relaying dapp address.");
        self.require_signer("relayDAppAddress")?;
        let relay = IDAppAddressRelay::new(self.contracts.dapp_address_relay, self.provider.clone());
        let pending =
            relay.relayDAppAddress(dapp).send().await.map_err(|e| ChainClientError::contract("relayDAppAddress", e))?;
        self.confirm("relayDAppAddress", pending).await
    }

    async fn was_voucher_executed(
        &self,
        dapp: Address,
        input_index: u64,
        voucher_index: u64,
    ) -> Result<bool, ChainClientError> {
        let dapp_contract = ICartesiDApp::new(dapp, self.provider.clone());
        let executed = dapp_contract
            .wasVoucherExecuted(U256::from(input_index), U256::from(voucher_index))
            .call()
            .await
            .map_err(|e| ChainClientError::contract("wasVoucherExecuted", e))?;
        Ok(executed._0)
    }

    async fn execute_voucher(
        &self,
        dapp: Address,
        destination: Address,
        payload: Bytes,
        proof: Proof,
    ) -> Result<SubmissionReceipt, ChainClientError> {
        info!(
            log_type = "starting",
            category = "voucher",
            destination = %destination,
            input_index_within_epoch = proof.validity.input_index_within_epoch,
            output_index_within_input = proof.validity.output_index_within_input,
            "Executing voucher."
        );
        self.require_signer("executeVoucher")?;
        let dapp_contract = ICartesiDApp::new(dapp, self.provider.clone());
        let pending = dapp_contract
            .executeVoucher(destination, payload, to_sol_proof(proof))
            .send()
            .await
            .map_err(|e| ChainClientError::contract("executeVoucher", e))?;
        self.confirm("executeVoucher", pending).await
    }

    async fn validate_notice(&self, dapp: Address, payload: Bytes, proof: Proof) -> Result<bool, ChainClientError> {
        let dapp_contract = ICartesiDApp::new(dapp, self.provider.clone());
        let valid = dapp_contract
            .validateNotice(payload, to_sol_proof(proof))
            .call()
            .await
            .map_err(|e| ChainClientError::contract("validateNotice", e))?;
        Ok(valid._0)
    }
}

//! Utilities for the deploy & timelock scripts.

use std::{path::PathBuf, str::FromStr};

use alloy::{
    contract::{CallBuilder, CallDecoder},
    network::Ethereum,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use beets_common::{
    deployments::{deployments_path, DeploymentsFile},
    timelock::{ledger_path, TimelockLedger},
};
use chrono::Utc;
use tracing::info;

use crate::{
    cli::NetworkArgs,
    constants::{MASTER_CHEF_NAME, TIMELOCK_NAME},
    errors::ScriptError,
    solidity::{Client, IBeethovenxMasterChef, ITimelock, MasterChef, Timelock},
};

/// The call builder type used to send transactions through the client
pub type ScriptCallBuilder<'a, C> = CallBuilder<&'a Client, C, Ethereum>;

/// The network the scripts operate on, and where its records live on disk
#[derive(Clone, Debug)]
pub struct NetworkConfig {
    /// The name of the network
    pub name: String,
    /// Whether the network is the one designated as mainnet
    pub is_mainnet: bool,
    /// The project root under which the network's records live
    pub root: PathBuf,
    /// The directory holding the compilation artifacts
    pub artifacts_dir: PathBuf,
}

impl NetworkConfig {
    /// The path of the network's deployments file
    pub fn deployments_path(&self) -> PathBuf {
        deployments_path(&self.root, &self.name)
    }

    /// The path of the network's timelock ledger
    pub fn ledger_path(&self) -> PathBuf {
        ledger_path(&self.root, &self.name)
    }

    /// Loads the network's deployments file
    pub fn deployments(&self) -> Result<DeploymentsFile, ScriptError> {
        Ok(DeploymentsFile::load(self.deployments_path())?)
    }

    /// Loads the network's timelock ledger
    pub fn ledger(&self) -> Result<TimelockLedger, ScriptError> {
        Ok(TimelockLedger::load(self.ledger_path())?)
    }
}

impl From<&NetworkArgs> for NetworkConfig {
    fn from(args: &NetworkArgs) -> Self {
        Self {
            name: args.network.clone(),
            is_mainnet: args.mainnet.as_deref() == Some(args.network.as_str()),
            root: args.root.clone(),
            artifacts_dir: args.root.join(&args.artifacts),
        }
    }
}

/// A connection to the network, signing with the deployer's key
#[derive(Clone)]
pub struct ScriptContext {
    /// The client through which transactions are sent
    pub client: Client,
    /// The address of the deployer, which signs every transaction
    pub deployer: Address,
    /// The chain id reported by the RPC node
    pub chain_id: u64,
    /// The network being operated on
    pub network: NetworkConfig,
}

impl ScriptContext {
    /// Connects to the network described by `args`
    pub async fn connect(args: &NetworkArgs) -> Result<Self, ScriptError> {
        let priv_key = args.priv_key.as_deref().ok_or_else(|| {
            ScriptError::ClientInitialization("a deployer private key is required".to_string())
        })?;

        let (client, deployer) = setup_client(priv_key, &args.rpc_url)?;
        let chain_id = client
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

        Ok(Self {
            client,
            deployer,
            chain_id,
            network: NetworkConfig::from(args),
        })
    }

    /// Logs the network being operated on
    pub fn print_network(&self) {
        info!(
            "Network: {} (chain id {}), deployer {}",
            self.network.name, self.chain_id, self.deployer
        );
    }

    /// The deployed timelock
    pub fn timelock(&self) -> Result<Timelock, ScriptError> {
        let address = self.network.deployments()?.address(TIMELOCK_NAME)?;
        Ok(ITimelock::new(address, self.client.clone()))
    }

    /// The master chef at `address`, or the deployed one if unset
    pub fn master_chef(&self, address: Option<Address>) -> Result<MasterChef, ScriptError> {
        let address = match address {
            Some(address) => address,
            None => self.network.deployments()?.address(MASTER_CHEF_NAME)?,
        };
        Ok(IBeethovenxMasterChef::new(address, self.client.clone()))
    }
}

/// Sets up the client with which to send transactions, signing with the
/// given private key, and returns it along with the signer's address
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<(Client, Address), ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let deployer = signer.address();

    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

    Ok((DynProvider::new(provider), deployer))
}

/// Send a transaction and wait for it to be included successfully
pub async fn send_tx<C: CallDecoder>(
    tx: ScriptCallBuilder<'_, C>,
) -> Result<TransactionReceipt, ScriptError> {
    let receipt = tx
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    if !receipt.status() {
        return Err(ScriptError::ContractInteraction(format!(
            "transaction {:#x} reverted",
            receipt.transaction_hash
        )));
    }

    Ok(receipt)
}

/// The current unix timestamp, in seconds
pub fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

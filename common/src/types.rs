//! Record types persisted by the deployment & timelock stores

use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The contract targeted by a timelock transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetContract {
    /// The name of the contract, e.g. `BeethovenxMasterChef`
    pub name: String,
    /// The address of the contract
    pub address: Address,
}

/// The function called by a timelock transaction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetFunction {
    /// The Solidity signature of the function, e.g. `add(uint256,address,address)`
    pub identifier: String,
    /// The arguments the function is called with
    pub args: Vec<Value>,
}

/// A transaction queued on the timelock, as recorded in the network's ledger
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTimelockTransaction {
    /// The contract the transaction calls into
    pub target_contract: TargetContract,
    /// The function the transaction calls
    pub target_function: TargetFunction,
    /// The unix timestamp at or after which the transaction may be executed
    pub eta: u64,
    /// Whether the transaction has been executed
    pub executed: bool,
    /// The hash of the transaction that executed this one, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute_tx_hash: Option<B256>,
}

impl StoredTimelockTransaction {
    /// Whether the transaction can be executed at the unix timestamp `now`
    pub fn is_executable(&self, now: u64) -> bool {
        !self.executed && now >= self.eta
    }
}

/// A contract deployment, as recorded in the network's deployments file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// The address of the deployed contract
    pub address: Address,
    /// The constructor arguments the contract was deployed with
    pub args: Vec<Value>,
    /// The hash of the creation transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<B256>,
    /// The keccak hash of the creation bytecode, excluding constructor arguments
    pub bytecode_hash: B256,
}

//! Interactions with the master chef: adding farm pools and listing them

use alloy::{
    primitives::{address, Address, U256},
    sol_types::SolCall,
};
use beets_common::types::{TargetContract, TargetFunction};
use serde_json::json;
use tracing::info;

use crate::{
    constants::{
        MASTER_CHEF_NAME, OPERA_CHAIN_ID, RINKEBY_CHAIN_ID, TESTNET_POOL_ALLOCATION_POINTS,
    },
    errors::ScriptError,
    solidity::IBeethovenxMasterChef,
    timelock::{queue_transaction, Submission},
    utils::{send_tx, ScriptContext},
};

/// A farm pool to add to the master chef
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// The LP token staked in the pool
    pub lp_address: Address,
    /// The share of emissions allocated to the pool
    pub allocation_points: u64,
}

/// The pools created on Rinkeby when setting up the farms
static RINKEBY_POOLS: [PoolConfig; 4] = [
    PoolConfig {
        lp_address: address!("33276d43ada054a281d40a11d48310cdc0156fc2"),
        allocation_points: TESTNET_POOL_ALLOCATION_POINTS,
    },
    PoolConfig {
        lp_address: address!("86b03134ea51903a692aae8808ce96554012c5bd"),
        allocation_points: TESTNET_POOL_ALLOCATION_POINTS,
    },
    PoolConfig {
        lp_address: address!("864e386bbbb8b06cbf060fc0b7587ab5f40d5c9b"),
        allocation_points: TESTNET_POOL_ALLOCATION_POINTS,
    },
    PoolConfig {
        lp_address: address!("f453d2ad5cef4e3f1fd4b81b2d5421a412fd311f"),
        allocation_points: TESTNET_POOL_ALLOCATION_POINTS,
    },
];

/// The pools to create when setting up the farms on the given chain
pub fn initial_pools(chain_id: u64) -> Result<&'static [PoolConfig], ScriptError> {
    let pools: &'static [PoolConfig] = match chain_id {
        OPERA_CHAIN_ID => &[],
        RINKEBY_CHAIN_ID => &RINKEBY_POOLS,
        _ => return Err(ScriptError::UnsupportedChain(chain_id)),
    };

    Ok(pools)
}

/// Adds a pool to the master chef, either directly or by queueing the call on
/// the timelock. Returns the transaction hash or the timelock transaction id.
pub async fn add_pool(
    ctx: &ScriptContext,
    master_chef: Option<Address>,
    allocation_points: u64,
    lp_token: Address,
    rewarder: Address,
    submission: Submission,
) -> Result<String, ScriptError> {
    let chef = ctx.master_chef(master_chef)?;

    match submission {
        Submission::Direct => {
            let receipt = send_tx(chef.add(U256::from(allocation_points), lp_token, rewarder)).await?;
            Ok(format!("{:#x}", receipt.transaction_hash))
        }
        Submission::Timelock { eta } => {
            let target = TargetContract {
                name: MASTER_CHEF_NAME.to_string(),
                address: *chef.address(),
            };
            let function = TargetFunction {
                identifier: IBeethovenxMasterChef::addCall::SIGNATURE.to_string(),
                args: vec![
                    json!(allocation_points),
                    json!(lp_token.to_string()),
                    json!(rewarder.to_string()),
                ],
            };
            queue_transaction(ctx, target, function, eta).await
        }
    }
}

/// Adds the network's initial farm pools directly, then lists every pool
pub async fn create_initial_pools(
    ctx: &ScriptContext,
    master_chef: Option<Address>,
) -> Result<(), ScriptError> {
    ctx.print_network();
    info!("Setting up initial pools");

    for pool in initial_pools(ctx.chain_id)? {
        info!(
            "Adding pool to master chef for LP {} with allocation points {}",
            pool.lp_address, pool.allocation_points
        );
        let tx = add_pool(
            ctx,
            master_chef,
            pool.allocation_points,
            pool.lp_address,
            Address::ZERO,
            Submission::Direct,
        )
        .await?;
        info!("done with tx {}", tx);
    }

    info!("Listing all pools:");
    list_pools(ctx, master_chef).await
}

/// Prints every pool of the master chef
pub async fn list_pools(ctx: &ScriptContext, master_chef: Option<Address>) -> Result<(), ScriptError> {
    let chef = ctx.master_chef(master_chef)?;

    let pool_length = chef
        .poolLength()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    let mut pid = U256::ZERO;
    while pid < pool_length {
        let lp_token = chef
            .lpTokens(pid)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        let info = chef
            .poolInfo(pid)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        let rewarder = chef
            .rewarder(pid)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        println!(
            "[{}] lp token: {} - allocation points: {} - last reward block: {} - rewarder: {}",
            pid, lp_token, info.allocPoint, info.lastRewardBlock, rewarder
        );
        pid += U256::from(1);
    }

    Ok(())
}

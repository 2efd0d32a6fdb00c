//! Implementations of the various deploy scripts

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, U256},
};
use beets_common::{constants::DEFAULT_DECIMALS, units::bn};
use tracing::info;

use crate::{
    cli::{
        DeployLpTokenTimelockArgs, DeployMasterChefArgs, DeployTimelockArgs, DeployTokenArgs,
        TransferMasterChefOwnershipArgs,
    },
    constants::{
        BEETS_PER_BLOCK, BEETS_PER_BLOCK_DECIMALS, BEETS_TOKEN_ARTIFACT, BEETS_TOKEN_NAME,
        LBP_FUNDS, LP_TOKEN_TIMELOCK_ARTIFACT, LP_TOKEN_TIMELOCK_NAME, MASTER_CHEF_ARTIFACT,
        MASTER_CHEF_NAME, STRATEGIC_PARTNERSHIP_FUNDS, TEAM_FUNDS, TIMELOCK_ARTIFACT,
        TIMELOCK_NAME,
    },
    deploy::deploy_contract,
    errors::ScriptError,
    solidity::{BeetsToken, IBeethovenxToken},
    utils::{send_tx, ScriptContext},
};

/// Deploys the BEETS token and mints the strategic partnership, team, and LBP
/// funds to their addresses, unless they already hold a balance
pub async fn deploy_token(args: &DeployTokenArgs, ctx: &ScriptContext) -> Result<(), ScriptError> {
    let mut deployments = ctx.network.deployments()?;
    let deployment = deploy_contract(
        ctx,
        &mut deployments,
        BEETS_TOKEN_NAME,
        BEETS_TOKEN_ARTIFACT,
        vec![],
    )
    .await?;
    let beets = IBeethovenxToken::new(deployment.address, ctx.client.clone());

    let strategic_partnership_funds = bn(STRATEGIC_PARTNERSHIP_FUNDS, DEFAULT_DECIMALS);
    let team_funds = bn(TEAM_FUNDS, DEFAULT_DECIMALS);
    let lbp_funds = bn(LBP_FUNDS, DEFAULT_DECIMALS);

    if balance_of(&beets, args.partnership_fund).await?.is_zero() {
        info!(
            "minting strategic partnership funds '{}' to strategic partnership address '{}'",
            strategic_partnership_funds, args.partnership_fund
        );
        send_tx(beets.mint(args.partnership_fund, strategic_partnership_funds)).await?;
    }

    if balance_of(&beets, args.team_fund).await?.is_zero() {
        info!(
            "minting team funds '{}' to team vesting contract address '{}'",
            team_funds, args.team_fund
        );
        send_tx(beets.mint(args.team_fund, team_funds)).await?;

        info!("minting lbp funds '{}' to lbp address '{}'", lbp_funds, args.team_fund);
        send_tx(beets.mint(args.team_fund, lbp_funds)).await?;
    }

    Ok(())
}

/// Deploys the timelock, administered by the deployer unless another admin is given
pub async fn deploy_timelock(
    args: &DeployTimelockArgs,
    ctx: &ScriptContext,
) -> Result<(), ScriptError> {
    let mut deployments = ctx.network.deployments()?;
    let admin = args.admin.unwrap_or(ctx.deployer);

    let deployment = deploy_contract(
        ctx,
        &mut deployments,
        TIMELOCK_NAME,
        TIMELOCK_ARTIFACT,
        vec![
            DynSolValue::Address(admin),
            DynSolValue::Uint(U256::from(args.delay), 256),
        ],
    )
    .await?;

    info!("timelock constructor args {}", args_json(&deployment.args));
    Ok(())
}

/// Deploys the master chef and hands it ownership of the BEETS token so it
/// can mint emissions
pub async fn deploy_master_chef(
    args: &DeployMasterChefArgs,
    ctx: &ScriptContext,
) -> Result<(), ScriptError> {
    let mut deployments = ctx.network.deployments()?;
    let beets_address = deployments.address(BEETS_TOKEN_NAME)?;
    let beets = IBeethovenxToken::new(beets_address, ctx.client.clone());

    let beets_per_block = args
        .beets_per_block
        .unwrap_or_else(|| bn(BEETS_PER_BLOCK, BEETS_PER_BLOCK_DECIMALS));

    let deployment = deploy_contract(
        ctx,
        &mut deployments,
        MASTER_CHEF_NAME,
        MASTER_CHEF_ARTIFACT,
        vec![
            DynSolValue::Address(beets_address),
            DynSolValue::Address(args.treasury),
            DynSolValue::Uint(beets_per_block, 256),
            DynSolValue::Uint(U256::from(args.start_block), 256),
        ],
    )
    .await?;
    info!("masterchef constructor args {}", args_json(&deployment.args));

    let owner = beets
        .owner()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    if owner != deployment.address {
        info!("Transfer Beets Ownership to Chef");
        send_tx(beets.transferOwnership(deployment.address)).await?;
    }

    Ok(())
}

/// Deploys a timelock holding LP tokens staked in the master chef on behalf of
/// a beneficiary until the release time
pub async fn deploy_lp_token_timelock(
    args: &DeployLpTokenTimelockArgs,
    ctx: &ScriptContext,
) -> Result<(), ScriptError> {
    let mut deployments = ctx.network.deployments()?;
    let master_chef = match args.master_chef {
        Some(address) => address,
        None => deployments.address(MASTER_CHEF_NAME)?,
    };

    let deployment = deploy_contract(
        ctx,
        &mut deployments,
        LP_TOKEN_TIMELOCK_NAME,
        LP_TOKEN_TIMELOCK_ARTIFACT,
        vec![
            DynSolValue::Address(args.token),
            DynSolValue::Address(args.beneficiary),
            DynSolValue::Uint(U256::from(args.release_time), 256),
            DynSolValue::Address(master_chef),
            DynSolValue::Uint(U256::from(args.pool_id), 256),
        ],
    )
    .await?;

    info!(
        "lp token timelock constructor args {}",
        args_json(&deployment.args)
    );
    Ok(())
}

/// Hands ownership of the master chef to the timelock, unless it already owns it
pub async fn transfer_master_chef_ownership(
    args: &TransferMasterChefOwnershipArgs,
    ctx: &ScriptContext,
) -> Result<(), ScriptError> {
    let timelock = match args.timelock {
        Some(address) => address,
        None => *ctx.timelock()?.address(),
    };
    let master_chef = ctx.master_chef(args.master_chef)?;

    let owner = master_chef
        .owner()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    if owner != timelock {
        info!("Transfer ownership of MasterChef to Timelock");
        send_tx(master_chef.transferOwnership(timelock)).await?;
    } else {
        info!("MasterChef is already owned by the timelock at {}", timelock);
    }

    Ok(())
}

/// Reads the BEETS balance of `account`
async fn balance_of(beets: &BeetsToken, account: Address) -> Result<U256, ScriptError> {
    beets
        .balanceOf(account)
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
}

/// Renders recorded constructor arguments as a JSON array
fn args_json(args: &[serde_json::Value]) -> String {
    serde_json::to_string(args).unwrap_or_default()
}

//! Definitions of CLI arguments and commands for the deploy & timelock scripts

use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{
        deploy_lp_token_timelock, deploy_master_chef, deploy_timelock, deploy_token,
        transfer_master_chef_ownership,
    },
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_NETWORK, DEFAULT_RPC_URL, TIMELOCK_DELAY_SECS,
    },
    errors::ScriptError,
    master_chef::{add_pool, create_initial_pools, list_pools},
    timelock::{
        execute_transactions, list_transactions, prompt_for_eta, queue_transaction,
        timelock_queue_questions,
    },
    utils::{NetworkConfig, ScriptContext},
};
use beets_common::types::{TargetContract, TargetFunction};
use serde_json::Value;

/// Deploy and administer the Beethoven X contracts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The network to operate on
    #[command(flatten)]
    pub network: NetworkArgs,

    /// The script to run
    #[command(subcommand)]
    pub command: Command,
}

/// Arguments selecting the network and where its records live
#[derive(Args, Clone, Debug)]
pub struct NetworkArgs {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIV_KEY", global = true, hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL, global = true)]
    pub rpc_url: String,

    /// Name of the network, selecting its deployments file & timelock ledger
    #[arg(short, long, env = "NETWORK", default_value = DEFAULT_NETWORK, global = true)]
    pub network: String,

    /// Name of the network designated as mainnet; when unset, no network is
    #[arg(long, env = "MAINNET", global = true)]
    pub mainnet: Option<String>,

    /// Project root under which the deployments & timelock records live
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Directory holding the compilation artifacts, relative to the root
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR, global = true)]
    pub artifacts: PathBuf,
}

/// The scripts that can be run
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the BEETS token and mint the partnership, team & LBP funds
    DeployToken(DeployTokenArgs),
    /// Deploy the governance timelock
    DeployTimelock(DeployTimelockArgs),
    /// Deploy the master chef and hand it ownership of the BEETS token
    DeployMasterChef(DeployMasterChefArgs),
    /// Deploy the token, timelock, and master chef in order
    DeployAll(DeployAllArgs),
    /// Deploy a timelock for LP tokens staked in the master chef
    DeployLpTokenTimelock(DeployLpTokenTimelockArgs),
    /// Hand ownership of the master chef to the timelock
    TransferMasterChefOwnership(TransferMasterChefOwnershipArgs),
    /// Add the network's initial farm pools to the master chef
    CreateInitialPools(MasterChefArgs),
    /// Add a farm pool to the master chef, directly or through the timelock
    AddPool(AddPoolArgs),
    /// List the master chef's farm pools
    ListPools(MasterChefArgs),
    /// Inspect, queue, and execute timelock transactions
    #[command(subcommand)]
    Timelock(TimelockCommand),
}

impl Command {
    /// Runs the command against the network described by `network`
    pub async fn run(self, network: &NetworkArgs) -> Result<(), ScriptError> {
        match self {
            // Listing only reads the ledger, so needs no connection
            Command::Timelock(TimelockCommand::List(args)) => {
                list_transactions(&NetworkConfig::from(network), args.executable)
            }
            command => {
                let ctx = ScriptContext::connect(network).await?;
                command.run_connected(&ctx).await
            }
        }
    }

    /// Runs a command which sends transactions or reads chain state
    async fn run_connected(self, ctx: &ScriptContext) -> Result<(), ScriptError> {
        match self {
            Command::DeployToken(args) => deploy_token(&args, ctx).await,
            Command::DeployTimelock(args) => deploy_timelock(&args, ctx).await,
            Command::DeployMasterChef(args) => deploy_master_chef(&args, ctx).await,
            Command::DeployAll(args) => {
                ctx.print_network();
                deploy_token(&args.token, ctx).await?;
                deploy_timelock(&args.timelock, ctx).await?;
                deploy_master_chef(&args.master_chef, ctx).await
            }
            Command::DeployLpTokenTimelock(args) => deploy_lp_token_timelock(&args, ctx).await,
            Command::TransferMasterChefOwnership(args) => {
                transfer_master_chef_ownership(&args, ctx).await
            }
            Command::CreateInitialPools(args) => create_initial_pools(ctx, args.master_chef).await,
            Command::AddPool(args) => {
                let submission = timelock_queue_questions(
                    args.queue.eta,
                    args.queue.no_timelock,
                    ctx.network.is_mainnet,
                )?;
                let res = add_pool(
                    ctx,
                    args.master_chef.master_chef,
                    args.allocation_points,
                    args.lp_token,
                    args.rewarder,
                    submission,
                )
                .await?;
                println!("{res}");
                Ok(())
            }
            Command::ListPools(args) => list_pools(ctx, args.master_chef).await,
            Command::Timelock(TimelockCommand::Queue(args)) => {
                let eta = match args.eta {
                    Some(eta) => eta,
                    None => prompt_for_eta(ctx.network.is_mainnet)?,
                };
                let target = TargetContract {
                    name: args.contract_name,
                    address: args.target,
                };
                let function = TargetFunction {
                    identifier: args.signature,
                    args: args.args.into_iter().map(Value::String).collect(),
                };

                let id = queue_transaction(ctx, target, function, eta).await?;
                println!("{id}");
                Ok(())
            }
            Command::Timelock(TimelockCommand::Execute(args)) => {
                execute_transactions(ctx, args.ids).await
            }
            Command::Timelock(TimelockCommand::List(args)) => {
                list_transactions(&ctx.network, args.executable)
            }
        }
    }
}

/// Deploy the BEETS token
#[derive(Args, Clone, Debug)]
pub struct DeployTokenArgs {
    /// Address receiving the strategic partnership funds (7% of supply)
    #[arg(long, env = "PARTNERSHIP_FUND_ADDRESS")]
    pub partnership_fund: Address,

    /// Address receiving the team (13% of supply) and LBP (2% of supply) funds
    #[arg(long, env = "TEAM_FUND_ADDRESS")]
    pub team_fund: Address,
}

/// Deploy the governance timelock
#[derive(Args, Clone, Debug)]
pub struct DeployTimelockArgs {
    /// Admin of the timelock, defaults to the deployer
    #[arg(long)]
    pub admin: Option<Address>,

    /// Minimum delay between queueing and executing a transaction, in seconds
    #[arg(long, default_value_t = TIMELOCK_DELAY_SECS)]
    pub delay: u64,
}

/// Deploy the master chef
#[derive(Args, Clone, Debug)]
pub struct DeployMasterChefArgs {
    /// Address receiving the treasury's share of emissions
    #[arg(long, env = "TREASURY_ADDRESS")]
    pub treasury: Address,

    /// Block at which emissions start
    #[arg(long, env = "DEPLOYMENT_MC_START_BLOCK")]
    pub start_block: u64,

    /// BEETS emitted per block in wei, defaults to 5.05 BEETS
    #[arg(long)]
    pub beets_per_block: Option<U256>,
}

/// Deploy the token, timelock, and master chef in order
#[derive(Args, Clone, Debug)]
pub struct DeployAllArgs {
    /// Arguments for the token deployment
    #[command(flatten)]
    pub token: DeployTokenArgs,

    /// Arguments for the timelock deployment
    #[command(flatten)]
    pub timelock: DeployTimelockArgs,

    /// Arguments for the master chef deployment
    #[command(flatten)]
    pub master_chef: DeployMasterChefArgs,
}

/// Deploy a timelock for LP tokens staked in the master chef
#[derive(Args, Clone, Debug)]
pub struct DeployLpTokenTimelockArgs {
    /// The LP token held by the timelock
    #[arg(long)]
    pub token: Address,

    /// Address the tokens are released to
    #[arg(long)]
    pub beneficiary: Address,

    /// Unix timestamp after which the tokens can be released
    #[arg(long)]
    pub release_time: u64,

    /// The master chef the tokens are staked in, defaults to the deployed one
    #[arg(long)]
    pub master_chef: Option<Address>,

    /// The master chef pool the tokens are staked in
    #[arg(long)]
    pub pool_id: u64,
}

/// Hand ownership of the master chef to the timelock
#[derive(Args, Clone, Debug)]
pub struct TransferMasterChefOwnershipArgs {
    /// The master chef, defaults to the deployed one
    #[arg(long)]
    pub master_chef: Option<Address>,

    /// The new owner, defaults to the deployed timelock
    #[arg(long)]
    pub timelock: Option<Address>,
}

/// Select the master chef to interact with
#[derive(Args, Clone, Debug)]
pub struct MasterChefArgs {
    /// The master chef, defaults to the deployed one
    #[arg(long)]
    pub master_chef: Option<Address>,
}

/// How to submit an administrative transaction; the operator is asked when
/// neither option is given
#[derive(Args, Clone, Debug)]
pub struct QueueArgs {
    /// Queue on the timelock, executable at this unix timestamp
    #[arg(long, conflicts_with = "no_timelock")]
    pub eta: Option<u64>,

    /// Call the contract directly instead of queueing on the timelock
    #[arg(long)]
    pub no_timelock: bool,
}

/// Add a farm pool to the master chef
#[derive(Args, Clone, Debug)]
pub struct AddPoolArgs {
    /// The share of emissions allocated to the pool
    #[arg(long)]
    pub allocation_points: u64,

    /// The LP token staked in the pool
    #[arg(long)]
    pub lp_token: Address,

    /// The rewarder paying out additional tokens, if any
    #[arg(long, default_value_t = Address::ZERO)]
    pub rewarder: Address,

    /// The master chef to add the pool to
    #[command(flatten)]
    pub master_chef: MasterChefArgs,

    /// How to submit the transaction
    #[command(flatten)]
    pub queue: QueueArgs,
}

/// Timelock ledger commands
#[derive(Subcommand)]
pub enum TimelockCommand {
    /// List the stored timelock transactions
    List(TimelockListArgs),
    /// Queue an arbitrary call on the timelock
    Queue(TimelockQueueArgs),
    /// Execute queued timelock transactions whose ETA has passed
    Execute(TimelockExecuteArgs),
}

/// List the stored timelock transactions
#[derive(Args, Clone, Debug)]
pub struct TimelockListArgs {
    /// Only list the ids of transactions which can be executed now
    #[arg(long)]
    pub executable: bool,
}

/// Queue an arbitrary call on the timelock
#[derive(Args, Clone, Debug)]
pub struct TimelockQueueArgs {
    /// Name of the target contract, as recorded in the ledger
    #[arg(long)]
    pub contract_name: String,

    /// Address of the target contract
    #[arg(long)]
    pub target: Address,

    /// Solidity signature of the function to call, e.g. `set(uint256,uint256,address,bool)`
    #[arg(long)]
    pub signature: String,

    /// Unix timestamp at which the call becomes executable; the operator is
    /// asked when unset
    #[arg(long)]
    pub eta: Option<u64>,

    /// Arguments of the call
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Execute queued timelock transactions
#[derive(Args, Clone, Debug)]
pub struct TimelockExecuteArgs {
    /// Ids of the transactions to execute, defaults to every executable one
    pub ids: Vec<String>,
}

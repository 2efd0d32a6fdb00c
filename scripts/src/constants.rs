//! Constants used in the deploy & timelock scripts

/// The RPC URL used when none is configured, a local development node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The network name used when none is configured
pub const DEFAULT_NETWORK: &str = "localhost";

/// The directory holding the Hardhat compilation artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The directory, relative to the artifacts directory, holding the contract sources
pub const ARTIFACT_SOURCES_DIR: &str = "contracts";

/// The extension of a Solidity source file
pub const SOLIDITY_EXTENSION: &str = "sol";

// -------------
// | CONTRACTS |
// -------------

/// The deployment name of the BEETS token
pub const BEETS_TOKEN_NAME: &str = "BeethovenxToken";

/// The fully-qualified artifact name of the BEETS token
pub const BEETS_TOKEN_ARTIFACT: &str = "contracts/BeethovenxToken.sol:BeethovenxToken";

/// The deployment name of the timelock
pub const TIMELOCK_NAME: &str = "Timelock";

/// The artifact name of the timelock
pub const TIMELOCK_ARTIFACT: &str = "Timelock";

/// The deployment name of the master chef
pub const MASTER_CHEF_NAME: &str = "BeethovenxMasterChef";

/// The fully-qualified artifact name of the master chef
pub const MASTER_CHEF_ARTIFACT: &str = "contracts/BeethovenxMasterChef.sol:BeethovenxMasterChef";

/// The deployment name of the master chef LP token timelock
pub const LP_TOKEN_TIMELOCK_NAME: &str = "MasterChefLpTokenTimelock";

/// The artifact name of the master chef LP token timelock
pub const LP_TOKEN_TIMELOCK_ARTIFACT: &str = "MasterChefLpTokenTimelock";

// --------------
// | TOKENOMICS |
// --------------

/// The strategic partnership funds, 7% of the total supply, in whole tokens
pub const STRATEGIC_PARTNERSHIP_FUNDS: u64 = 17_500_000;

/// The team funds, 13% of the total supply, in whole tokens
pub const TEAM_FUNDS: u64 = 32_500_000;

/// The liquidity bootstrapping pool funds, 2% of the total supply, in whole tokens
pub const LBP_FUNDS: u64 = 5_000_000;

/// The BEETS emitted per block, scaled by `10^BEETS_PER_BLOCK_DECIMALS`
pub const BEETS_PER_BLOCK: u64 = 505;

/// The decimals by which `BEETS_PER_BLOCK` is scaled, i.e. 5.05 BEETS per block
pub const BEETS_PER_BLOCK_DECIMALS: u8 = 16;

/// The delay the timelock is deployed with, in seconds
pub const TIMELOCK_DELAY_SECS: u64 = 600;

/// Slack added on top of the timelock delay when validating an ETA, since the
/// queueing transaction is mined after the local clock is read
pub const ETA_MARGIN_SECS: u64 = 60;

// ------------
// | NETWORKS |
// ------------

/// The chain id of Fantom Opera
pub const OPERA_CHAIN_ID: u64 = 250;

/// The chain id of the Rinkeby testnet
pub const RINKEBY_CHAIN_ID: u64 = 4;

/// The allocation points given to each initial farm pool on testnets
pub const TESTNET_POOL_ALLOCATION_POINTS: u64 = 10;

/// The ETA default shown to the operator when queueing on mainnet
pub const MAINNET_ETA_LABEL: &str = "6h + 10min";

/// The ETA default shown to the operator when queueing on a testnet
pub const TESTNET_ETA_LABEL: &str = "12mins";

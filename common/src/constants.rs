//! Constants shared by the record stores and unit helpers

/// The base of the decimal fixed-point representation used by ERC20 amounts
pub const BASE_TEN: u64 = 10;

/// The number of decimals used by the BEETS token
pub const DEFAULT_DECIMALS: u8 = 18;

/// The delay after which a transaction queued on mainnet becomes executable
/// by default, in seconds (6 hours and 10 minutes)
pub const MAINNET_DEFAULT_ETA_DELAY_SECS: u64 = (6 * 60 + 10) * 60;

/// The delay after which a transaction queued on a test network becomes
/// executable by default, in seconds (12 minutes)
pub const TESTNET_DEFAULT_ETA_DELAY_SECS: u64 = 12 * 60;

/// The `strftime` format used to render transaction ETAs
pub const ETA_DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// The directory, relative to the project root, holding the timelock ledgers
pub const TIMELOCK_LEDGER_DIR: &str = ".timelock";

/// The directory, relative to the project root, holding the deployment records
pub const DEPLOYMENTS_DIR: &str = "deployments";

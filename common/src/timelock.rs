//! The per-network ledger of transactions queued on the timelock
//!
//! The ledger is a JSON object keyed by transaction id. A transaction's id is
//! the hash the timelock contract itself uses to track the queued call, so
//! entries in the ledger correspond one-to-one with `queuedTransactions`
//! entries on chain.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use alloy::{
    primitives::{keccak256, Address, Bytes, B256, U256},
    sol_types::SolValue,
};
use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::{
    constants::{
        ETA_DATE_FORMAT, MAINNET_DEFAULT_ETA_DELAY_SECS, TESTNET_DEFAULT_ETA_DELAY_SECS,
        TIMELOCK_LEDGER_DIR,
    },
    errors::StoreError,
    json_file::{read_or_default, write_pretty},
    types::StoredTimelockTransaction,
};

/// The path of the timelock ledger for `network` under `root`
pub fn ledger_path(root: &Path, network: &str) -> PathBuf {
    root.join(TIMELOCK_LEDGER_DIR)
        .join(format!("transactions.{network}.json"))
}

/// Computes the id under which the timelock tracks a queued call, i.e.
/// `keccak256(abi.encode(target, value, signature, data, eta))`
pub fn timelock_transaction_id(
    target: Address,
    value: U256,
    signature: &str,
    data: &[u8],
    eta: u64,
) -> B256 {
    let encoded = (
        target,
        value,
        signature.to_string(),
        Bytes::copy_from_slice(data),
        U256::from(eta),
    )
        .abi_encode_params();

    keccak256(encoded)
}

/// The ETA offered by default when queueing a transaction at `now`
pub fn default_eta(is_mainnet: bool, now: u64) -> u64 {
    if is_mainnet {
        now + MAINNET_DEFAULT_ETA_DELAY_SECS
    } else {
        now + TESTNET_DEFAULT_ETA_DELAY_SECS
    }
}

/// Renders a unix timestamp as a human-readable UTC date
pub fn format_eta(eta: u64) -> String {
    i64::try_from(eta)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|date| date.format(ETA_DATE_FORMAT).to_string())
        .unwrap_or_else(|| eta.to_string())
}

/// The timelock transactions stored for a single network
#[derive(Debug)]
pub struct TimelockLedger {
    /// The path of the backing file
    path: PathBuf,
    /// The stored transactions, keyed by id
    transactions: BTreeMap<String, StoredTimelockTransaction>,
}

impl TimelockLedger {
    /// Loads the ledger at `path`; a missing file is an empty ledger
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let transactions = read_or_default(&path)?;
        Ok(Self { path, transactions })
    }

    /// Persists the ledger to its backing file
    pub fn save(&self) -> Result<(), StoreError> {
        write_pretty(&self.path, &self.transactions)
    }

    /// The path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The number of stored transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the ledger holds no transactions
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Whether a transaction is stored under `id`
    pub fn contains(&self, id: &str) -> bool {
        self.transactions.contains_key(id)
    }

    /// Looks up the transaction stored under `id`
    pub fn get(&self, id: &str) -> Result<&StoredTimelockTransaction, StoreError> {
        self.transactions
            .get(id)
            .ok_or_else(|| StoreError::UnknownTransaction(id.to_string()))
    }

    /// Stores a newly queued transaction under `id`
    pub fn insert(
        &mut self,
        id: String,
        transaction: StoredTimelockTransaction,
    ) -> Result<(), StoreError> {
        if self.transactions.contains_key(&id) {
            return Err(StoreError::DuplicateTransaction(id));
        }

        self.transactions.insert(id, transaction);
        Ok(())
    }

    /// Marks the transaction stored under `id` as executed by `tx_hash`
    pub fn mark_executed(&mut self, id: &str, tx_hash: B256) -> Result<(), StoreError> {
        let transaction = self
            .transactions
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownTransaction(id.to_string()))?;

        if transaction.executed {
            return Err(StoreError::AlreadyExecuted(id.to_string()));
        }

        transaction.executed = true;
        transaction.execute_tx_hash = Some(tx_hash);
        Ok(())
    }

    /// The ids of the stored transactions, ordered by ETA.
    ///
    /// If `only_executable` is set, only transactions which have not been
    /// executed and whose ETA is at or before `now` are returned.
    pub fn transaction_ids(&self, only_executable: bool, now: u64) -> Vec<String> {
        self.by_eta()
            .filter(|(_, transaction)| !only_executable || transaction.is_executable(now))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Describes every stored transaction, one per line, ordered by ETA
    pub fn describe_transactions(&self) -> String {
        self.by_eta()
            .map(|(id, transaction)| describe_transaction(id, transaction))
            .join("\n")
    }

    /// Iterates over the stored transactions ordered by ETA, then id
    fn by_eta(&self) -> impl Iterator<Item = (&String, &StoredTimelockTransaction)> {
        self.transactions
            .iter()
            .sorted_by(|(id_a, a), (id_b, b)| a.eta.cmp(&b.eta).then_with(|| id_a.cmp(id_b)))
    }
}

/// Renders a single ledger entry for display
fn describe_transaction(id: &str, transaction: &StoredTimelockTransaction) -> String {
    let args = serde_json::to_string(&transaction.target_function.args).unwrap_or_default();
    let execute_tx_hash = transaction
        .execute_tx_hash
        .map(|hash| format!("{hash:#x}"))
        .unwrap_or_default();

    format!(
        "[{}][{}]  - {} - {} - {} - {} - executed: {} {}",
        id,
        format_eta(transaction.eta),
        transaction.target_contract.name,
        transaction.target_contract.address,
        transaction.target_function.identifier,
        args,
        transaction.executed,
        execute_tx_hash,
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use alloy::{
        primitives::{address, b256, Address, B256, U256},
        sol_types::SolValue,
    };
    use serde_json::json;
    use tempfile::TempDir;

    use crate::{
        errors::StoreError,
        types::{StoredTimelockTransaction, TargetContract, TargetFunction},
    };

    use super::{default_eta, ledger_path, timelock_transaction_id, TimelockLedger};

    /// The master chef address used in the test transactions
    const MASTER_CHEF: Address = address!("8166994d9ebbe5829ec86bd81258149b87facfd3");

    /// The timestamp treated as "now" in the tests
    const NOW: u64 = 1_700_000_000;

    /// Builds a queued `add` transaction with the given ETA & status
    fn add_pool_tx(eta: u64, executed: bool) -> StoredTimelockTransaction {
        StoredTimelockTransaction {
            target_contract: TargetContract {
                name: "BeethovenxMasterChef".to_string(),
                address: MASTER_CHEF,
            },
            target_function: TargetFunction {
                identifier: "add(uint256,address,address)".to_string(),
                args: vec![
                    json!(10),
                    json!("0x33276D43aDA054a281d40a11d48310Cdc0156fc2"),
                    json!("0x0000000000000000000000000000000000000000"),
                ],
            },
            eta,
            executed,
            execute_tx_hash: executed.then_some(B256::repeat_byte(0xab)),
        }
    }

    /// Builds a ledger in `dir` holding the given transactions
    fn ledger_with(dir: &TempDir, txs: Vec<(&str, StoredTimelockTransaction)>) -> TimelockLedger {
        let mut ledger = TimelockLedger::load(ledger_path(dir.path(), "rinkeby")).unwrap();
        for (id, tx) in txs {
            ledger.insert(id.to_string(), tx).unwrap();
        }
        ledger
    }

    #[test]
    fn test_executable_filter() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with(
            &dir,
            vec![
                ("past", add_pool_tx(NOW - 60, false)),
                ("due", add_pool_tx(NOW, false)),
                ("future", add_pool_tx(NOW + 1, false)),
                ("done", add_pool_tx(NOW - 120, true)),
            ],
        );

        assert_eq!(ledger.transaction_ids(true, NOW), vec!["past", "due"]);
        assert_eq!(
            ledger.transaction_ids(false, NOW),
            vec!["done", "past", "due", "future"]
        );
    }

    #[test]
    fn test_becomes_executable_at_eta() {
        let tx = add_pool_tx(NOW, false);
        assert!(!tx.is_executable(NOW - 1));
        assert!(tx.is_executable(NOW));
        assert!(tx.is_executable(NOW + 3600));
    }

    #[test]
    fn test_mark_executed() {
        let dir = TempDir::new().unwrap();
        let mut ledger = ledger_with(&dir, vec![("due", add_pool_tx(NOW, false))]);

        let hash = B256::repeat_byte(0x11);
        ledger.mark_executed("due", hash).unwrap();

        let tx = ledger.get("due").unwrap();
        assert!(tx.executed);
        assert_eq!(tx.execute_tx_hash, Some(hash));
        assert!(ledger.transaction_ids(true, NOW).is_empty());

        assert!(matches!(
            ledger.mark_executed("due", hash),
            Err(StoreError::AlreadyExecuted(_))
        ));
        assert!(matches!(
            ledger.mark_executed("missing", hash),
            Err(StoreError::UnknownTransaction(_))
        ));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let dir = TempDir::new().unwrap();
        let mut ledger = ledger_with(&dir, vec![("due", add_pool_tx(NOW, false))]);

        let res = ledger.insert("due".to_string(), add_pool_tx(NOW + 10, false));
        assert!(matches!(res, Err(StoreError::DuplicateTransaction(id)) if id == "due"));
        assert_eq!(ledger.get("due").unwrap().eta, NOW);
    }

    #[test]
    fn test_describe_transactions() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with(
            &dir,
            vec![
                ("b", add_pool_tx(0, true)),
                ("a", add_pool_tx(86_400, false)),
            ],
        );

        let expected = format!(
            "[b][Thu Jan 01 1970 00:00:00 GMT+0000]  - BeethovenxMasterChef - {MASTER_CHEF} - \
             add(uint256,address,address) - [10,\"0x33276D43aDA054a281d40a11d48310Cdc0156fc2\",\
             \"0x0000000000000000000000000000000000000000\"] - executed: true 0x{}\n\
             [a][Fri Jan 02 1970 00:00:00 GMT+0000]  - BeethovenxMasterChef - {MASTER_CHEF} - \
             add(uint256,address,address) - [10,\"0x33276D43aDA054a281d40a11d48310Cdc0156fc2\",\
             \"0x0000000000000000000000000000000000000000\"] - executed: false ",
            "ab".repeat(32),
        );
        assert_eq!(ledger.describe_transactions(), expected);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with(&dir, vec![("due", add_pool_tx(NOW, false))]);
        ledger.save().unwrap();

        let reloaded = TimelockLedger::load(ledger.path()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get("due").unwrap(), &add_pool_tx(NOW, false));
    }

    #[test]
    fn test_reads_camel_case_records() {
        let dir = TempDir::new().unwrap();
        let path = ledger_path(dir.path(), "opera");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{
                "0x01": {
                    "eta": 1650622502,
                    "executed": true,
                    "executeTxHash": "0xabababababababababababababababababababababababababababababababab",
                    "targetContract": {
                        "name": "BeethovenxMasterChef",
                        "address": "0x8166994d9ebBe5829EC86Bd81258149B87faCfd3"
                    },
                    "targetFunction": { "identifier": "set(uint256,uint256,address,bool)", "args": [0, 20, "0x0000000000000000000000000000000000000000", false] }
                }
            }"#,
        )
        .unwrap();

        let ledger = TimelockLedger::load(&path).unwrap();
        let tx = ledger.get("0x01").unwrap();
        assert_eq!(tx.target_contract.address, MASTER_CHEF);
        assert_eq!(tx.execute_tx_hash, Some(B256::repeat_byte(0xab)));
        assert_eq!(tx.target_function.args.len(), 4);
    }

    #[test]
    fn test_malformed_ledger_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = ledger_path(dir.path(), "opera");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        assert!(matches!(TimelockLedger::load(&path), Err(StoreError::Serde(_))));
    }

    #[test]
    fn test_transaction_id_commits_to_eta() {
        let signature = "add(uint256,address,address)";
        let id = timelock_transaction_id(MASTER_CHEF, U256::ZERO, signature, &[1, 2, 3], NOW);

        assert_eq!(
            id,
            timelock_transaction_id(MASTER_CHEF, U256::ZERO, signature, &[1, 2, 3], NOW)
        );
        assert_ne!(
            id,
            timelock_transaction_id(MASTER_CHEF, U256::ZERO, signature, &[1, 2, 3], NOW + 1)
        );
    }

    #[test]
    fn test_transaction_id_matches_timelock_hash() {
        // `keccak256(abi.encode(target, 0, "add(uint256,address,address)", data, eta))`
        // as computed by the timelock's `queueTransaction`
        let data = (
            U256::from(10),
            address!("33276d43ada054a281d40a11d48310cdc0156fc2"),
            Address::ZERO,
        )
            .abi_encode_params();

        let id = timelock_transaction_id(
            MASTER_CHEF,
            U256::ZERO,
            "add(uint256,address,address)",
            &data,
            NOW,
        );
        assert_eq!(
            id,
            b256!("34f062400086df91ca8278819d0e1bb73e90144840c63e90b38a55a7123ebd58")
        );
    }

    #[test]
    fn test_default_eta() {
        assert_eq!(default_eta(true, NOW), NOW + 6 * 3600 + 10 * 60);
        assert_eq!(default_eta(false, NOW), NOW + 12 * 60);
    }
}

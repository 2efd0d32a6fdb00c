//! Queueing & executing administrative transactions through the timelock,
//! tracked in the network's timelock ledger

use alloy::{
    dyn_abi::{DynSolType, DynSolValue, Specifier},
    json_abi::Function,
    primitives::{Bytes, U256},
};
use beets_common::{
    errors::StoreError,
    timelock::{default_eta, format_eta, timelock_transaction_id, TimelockLedger},
    types::{StoredTimelockTransaction, TargetContract, TargetFunction},
};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    constants::{ETA_MARGIN_SECS, MAINNET_ETA_LABEL, TESTNET_ETA_LABEL},
    errors::ScriptError,
    prompts::{prompt_for_confirm, prompt_for_u64},
    utils::{send_tx, unix_now, NetworkConfig, ScriptContext},
};

// ------------
// | QUEUEING |
// ------------

/// How the operator chose to submit an administrative transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Call the target contract directly
    Direct,
    /// Queue the call on the timelock, executable at the given ETA
    Timelock {
        /// The unix timestamp at which the call becomes executable
        eta: u64,
    },
}

/// Asks the operator whether to queue on the timelock and, if so, when the
/// transaction should become executable.
///
/// An ETA given up front skips the questions, as does opting out of the
/// timelock.
pub fn timelock_queue_questions(
    eta: Option<u64>,
    no_timelock: bool,
    is_mainnet: bool,
) -> Result<Submission, ScriptError> {
    if no_timelock {
        return Ok(Submission::Direct);
    }
    if let Some(eta) = eta {
        return Ok(Submission::Timelock { eta });
    }

    if !prompt_for_confirm("queue on timelock")? {
        return Ok(Submission::Direct);
    }

    Ok(Submission::Timelock {
        eta: prompt_for_eta(is_mainnet)?,
    })
}

/// Asks the operator when a timelock transaction should become executable,
/// defaulting to the network's usual delay from now
pub fn prompt_for_eta(is_mainnet: bool) -> Result<u64, ScriptError> {
    let label = if is_mainnet {
        MAINNET_ETA_LABEL
    } else {
        TESTNET_ETA_LABEL
    };
    prompt_for_u64(
        &format!("eta when to be executed on timelock (default: {label})"),
        default_eta(is_mainnet, unix_now()),
    )
}

/// Checks that the timelock will accept a transaction queued at `now` with
/// the given ETA, leaving a margin for the time until the queueing
/// transaction is mined
pub fn check_eta(eta: u64, now: u64, delay: u64) -> Result<(), ScriptError> {
    let earliest = now.saturating_add(delay).saturating_add(ETA_MARGIN_SECS);
    if eta < earliest {
        return Err(ScriptError::InvalidEta(format!(
            "eta {eta} is before {earliest}, the timelock delay of {delay}s plus \
             {ETA_MARGIN_SECS}s for the queueing transaction to be mined"
        )));
    }

    Ok(())
}

/// Queues a call of `function` on `target` on the timelock, recording it in
/// the ledger. Returns the id of the queued transaction.
pub async fn queue_transaction(
    ctx: &ScriptContext,
    target: TargetContract,
    function: TargetFunction,
    eta: u64,
) -> Result<String, ScriptError> {
    let timelock = ctx.timelock()?;
    let mut ledger = ctx.network.ledger()?;

    let delay = timelock
        .delay()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    check_eta(eta, unix_now(), delay.saturating_to())?;

    let (signature, data) = encode_target_function(&function)?;
    let tx_hash = timelock_transaction_id(target.address, U256::ZERO, &signature, &data, eta);
    let id = format!("{tx_hash:#x}");
    if ledger.contains(&id) {
        return Err(StoreError::DuplicateTransaction(id).into());
    }

    let queued = timelock
        .queuedTransactions(tx_hash)
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    if queued {
        return Err(ScriptError::ContractInteraction(format!(
            "{id} is already queued on the timelock but missing from {}",
            ledger.path().display()
        )));
    }

    info!(
        "queueing {} on {} ({}) for {}",
        signature, target.name, target.address, eta
    );
    let receipt = send_tx(timelock.queueTransaction(
        target.address,
        U256::ZERO,
        signature,
        data,
        U256::from(eta),
    ))
    .await?;

    ledger.insert(
        id.clone(),
        StoredTimelockTransaction {
            target_contract: target,
            target_function: function,
            eta,
            executed: false,
            execute_tx_hash: None,
        },
    )?;
    ledger.save()?;

    info!(
        "queued timelock transaction {} in tx {:#x}",
        id, receipt.transaction_hash
    );
    Ok(id)
}

// -------------
// | EXECUTION |
// -------------

/// Executes the given timelock transactions, or every executable one if no
/// ids are given, marking each as executed in the ledger
pub async fn execute_transactions(
    ctx: &ScriptContext,
    ids: Vec<String>,
) -> Result<(), ScriptError> {
    let timelock = ctx.timelock()?;
    let mut ledger = ctx.network.ledger()?;
    let now = unix_now();

    let ids = select_for_execution(&ledger, ids, now)?;
    if ids.is_empty() {
        info!("no executable timelock transactions");
        return Ok(());
    }

    for id in ids {
        let transaction = ledger.get(&id)?.clone();
        let (signature, data) = encode_target_function(&transaction.target_function)?;
        info!(
            "executing {} on {} ({})",
            signature, transaction.target_contract.name, transaction.target_contract.address
        );

        let receipt = send_tx(timelock.executeTransaction(
            transaction.target_contract.address,
            U256::ZERO,
            signature,
            data,
            U256::from(transaction.eta),
        ))
        .await?;

        ledger.mark_executed(&id, receipt.transaction_hash)?;
        ledger.save()?;
        info!("executed {} in tx {:#x}", id, receipt.transaction_hash);
    }

    Ok(())
}

/// Resolves which transactions to execute at `now`: the given ids, or every
/// executable transaction if none are given. Fails if any given id is unknown,
/// already executed, or not yet due.
pub fn select_for_execution(
    ledger: &TimelockLedger,
    ids: Vec<String>,
    now: u64,
) -> Result<Vec<String>, ScriptError> {
    if ids.is_empty() {
        return Ok(ledger.transaction_ids(true /* only_executable */, now));
    }

    for id in &ids {
        let transaction = ledger.get(id)?;
        if transaction.executed {
            return Err(ScriptError::NotExecutable(format!("{id}: already executed")));
        }
        if !transaction.is_executable(now) {
            return Err(ScriptError::NotExecutable(format!(
                "{id}: eta {} not reached",
                format_eta(transaction.eta)
            )));
        }
    }

    Ok(ids)
}

// -----------
// | LISTING |
// -----------

/// Prints the stored timelock transactions, or only the ids of the
/// executable ones
pub fn list_transactions(network: &NetworkConfig, only_executable: bool) -> Result<(), ScriptError> {
    let ledger = network.ledger()?;
    if ledger.is_empty() {
        warn!("no timelock transactions stored in {}", ledger.path().display());
        return Ok(());
    }

    info!(
        "{} timelock transactions stored in {}",
        ledger.len(),
        ledger.path().display()
    );
    if only_executable {
        for id in ledger.transaction_ids(true /* only_executable */, unix_now()) {
            println!("{id}");
        }
    } else {
        println!("{}", ledger.describe_transactions());
    }

    Ok(())
}

// ------------
// | ENCODING |
// ------------

/// Encodes a stored function call into the signature & argument data the
/// timelock expects; the timelock prepends the selector itself
pub fn encode_target_function(function: &TargetFunction) -> Result<(String, Bytes), ScriptError> {
    let parsed = Function::parse(&function.identifier)
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;

    if parsed.inputs.len() != function.args.len() {
        return Err(ScriptError::CalldataConstruction(format!(
            "{} takes {} arguments, got {}",
            function.identifier,
            parsed.inputs.len(),
            function.args.len()
        )));
    }

    let values = parsed
        .inputs
        .iter()
        .zip(&function.args)
        .map(|(param, arg)| {
            let ty = param
                .resolve()
                .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;
            json_arg_to_sol(&ty, arg)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let data = DynSolValue::Tuple(values).abi_encode_params();
    Ok((parsed.signature(), data.into()))
}

/// Converts a stored JSON argument into a value of the Solidity type `ty`.
///
/// JSON arrays are converted element-wise into arrays & tuples; any other
/// value is parsed from its textual form.
fn json_arg_to_sol(ty: &DynSolType, arg: &Value) -> Result<DynSolValue, ScriptError> {
    match (ty, arg) {
        (DynSolType::Array(inner), Value::Array(elems)) => elems
            .iter()
            .map(|elem| json_arg_to_sol(inner, elem))
            .collect::<Result<_, _>>()
            .map(DynSolValue::Array),
        (DynSolType::FixedArray(inner, len), Value::Array(elems)) => {
            if elems.len() != *len {
                return Err(ScriptError::CalldataConstruction(format!(
                    "{arg}: expected {len} elements for {}",
                    ty.sol_type_name()
                )));
            }
            elems
                .iter()
                .map(|elem| json_arg_to_sol(inner, elem))
                .collect::<Result<_, _>>()
                .map(DynSolValue::FixedArray)
        }
        (DynSolType::Tuple(types), Value::Array(elems)) => {
            if elems.len() != types.len() {
                return Err(ScriptError::CalldataConstruction(format!(
                    "{arg}: expected {} fields for {}",
                    types.len(),
                    ty.sol_type_name()
                )));
            }
            types
                .iter()
                .zip(elems)
                .map(|(ty, elem)| json_arg_to_sol(ty, elem))
                .collect::<Result<_, _>>()
                .map(DynSolValue::Tuple)
        }
        _ => ty
            .coerce_str(&json_arg_to_string(arg))
            .map_err(|e| ScriptError::CalldataConstruction(format!("{arg}: {e}"))),
    }
}

/// Renders a stored JSON scalar in the textual form its Solidity type is
/// parsed from
fn json_arg_to_string(arg: &Value) -> String {
    match arg {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use alloy::{
        dyn_abi::DynSolValue,
        primitives::{address, Address, U256},
        sol_types::SolCall,
    };
    use beets_common::{
        errors::StoreError,
        timelock::{ledger_path, TimelockLedger},
        types::{StoredTimelockTransaction, TargetContract, TargetFunction},
    };
    use serde_json::json;
    use tempfile::TempDir;

    use crate::{errors::ScriptError, solidity::IBeethovenxMasterChef};

    use super::{check_eta, encode_target_function, select_for_execution};

    /// The LP token of the first Rinkeby test pool
    const LP_TOKEN: Address = address!("33276d43ada054a281d40a11d48310cdc0156fc2");

    /// The timestamp treated as "now" in the tests
    const NOW: u64 = 1_700_000_000;

    /// Builds a ledger in `dir` holding `set` transactions with the given ids,
    /// ETAs & statuses
    fn ledger_with(dir: &TempDir, txs: &[(&str, u64, bool)]) -> TimelockLedger {
        let mut ledger = TimelockLedger::load(ledger_path(dir.path(), "rinkeby")).unwrap();
        for (id, eta, executed) in txs {
            let tx = StoredTimelockTransaction {
                target_contract: TargetContract {
                    name: "BeethovenxMasterChef".to_string(),
                    address: LP_TOKEN,
                },
                target_function: TargetFunction {
                    identifier: "set(uint256,uint256,address,bool)".to_string(),
                    args: vec![json!(0), json!(20), json!(Address::ZERO.to_string()), json!(false)],
                },
                eta: *eta,
                executed: *executed,
                execute_tx_hash: None,
            };
            ledger.insert(id.to_string(), tx).unwrap();
        }
        ledger
    }

    #[test]
    fn test_encode_matches_typed_call() {
        let function = TargetFunction {
            identifier: "add(uint256,address,address)".to_string(),
            args: vec![json!(10), json!(LP_TOKEN.to_string()), json!(Address::ZERO.to_string())],
        };

        let (signature, data) = encode_target_function(&function).unwrap();

        let typed = IBeethovenxMasterChef::addCall {
            allocPoint: U256::from(10),
            lpToken: LP_TOKEN,
            rewarder: Address::ZERO,
        };
        assert_eq!(signature, IBeethovenxMasterChef::addCall::SIGNATURE);
        assert_eq!(data.to_vec(), typed.abi_encode()[4..].to_vec());
    }

    #[test]
    fn test_encode_accepts_string_numbers_and_bools() {
        let function = TargetFunction {
            identifier: "set(uint256,uint256,address,bool)".to_string(),
            args: vec![json!("0"), json!(20), json!(Address::ZERO.to_string()), json!(true)],
        };

        let (signature, data) = encode_target_function(&function).unwrap();
        assert_eq!(signature, "set(uint256,uint256,address,bool)");
        assert_eq!(data.len(), 4 * 32);
        assert_eq!(data[4 * 32 - 1], 1);
    }

    #[test]
    fn test_encode_rejects_arity_mismatch() {
        let function = TargetFunction {
            identifier: "add(uint256,address,address)".to_string(),
            args: vec![json!(10)],
        };

        assert!(matches!(
            encode_target_function(&function),
            Err(ScriptError::CalldataConstruction(_))
        ));
    }

    #[test]
    fn test_encode_rejects_bad_argument() {
        let function = TargetFunction {
            identifier: "transferOwnership(address)".to_string(),
            args: vec![json!("not an address")],
        };

        assert!(matches!(
            encode_target_function(&function),
            Err(ScriptError::CalldataConstruction(_))
        ));
    }

    #[test]
    fn test_encode_address_array() {
        let function = TargetFunction {
            identifier: "setRewarders(address[])".to_string(),
            args: vec![json!([LP_TOKEN.to_string(), Address::ZERO.to_string()])],
        };

        let (signature, data) = encode_target_function(&function).unwrap();

        let expected = DynSolValue::Tuple(vec![DynSolValue::Array(vec![
            DynSolValue::Address(LP_TOKEN),
            DynSolValue::Address(Address::ZERO),
        ])]);
        assert_eq!(signature, "setRewarders(address[])");
        assert_eq!(data.to_vec(), expected.abi_encode_params());
    }

    #[test]
    fn test_encode_tuple_argument() {
        let function = TargetFunction {
            identifier: "configure((uint256,bool),address)".to_string(),
            args: vec![json!(["7", true]), json!(LP_TOKEN.to_string())],
        };

        let (_, data) = encode_target_function(&function).unwrap();

        let expected = DynSolValue::Tuple(vec![
            DynSolValue::Tuple(vec![
                DynSolValue::Uint(U256::from(7), 256),
                DynSolValue::Bool(true),
            ]),
            DynSolValue::Address(LP_TOKEN),
        ]);
        assert_eq!(data.to_vec(), expected.abi_encode_params());
    }

    #[test]
    fn test_encode_rejects_fixed_array_length_mismatch() {
        let function = TargetFunction {
            identifier: "setPair(address[2])".to_string(),
            args: vec![json!([LP_TOKEN.to_string()])],
        };

        assert!(matches!(
            encode_target_function(&function),
            Err(ScriptError::CalldataConstruction(_))
        ));
    }

    #[test]
    fn test_check_eta() {
        let now = NOW;
        assert!(check_eta(now + 660, now, 600).is_ok());
        assert!(check_eta(now + 3600, now, 600).is_ok());

        // The delay alone leaves no time for the queueing transaction to be mined
        assert!(matches!(
            check_eta(now + 600, now, 600),
            Err(ScriptError::InvalidEta(_))
        ));
        assert!(matches!(
            check_eta(now + 659, now, 600),
            Err(ScriptError::InvalidEta(_))
        ));
    }

    #[test]
    fn test_select_all_executable_by_default() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with(
            &dir,
            &[("due", NOW, false), ("later", NOW + 1, false), ("done", NOW - 60, true)],
        );

        assert_eq!(select_for_execution(&ledger, vec![], NOW).unwrap(), vec!["due"]);
        assert!(select_for_execution(&ledger, vec![], NOW - 1).unwrap().is_empty());
    }

    #[test]
    fn test_select_given_ids() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with(&dir, &[("a", NOW - 10, false), ("b", NOW, false)]);

        let ids = vec!["b".to_string(), "a".to_string()];
        assert_eq!(select_for_execution(&ledger, ids.clone(), NOW).unwrap(), ids);
    }

    #[test]
    fn test_select_refuses_executed() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with(&dir, &[("due", NOW, false), ("done", NOW - 60, true)]);

        let res = select_for_execution(&ledger, vec!["due".to_string(), "done".to_string()], NOW);
        assert!(matches!(res, Err(ScriptError::NotExecutable(msg)) if msg.starts_with("done")));
    }

    #[test]
    fn test_select_refuses_future_eta() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with(&dir, &[("later", NOW + 1, false)]);

        let res = select_for_execution(&ledger, vec!["later".to_string()], NOW);
        assert!(matches!(res, Err(ScriptError::NotExecutable(msg)) if msg.starts_with("later")));
    }

    #[test]
    fn test_select_refuses_unknown_id() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_with(&dir, &[("due", NOW, false)]);

        let res = select_for_execution(&ledger, vec!["missing".to_string()], NOW);
        assert!(matches!(
            res,
            Err(ScriptError::Store(StoreError::UnknownTransaction(id))) if id == "missing"
        ));
    }
}

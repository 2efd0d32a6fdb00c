//! Deployment of contracts from their compilation artifacts, recording each
//! deployment in the network's deployments file

use alloy::{
    dyn_abi::DynSolValue,
    hex,
    network::TransactionBuilder,
    primitives::{keccak256, Address},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use beets_common::{deployments::DeploymentsFile, types::Deployment};
use serde_json::Value;
use tracing::info;

use crate::{artifacts::HardhatArtifact, errors::ScriptError, utils::ScriptContext};

/// Deploys the contract built from `artifact` under the deployment name `name`
/// with the given constructor arguments.
///
/// If the deployments file already records `name` with the same bytecode and
/// arguments, and code still lives at the recorded address, the existing
/// deployment is reused.
pub async fn deploy_contract(
    ctx: &ScriptContext,
    deployments: &mut DeploymentsFile,
    name: &str,
    artifact: &str,
    args: Vec<DynSolValue>,
) -> Result<Deployment, ScriptError> {
    let artifact = HardhatArtifact::load(&ctx.network.artifacts_dir, artifact)?;
    artifact.check_constructor_args(args.len())?;

    let bytecode_hash = keccak256(&artifact.bytecode);
    let recorded_args: Vec<Value> = args.iter().map(dyn_value_to_json).collect();

    if let Some(existing) = deployments.find(name) {
        if existing.bytecode_hash == bytecode_hash
            && existing.args == recorded_args
            && has_code(ctx, existing.address).await?
        {
            info!("reusing \"{}\" at {}", name, existing.address);
            return Ok(existing.clone());
        }
    }

    let mut code = artifact.bytecode.to_vec();
    code.extend(DynSolValue::Tuple(args).abi_encode_params());

    let tx = TransactionRequest::default()
        .with_from(ctx.deployer)
        .with_deploy_code(code);
    let receipt = ctx
        .client
        .send_transaction(tx)
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    if !receipt.status() {
        return Err(ScriptError::ContractDeployment(format!(
            "creation of \"{}\" reverted in {:#x}",
            name, receipt.transaction_hash
        )));
    }

    let address = receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!("no contract address in receipt for \"{name}\""))
    })?;

    info!(
        "deployed \"{}\" (tx: {:#x}) at {} with {} gas",
        name, receipt.transaction_hash, address, receipt.gas_used
    );

    let deployment = Deployment {
        address,
        args: recorded_args,
        transaction_hash: Some(receipt.transaction_hash),
        bytecode_hash,
    };
    deployments.record(name, deployment.clone())?;
    info!("recorded \"{}\" in {}", name, deployments.path().display());

    Ok(deployment)
}

/// Whether any code is deployed at `address`
async fn has_code(ctx: &ScriptContext, address: Address) -> Result<bool, ScriptError> {
    let code = ctx
        .client
        .get_code_at(address)
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(!code.is_empty())
}

/// Renders a constructor argument as JSON for the deployments file.
///
/// Integers are rendered as decimal strings since they may exceed the range
/// JSON numbers represent exactly.
pub fn dyn_value_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Address(address) => Value::String(address.to_string()),
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Uint(n, _) => Value::String(n.to_string()),
        DynSolValue::Int(n, _) => Value::String(n.to_string()),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Bytes(bytes) => Value::String(hex::encode_prefixed(bytes)),
        DynSolValue::FixedBytes(word, size) => Value::String(hex::encode_prefixed(&word[..*size])),
        DynSolValue::Array(values)
        | DynSolValue::FixedArray(values)
        | DynSolValue::Tuple(values) => Value::Array(values.iter().map(dyn_value_to_json).collect()),
        _ => Value::Null,
    }
}

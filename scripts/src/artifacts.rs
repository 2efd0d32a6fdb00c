//! Loading of Hardhat compilation artifacts
//!
//! Hardhat writes one JSON artifact per contract to
//! `artifacts/<source path>/<contract name>.json`. Contracts are referred to
//! either by their fully-qualified name, e.g.
//! `contracts/BeethovenxToken.sol:BeethovenxToken`, or by their bare name, in
//! which case the contract is expected to live in a source file of the same
//! name under `contracts/`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;

use crate::{
    constants::{ARTIFACT_SOURCES_DIR, SOLIDITY_EXTENSION},
    errors::ScriptError,
};

/// The parts of a Hardhat artifact used for deployment
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardhatArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The path of the source file defining the contract
    pub source_name: String,
    /// The contract's ABI
    pub abi: JsonAbi,
    /// The contract's creation bytecode
    pub bytecode: Bytes,
}

impl HardhatArtifact {
    /// The path of the artifact for `contract` under `artifacts_dir`
    pub fn artifact_path(artifacts_dir: &Path, contract: &str) -> PathBuf {
        let (source, name) = match contract.split_once(':') {
            Some((source, name)) => (source.to_string(), name),
            None => (
                format!("{ARTIFACT_SOURCES_DIR}/{contract}.{SOLIDITY_EXTENSION}"),
                contract,
            ),
        };

        artifacts_dir.join(source).join(format!("{name}.json"))
    }

    /// Loads the artifact for `contract` from `artifacts_dir`
    pub fn load(artifacts_dir: &Path, contract: &str) -> Result<Self, ScriptError> {
        let path = Self::artifact_path(artifacts_dir, contract);
        let contents = fs::read_to_string(&path)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

        let artifact: Self = serde_json::from_str(&contents)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

        if artifact.bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} has no bytecode, is it abstract?",
                artifact.contract_name
            )));
        }

        Ok(artifact)
    }

    /// Checks that `num_args` matches the arity of the contract's constructor
    pub fn check_constructor_args(&self, num_args: usize) -> Result<(), ScriptError> {
        let expected = self
            .abi
            .constructor()
            .map_or(0, |constructor| constructor.inputs.len());

        if expected != num_args {
            return Err(ScriptError::CalldataConstruction(format!(
                "{} expects {} constructor arguments, got {}",
                self.contract_name, expected, num_args
            )));
        }

        Ok(())
    }
}

//! Definitions of errors that can occur during the execution of the deploy & timelock scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use beets_common::errors::StoreError;

/// Errors that can occur during the execution of the deploy & timelock scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading or writing the deployments file or timelock ledger
    Store(StoreError),
    /// Error reading or parsing a contract compilation artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error constructing calldata for a contract method
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error reading an answer from the operator
    Prompt(String),
    /// A timelock ETA which the timelock would reject
    InvalidEta(String),
    /// A timelock transaction which cannot be executed yet
    NotExecutable(String),
    /// A chain for which no configuration exists
    UnsupportedChain(u64),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Store(e) => write!(f, "{}", e),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::Prompt(s) => write!(f, "error reading answer: {}", s),
            ScriptError::InvalidEta(s) => write!(f, "invalid eta: {}", s),
            ScriptError::NotExecutable(s) => write!(f, "transaction not executable: {}", s),
            ScriptError::UnsupportedChain(id) => write!(f, "no configuration for chain id {}", id),
        }
    }
}

impl Error for ScriptError {}

impl From<StoreError> for ScriptError {
    fn from(e: StoreError) -> Self {
        ScriptError::Store(e)
    }
}

//! Definitions of errors that can occur while reading or writing the on-disk
//! record stores

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur while reading or writing the on-disk record stores
#[derive(Debug)]
pub enum StoreError {
    /// Error reading a record file
    ReadFile(String),
    /// Error writing a record file
    WriteFile(String),
    /// Error de/serializing the contents of a record file
    Serde(String),
    /// A transaction with the given id is already stored
    DuplicateTransaction(String),
    /// No transaction with the given id is stored
    UnknownTransaction(String),
    /// The transaction with the given id has already been executed
    AlreadyExecuted(String),
    /// No deployment is recorded under the given contract name
    MissingDeployment(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ReadFile(s) => write!(f, "error reading file: {}", s),
            StoreError::WriteFile(s) => write!(f, "error writing file: {}", s),
            StoreError::Serde(s) => write!(f, "error de/serializing records: {}", s),
            StoreError::DuplicateTransaction(id) => {
                write!(f, "timelock transaction {} is already stored", id)
            }
            StoreError::UnknownTransaction(id) => {
                write!(f, "no timelock transaction stored with id {}", id)
            }
            StoreError::AlreadyExecuted(id) => {
                write!(f, "timelock transaction {} was already executed", id)
            }
            StoreError::MissingDeployment(name) => {
                write!(f, "no deployment recorded for {}", name)
            }
        }
    }
}

impl Error for StoreError {}

//! Common modules shared by the deploy & timelock scripts: the on-disk
//! record stores, their types, and unit helpers

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod constants;
pub mod deployments;
pub mod errors;
mod json_file;
pub mod timelock;
pub mod types;
pub mod units;

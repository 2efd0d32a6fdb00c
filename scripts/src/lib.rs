//! Scripts for deploying and administering the Beethoven X contracts: the
//! BEETS token, the master chef farm distributor, and the governance timelock.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
mod commands;
pub mod constants;
pub mod deploy;
pub mod errors;
pub mod master_chef;
mod prompts;
pub mod solidity;
pub mod timelock;
pub mod utils;

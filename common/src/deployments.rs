//! The per-network record of deployed contracts, keyed by contract name

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use alloy::primitives::Address;

use crate::{
    constants::DEPLOYMENTS_DIR,
    errors::StoreError,
    json_file::{read_or_default, write_pretty},
    types::Deployment,
};

/// The path of the deployments file for `network` under `root`
pub fn deployments_path(root: &Path, network: &str) -> PathBuf {
    root.join(DEPLOYMENTS_DIR).join(format!("{network}.json"))
}

/// The deployments recorded for a single network, backed by a JSON file
#[derive(Debug)]
pub struct DeploymentsFile {
    /// The path of the backing file
    path: PathBuf,
    /// The recorded deployments
    deployments: BTreeMap<String, Deployment>,
}

impl DeploymentsFile {
    /// Loads the deployments file at `path`; a missing file holds no deployments
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let deployments = read_or_default(&path)?;
        Ok(Self { path, deployments })
    }

    /// The path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up the deployment recorded for `name`, if any
    pub fn find(&self, name: &str) -> Option<&Deployment> {
        self.deployments.get(name)
    }

    /// Looks up the deployment recorded for `name`
    pub fn get(&self, name: &str) -> Result<&Deployment, StoreError> {
        self.find(name)
            .ok_or_else(|| StoreError::MissingDeployment(name.to_string()))
    }

    /// Looks up the address of the contract deployed as `name`
    pub fn address(&self, name: &str) -> Result<Address, StoreError> {
        self.get(name).map(|deployment| deployment.address)
    }

    /// Records `deployment` under `name`, replacing any previous record, and
    /// persists the file
    pub fn record(&mut self, name: &str, deployment: Deployment) -> Result<(), StoreError> {
        self.deployments.insert(name.to_string(), deployment);
        write_pretty(&self.path, &self.deployments)
    }
}

use std::{path::PathBuf, time::Duration};

use nrm_config::registry::Registry;
use nrm_core::{error::NrmError, table::RegistryEntry};

/// What a mutation of the custom store did to the user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cascade {
    /// The entry was not the active registry; the profile was left alone.
    NotActive,
    /// The entry was active and the profile was updated.
    Applied,
    /// The custom store was updated but the profile could not be.
    Failed(String),
}

// ---- Use ----

/// Result of activating a registry.
#[derive(Debug)]
pub struct UseOutcome {
    pub name: String,
    pub registry: Registry,
    /// Profile that was written.
    pub profile: PathBuf,
}

// ---- Delete ----

/// Report returned after a batch delete.
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub deleted: Vec<DeletedInfo>,
    pub failed: Vec<FailedInfo>,
}

#[derive(Debug)]
pub struct DeletedInfo {
    pub name: String,
    pub cascade: Cascade,
}

/// Info about a name that could not be processed.
#[derive(Debug)]
pub struct FailedInfo {
    pub name: String,
    pub error: NrmError,
}

// ---- Login ----

/// Credential input for `login`.
#[derive(Debug, Default)]
pub struct LoginOptions {
    /// Pre-encoded token, used verbatim.
    pub credential: Option<String>,
    pub always_auth: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

// ---- Current / list ----

/// The registry the active profile points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentRegistry {
    Found { name: String, url: String },
    Unknown(String),
    NotSet,
}

impl CurrentRegistry {
    pub fn name(&self) -> Option<&str> {
        match self {
            CurrentRegistry::Found { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// All registries in table order, with the active one.
#[derive(Debug)]
pub struct RegistryListing {
    pub entries: Vec<RegistryEntry>,
    pub current: CurrentRegistry,
}

// ---- Test ----

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    Ok,
    Failed(String),
    Timeout,
}

#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub name: String,
    pub url: String,
    pub elapsed: Duration,
    pub status: ProbeStatus,
    pub current: bool,
    pub fastest: bool,
}

#[derive(Debug)]
pub struct ProbeReport {
    pub results: Vec<ProbeResult>,
    pub timeout: Duration,
}

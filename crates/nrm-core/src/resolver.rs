//! Works out which table entry the active profile points at.
//!
//! The active registry is never stored by name. It is derived each time by
//! matching the profile's `registry` url against the table.

use nrm_config::{ini::IniDocument, registry::REGISTRY_KEY};

use crate::table::{RegistryEntry, RegistryTable};

/// Outcome of matching the profile url against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'t> {
    /// The profile url belongs to this entry.
    Found(&'t RegistryEntry),
    /// The profile sets a url that no entry carries.
    Unknown(String),
    /// The profile does not set a url at all.
    NotSet,
}

impl<'t> Resolution<'t> {
    pub fn entry(&self) -> Option<&'t RegistryEntry> {
        match self {
            Resolution::Found(entry) => Some(*entry),
            _ => None,
        }
    }

    pub fn is_current(&self, name: &str) -> bool {
        self.entry().is_some_and(|entry| entry.name == name)
    }
}

/// The registry url set in `profile`, if any.
pub fn current_url(profile: &IniDocument) -> Option<&str> {
    profile.get(REGISTRY_KEY).filter(|url| !url.is_empty())
}

/// Resolves the profile url to a table entry.
///
/// When several entries share the url, the first one in table order wins:
/// builtins in their fixed order, then customs in store order.
pub fn current_entry<'t>(table: &'t RegistryTable, profile: &IniDocument) -> Resolution<'t> {
    let Some(url) = current_url(profile) else {
        return Resolution::NotSet;
    };

    match table.find_by_url(url) {
        Some(entry) => Resolution::Found(entry),
        None => Resolution::Unknown(url.to_string()),
    }
}

//! The merged view of builtin and custom registries.

use indexmap::IndexMap;
use nrm_config::{
    ini::IniDocument,
    registry::{is_builtin, Registry, BUILTIN_REGISTRIES},
    store::RcFile,
};
use nrm_utils::string::{eq_ignore_case, with_trailing_slash};
use tracing::warn;

use crate::{error::NrmError, NrmResult};

/// A named registry in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub name: String,
    pub registry: Registry,
    pub builtin: bool,
}

/// Builtins followed by customs, keyed by case-sensitive name.
///
/// Iteration order is stable: builtins in their fixed order, then custom
/// entries in the order they appear in the custom store.
#[derive(Debug, Clone)]
pub struct RegistryTable {
    entries: IndexMap<String, RegistryEntry>,
}

/// Reads the custom store and merges it with the builtins.
pub fn load_table(nrmrc: &RcFile) -> NrmResult<RegistryTable> {
    let doc = nrmrc.load()?;
    Ok(RegistryTable::from_document(&doc))
}

/// Whether two registry urls point at the same endpoint.
///
/// Case is ignored, and so is a missing trailing slash.
pub fn urls_match(a: &str, b: &str) -> bool {
    eq_ignore_case(&with_trailing_slash(a), &with_trailing_slash(b))
}

impl RegistryTable {
    pub fn builtins() -> Self {
        let entries = BUILTIN_REGISTRIES
            .iter()
            .map(|builtin| {
                let entry = RegistryEntry {
                    name: builtin.name.to_string(),
                    registry: builtin.to_registry(),
                    builtin: true,
                };
                (entry.name.clone(), entry)
            })
            .collect();
        Self { entries }
    }

    /// Builds the table from a parsed custom store.
    ///
    /// Sections named after a builtin and sections without a url are skipped.
    pub fn from_document(doc: &IniDocument) -> Self {
        let mut table = Self::builtins();

        for section in doc.sections() {
            let Some(name) = section.name() else {
                continue;
            };
            if is_builtin(name) {
                warn!("Ignoring custom registry '{}': the name is reserved", name);
                continue;
            }
            let Some(registry) = Registry::from_section(section) else {
                warn!("Ignoring custom registry '{}': no registry url", name);
                continue;
            };

            table.entries.insert(
                name.to_string(),
                RegistryEntry {
                    name: name.to_string(),
                    registry,
                    builtin: false,
                },
            );
        }

        table
    }

    pub fn all(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn customs(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.all().filter(|entry| !entry.builtin)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.get(name).is_some_and(|entry| entry.builtin)
    }

    pub fn resolve_url(&self, name: &str) -> NrmResult<&str> {
        self.get(name)
            .map(|entry| entry.registry.url.as_str())
            .ok_or_else(|| NrmError::RegistryNotFound(name.to_string()))
    }

    /// Returns the first entry whose url matches `url`.
    pub fn find_by_url(&self, url: &str) -> Option<&RegistryEntry> {
        self.all()
            .find(|entry| urls_match(&entry.registry.url, url))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    const NRMRC: &str = "\
[acme]
registry=http://x.test/
home=http://home.test

[npm]
registry=http://hijack.test/

[nourl]
home=http://nowhere.test

[Acme]
registry=http://other.test/
is-current=true
";

    #[test]
    fn test_builtins_first_then_customs() {
        let doc = IniDocument::parse(NRMRC).unwrap();
        let table = RegistryTable::from_document(&doc);

        let names: Vec<_> = table.names().collect();
        assert_eq!(
            names,
            [
                "npm", "yarn", "tencent", "cnpm", "taobao", "npmMirror", "huawei", "acme", "Acme"
            ]
        );
        assert_eq!(table.customs().count(), 2);
    }

    #[test]
    fn test_builtin_cannot_be_shadowed() {
        let doc = IniDocument::parse(NRMRC).unwrap();
        let table = RegistryTable::from_document(&doc);

        assert!(table.is_builtin("npm"));
        assert_eq!(
            table.resolve_url("npm").unwrap(),
            "https://registry.npmjs.org/"
        );
        assert!(!table.contains("nourl"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let doc = IniDocument::parse(NRMRC).unwrap();
        let table = RegistryTable::from_document(&doc);

        assert_eq!(table.resolve_url("acme").unwrap(), "http://x.test/");
        assert_eq!(table.resolve_url("Acme").unwrap(), "http://other.test/");
        assert!(matches!(
            table.resolve_url("ACME"),
            Err(NrmError::RegistryNotFound(_))
        ));
        assert!(!table.is_builtin("acme"));
        assert!(!table.is_builtin("missing"));
    }

    #[test]
    fn test_find_by_url() {
        let doc = IniDocument::parse(NRMRC).unwrap();
        let table = RegistryTable::from_document(&doc);

        assert_eq!(table.find_by_url("HTTP://X.TEST").unwrap().name, "acme");
        assert_eq!(
            table.find_by_url("https://registry.yarnpkg.com/").unwrap().name,
            "yarn"
        );
        assert!(table.find_by_url("http://unknown.test/").is_none());
    }

    #[test]
    fn test_load_table_reads_fresh() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".nrmrc");
        let store = RcFile::new(&path);

        assert_eq!(load_table(&store).unwrap().len(), BUILTIN_REGISTRIES.len());

        fs::write(&path, "[acme]\nregistry=http://x.test/\n").unwrap();
        assert!(load_table(&store).unwrap().contains("acme"));
    }

    #[test]
    fn test_urls_match() {
        assert!(urls_match("http://x.test", "HTTP://X.TEST/"));
        assert!(!urls_match("http://x.test/a", "http://x.test/"));
    }
}

use std::fmt;

use crate::{
    error::{ConfigError, Result},
    ini::Section,
};

pub const REGISTRY_KEY: &str = "registry";
pub const HOME_KEY: &str = "home";
pub const AUTH_KEY: &str = "_auth";
pub const ALWAYS_AUTH_KEY: &str = "always-auth";
pub const EMAIL_KEY: &str = "email";
pub const REPOSITORY_KEY: &str = "repository";

/// Name of the builtin registry used as the fallback target.
pub const DEFAULT_REGISTRY: &str = "npm";

/// Profile key holding the endpoint for `scope`.
pub fn scope_key(scope: &str) -> String {
    format!("{scope}:{REGISTRY_KEY}")
}

/// A field of a [`Registry`] as it is written to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryField {
    Url,
    Home,
    Credential,
    AlwaysAuth,
    Email,
    Repository,
}

impl RegistryField {
    pub const ALL: [RegistryField; 6] = [
        RegistryField::Url,
        RegistryField::Home,
        RegistryField::Credential,
        RegistryField::AlwaysAuth,
        RegistryField::Email,
        RegistryField::Repository,
    ];

    pub fn key(self) -> &'static str {
        match self {
            RegistryField::Url => REGISTRY_KEY,
            RegistryField::Home => HOME_KEY,
            RegistryField::Credential => AUTH_KEY,
            RegistryField::AlwaysAuth => ALWAYS_AUTH_KEY,
            RegistryField::Email => EMAIL_KEY,
            RegistryField::Repository => REPOSITORY_KEY,
        }
    }

    /// Looks up a field by its profile key or by its field name.
    pub fn from_key(key: &str) -> Option<Self> {
        let field = match key {
            REGISTRY_KEY | "url" => RegistryField::Url,
            HOME_KEY => RegistryField::Home,
            AUTH_KEY | "credential" => RegistryField::Credential,
            ALWAYS_AUTH_KEY | "alwaysAuth" | "always_auth" => RegistryField::AlwaysAuth,
            EMAIL_KEY => RegistryField::Email,
            REPOSITORY_KEY => RegistryField::Repository,
            _ => return None,
        };
        Some(field)
    }
}

impl fmt::Display for RegistryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A named registry entry, without its name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    pub url: String,
    pub home: Option<String>,
    pub credential: Option<String>,
    pub always_auth: Option<bool>,
    pub email: Option<String>,
    pub repository: Option<String>,
}

impl Registry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Reads an entry from a custom store section.
    ///
    /// Returns `None` when the section has no url. Keys the entry does not
    /// know about are ignored, and so is an `always-auth` value that is not a
    /// boolean.
    pub fn from_section(section: &Section) -> Option<Self> {
        let url = section.get(REGISTRY_KEY).filter(|url| !url.is_empty())?;
        let owned = |key: &str| section.get(key).map(String::from);

        Some(Self {
            url: url.to_string(),
            home: owned(HOME_KEY),
            credential: owned(AUTH_KEY),
            always_auth: section.get(ALWAYS_AUTH_KEY).and_then(parse_bool),
            email: owned(EMAIL_KEY),
            repository: owned(REPOSITORY_KEY),
        })
    }

    pub fn get(&self, field: RegistryField) -> Option<String> {
        match field {
            RegistryField::Url => Some(self.url.clone()),
            RegistryField::Home => self.home.clone(),
            RegistryField::Credential => self.credential.clone(),
            RegistryField::AlwaysAuth => self.always_auth.map(|v| v.to_string()),
            RegistryField::Email => self.email.clone(),
            RegistryField::Repository => self.repository.clone(),
        }
    }

    /// Sets `field` from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `always-auth` is given a
    /// value other than `true` or `false`.
    pub fn set(&mut self, field: RegistryField, value: &str) -> Result<()> {
        let value = value.to_string();
        match field {
            RegistryField::Url => self.url = value,
            RegistryField::Home => self.home = Some(value),
            RegistryField::Credential => self.credential = Some(value),
            RegistryField::AlwaysAuth => {
                let flag = parse_bool(&value).ok_or_else(|| {
                    ConfigError::InvalidValue {
                        key: ALWAYS_AUTH_KEY.to_string(),
                        value,
                    }
                })?;
                self.always_auth = Some(flag);
            }
            RegistryField::Email => self.email = Some(value),
            RegistryField::Repository => self.repository = Some(value),
        }
        Ok(())
    }

    /// Fields that carry a value, url first.
    pub fn fields(&self) -> Vec<(RegistryField, String)> {
        RegistryField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
            .collect()
    }

    /// Writes every present field onto `section`. Other keys are left alone.
    pub fn write_to(&self, section: &mut Section) {
        for (field, value) in self.fields() {
            section.set(field.key(), value);
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        v if v.eq_ignore_ascii_case("true") => Some(true),
        v if v.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// A registry shipped with the tool.
pub struct BuiltinRegistry {
    pub name: &'static str,
    pub url: &'static str,
    pub home: &'static str,
}

impl BuiltinRegistry {
    pub fn to_registry(&self) -> Registry {
        Registry {
            home: Some(self.home.to_string()),
            ..Registry::new(self.url)
        }
    }
}

pub const BUILTIN_REGISTRIES: [BuiltinRegistry; 7] = [
    BuiltinRegistry {
        name: "npm",
        url: "https://registry.npmjs.org/",
        home: "https://www.npmjs.org",
    },
    BuiltinRegistry {
        name: "yarn",
        url: "https://registry.yarnpkg.com/",
        home: "https://yarnpkg.com",
    },
    BuiltinRegistry {
        name: "tencent",
        url: "https://mirrors.tencent.com/npm/",
        home: "https://mirrors.tencent.com/npm/",
    },
    BuiltinRegistry {
        name: "cnpm",
        url: "https://r.cnpmjs.org/",
        home: "https://cnpmjs.org",
    },
    BuiltinRegistry {
        name: "taobao",
        url: "https://registry.npmmirror.com/",
        home: "https://npmmirror.com",
    },
    BuiltinRegistry {
        name: "npmMirror",
        url: "https://skimdb.npmjs.com/registry/",
        home: "https://skimdb.npmjs.com/",
    },
    BuiltinRegistry {
        name: "huawei",
        url: "https://repo.huaweicloud.com/repository/npm/",
        home: "https://www.huaweicloud.com/special/npm-jingxiang.html",
    },
];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_REGISTRIES.iter().any(|builtin| builtin.name == name)
}

/// The registry `use` falls back to when the active entry disappears.
pub fn default_registry() -> Registry {
    BUILTIN_REGISTRIES[0].to_registry()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini::IniDocument;

    #[test]
    fn test_from_section() {
        let doc = IniDocument::parse(
            "[acme]\nregistry=http://x.test/\nhome=http://home.test\n_auth=dTpw\nalways-auth=true\nis-current=true\n",
        )
        .unwrap();
        let registry = Registry::from_section(doc.section("acme").unwrap()).unwrap();

        assert_eq!(registry.url, "http://x.test/");
        assert_eq!(registry.home.as_deref(), Some("http://home.test"));
        assert_eq!(registry.credential.as_deref(), Some("dTpw"));
        assert_eq!(registry.always_auth, Some(true));
        assert_eq!(registry.email, None);
    }

    #[test]
    fn test_from_section_without_url() {
        let doc = IniDocument::parse("[broken]\nhome=http://home.test\n[empty]\nregistry=\n").unwrap();
        assert!(Registry::from_section(doc.section("broken").unwrap()).is_none());
        assert!(Registry::from_section(doc.section("empty").unwrap()).is_none());
    }

    #[test]
    fn test_write_to_keeps_foreign_keys() {
        let mut doc = IniDocument::parse("fund=false\nregistry=https://registry.npmjs.org/\n").unwrap();
        let mut registry = Registry::new("http://x.test/");
        registry.email = Some("me@x.test".into());
        registry.write_to(doc.global_mut());

        assert_eq!(doc.get("fund"), Some("false"));
        assert_eq!(doc.get("registry"), Some("http://x.test/"));
        assert_eq!(doc.get("email"), Some("me@x.test"));
        assert_eq!(doc.get("home"), None);
    }

    #[test]
    fn test_set_always_auth() {
        let mut registry = Registry::new("http://x.test/");
        registry.set(RegistryField::AlwaysAuth, "TRUE").unwrap();
        assert_eq!(registry.always_auth, Some(true));

        let err = registry.set(RegistryField::AlwaysAuth, "yes").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(registry.always_auth, Some(true));
    }

    #[test]
    fn test_field_keys() {
        assert_eq!(RegistryField::from_key("url"), Some(RegistryField::Url));
        assert_eq!(RegistryField::from_key("_auth"), Some(RegistryField::Credential));
        assert_eq!(RegistryField::from_key("alwaysAuth"), Some(RegistryField::AlwaysAuth));
        assert_eq!(RegistryField::from_key("nope"), None);
        for field in RegistryField::ALL {
            assert_eq!(RegistryField::from_key(field.key()), Some(field));
        }
    }

    #[test]
    fn test_builtins() {
        assert_eq!(BUILTIN_REGISTRIES[0].name, DEFAULT_REGISTRY);
        assert!(is_builtin("npm"));
        assert!(is_builtin("npmMirror"));
        assert!(!is_builtin("NPM"));
        assert!(BUILTIN_REGISTRIES.iter().all(|b| b.url.ends_with('/')));
        assert_eq!(scope_key("@acme"), "@acme:registry");
    }
}

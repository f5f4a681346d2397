use nrm_config::ini::IniDocument;
use nrm_core::{
    error::NrmError,
    resolver::current_url,
    table::{urls_match, RegistryEntry, RegistryTable},
    NrmResult,
};
use nrm_utils::string::with_trailing_slash;
use tracing::{debug, trace};
use url::Url;

use crate::{Cascade, NrmContext};

/// Looks up `name` and rejects builtins.
pub(crate) fn ensure_custom<'t>(
    table: &'t RegistryTable,
    name: &str,
    action: &'static str,
) -> NrmResult<&'t RegistryEntry> {
    match table.get(name) {
        None => Err(NrmError::RegistryNotFound(name.to_string())),
        Some(entry) if entry.builtin => {
            Err(NrmError::ProtectedRegistry {
                name: name.to_string(),
                action,
            })
        }
        Some(entry) => Ok(entry),
    }
}

/// Rejects names that cannot be written back as a `[name]` header or as a
/// profile key.
pub(crate) fn ensure_valid_name(name: &str) -> NrmResult<()> {
    let reason = if name.is_empty() {
        "the name is empty"
    } else if name.trim() != name {
        "the name starts or ends with whitespace"
    } else if name.chars().any(char::is_control) {
        "the name contains a control character"
    } else if name.contains(['[', ']', '=']) {
        "the name contains `[`, `]` or `=`"
    } else if name.starts_with([';', '#', '"', '\'']) {
        "the name starts with a comment or quote character"
    } else {
        return Ok(());
    };

    Err(NrmError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Checks that `url` is absolute and returns it with a trailing slash.
pub(crate) fn normalize_url(url: &str) -> NrmResult<String> {
    if url.chars().any(char::is_control) {
        return Err(NrmError::InvalidUrl {
            url: url.to_string(),
            reason: "contains a control character".into(),
        });
    }
    let parsed = Url::parse(url).map_err(|err| {
        NrmError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        }
    })?;
    if parsed.cannot_be_a_base() {
        return Err(NrmError::InvalidUrl {
            url: url.to_string(),
            reason: "not a hierarchical url".into(),
        });
    }
    Ok(with_trailing_slash(url))
}

/// Rejects `url` when an entry other than `except` already uses it.
pub(crate) fn ensure_unique_url(
    table: &RegistryTable,
    url: &str,
    except: Option<&str>,
) -> NrmResult<()> {
    let taken = table
        .all()
        .find(|entry| Some(entry.name.as_str()) != except && urls_match(&entry.registry.url, url));
    match taken {
        Some(entry) => {
            Err(NrmError::DuplicateUrl {
                url: url.to_string(),
                name: entry.name.clone(),
            })
        }
        None => Ok(()),
    }
}

/// Applies `update` to the user profile when it points at `url`.
///
/// Runs after the custom store has been saved. A failure here is returned as
/// [`Cascade::Failed`] instead of an error.
pub(crate) fn cascade<F>(ctx: &NrmContext, url: &str, update: F) -> Cascade
where
    F: FnOnce(&mut IniDocument),
{
    let apply = || -> NrmResult<bool> {
        let mut profile = ctx.npmrc().load()?;
        if !current_url(&profile).is_some_and(|current| urls_match(current, url)) {
            return Ok(false);
        }
        update(&mut profile);
        ctx.npmrc().save(&profile)?;
        Ok(true)
    };

    match apply() {
        Ok(true) => {
            trace!(url, "updated active profile");
            Cascade::Applied
        }
        Ok(false) => Cascade::NotActive,
        Err(err) => {
            debug!(url, error = %err, "failed to update active profile");
            Cascade::Failed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_valid_name() {
        for name in ["acme", "npm-mirror", "@myorg", "my.registry_2", "café"] {
            assert!(ensure_valid_name(name).is_ok(), "{name}");
        }
        for name in [
            "", " acme", "acme ", "a]b", "[a", "a=b", "a\nb", "a\rb", ";a", "#a", "\"a", "'a",
        ] {
            assert!(
                matches!(ensure_valid_name(name), Err(NrmError::InvalidName { .. })),
                "{name:?}"
            );
        }
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("http://x.test").unwrap(), "http://x.test/");
        assert!(matches!(
            normalize_url("http://x.test/\nregistry=http://evil.test/"),
            Err(NrmError::InvalidUrl { .. })
        ));
        assert!(matches!(
            normalize_url("mailto:me@x.test"),
            Err(NrmError::InvalidUrl { .. })
        ));
    }
}

//! Operations that change fields of a custom registry.
//!
//! Each one saves the custom store first. When the registry is the active
//! one, the changed fields are then copied onto the user profile.

use base64::{engine::general_purpose::STANDARD, Engine};
use nrm_config::{
    ini::IniDocument,
    registry::{Registry, RegistryField},
};
use nrm_core::{error::NrmError, table::RegistryTable, NrmResult};
use tracing::debug;

use crate::{
    utils::{cascade, ensure_custom, ensure_unique_url, normalize_url},
    Cascade, LoginOptions, NrmContext,
};

/// Stores credentials on a custom registry.
///
/// An explicit credential is stored verbatim. Otherwise the credential is the
/// base64 encoding of `username:password`.
pub fn login(ctx: &NrmContext, name: &str, options: LoginOptions) -> NrmResult<Cascade> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

    update_registry(ctx, name, "set authorization information of", |_, registry| {
        let credential = match (
            non_empty(options.credential),
            non_empty(options.username),
            non_empty(options.password),
        ) {
            (Some(credential), ..) => credential,
            (None, Some(username), Some(password)) => {
                STANDARD.encode(format!("{username}:{password}"))
            }
            _ => return Err(NrmError::MissingCredential),
        };

        let mut changed = vec![RegistryField::Credential];
        registry.credential = Some(credential);
        if options.always_auth {
            registry.always_auth = Some(true);
            changed.push(RegistryField::AlwaysAuth);
        }
        if let Some(email) = non_empty(options.email) {
            registry.email = Some(email);
            changed.push(RegistryField::Email);
        }
        Ok(changed)
    })
}

/// Sets the publish target of a custom registry.
pub fn set_repository(ctx: &NrmContext, name: &str, repository: &str) -> NrmResult<Cascade> {
    update_registry(ctx, name, "set repository of", |_, registry| {
        registry.repository = Some(repository.to_string());
        Ok(vec![RegistryField::Repository])
    })
}

/// Sets a single field of a custom registry by its key.
///
/// `repository` is rejected before anything else is checked; it has its own
/// operation. Setting `registry` normalizes the url and keeps it unique.
pub fn set_attribute(ctx: &NrmContext, name: &str, attr: &str, value: &str) -> NrmResult<Cascade> {
    let field = match RegistryField::from_key(attr) {
        Some(RegistryField::Repository) => {
            return Err(NrmError::ReservedAttribute(attr.to_string()))
        }
        Some(field) => field,
        None => return Err(NrmError::UnknownAttribute(attr.to_string())),
    };

    update_registry(ctx, name, "set attribute of", |table, registry| {
        if field == RegistryField::Url {
            let url = normalize_url(value)?;
            ensure_unique_url(table, &url, Some(name))?;
            registry.url = url;
        } else {
            registry.set(field, value)?;
        }
        Ok(vec![field])
    })
}

/// Loads the store, applies `update` to the custom registry `name`, saves,
/// then cascades the fields `update` reports as changed.
fn update_registry<F>(
    ctx: &NrmContext,
    name: &str,
    action: &'static str,
    update: F,
) -> NrmResult<Cascade>
where
    F: FnOnce(&RegistryTable, &mut Registry) -> NrmResult<Vec<RegistryField>>,
{
    let mut doc = ctx.nrmrc().load()?;
    let table = RegistryTable::from_document(&doc);
    let entry = ensure_custom(&table, name, action)?;

    let previous_url = entry.registry.url.clone();
    let mut registry = entry.registry.clone();
    let changed = update(&table, &mut registry)?;

    write_section(&mut doc, name, &registry)?;
    ctx.nrmrc().save(&doc)?;
    debug!(name, fields = ?changed, "registry updated");

    Ok(cascade(ctx, &previous_url, |profile| {
        for field in changed {
            if let Some(value) = registry.get(field) {
                profile.set(field.key(), value);
            }
        }
    }))
}

fn write_section(doc: &mut IniDocument, name: &str, registry: &Registry) -> NrmResult<()> {
    let section = doc
        .section_mut(name)
        .ok_or_else(|| NrmError::RegistryNotFound(name.to_string()))?;
    registry.write_to(section);
    Ok(())
}

//! Operations that create, activate, remove or rename registries.

use nrm_config::{
    ini::Section,
    registry::{default_registry, Registry},
};
use nrm_core::{error::NrmError, table::RegistryTable, NrmResult};
use tracing::{debug, warn};

use crate::{
    utils::{cascade, ensure_custom, ensure_unique_url, ensure_valid_name, normalize_url},
    Cascade, DeleteReport, DeletedInfo, FailedInfo, NrmContext, UseOutcome,
};

/// Writes every field of `name` onto the user profile, or onto the project
/// profile when `local` is set. Keys the registry does not carry are kept.
pub fn use_registry(ctx: &NrmContext, name: &str, local: bool) -> NrmResult<UseOutcome> {
    let table = ctx.table()?;
    let entry = table
        .get(name)
        .ok_or_else(|| NrmError::RegistryNotFound(name.to_string()))?;

    let target = ctx.profile(local);
    let mut profile = target.load()?;
    entry.registry.write_to(profile.global_mut());
    target.save(&profile)?;

    debug!(name, url = %entry.registry.url, local, "registry activated");
    Ok(UseOutcome {
        name: entry.name.clone(),
        registry: entry.registry.clone(),
        profile: target.path().to_path_buf(),
    })
}

/// Adds a custom registry. The stored url always ends with `/`.
///
/// Returns the stored url.
pub fn add_registry(
    ctx: &NrmContext,
    name: &str,
    url: &str,
    home: Option<&str>,
) -> NrmResult<String> {
    ensure_valid_name(name)?;
    let mut doc = ctx.nrmrc().load()?;
    let table = RegistryTable::from_document(&doc);

    if table.contains(name) {
        return Err(NrmError::DuplicateName(name.to_string()));
    }
    let url = normalize_url(url)?;
    ensure_unique_url(&table, &url, None)?;

    let mut registry = Registry::new(&url);
    registry.home = home.filter(|home| !home.is_empty()).map(String::from);

    let mut section = Section::new(name);
    registry.write_to(&mut section);
    doc.push_section(section);
    ctx.nrmrc().save(&doc)?;

    debug!(name, url = %url, "registry added");
    Ok(url)
}

/// Deletes each custom registry in `names` independently.
///
/// A failure for one name is recorded in the report and does not stop the
/// others. Deleting the active registry switches the user profile to `npm`.
pub fn delete_registries<S: AsRef<str>>(ctx: &NrmContext, names: &[S]) -> DeleteReport {
    let mut report = DeleteReport::default();

    for name in names {
        let name = name.as_ref();
        match delete_registry(ctx, name) {
            Ok(cascade) => {
                report.deleted.push(DeletedInfo {
                    name: name.to_string(),
                    cascade,
                })
            }
            Err(error) => {
                debug!(name, error = %error, "failed to delete registry");
                report.failed.push(FailedInfo {
                    name: name.to_string(),
                    error,
                })
            }
        }
    }

    report
}

fn delete_registry(ctx: &NrmContext, name: &str) -> NrmResult<Cascade> {
    let mut doc = ctx.nrmrc().load()?;
    let table = RegistryTable::from_document(&doc);
    let url = ensure_custom(&table, name, "delete")?.registry.url.clone();

    doc.remove_section(name);
    ctx.nrmrc().save(&doc)?;
    debug!(name, "registry deleted");

    Ok(cascade(ctx, &url, |profile| {
        default_registry().write_to(profile.global_mut());
    }))
}

/// Renames a custom registry, keeping its fields and position in the store.
///
/// The user profile is not touched: the url does not change, so the entry is
/// still found as the active one under its new name.
pub fn rename_registry(ctx: &NrmContext, name: &str, new_name: &str) -> NrmResult<()> {
    let mut doc = ctx.nrmrc().load()?;
    let table = RegistryTable::from_document(&doc);

    ensure_custom(&table, name, "rename")?;
    if name == new_name {
        return Err(NrmError::SameName);
    }
    ensure_valid_name(new_name)?;
    if table.contains(new_name) {
        return Err(NrmError::DuplicateName(new_name.to_string()));
    }

    // A section under the new name can only be one the table skipped.
    if doc.remove_section(new_name).is_some() {
        warn!("Replacing invalid custom registry '{}'", new_name);
    }
    doc.section_mut(name)
        .ok_or_else(|| NrmError::RegistryNotFound(name.to_string()))?
        .rename(new_name);
    ctx.nrmrc().save(&doc)?;

    debug!(name, new_name, "registry renamed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use nrm_core::{resolver::current_entry, table::load_table};

    use super::*;
    use crate::test_utils::Fixture;

    const ACME: &str = "[acme]\nregistry=http://x.test/\nhome=http://home.test\n";

    #[test]
    fn test_use_then_current_round_trip() {
        let fixture = Fixture::with_files("fund=false\n", ACME);
        let ctx = &fixture.ctx;

        let outcome = use_registry(ctx, "acme", false).unwrap();
        assert_eq!(outcome.profile, fixture.npmrc_path());
        assert_eq!(
            fixture.npmrc(),
            "fund=false\nregistry=http://x.test/\nhome=http://home.test\n"
        );

        let table = ctx.table().unwrap();
        let profile = ctx.npmrc().load().unwrap();
        assert!(current_entry(&table, &profile).is_current("acme"));
    }

    #[test]
    fn test_use_keeps_fields_it_does_not_carry() {
        let fixture = Fixture::with_files("registry=http://x.test/\n_auth=secret\n", ACME);

        use_registry(&fixture.ctx, "yarn", false).unwrap();
        let npmrc = fixture.npmrc();
        assert!(npmrc.contains("registry=https://registry.yarnpkg.com/"));
        assert!(npmrc.contains("_auth=secret"));
    }

    #[test]
    fn test_use_local_writes_project_profile() {
        let fixture = Fixture::with_files("registry=https://registry.npmjs.org/\n", "");

        let outcome = use_registry(&fixture.ctx, "taobao", true).unwrap();
        assert_eq!(outcome.profile, fixture.ctx.local_npmrc().path());
        assert!(fixture.npmrc().contains("registry.npmjs.org"));

        let local = fixture.ctx.local_npmrc().load().unwrap();
        assert_eq!(local.get("registry"), Some("https://registry.npmmirror.com/"));
    }

    #[test]
    fn test_use_unknown() {
        let fixture = Fixture::new();
        let err = use_registry(&fixture.ctx, "nope", false).unwrap_err();
        assert!(matches!(err, NrmError::RegistryNotFound(_)));
        assert!(!fixture.npmrc_path().exists());
    }

    #[test]
    fn test_add_normalizes_url() {
        let fixture = Fixture::new();
        let ctx = &fixture.ctx;

        let url = add_registry(ctx, "acme", "http://x.test", None).unwrap();
        assert_eq!(url, "http://x.test/");
        assert_eq!(ctx.table().unwrap().resolve_url("acme").unwrap(), "http://x.test/");

        add_registry(ctx, "beta", "http://y.test/", Some("http://y.home")).unwrap();
        let table = ctx.table().unwrap();
        let names: Vec<_> = table.customs().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["acme", "beta"]);
        assert_eq!(
            table.get("beta").unwrap().registry.home.as_deref(),
            Some("http://y.home")
        );
    }

    #[test]
    fn test_add_conflicts() {
        let fixture = Fixture::with_files("", ACME);
        let ctx = &fixture.ctx;

        assert!(matches!(
            add_registry(ctx, "acme", "http://new.test/", None),
            Err(NrmError::DuplicateName(_))
        ));
        assert!(matches!(
            add_registry(ctx, "npm", "http://new.test/", None),
            Err(NrmError::DuplicateName(_))
        ));
        assert!(matches!(
            add_registry(ctx, "acme2", "HTTP://X.TEST", None),
            Err(NrmError::DuplicateUrl { .. })
        ));
        assert!(matches!(
            add_registry(ctx, "mirror", "https://registry.npmjs.org/", None),
            Err(NrmError::DuplicateUrl { name, .. }) if name == "npm"
        ));
        assert!(matches!(
            add_registry(ctx, "bad", "not a url", None),
            Err(NrmError::InvalidUrl { .. })
        ));
        assert_eq!(fixture.nrmrc(), ACME);
    }

    #[test]
    fn test_add_rejects_unstorable_names() {
        let fixture = Fixture::with_files("", ACME);
        let ctx = &fixture.ctx;

        for name in ["", "a]b", "a\nb", " padded"] {
            assert!(matches!(
                add_registry(ctx, name, "http://ab.test/", None),
                Err(NrmError::InvalidName { .. })
            ));
        }
        assert_eq!(fixture.nrmrc(), ACME);
        assert!(use_registry(ctx, "npm", false).is_ok());
    }

    #[test]
    fn test_delete_batch_is_best_effort() {
        let fixture = Fixture::with_files(
            "",
            "[a]\nregistry=http://a.test/\n\n[b]\nregistry=http://b.test/\n\n[c]\nregistry=http://c.test/\n",
        );

        let report = delete_registries(&fixture.ctx, &["a", "missing", "npm", "b"]);

        let deleted: Vec<_> = report.deleted.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(deleted, ["a", "b"]);
        assert!(report.deleted.iter().all(|d| d.cascade == Cascade::NotActive));

        assert_eq!(report.failed.len(), 2);
        assert!(matches!(report.failed[0].error, NrmError::RegistryNotFound(_)));
        assert!(matches!(
            report.failed[1].error,
            NrmError::ProtectedRegistry { action: "delete", .. }
        ));

        let table = fixture.ctx.table().unwrap();
        assert!(!table.contains("a"));
        assert!(table.contains("c"));
    }

    #[test]
    fn test_delete_active_falls_back_to_npm() {
        let fixture = Fixture::with_files("registry=http://x.test/\nhome=http://home.test\n", ACME);
        let ctx = &fixture.ctx;

        let report = delete_registries(ctx, &["acme"]);
        assert_eq!(report.deleted[0].cascade, Cascade::Applied);

        let table = ctx.table().unwrap();
        let profile = ctx.npmrc().load().unwrap();
        assert!(current_entry(&table, &profile).is_current("npm"));
        assert_eq!(profile.get("home"), Some("https://www.npmjs.org"));
    }

    #[test]
    fn test_delete_cascade_failure_keeps_deletion() {
        let fixture = Fixture::with_files("", ACME);
        fixture.break_npmrc();

        let report = delete_registries(&fixture.ctx, &["acme"]);
        assert!(report.failed.is_empty());
        assert!(matches!(report.deleted[0].cascade, Cascade::Failed(_)));
        assert!(!fixture.ctx.table().unwrap().contains("acme"));
    }

    #[test]
    fn test_rename() {
        let fixture = Fixture::with_files(
            "",
            "[acme]\nregistry=http://x.test/\n_auth=dTpw\n\n[zeta]\nregistry=http://z.test/\n",
        );
        let ctx = &fixture.ctx;
        let before = ctx.table().unwrap().get("acme").unwrap().registry.clone();

        rename_registry(ctx, "acme", "renamed").unwrap();

        let table = load_table(ctx.nrmrc()).unwrap();
        assert!(!table.contains("acme"));
        assert_eq!(table.get("renamed").unwrap().registry, before);
        let names: Vec<_> = table.customs().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["renamed", "zeta"]);
    }

    #[test]
    fn test_rename_preconditions() {
        let fixture = Fixture::with_files("", ACME);
        let ctx = &fixture.ctx;

        assert!(matches!(
            rename_registry(ctx, "missing", "x"),
            Err(NrmError::RegistryNotFound(_))
        ));
        assert!(matches!(
            rename_registry(ctx, "npm", "x"),
            Err(NrmError::ProtectedRegistry { .. })
        ));
        assert!(matches!(
            rename_registry(ctx, "acme", "acme"),
            Err(NrmError::SameName)
        ));
        assert!(matches!(
            rename_registry(ctx, "acme", "yarn"),
            Err(NrmError::DuplicateName(_))
        ));
        for new_name in ["", "a]b", "x\ny"] {
            assert!(matches!(
                rename_registry(ctx, "acme", new_name),
                Err(NrmError::InvalidName { .. })
            ));
        }
        assert_eq!(fixture.nrmrc(), ACME);
        assert!(ctx.table().unwrap().contains("acme"));
    }

    #[test]
    fn test_rename_active_keeps_resolving() {
        let fixture = Fixture::with_files("registry=http://x.test/\n", ACME);
        let ctx = &fixture.ctx;

        rename_registry(ctx, "acme", "renamed").unwrap();

        assert_eq!(fixture.npmrc(), "registry=http://x.test/\n");
        let table = ctx.table().unwrap();
        let profile = ctx.npmrc().load().unwrap();
        assert!(current_entry(&table, &profile).is_current("renamed"));
    }
}

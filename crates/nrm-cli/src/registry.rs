use nrm_config::registry::DEFAULT_REGISTRY;
use nrm_core::{error::NrmError, NrmResult};
use nrm_operations::{
    current::list_registries,
    registry::{add_registry, delete_registries, rename_registry, use_registry},
    Cascade, NrmContext,
};
use nu_ansi_term::Color::{Blue, Cyan, Green};
use tracing::{debug, error, info};

use crate::{
    list::current_marker,
    utils::{get_valid_multi_selection, get_valid_selection, report_cascade, Colored},
};

pub fn use_registry_cmd(ctx: &NrmContext, name: Option<String>, local: bool) -> NrmResult<()> {
    let name = match name {
        Some(name) => name,
        None => select_registry(ctx)?,
    };

    let outcome = use_registry(ctx, &name, local)?;
    debug!(profile = %outcome.profile.display(), "profile written");
    info!("The registry has been changed to '{}'.", outcome.name);
    Ok(())
}

fn select_registry(ctx: &NrmContext) -> NrmResult<String> {
    let listing = list_registries(ctx)?;

    info!("Please select the registry you want to use:");
    for (idx, entry) in listing.entries.iter().enumerate() {
        info!(
            "{}[{}] {} {}",
            current_marker(listing.current.name() == Some(entry.name.as_str())),
            idx + 1,
            Colored(Blue, &entry.name),
            Colored(Cyan, &entry.registry.url)
        );
    }

    let selection = get_valid_selection("Select a registry: ", listing.entries.len())?;
    listing
        .entries
        .into_iter()
        .nth(selection)
        .map(|entry| entry.name)
        .ok_or_else(|| NrmError::Custom("No registry selected".into()))
}

pub fn add_registry_cmd(
    ctx: &NrmContext,
    name: &str,
    url: &str,
    home: Option<&str>,
) -> NrmResult<()> {
    add_registry(ctx, name, url, home)?;
    info!(
        "Add registry {name} success, run {} command to use {name} registry.",
        Colored(Green, format!("nrm use {name}"))
    );
    Ok(())
}

pub fn delete_registries_cmd(ctx: &NrmContext, names: Vec<String>) -> NrmResult<()> {
    let names = if names.is_empty() {
        let picked = select_customs(ctx)?;
        if picked.is_empty() {
            return Ok(());
        }
        picked
    } else {
        names
    };

    let report = delete_registries(ctx, &names);

    for deleted in &report.deleted {
        info!("The registry '{}' has been deleted successfully.", deleted.name);
        match &deleted.cascade {
            Cascade::Applied => {
                info!("The registry has been changed to '{DEFAULT_REGISTRY}'.");
            }
            cascade => report_cascade(cascade),
        }
    }

    if report.failed.is_empty() {
        return Ok(());
    }
    for failed in &report.failed {
        error!("{}", failed.error);
    }
    Err(NrmError::Custom(format!(
        "Failed to delete {} of {} registries",
        report.failed.len(),
        names.len()
    )))
}

/// Prompts for custom registries to delete. Empty when there are none.
fn select_customs(ctx: &NrmContext) -> NrmResult<Vec<String>> {
    let table = ctx.table()?;
    let customs: Vec<&str> = table.customs().map(|entry| entry.name.as_str()).collect();

    if customs.is_empty() {
        info!("No any custom registries can be deleted.");
        return Ok(Vec::new());
    }

    info!("Please select the registries you want to delete:");
    for (idx, name) in customs.iter().enumerate() {
        info!("[{}] {}", idx + 1, Colored(Blue, name));
    }

    let picked = get_valid_multi_selection("Select registries (e.g. 1 3): ", customs.len())?;
    Ok(picked
        .into_iter()
        .map(|idx| customs[idx].to_string())
        .collect())
}

pub fn rename_registry_cmd(ctx: &NrmContext, name: &str, new_name: &str) -> NrmResult<()> {
    rename_registry(ctx, name, new_name)?;
    info!("The registry '{name}' has been renamed to '{new_name}'.");
    Ok(())
}

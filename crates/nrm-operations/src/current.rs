use nrm_core::{
    resolver::{current_entry, Resolution},
    table::RegistryTable,
    NrmResult,
};

use crate::{CurrentRegistry, NrmContext, RegistryListing};

pub(crate) fn resolve(table: &RegistryTable, ctx: &NrmContext) -> NrmResult<CurrentRegistry> {
    let profile = ctx.active_profile()?;
    let current = match current_entry(table, &profile) {
        Resolution::Found(entry) => {
            CurrentRegistry::Found {
                name: entry.name.clone(),
                url: entry.registry.url.clone(),
            }
        }
        Resolution::Unknown(url) => CurrentRegistry::Unknown(url),
        Resolution::NotSet => CurrentRegistry::NotSet,
    };
    Ok(current)
}

/// The registry currently in use.
pub fn current_registry(ctx: &NrmContext) -> NrmResult<CurrentRegistry> {
    resolve(&ctx.table()?, ctx)
}

/// Every registry in table order, together with the one in use.
pub fn list_registries(ctx: &NrmContext) -> NrmResult<RegistryListing> {
    let table = ctx.table()?;
    let current = resolve(&table, ctx)?;

    Ok(RegistryListing {
        entries: table.all().cloned().collect(),
        current,
    })
}

use nrm_core::{error::NrmError, NrmResult};

use crate::NrmContext;

/// Returns the homepage of `name`.
pub fn homepage(ctx: &NrmContext, name: &str) -> NrmResult<String> {
    let table = ctx.table()?;
    let entry = table
        .get(name)
        .ok_or_else(|| NrmError::RegistryNotFound(name.to_string()))?;

    entry
        .registry
        .home
        .clone()
        .filter(|home| !home.is_empty())
        .ok_or_else(|| NrmError::HomepageNotFound(name.to_string()))
}

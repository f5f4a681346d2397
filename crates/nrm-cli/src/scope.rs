use nrm_core::NrmResult;
use nrm_operations::{
    scope::{delete_scope, set_scope},
    NrmContext,
};
use tracing::{debug, info};

pub fn set_scope_cmd(ctx: &NrmContext, scope: &str, url: &str) -> NrmResult<()> {
    let key = set_scope(ctx, scope, url)?;
    info!("Set scope '{key}={url}' success.");
    Ok(())
}

pub fn delete_scope_cmd(ctx: &NrmContext, scope: &str) -> NrmResult<()> {
    match delete_scope(ctx, scope)? {
        Some(key) => info!("Delete scope '{key}' success."),
        None => debug!(scope, "scope not set, nothing to delete"),
    }
    Ok(())
}

use nrm_config::registry::scope_key;
use nrm_core::NrmResult;
use tracing::debug;

use crate::{utils::ensure_valid_name, NrmContext};

/// Points `scope` at `url` in the user profile. Returns the key written.
pub fn set_scope(ctx: &NrmContext, scope: &str, url: &str) -> NrmResult<String> {
    ensure_valid_name(scope)?;
    let key = scope_key(scope);
    let mut profile = ctx.npmrc().load()?;
    profile.set(&key, url);
    ctx.npmrc().save(&profile)?;

    debug!(key = %key, url, "scope set");
    Ok(key)
}

/// Removes the endpoint of `scope` from the user profile.
///
/// Returns the removed key, or `None` when the scope was not set. Nothing is
/// written in that case.
pub fn delete_scope(ctx: &NrmContext, scope: &str) -> NrmResult<Option<String>> {
    let key = scope_key(scope);
    let mut profile = ctx.npmrc().load()?;
    if profile.remove(&key).is_none() {
        return Ok(None);
    }
    ctx.npmrc().save(&profile)?;

    debug!(key = %key, "scope deleted");
    Ok(Some(key))
}

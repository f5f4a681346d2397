use nrm_core::NrmResult;
use nrm_operations::{
    attribute::{login, set_attribute, set_repository},
    Cascade, LoginOptions, NrmContext,
};
use tracing::info;

use crate::utils::report_cascade;

pub fn login_cmd(ctx: &NrmContext, name: &str, options: LoginOptions) -> NrmResult<()> {
    let cascade = login(ctx, name, options)?;
    info!("Set the authorization information of the registry '{name}' success.");
    report_cascade(&cascade);
    Ok(())
}

pub fn set_repository_cmd(ctx: &NrmContext, name: &str, repo: &str) -> NrmResult<()> {
    let cascade = set_repository(ctx, name, repo)?;
    info!("Set the repository of registry '{name}' successfully.");
    if cascade == Cascade::Applied {
        info!("Set repository attribute of npmrc successfully");
    }
    report_cascade(&cascade);
    Ok(())
}

pub fn set_attribute_cmd(ctx: &NrmContext, name: &str, attr: &str, value: &str) -> NrmResult<()> {
    let cascade = set_attribute(ctx, name, attr, value)?;
    info!("Set attribute '{attr}={value}' of the registry '{name}' successfully.");
    report_cascade(&cascade);
    Ok(())
}

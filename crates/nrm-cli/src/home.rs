use std::process::Command;

use nrm_core::{error::ErrorContext, NrmResult};
use nrm_operations::{home::homepage, NrmContext};
use tracing::debug;

/// Opens the homepage of `name` in the default browser, or with the
/// `browser` executable when given.
pub fn open_home(ctx: &NrmContext, name: &str, browser: Option<&str>) -> NrmResult<()> {
    let url = homepage(ctx, name)?;
    debug!(url = %url, browser, "opening homepage");

    match browser {
        Some(browser) => {
            Command::new(browser)
                .arg(&url)
                .spawn()
                .with_context(|| format!("launching {browser} {url}"))?;
        }
        None => {
            webbrowser::open(&url).with_context(|| format!("opening {url} in the browser"))?;
        }
    }

    Ok(())
}

use nrm_core::NrmResult;
use nrm_operations::{
    current::{current_registry, list_registries},
    CurrentRegistry, NrmContext,
};
use nu_ansi_term::Color::Green;
use tracing::info;

use crate::utils::{column_width, dash_line, Colored};

/// Marker printed in front of the active registry.
pub fn current_marker(current: bool) -> String {
    if current {
        format!("{}", Colored(Green, "* "))
    } else {
        "  ".to_string()
    }
}

pub fn list_all(ctx: &NrmContext) -> NrmResult<()> {
    let listing = list_registries(ctx)?;
    let width = column_width(listing.entries.iter().map(|entry| entry.name.as_str()));

    for entry in &listing.entries {
        info!(
            "{}{}{}{}",
            current_marker(listing.current.name() == Some(entry.name.as_str())),
            entry.name,
            dash_line(&entry.name, width),
            entry.registry.url
        );
    }

    Ok(())
}

pub fn show_current(ctx: &NrmContext, show_url: bool) -> NrmResult<()> {
    match current_registry(ctx)? {
        CurrentRegistry::Found { name, url } => {
            let shown = if show_url { url } else { name };
            info!("You are using {} registry.", Colored(Green, shown));
        }
        CurrentRegistry::Unknown(url) => {
            info!("Your current registry({url}) is not included in the nrm registries.");
            print_add_hint();
        }
        CurrentRegistry::NotSet => {
            info!("Your current registry is not set in the npm profile.");
            print_add_hint();
        }
    }

    Ok(())
}

fn print_add_hint() {
    info!(
        "Use the {} command to add your registry.",
        Colored(Green, "nrm add <registry> <url> [home]")
    );
}

use std::env;

use attribute::{login_cmd, set_attribute_cmd, set_repository_cmd};
use clap::Parser;
use cli::{Args, Commands};
use home::open_home;
use list::{list_all, show_current};
use logging::setup_logging;
use nrm_config::config::{
    self, config_path, generate_default_config, get_config, set_config_path, Config,
};
use nrm_core::{error::ErrorContext, NrmResult};
use nrm_operations::{LoginOptions, NrmContext};
use nrm_utils::{fs::read_optional, path::resolve_path};
use probe::test_registries;
use registry::{add_registry_cmd, delete_registries_cmd, rename_registry_cmd, use_registry_cmd};
use scope::{delete_scope_cmd, set_scope_cmd};
use tracing::{info, warn};
use utils::set_color;

mod attribute;
mod cli;
mod home;
mod list;
mod logging;
mod probe;
mod registry;
mod scope;
mod utils;

fn handle_cli() -> NrmResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        set_color(false);
    }

    if let Some(ref c) = args.config {
        let path = resolve_path(c)?;
        let path = if path.is_absolute() {
            path
        } else {
            env::current_dir()
                .with_context(|| "retrieving current directory".into())?
                .join(path)
        };
        set_config_path(path);
    }

    match args.command {
        Commands::DefConfig => generate_default_config()?,
        Commands::Config => print_config()?,
        command => {
            config::init()?;
            let config = get_config();
            if !config.display().color() {
                set_color(false);
            }
            let ctx = NrmContext::new(&config)?;

            match command {
                Commands::List => list_all(&ctx)?,
                Commands::Current {
                    show_url,
                } => show_current(&ctx, show_url)?,
                Commands::Use {
                    name,
                    local,
                } => use_registry_cmd(&ctx, name, local)?,
                Commands::Add {
                    name,
                    url,
                    home,
                } => add_registry_cmd(&ctx, &name, &url, home.as_deref())?,
                Commands::Login {
                    name,
                    credential,
                    always_auth,
                    username,
                    password,
                    email,
                } => {
                    let options = LoginOptions {
                        credential,
                        always_auth,
                        username,
                        password,
                        email,
                    };
                    login_cmd(&ctx, &name, options)?;
                }
                Commands::SetHostedRepo {
                    name,
                    repo,
                } => set_repository_cmd(&ctx, &name, &repo)?,
                Commands::SetScope {
                    scope,
                    url,
                } => set_scope_cmd(&ctx, &scope, &url)?,
                Commands::DelScope {
                    scope,
                } => delete_scope_cmd(&ctx, &scope)?,
                Commands::Set {
                    name,
                    attr,
                    value,
                } => set_attribute_cmd(&ctx, &name, &attr, &value)?,
                Commands::Rename {
                    name,
                    new_name,
                } => rename_registry_cmd(&ctx, &name, &new_name)?,
                Commands::Del {
                    names,
                } => delete_registries_cmd(&ctx, names)?,
                Commands::Home {
                    name,
                    browser,
                } => open_home(&ctx, &name, browser.as_deref())?,
                Commands::Test {
                    registry,
                } => test_registries(&ctx, registry.as_deref())?,
                Commands::Config | Commands::DefConfig => unreachable!(),
            }
        }
    }

    Ok(())
}

/// Prints the settings file, or the annotated defaults when there is none.
fn print_config() -> NrmResult<()> {
    let path = config_path();
    let content = match read_optional(&path)? {
        Some(content) => content,
        None => {
            warn!("Config file {} not found", path.display());
            Config::default_config().to_annotated_document()?.to_string()
        }
    };
    info!("{}", content);
    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}

use std::{
    path::PathBuf,
    sync::{LazyLock, PoisonError, RwLock},
    time::Duration,
};

use documented::{Documented, DocumentedFields};
use nrm_utils::{
    fs::{atomic_write, read_optional},
    path::{resolve_path, xdg_config_home},
    time::parse_duration,
};
use serde::{Deserialize, Serialize};
use toml_edit::DocumentMut;
use tracing::{debug, info};

use crate::{
    annotations::annotate_toml_table,
    display::DisplaySettings,
    error::{ConfigError, Result},
};

const DEFAULT_NPMRC: &str = "~/.npmrc";
const DEFAULT_NRMRC: &str = "~/.nrmrc";
const DEFAULT_TEST_TIMEOUT: &str = "5s";

/// Application's configuration
#[derive(Clone, Debug, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Config {
    /// Path to the npm user profile that holds the active registry.
    /// Overridden by the NPM_CONFIG_USERCONFIG environment variable.
    /// Default: ~/.npmrc
    pub npmrc_path: Option<String>,

    /// Path to the file storing custom registries.
    /// Overridden by the NRMRC environment variable.
    /// Default: ~/.nrmrc
    pub nrmrc_path: Option<String>,

    /// How long `nrm test` waits for each registry (e.g. "5s", "1m").
    /// Default: "5s"
    pub test_timeout: Option<String>,

    /// Display settings for CLI output formatting.
    pub display: Option<DisplaySettings>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("NRM_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("nrm").join("config.toml"),
    })
});

pub fn config_path() -> PathBuf {
    CONFIG_PATH
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

pub fn set_config_path(path: PathBuf) {
    *CONFIG_PATH.write().unwrap_or_else(PoisonError::into_inner) = path;
}

pub fn init() -> Result<()> {
    let config = Config::new()?;
    *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = Some(config);
    Ok(())
}

/// Returns the loaded configuration, or the defaults when [`init`] has not
/// run.
pub fn get_config() -> Config {
    CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_else(Config::default_config)
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            npmrc_path: Some(DEFAULT_NPMRC.to_string()),
            nrmrc_path: Some(DEFAULT_NRMRC.to_string()),
            test_timeout: Some(DEFAULT_TEST_TIMEOUT.to_string()),
            display: Some(DisplaySettings {
                icons: Some(true),
                color: Some(true),
            }),
        }
    }

    /// Loads the configuration file. A missing file yields the defaults.
    pub fn new() -> Result<Self> {
        let path = config_path();

        let mut config = match read_optional(&path)? {
            Some(content) => toml::from_str(&content)?,
            None => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Self::default_config()
            }
        };

        config.resolve()?;

        Ok(config)
    }

    pub fn resolve(&mut self) -> Result<()> {
        self.npmrc_path.get_or_insert_with(|| DEFAULT_NPMRC.into());
        self.nrmrc_path.get_or_insert_with(|| DEFAULT_NRMRC.into());
        self.test_timeout
            .get_or_insert_with(|| DEFAULT_TEST_TIMEOUT.into());
        self.display.get_or_insert_with(DisplaySettings::default);

        self.get_test_timeout()?;

        Ok(())
    }

    pub fn get_npmrc_path(&self) -> Result<PathBuf> {
        if let Ok(env_path) = std::env::var("NPM_CONFIG_USERCONFIG") {
            return Ok(resolve_path(&env_path)?);
        }
        Ok(resolve_path(
            self.npmrc_path.as_deref().unwrap_or(DEFAULT_NPMRC),
        )?)
    }

    pub fn get_nrmrc_path(&self) -> Result<PathBuf> {
        if let Ok(env_path) = std::env::var("NRMRC") {
            return Ok(resolve_path(&env_path)?);
        }
        Ok(resolve_path(
            self.nrmrc_path.as_deref().unwrap_or(DEFAULT_NRMRC),
        )?)
    }

    pub fn get_test_timeout(&self) -> Result<Duration> {
        let value = self
            .test_timeout
            .as_deref()
            .unwrap_or(DEFAULT_TEST_TIMEOUT);
        match parse_duration(value) {
            Some(timeout) if !timeout.is_zero() => Ok(timeout),
            _ => Err(ConfigError::InvalidDuration(value.to_string())),
        }
    }

    pub fn display(&self) -> DisplaySettings {
        self.display.clone().unwrap_or_default()
    }

    pub fn to_annotated_document(&self) -> Result<DocumentMut> {
        let toml_string = toml::to_string_pretty(self)?;
        let mut doc = toml_string.parse::<DocumentMut>()?;

        annotate_toml_table::<Config>(doc.as_table_mut(), true)?;

        if let Some(display_table) = doc.get_mut("display").and_then(|d| d.as_table_mut()) {
            annotate_toml_table::<DisplaySettings>(display_table, false)?;
        }

        Ok(doc)
    }
}

pub fn generate_default_config() -> Result<()> {
    let path = config_path();

    if path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    let annotated_doc = Config::default_config().to_annotated_document()?;
    atomic_write(&path, &annotated_doc.to_string())?;

    info!(
        "Default configuration file generated with documentation at: {}",
        path.display()
    );
    Ok(())
}

use std::{path::PathBuf, time::Duration};

use nrm_config::{config::Config, ini::IniDocument, registry::REGISTRY_KEY, store::RcFile};
use nrm_core::{
    error::ErrorContext,
    table::{load_table, RegistryTable},
    NrmResult,
};
use tracing::debug;

/// Name of the project-level profile looked up in the working directory.
pub const LOCAL_NPMRC: &str = ".npmrc";

/// Locations and settings shared by every operation.
///
/// Holds paths only. Each operation loads the stores it needs when it runs.
#[derive(Debug, Clone)]
pub struct NrmContext {
    npmrc: RcFile,
    nrmrc: RcFile,
    local_npmrc: RcFile,
    test_timeout: Duration,
}

impl NrmContext {
    pub fn new(config: &Config) -> NrmResult<Self> {
        let cwd = std::env::current_dir().with_context(|| "retrieving current directory".into())?;

        let ctx = Self {
            npmrc: RcFile::new(config.get_npmrc_path()?),
            nrmrc: RcFile::new(config.get_nrmrc_path()?),
            local_npmrc: RcFile::new(cwd.join(LOCAL_NPMRC)),
            test_timeout: config.get_test_timeout()?,
        };
        debug!(
            npmrc = %ctx.npmrc.path().display(),
            nrmrc = %ctx.nrmrc.path().display(),
            "context created"
        );
        Ok(ctx)
    }

    pub fn with_paths(
        npmrc: impl Into<PathBuf>,
        nrmrc: impl Into<PathBuf>,
        local_npmrc: impl Into<PathBuf>,
    ) -> Self {
        Self {
            npmrc: RcFile::new(npmrc),
            nrmrc: RcFile::new(nrmrc),
            local_npmrc: RcFile::new(local_npmrc),
            test_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_test_timeout(mut self, timeout: Duration) -> Self {
        self.test_timeout = timeout;
        self
    }

    /// The user profile.
    pub fn npmrc(&self) -> &RcFile {
        &self.npmrc
    }

    /// The custom registry store.
    pub fn nrmrc(&self) -> &RcFile {
        &self.nrmrc
    }

    /// The profile in the working directory.
    pub fn local_npmrc(&self) -> &RcFile {
        &self.local_npmrc
    }

    pub fn profile(&self, local: bool) -> &RcFile {
        if local {
            &self.local_npmrc
        } else {
            &self.npmrc
        }
    }

    pub fn test_timeout(&self) -> Duration {
        self.test_timeout
    }

    /// Loads the registry table from the custom store.
    pub fn table(&self) -> NrmResult<RegistryTable> {
        load_table(&self.nrmrc)
    }

    /// The profile that decides which registry is in use.
    ///
    /// A project `.npmrc` that sets a registry takes precedence over the user
    /// profile.
    pub fn active_profile(&self) -> NrmResult<IniDocument> {
        let local = self.local_npmrc.load()?;
        if local.get(REGISTRY_KEY).is_some_and(|url| !url.is_empty()) {
            debug!(path = %self.local_npmrc.path().display(), "using project profile");
            return Ok(local);
        }
        Ok(self.npmrc.load()?)
    }
}

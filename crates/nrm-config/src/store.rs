use std::path::{Path, PathBuf};

use nrm_utils::fs::{atomic_write, read_optional};
use tracing::trace;

use crate::{
    error::{ConfigError, Result},
    ini::IniDocument,
};

/// A profile file on disk.
///
/// Nothing is cached: every [`load`](RcFile::load) reads the file again and
/// every [`save`](RcFile::save) replaces it atomically.
#[derive(Debug, Clone)]
pub struct RcFile {
    path: PathBuf,
}

impl RcFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the file. A missing file is an empty document.
    pub fn load(&self) -> Result<IniDocument> {
        let Some(content) = read_optional(&self.path)? else {
            trace!(path = %self.path.display(), "profile not found, using empty document");
            return Ok(IniDocument::new());
        };

        IniDocument::parse(&content).map_err(|err| {
            ConfigError::ProfileParse {
                path: self.path.clone(),
                line: err.line,
                reason: err.reason,
            }
        })
    }

    pub fn save(&self, doc: &IniDocument) -> Result<()> {
        atomic_write(&self.path, &doc.to_string())?;
        trace!(path = %self.path.display(), "profile saved");
        Ok(())
    }
}

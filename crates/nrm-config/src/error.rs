use std::path::PathBuf;

use miette::Diagnostic;
use nrm_utils::error::{FileSystemError, PathError, UtilsError};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(nrm_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(nrm_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(nrm_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists,

    #[error("Invalid duration: {0}")]
    #[diagnostic(
        code(nrm_config::invalid_duration),
        help("Use a value such as `5s`, `1m` or `1m30s`")
    )]
    InvalidDuration(String),

    #[error("Invalid value `{value}` for `{key}`")]
    #[diagnostic(
        code(nrm_config::invalid_value),
        help("`always-auth` accepts `true` or `false`")
    )]
    InvalidValue { key: String, value: String },

    #[error("Failed to parse {}:{line}: {reason}", path.display())]
    #[diagnostic(
        code(nrm_config::profile_parse),
        help("Fix or remove the offending line in the file")
    )]
    ProfileParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("IO error: {0}")]
    #[diagnostic(code(nrm_config::io))]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(nrm_config::utils))]
    Utils(#[from] UtilsError),

    #[error("Failed to parse TOML: {0}")]
    #[diagnostic(code(nrm_config::toml))]
    Toml(#[from] toml_edit::TomlError),

    #[error("Encountered unexpected TOML item: {0}")]
    #[diagnostic(code(nrm_config::unexpected_toml_item))]
    UnexpectedTomlItem(String),
}

impl From<PathError> for ConfigError {
    fn from(err: PathError) -> Self {
        Self::Utils(UtilsError::Path(err))
    }
}

impl From<FileSystemError> for ConfigError {
    fn from(err: FileSystemError) -> Self {
        Self::Utils(UtilsError::FileSystem(err))
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

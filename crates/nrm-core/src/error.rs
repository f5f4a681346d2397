//! Error types for nrm-core.

use miette::Diagnostic;
use nrm_config::error::ConfigError;
use nrm_utils::error::{FileSystemError, PathError};
use thiserror::Error;

/// Core error type for registry operations.
#[derive(Error, Diagnostic, Debug)]
pub enum NrmError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("The registry '{0}' is not found.")]
    #[diagnostic(
        code(nrm::registry_not_found),
        help("Run `nrm ls` to list the available registries")
    )]
    RegistryNotFound(String),

    #[error("The homepage of registry '{0}' is not found.")]
    #[diagnostic(
        code(nrm::homepage_not_found),
        help("Set one with `nrm set <name> --attr home --value <url>`")
    )]
    HomepageNotFound(String),

    #[error("The registry name '{0}' is already included in the nrm registries.")]
    #[diagnostic(
        code(nrm::duplicate_name),
        help("Please make sure that the name and url are unique")
    )]
    DuplicateName(String),

    #[error("The registry url '{url}' is already used by '{name}'.")]
    #[diagnostic(
        code(nrm::duplicate_url),
        help("Please make sure that the name and url are unique")
    )]
    DuplicateUrl { url: String, name: String },

    #[error("You cannot {action} the nrm internal registry '{name}'.")]
    #[diagnostic(
        code(nrm::protected_registry),
        help("Only custom registries added with `nrm add` can be changed")
    )]
    ProtectedRegistry { name: String, action: &'static str },

    #[error("The names cannot be the same.")]
    #[diagnostic(code(nrm::same_name))]
    SameName,

    #[error("The attribute '{0}' cannot be set with `nrm set`.")]
    #[diagnostic(
        code(nrm::reserved_attribute),
        help("Use `nrm set-hosted-repo <name> <repo>` to set the repository")
    )]
    ReservedAttribute(String),

    #[error("Unknown attribute '{0}'.")]
    #[diagnostic(
        code(nrm::unknown_attribute),
        help("Valid attributes are registry, home, _auth, always-auth and email")
    )]
    UnknownAttribute(String),

    #[error("Invalid registry url '{url}': {reason}")]
    #[diagnostic(
        code(nrm::invalid_url),
        help("Provide an absolute url such as https://registry.example.com/")
    )]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid name '{name}': {reason}.")]
    #[diagnostic(
        code(nrm::invalid_name),
        help("Use a non-empty name without brackets, `=`, line breaks or surrounding spaces")
    )]
    InvalidName { name: String, reason: &'static str },

    #[error("Authorization information in base64 format or username & password is required")]
    #[diagnostic(
        code(nrm::missing_credential),
        help("Pass a base64 token, or both --username and --password")
    )]
    MissingCredential,

    #[error("Error while {action}")]
    #[diagnostic(code(nrm::io), help("Check file permissions and disk space"))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    #[diagnostic(code(nrm::error))]
    Custom(String),
}

impl From<FileSystemError> for NrmError {
    fn from(err: FileSystemError) -> Self {
        Self::Config(err.into())
    }
}

impl From<PathError> for NrmError {
    fn from(err: PathError) -> Self {
        Self::Config(err.into())
    }
}

/// Trait for adding context to IO errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, NrmError>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, NrmError>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            NrmError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            NrmError::RegistryNotFound("acme".into()).to_string(),
            "The registry 'acme' is not found."
        );
        assert_eq!(
            NrmError::ProtectedRegistry {
                name: "npm".into(),
                action: "delete",
            }
            .to_string(),
            "You cannot delete the nrm internal registry 'npm'."
        );
        assert_eq!(NrmError::SameName.to_string(), "The names cannot be the same.");
    }

    #[test]
    fn test_with_context() {
        let result: io::Result<()> = Err(io::Error::other("denied"));
        let err = result.with_context(|| "opening browser".into()).unwrap_err();

        assert_eq!(err.to_string(), "Error while opening browser");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_filesystem_error() {
        let err = NrmError::from(FileSystemError::NotADirectory {
            path: "/x".into(),
        });
        assert!(matches!(err, NrmError::Config(ConfigError::Utils(_))));
    }
}

use std::{error::Error, fmt, io, path::PathBuf};

#[derive(Debug)]
pub enum PathError {
    Empty,
    CurrentDir { source: io::Error },
    MissingEnvVar { var: String, input: String },
    UnclosedVariable { input: String },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => f.write_str("Empty path"),
            PathError::CurrentDir { source } => {
                write!(f, "Cannot determine the working directory: {source}")
            }
            PathError::MissingEnvVar { var, input } => {
                write!(f, "`{input}` refers to `${var}`, which is not set")
            }
            PathError::UnclosedVariable { input } => {
                write!(f, "Missing `}}` after `{input}`")
            }
        }
    }
}

impl Error for PathError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PathError::CurrentDir { source } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum FileSystemError {
    /// `action` is a verb phrase such as `read` or `create directory`.
    Io {
        path: PathBuf,
        action: &'static str,
        source: io::Error,
    },
    NotADirectory { path: PathBuf },
    NoParent { path: PathBuf },
}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::Io {
                path,
                action,
                source,
            } => write!(f, "Could not {action} `{}`: {source}", path.display()),
            FileSystemError::NotADirectory { path } => {
                write!(f, "`{}` exists and is not a directory", path.display())
            }
            FileSystemError::NoParent { path } => {
                write!(f, "`{}` has no parent directory", path.display())
            }
        }
    }
}

impl Error for FileSystemError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FileSystemError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Either leaf error, for callers that surface both.
#[derive(Debug)]
pub enum UtilsError {
    Path(PathError),
    FileSystem(FileSystemError),
}

impl fmt::Display for UtilsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilsError::Path(err) => err.fmt(f),
            UtilsError::FileSystem(err) => err.fmt(f),
        }
    }
}

impl Error for UtilsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UtilsError::Path(err) => err.source(),
            UtilsError::FileSystem(err) => err.source(),
        }
    }
}

impl From<PathError> for UtilsError {
    fn from(err: PathError) -> Self {
        UtilsError::Path(err)
    }
}

impl From<FileSystemError> for UtilsError {
    fn from(err: FileSystemError) -> Self {
        UtilsError::FileSystem(err)
    }
}

pub type PathResult<T> = Result<T, PathError>;
pub type FileSystemResult<T> = Result<T, FileSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_error_messages() {
        let missing = PathError::MissingEnvVar {
            var: "NRM_HOME".into(),
            input: "$NRM_HOME/.nrmrc".into(),
        };
        assert_eq!(
            missing.to_string(),
            "`$NRM_HOME/.nrmrc` refers to `$NRM_HOME`, which is not set"
        );
        assert!(missing.source().is_none());

        let unclosed = PathError::UnclosedVariable {
            input: "${HOME".into(),
        };
        assert_eq!(unclosed.to_string(), "Missing `}` after `${HOME`");

        let cwd = PathError::CurrentDir {
            source: io::Error::other("gone"),
        };
        assert!(cwd.source().is_some());
    }

    #[test]
    fn test_file_system_error_messages() {
        let err = FileSystemError::Io {
            path: PathBuf::from("/home/user/.npmrc"),
            action: "read",
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(
            err.to_string(),
            "Could not read `/home/user/.npmrc`: permission denied"
        );
        assert!(err.source().is_some());

        let utils = UtilsError::from(FileSystemError::NoParent {
            path: PathBuf::from("/"),
        });
        assert_eq!(utils.to_string(), "`/` has no parent directory");
        assert!(utils.source().is_none());
    }
}

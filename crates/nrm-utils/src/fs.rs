use std::{
    fs,
    io::{ErrorKind, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::error::{FileSystemError, FileSystemResult};

/// Creates a directory structure if it doesn't exist.
///
/// If the directory already exists, this function does nothing. If the path
/// exists but is not a directory, this function returns an error.
///
/// # Errors
///
/// * [`FileSystemError::Io`] if the directory could not be created.
/// * [`FileSystemError::NotADirectory`] if the path exists but is not a directory.
pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> FileSystemResult<()> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path).map_err(|err| FileSystemError::Io {
            path: path.to_path_buf(),
            action: "create directory",
            source: err,
        })?;
    } else if !path.is_dir() {
        return Err(FileSystemError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Reads a file into a string, treating a missing file as `None`.
///
/// # Errors
///
/// Returns [`FileSystemError::Io`] for any failure other than the file not
/// existing, including content that is not valid UTF-8.
pub fn read_optional<P: AsRef<Path>>(path: P) -> FileSystemResult<Option<String>> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(FileSystemError::Io {
                path: path.to_path_buf(),
                action: "read",
                source: err,
            })
        }
    }
}

/// Replaces the contents of `path` with `content` atomically.
///
/// The content is written to a temporary file in the same directory and then
/// renamed over the target, so a concurrent reader sees either the old or the
/// new file, never a partial write. Missing parent directories are created.
///
/// # Example
///
/// ```no_run
/// use nrm_utils::error::FileSystemResult;
/// use nrm_utils::fs::atomic_write;
///
/// fn main() -> FileSystemResult<()> {
///     atomic_write("/tmp/nrm-doc/.npmrc", "registry=https://registry.npmjs.org/\n")?;
///     Ok(())
/// }
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> FileSystemResult<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => {
            return Err(FileSystemError::NoParent {
                path: path.to_path_buf(),
            })
        }
    };
    ensure_dir_exists(parent)?;

    let staged = |err| {
        FileSystemError::Io {
            path: path.to_path_buf(),
            action: "stage",
            source: err,
        }
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(staged)?;
    temp.write_all(content.as_bytes()).map_err(staged)?;
    temp.as_file().sync_all().map_err(staged)?;

    temp.persist(path).map_err(|err| {
        FileSystemError::Io {
            path: path.to_path_buf(),
            action: "replace",
            source: err.error,
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_ensure_dir_exists() {
        let dir = tempdir().unwrap();
        let new_dir = dir.path().join("new_dir");
        ensure_dir_exists(&new_dir).unwrap();
        assert!(new_dir.is_dir());
        ensure_dir_exists(&new_dir).unwrap();
    }

    #[test]
    fn test_ensure_dir_exists_file_collision() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("file.txt");
        fs::write(&file_path, "hello").unwrap();
        assert!(matches!(
            ensure_dir_exists(&file_path),
            Err(FileSystemError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_read_optional_missing() {
        let dir = tempdir().unwrap();
        assert!(read_optional(dir.path().join("missing")).unwrap().is_none());
    }

    #[test]
    fn test_read_optional_directory_fails() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_optional(dir.path()),
            Err(FileSystemError::Io { action: "read", .. })
        ));
    }

    #[test]
    fn test_atomic_write_creates_and_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(".npmrc");

        atomic_write(&path, "a=1\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a=1\n");

        atomic_write(&path, "b=2\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "b=2\n");

        let leftovers = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_atomic_write_over_directory_fails() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();

        let result = atomic_write(&target, "a=1\n");
        assert!(matches!(
            result,
            Err(FileSystemError::Io {
                action: "replace",
                ..
            })
        ));
        assert!(target.is_dir());
    }
}

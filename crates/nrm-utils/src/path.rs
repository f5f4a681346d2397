use std::{env, path::PathBuf};

use crate::error::{PathError, PathResult};

/// Turns user supplied path strings into absolute paths.
pub trait PathResolver {
    /// Expands a leading `~` and `$VAR` / `${VAR}` references, then anchors
    /// relative results at the working directory.
    ///
    /// ```
    /// use nrm_utils::path::{PathResolver, SystemPathResolver};
    ///
    /// let npmrc = SystemPathResolver.resolve_path("$HOME/.npmrc").unwrap();
    /// assert!(npmrc.ends_with(".npmrc"));
    /// ```
    fn resolve_path(&self, path: &str) -> PathResult<PathBuf>;

    /// `$HOME`, or the passwd entry of the current user.
    fn home_dir(&self) -> PathBuf;

    /// `$XDG_CONFIG_HOME`, or `~/.config`.
    fn xdg_config_home(&self) -> PathBuf;
}

pub struct SystemPathResolver;

impl PathResolver for SystemPathResolver {
    fn resolve_path(&self, path: &str) -> PathResult<PathBuf> {
        let path = path.trim();

        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let resolved = self.expand_variables(path)?;
        let path_buf = PathBuf::from(resolved);

        if path_buf.is_absolute() {
            Ok(path_buf)
        } else {
            env::current_dir()
                .map(|cwd| cwd.join(path_buf))
                .map_err(|err| PathError::CurrentDir { source: err })
        }
    }

    fn home_dir(&self) -> PathBuf {
        env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| passwd_home_dir())
    }

    fn xdg_config_home(&self) -> PathBuf {
        env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.home_dir().join(".config"))
    }
}

impl SystemPathResolver {
    fn expand_variables(&self, path: &str) -> PathResult<String> {
        let mut out = String::with_capacity(path.len());
        let mut rest = path;

        if let Some(tail) = rest.strip_prefix('~') {
            out.push_str(&self.home_dir().to_string_lossy());
            rest = tail;
        }

        while let Some(dollar) = rest.find('$') {
            out.push_str(&rest[..dollar]);
            let after = &rest[dollar + 1..];

            let (name, tail) = if let Some(braced) = after.strip_prefix('{') {
                let close = braced.find('}').ok_or_else(|| {
                    PathError::UnclosedVariable {
                        input: rest[dollar..].to_string(),
                    }
                })?;
                (&braced[..close], &braced[close + 1..])
            } else {
                let end = after
                    .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                (&after[..end], &after[end..])
            };

            if name.is_empty() {
                out.push('$');
            } else {
                out.push_str(&self.lookup(name, path)?);
            }
            rest = tail;
        }

        out.push_str(rest);
        Ok(out)
    }

    fn lookup(&self, name: &str, input: &str) -> PathResult<String> {
        match name {
            "HOME" => Ok(self.home_dir().to_string_lossy().into_owned()),
            "XDG_CONFIG_HOME" => Ok(self.xdg_config_home().to_string_lossy().into_owned()),
            _ => {
                env::var(name).map_err(|_| {
                    PathError::MissingEnvVar {
                        var: name.into(),
                        input: input.into(),
                    }
                })
            }
        }
    }
}

fn passwd_home_dir() -> PathBuf {
    nix::unistd::User::from_uid(nix::unistd::getuid())
        .ok()
        .flatten()
        .map(|user| user.dir)
        .unwrap_or_else(|| PathBuf::from("/"))
}

pub fn resolve_path(path: &str) -> PathResult<PathBuf> {
    SystemPathResolver.resolve_path(path)
}

pub fn home_dir() -> PathBuf {
    SystemPathResolver.home_dir()
}

pub fn xdg_config_home() -> PathBuf {
    SystemPathResolver.xdg_config_home()
}

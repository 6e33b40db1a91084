//! Configuration file management.
//!
//! Settings come from `.vaultgrep.toml` in the current directory, or
//! `~/.config/vaultgrep/config.toml` when that is absent. The vault password
//! file can also be inherited from Ansible's own `ansible.cfg`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Contents of a vaultgrep configuration file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Password file, or executable printing the password.
    #[serde(default)]
    pub vault_password_file: Option<PathBuf>,
    /// Directory names to skip in addition to `.git`.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Worker count.
    #[serde(default)]
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise the project file in `cwd` is
    /// tried, then the user file; with neither present the defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFailed` or `ConfigError::Parse` if a file
    /// exists but cannot be used.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(cwd),
        };

        match path {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// First existing config file: project, then user.
    pub fn discover(cwd: &Path) -> Option<PathBuf> {
        let project = cwd.join(constants::CONFIG_FILE);
        if project.is_file() {
            return Some(project);
        }

        dirs::config_dir()
            .map(|dir| dir.join(constants::USER_CONFIG_FILE))
            .filter(|path| path.is_file())
    }

    /// Parse a config file.
    ///
    /// A relative `vault_password_file` is resolved against the file's
    /// directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(file) = config.vault_password_file.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.vault_password_file = Some(resolve(base, &file));
        }

        config.validate()?;
        debug!(
            excludes = config.exclude.len(),
            jobs = ?config.jobs,
            "config loaded"
        );
        Ok(config)
    }

    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.jobs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "jobs",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        if let Some(name) = self
            .exclude
            .iter()
            .find(|name| name.is_empty() || name.contains(['/', '\\']))
        {
            return Err(ConfigError::InvalidValue {
                field: "exclude",
                reason: format!("expected a directory name, got '{}'", name),
            }
            .into());
        }

        Ok(())
    }
}

/// Vault password file configured in Ansible's `ansible.cfg`.
///
/// Follows Ansible's lookup order (`ANSIBLE_CONFIG`, `./ansible.cfg`,
/// `~/.ansible.cfg`, `/etc/ansible/ansible.cfg`); only the first file found
/// is consulted.
pub fn ansible_password_file(cwd: &Path) -> Option<PathBuf> {
    let path = ansible_cfg_candidates(cwd)
        .into_iter()
        .find(|p| p.is_file())?;
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot read ansible.cfg");
            return None;
        }
    };

    let value = parse_ansible_cfg(&contents)?;
    debug!(path = %path.display(), "using vault_password_file from ansible.cfg");
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Some(resolve(base, Path::new(&value)))
}

fn ansible_cfg_candidates(cwd: &Path) -> Vec<PathBuf> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut candidates: Vec<PathBuf> = [
        std::env::var_os(constants::ANSIBLE_CONFIG_ENV).map(PathBuf::from),
        Some(cwd.join(constants::ANSIBLE_CFG)),
        dirs::home_dir().map(|home| home.join(constants::ANSIBLE_USER_CFG)),
    ]
    .into_iter()
    .flatten()
    .collect();

    #[cfg(unix)]
    candidates.push(PathBuf::from(constants::ANSIBLE_SYSTEM_CFG));

    candidates
}

/// Extract `[defaults] vault_password_file` from INI text.
fn parse_ansible_cfg(contents: &str) -> Option<String> {
    let mut in_defaults = false;

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_defaults = section.trim() == "defaults";
            continue;
        }
        if !in_defaults {
            continue;
        }

        let Some((key, value)) = line.split_once(['=', ':']) else {
            continue;
        };
        if key.trim() == "vault_password_file" {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    let path = expand_home(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

//! Search command - grep decrypted vault files under a directory.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::{output, Cli};
use crate::core::cipher::AnsibleVault;
use crate::core::config::{self, Config};
use crate::core::matcher::{MatchOptions, Matcher};
use crate::core::report::{CancelToken, Palette, Reporter};
use crate::core::secret::{acquire_secret, SecretSource};
use crate::core::walk::Walker;
use crate::error::{ConfigError, Result, SearchError};

/// Exit code when the search was interrupted.
pub const EXIT_CANCELLED: i32 = 130;

/// Run the search described by `cli`.
///
/// Every fatal check (pattern, config, root, password) happens before the
/// first vault file is read.
pub fn execute(cli: &Cli, cancel: CancelToken) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let palette = Palette::colored();

    let options = MatchOptions {
        ignore_case: cli.ignore_case,
        fixed_strings: cli.fixed_strings,
    };
    let pattern = cli.pattern.as_deref().unwrap_or_default();
    let matcher = Matcher::new(pattern, options, palette.matched.clone())?;

    let config = Config::load(cli.config.as_deref(), &cwd)?;
    let root = resolve_root(cli.path.as_deref(), &cwd)?;

    let walker = config
        .exclude
        .iter()
        .chain(&cli.exclude)
        .fold(Walker::new(&root), |walker, name| walker.exclude(name));

    let jobs = match cli.jobs.or(config.jobs) {
        Some(0) => {
            return Err(ConfigError::InvalidValue {
                field: "jobs",
                reason: "must be at least 1".to_string(),
            }
            .into())
        }
        jobs => jobs,
    };

    let source = secret_source(cli, &config, &cwd);
    debug!(root = %root.display(), source = ?source, "starting search");
    let secret = acquire_secret(&source)?;

    let mut reporter = Reporter::new(&AnsibleVault, &secret, &matcher)
        .palette(palette)
        .cancel_token(cancel);
    if let Some(jobs) = jobs {
        reporter = reporter.jobs(jobs);
    }

    let summary = reporter.run(walker.files(), &mut io::stdout(), &mut io::stderr())?;

    if summary.cancelled {
        output::warn("search interrupted");
        return Ok(EXIT_CANCELLED);
    }
    Ok(0)
}

fn resolve_root(path: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    let root = path.map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);

    if !root.exists() {
        return Err(SearchError::RootNotFound(root).into());
    }
    if !root.is_dir() {
        return Err(SearchError::RootNotDirectory(root).into());
    }
    Ok(root)
}

/// Password source, highest precedence first: flag or environment, config
/// file, `ansible.cfg`, interactive prompt.
fn secret_source(cli: &Cli, config: &Config, cwd: &Path) -> SecretSource {
    cli.vault_password_file
        .as_deref()
        .map(config::expand_home)
        .or_else(|| config.vault_password_file.clone())
        .or_else(|| config::ansible_password_file(cwd))
        .map_or(SecretSource::Prompt, SecretSource::File)
}

//! vaultgrep - search the contents of Ansible Vault encrypted files.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── search        # Wire config, password and reporter together
//! │   ├── completions   # Shell completions
//! │   └── output        # Styled status messages
//! └── core/             # Core library components
//!     ├── detect        # First-line vault marker check
//!     ├── walk          # Lazy directory traversal
//!     ├── cipher/       # Vault formats
//!     │   ├── mod       # Cipher trait
//!     │   └── ansible   # Ansible Vault AES256
//!     ├── secret        # Vault password acquisition
//!     ├── matcher       # Regex search and highlighting
//!     ├── report        # Parallel decrypt-then-search pipeline
//!     └── config        # .vaultgrep.toml and ansible.cfg
//! ```
//!
//! # Example
//!
//! ```no_run
//! use console::Style;
//! use vaultgrep::core::cipher::AnsibleVault;
//! use vaultgrep::core::matcher::{MatchOptions, Matcher};
//! use vaultgrep::core::report::Reporter;
//! use vaultgrep::core::secret::VaultSecret;
//! use vaultgrep::core::walk::find_files;
//!
//! # fn main() -> vaultgrep::error::Result<()> {
//! let matcher = Matcher::new("db_password", MatchOptions::default(), Style::new().red())?;
//! let secret = VaultSecret::new(b"hunter2".to_vec());
//! let summary = Reporter::new(&AnsibleVault, &secret, &matcher).run(
//!     find_files("inventory".as_ref()),
//!     &mut std::io::stdout(),
//!     &mut std::io::stderr(),
//! )?;
//! println!("{} files matched", summary.matched);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;

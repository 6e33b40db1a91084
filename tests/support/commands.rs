//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a vaultgrep command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and XDG_CONFIG_HOME inside the temporary home directory
    /// - `ANSIBLE_VAULT_PASSWORD_FILE` pointing at the test password file
    /// - Current directory set to the test tree
    /// - Colors disabled
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.env("ANSIBLE_VAULT_PASSWORD_FILE", self.password_file());
        cmd
    }

    /// Like [`Test::cmd`] but without any password source configured.
    pub fn bare_cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("vaultgrep").expect("failed to find vaultgrep binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("ANSIBLE_VAULT_PASSWORD_FILE");
        cmd.env_remove("ANSIBLE_CONFIG");
        cmd.env_remove("VAULTGREP_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `vaultgrep <args>`.
    pub fn search(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run vaultgrep")
    }
}

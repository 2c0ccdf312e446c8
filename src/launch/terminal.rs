use super::{LaunchHandle, ProcessLauncher};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Opens each script in a fresh terminal window.
///
/// The configured command is run with the script path appended, e.g.
/// `cmd /C start cmd /K <script>` on Windows or
/// `x-terminal-emulator -e sh <script>` on Linux.
#[derive(Debug, Clone)]
pub struct TerminalLauncher {
    command: Vec<String>,
}

impl TerminalLauncher {
    pub fn new(command: Vec<String>) -> Self {
        TerminalLauncher { command }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        TerminalLauncher::new(config.terminal_command.clone())
    }

    fn build(&self, script: &Path) -> Result<Command> {
        let (program, args) = self.command.split_first().ok_or_else(|| {
            Error::LaunchFailure {
                path: script.to_path_buf(),
                reason: "terminal_command is empty".to_string(),
            }
        })?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = script.parent().filter(|d| !d.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }
}

impl ProcessLauncher for TerminalLauncher {
    fn launch(&self, script: &Path) -> Result<LaunchHandle> {
        let child = self
            .build(script)?
            .spawn()
            .map_err(|e| Error::LaunchFailure {
                path: script.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(LaunchHandle {
            script: script.to_path_buf(),
            pid: Some(child.id()),
        })
    }
}

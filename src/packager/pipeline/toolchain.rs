//! Native bundler toolchain planning and execution.
//!
//! Plans the platform-conditional command sequence that compiles the
//! application into a one-file executable (spec generation, headless browser
//! install, native bundler invocation) and executes it as discrete
//! subprocesses, each with its own checked exit status. The pipeline aborts
//! on the first failing command.

use crate::packager::error::{Error, Result};
use crate::packager::settings::{Platform, Settings, TOKENIZER_DATA_DIR};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// The spec generator resolved from PATH.
pub const SPEC_GENERATOR: &str = "pyi-makespec";

/// A single external command of the build toolchain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    /// Program to execute (bare name or path)
    pub program: String,
    /// Arguments in order
    pub args: Vec<String>,
    /// Extra environment variables for this command only
    pub envs: Vec<(String, String)>,
}

impl ToolCommand {
    fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    fn env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.envs {
            write!(f, "{key}={value} ")?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Plans the toolchain command sequence for a release.
///
/// The commands are intended to run with the scratch directory as working
/// directory. On Windows the spec embeds the executable icon and the version
/// descriptor; on Linux both are omitted and the data-bundling flag uses the
/// `:` separator.
pub fn plan(settings: &Settings, version: &str) -> Vec<ToolCommand> {
    let setup_name = settings.setup_name(version);
    let separator = settings.platform().add_data_separator();
    let scripts = settings.scripts_dir();

    let mut spec = ToolCommand::new(SPEC_GENERATOR)
        .arg("-F")
        .arg("-n")
        .arg(&setup_name);

    if settings.platform() == Platform::Windows {
        spec = spec
            .arg("-i")
            .arg(settings.icon_file().display().to_string())
            .arg("--version-file=version.txt");
    }

    spec = spec.arg(settings.entry_script().display().to_string()).arg(format!(
        "--add-data={}{}{}",
        settings.tokenizer_dir().display(),
        separator,
        TOKENIZER_DATA_DIR
    ));

    let browser_install = ToolCommand::new(scripts.join("playwright").display().to_string())
        .arg("install")
        .arg("chromium")
        .env("PLAYWRIGHT_BROWSERS_PATH", "0");

    let bundler = ToolCommand::new(scripts.join("pyinstaller").display().to_string())
        .arg(format!("{setup_name}.spec"));

    vec![spec, browser_install, bundler]
}

/// Resolves a bare tool name from PATH, failing early with a named error.
pub fn ensure_available(tool: &str) -> Result<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(_) => Err(Error::ToolNotFound(tool.to_string())),
    }
}

/// Executor for toolchain commands.
///
/// Abstracted so tests can record planned invocations without spawning the
/// native bundler.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs one command to completion, failing on a non-zero exit status.
    async fn run(&self, command: &ToolCommand, cwd: &Path) -> Result<()>;
}

/// Command runner spawning real subprocesses with streamed output.
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &ToolCommand, cwd: &Path) -> Result<()> {
        // Bare names are resolved from PATH up front for a named error
        if !command.program.contains('/') && !command.program.contains('\\') {
            ensure_available(&command.program)?;
        }

        log::info!("execute: {command}");

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .envs(command.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: command.to_string(),
                error,
            })?;

        // Stream both pipes while the child runs so partial failure surfaces early
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let stdout_task = async {
            if let Some(stdout) = stdout {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    log::info!("  {line}");
                }
            }
        };

        let stderr_task = async {
            if let Some(stderr) = stderr {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    log::warn!("  {line}");
                }
            }
        };

        tokio::join!(stdout_task, stderr_task);

        let status = child.wait().await.map_err(|error| Error::CommandFailed {
            command: command.to_string(),
            error,
        })?;

        if !status.success() {
            return Err(Error::CommandStatus {
                command: command.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::settings::SettingsBuilder;

    fn settings(platform: Platform) -> Settings {
        SettingsBuilder::new()
            .platform(platform)
            .project_root("/work")
            .build()
    }

    #[test]
    fn windows_plan_embeds_icon_and_version_descriptor() {
        let commands = plan(&settings(Platform::Windows), "v6.0.1");
        assert_eq!(commands.len(), 3);

        let spec = &commands[0];
        assert_eq!(spec.program, SPEC_GENERATOR);
        assert!(spec.args.contains(&"-i".to_string()));
        assert!(spec.args.contains(&"--version-file=version.txt".to_string()));
        assert!(
            spec.args
                .iter()
                .any(|a| a.starts_with("--add-data=") && a.ends_with(";jieba"))
        );
    }

    #[test]
    fn linux_plan_omits_windows_only_flags() {
        let commands = plan(&settings(Platform::Linux), "v6.0.1");

        let spec = &commands[0];
        assert!(!spec.args.contains(&"-i".to_string()));
        assert!(!spec.args.iter().any(|a| a.starts_with("--version-file")));
        assert!(
            spec.args
                .iter()
                .any(|a| a.starts_with("--add-data=") && a.ends_with(":jieba"))
        );
    }

    #[test]
    fn plan_orders_spec_install_bundle() {
        let commands = plan(&settings(Platform::Linux), "v6.0.1");

        assert_eq!(commands[0].program, SPEC_GENERATOR);
        assert!(commands[1].program.ends_with("playwright"));
        assert_eq!(
            commands[1].envs,
            vec![("PLAYWRIGHT_BROWSERS_PATH".to_string(), "0".to_string())]
        );
        assert!(commands[2].program.ends_with("pyinstaller"));
        assert_eq!(commands[2].args, vec!["AmiyaBot-v6.0.1-linux.spec"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn process_runner_checks_exit_status() {
        let tmp = tempfile::tempdir().expect("tempdir");

        let ok = ToolCommand::new("true");
        ProcessRunner.run(&ok, tmp.path()).await.expect("true succeeds");

        let failing = ToolCommand::new("false");
        let result = ProcessRunner.run(&failing, tmp.path()).await;
        assert!(matches!(result, Err(Error::CommandStatus { .. })));
    }
}

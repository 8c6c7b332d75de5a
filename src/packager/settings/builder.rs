//! Builder for constructing Settings.

use super::{PackageSettings, Platform, Settings};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API with defaults matching the AmiyaBot repository
/// layout; every field can be overridden, which is how tests substitute
/// scratch roots and platform variants.
///
/// # Examples
///
/// ```no_run
/// use amiya_packager::packager::SettingsBuilder;
///
/// let settings = SettingsBuilder::new()
///     .project_root(std::env::current_dir().unwrap())
///     .build();
/// ```
pub struct SettingsBuilder {
    package: PackageSettings,
    platform: Platform,
    project_root: PathBuf,
    package_dir: Option<PathBuf>,
    config_dir: PathBuf,
    entry_script: PathBuf,
    icon_file: PathBuf,
    release_file: PathBuf,
    remote_base: String,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self {
            package: PackageSettings::default(),
            platform: Platform::detect(),
            project_root: PathBuf::from("."),
            package_dir: None,
            config_dir: PathBuf::from("config"),
            entry_script: PathBuf::from("amiya.py"),
            icon_file: PathBuf::from("amiya.ico"),
            release_file: PathBuf::from(".github/publish.txt"),
            remote_base: "https://cos.amiyabot.com".to_string(),
        }
    }
}

impl SettingsBuilder {
    /// Creates a new settings builder with repository-layout defaults.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets product metadata.
    pub fn package_settings(mut self, package: PackageSettings) -> Self {
        self.package = package;
        self
    }

    /// Sets the target platform.
    ///
    /// Default: detected from the running process.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Sets the project root the source paths are resolved against.
    ///
    /// Default: the current directory.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = path.as_ref().to_path_buf();
        self
    }

    /// Sets the scratch root for build output.
    ///
    /// Default: `<project_root>/package`.
    pub fn package_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.package_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the application configuration directory, relative to the project root.
    ///
    /// Default: `config`.
    pub fn config_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_dir = path.as_ref().to_path_buf();
        self
    }

    /// Sets the application entry script, relative to the project root.
    ///
    /// Default: `amiya.py`.
    pub fn entry_script<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.entry_script = path.as_ref().to_path_buf();
        self
    }

    /// Sets the executable icon, relative to the project root.
    ///
    /// Default: `amiya.ico`.
    pub fn icon_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.icon_file = path.as_ref().to_path_buf();
        self
    }

    /// Sets the release-tracking file, relative to the project root.
    ///
    /// Default: `.github/publish.txt`.
    pub fn release_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.release_file = path.as_ref().to_path_buf();
        self
    }

    /// Sets the base URL of the object storage endpoint.
    ///
    /// Default: `https://cos.amiyabot.com`.
    pub fn remote_base<S: Into<String>>(mut self, base: S) -> Self {
        self.remote_base = base.into();
        self
    }

    /// Builds the settings.
    pub fn build(self) -> Settings {
        let package_dir = self
            .package_dir
            .unwrap_or_else(|| self.project_root.join("package"));

        Settings::new(
            self.package,
            self.platform,
            self.project_root,
            package_dir,
            self.config_dir,
            self.entry_script,
            self.icon_file,
            self.release_file,
            self.remote_base,
        )
    }
}

//! Core Settings struct and implementations.

use super::{PackageSettings, Platform};
use std::path::{Path, PathBuf};

/// Directory name the tokenizer dictionary is bundled under.
///
/// The application resolves its tokenizer data relative to this name at
/// runtime, so it is part of the bundle contract.
pub const TOKENIZER_DATA_DIR: &str = "jieba";

/// Main settings for release packaging operations.
///
/// Central configuration for the packager, constructed via
/// [`super::SettingsBuilder`] at startup and threaded through every pipeline
/// step as a parameter. Contains product metadata, the target platform and
/// every path and remote location the pipeline touches.
///
/// # Examples
///
/// ```no_run
/// use amiya_packager::packager::{Platform, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .project_root("/srv/amiya-bot")
///     .platform(Platform::Linux)
///     .build();
///
/// assert_eq!(settings.archive_name("v6.0.1"), "AmiyaBot-v6.0.1-linux.zip");
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Product metadata.
    package: PackageSettings,

    /// Target platform.
    platform: Platform,

    /// Project root the source paths are resolved against.
    project_root: PathBuf,

    /// Scratch root for build output (`package` by convention).
    package_dir: PathBuf,

    /// Application configuration directory, relative to the project root.
    config_dir: PathBuf,

    /// Application entry script, relative to the project root.
    entry_script: PathBuf,

    /// Executable icon, relative to the project root. Windows only.
    icon_file: PathBuf,

    /// Release-tracking file holding the current version string.
    release_file: PathBuf,

    /// Base URL of the object storage endpoint.
    remote_base: String,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the product metadata.
    pub fn package_settings(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the target platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the scratch root for build output.
    pub fn package_dir(&self) -> &Path {
        &self.package_dir
    }

    /// Returns the distribution directory rebuilt on every run.
    pub fn dist_dir(&self) -> PathBuf {
        self.package_dir.join("dist")
    }

    /// Returns the scratch copy directory for the tokenizer dictionary.
    pub fn tokenizer_dir(&self) -> PathBuf {
        self.package_dir.join(TOKENIZER_DATA_DIR)
    }

    /// Returns the path of the transient version descriptor file.
    pub fn version_file(&self) -> PathBuf {
        self.package_dir.join("version.txt")
    }

    /// Returns the site-packages directory of the bundled virtual environment.
    pub fn site_packages(&self) -> PathBuf {
        self.project_root.join(self.platform.site_packages())
    }

    /// Returns the scripts directory of the bundled virtual environment.
    pub fn scripts_dir(&self) -> PathBuf {
        self.project_root.join(self.platform.scripts_dir())
    }

    /// Returns the application configuration directory.
    pub fn config_dir(&self) -> PathBuf {
        self.project_root.join(&self.config_dir)
    }

    /// Returns the application entry script.
    pub fn entry_script(&self) -> PathBuf {
        self.project_root.join(&self.entry_script)
    }

    /// Returns the executable icon path.
    pub fn icon_file(&self) -> PathBuf {
        self.project_root.join(&self.icon_file)
    }

    /// Returns the release-tracking file path.
    pub fn release_file(&self) -> PathBuf {
        self.project_root.join(&self.release_file)
    }

    /// Returns the base name of the release for a version.
    ///
    /// Format: `<product>-<version>-<platform>`.
    pub fn setup_name(&self, version: &str) -> String {
        format!("{}-{}-{}", self.package.product_name, version, self.platform)
    }

    /// Returns the archive file name for a version.
    pub fn archive_name(&self, version: &str) -> String {
        format!("{}.zip", self.setup_name(version))
    }

    /// Returns the archive path for a version.
    pub fn archive_path(&self, version: &str) -> PathBuf {
        self.package_dir.join(self.archive_name(version))
    }

    /// Returns the URL of the remote "latest version" marker.
    pub fn marker_url(&self) -> String {
        format!("{}/{}", self.remote_base, self.marker_key())
    }

    /// Returns the remote key of the "latest version" marker.
    pub fn marker_key(&self) -> String {
        format!("package/release/{}", self.platform.marker_file_name())
    }

    /// Returns the remote key an archive is published under.
    pub fn archive_key(&self, archive_name: &str) -> String {
        format!("package/release/{archive_name}")
    }

    /// Returns the base URL of the object storage endpoint.
    pub fn remote_base(&self) -> &str {
        &self.remote_base
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        package: PackageSettings,
        platform: Platform,
        project_root: PathBuf,
        package_dir: PathBuf,
        config_dir: PathBuf,
        entry_script: PathBuf,
        icon_file: PathBuf,
        release_file: PathBuf,
        remote_base: String,
    ) -> Self {
        Self {
            package,
            platform,
            project_root,
            package_dir,
            config_dir,
            entry_script,
            icon_file,
            release_file,
            remote_base,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::packager::settings::{Platform, SettingsBuilder};

    #[test]
    fn archive_name_is_deterministic() {
        let settings = SettingsBuilder::new().platform(Platform::Linux).build();
        assert_eq!(settings.archive_name("v2.0.0"), "AmiyaBot-v2.0.0-linux.zip");

        let settings = SettingsBuilder::new().platform(Platform::Windows).build();
        assert_eq!(
            settings.archive_name("v2.0.0"),
            "AmiyaBot-v2.0.0-windows.zip"
        );
    }

    #[test]
    fn marker_url_is_namespaced_by_platform() {
        let settings = SettingsBuilder::new()
            .platform(Platform::Linux)
            .remote_base("https://cos.amiyabot.com")
            .build();
        assert_eq!(
            settings.marker_url(),
            "https://cos.amiyabot.com/package/release/latest-linux.txt"
        );
    }

    #[test]
    fn venv_layout_follows_platform() {
        let settings = SettingsBuilder::new()
            .platform(Platform::Windows)
            .project_root("/work")
            .build();
        assert!(settings.site_packages().ends_with("venv/Lib/site-packages"));
        assert!(settings.scripts_dir().ends_with("venv/Scripts"));
    }
}

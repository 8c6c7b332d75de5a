//! Target platform types and path conventions.

use std::fmt;

/// Target platform for a release build.
///
/// Determined once at startup and carried in [`super::Settings`], so tests can
/// substitute platform variants without process restart. Selects the virtual
/// environment layout, the bundler's data-flag syntax and the remote marker
/// file name for every downstream step.
///
/// # Examples
///
/// ```no_run
/// use amiya_packager::packager::Platform;
///
/// let platform = Platform::detect();
/// println!("Building for: {}", platform);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Windows - one-file executable with icon and version resource
    Windows,
    /// Linux - plain one-file executable
    Linux,
}

impl Platform {
    /// Detects the platform the process is running on.
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Returns the platform identifier used in artifact and marker names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
        }
    }

    /// Returns the site-packages directory of the bundled virtual environment.
    pub fn site_packages(&self) -> &'static str {
        match self {
            Platform::Windows => "venv/Lib/site-packages",
            Platform::Linux => "venv/lib/python3.8/site-packages",
        }
    }

    /// Returns the scripts directory of the bundled virtual environment.
    pub fn scripts_dir(&self) -> &'static str {
        match self {
            Platform::Windows => "venv/Scripts",
            Platform::Linux => "venv/bin",
        }
    }

    /// Returns the separator used in the bundler's `--add-data` flag.
    ///
    /// The native bundler expects `;` between source and destination on
    /// Windows and `:` everywhere else.
    pub fn add_data_separator(&self) -> char {
        match self {
            Platform::Windows => ';',
            Platform::Linux => ':',
        }
    }

    /// Returns the remote marker file name for this platform.
    pub fn marker_file_name(&self) -> String {
        format!("latest-{}.txt", self.as_str())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_names_match_marker_names() {
        assert_eq!(Platform::Windows.marker_file_name(), "latest-windows.txt");
        assert_eq!(Platform::Linux.marker_file_name(), "latest-linux.txt");
    }

    #[test]
    fn add_data_separator_is_platform_conditional() {
        assert_eq!(Platform::Windows.add_data_separator(), ';');
        assert_eq!(Platform::Linux.add_data_separator(), ':');
    }
}

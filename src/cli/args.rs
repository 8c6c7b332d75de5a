//! Command line argument parsing and validation.

use clap::Parser;

/// Release packager for the AmiyaBot application
#[derive(Parser, Debug)]
#[command(
    name = "amiya-packager",
    version,
    about = "Release packager for the AmiyaBot application",
    long_about = "Builds a platform-specific release archive of the AmiyaBot application and
optionally publishes it to object storage.

Reads the version from the release-tracking file (.github/publish.txt) when no
version argument is given. Skips the build when the requested version is
already the published latest, unless --force is given.

Usage:
  amiya-packager v6.0.1
  amiya-packager v6.0.1 --force
  amiya-packager --upload

Publishing requires the SECRETID and SECRETKEY environment variables."
)]
pub struct Args {
    /// Release version to build (e.g., v6.0.1); read from the
    /// release-tracking file when omitted
    #[arg(id = "release_version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Build even when the version is already the published latest
    #[arg(short, long)]
    pub force: bool,

    /// Upload the archive and overwrite the remote marker after the build
    #[arg(short, long)]
    pub upload: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

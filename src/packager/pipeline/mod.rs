//! Release pipeline orchestration.
//!
//! This module provides the [`Packager`] orchestrator that drives the linear
//! release sequence: freshness gate, scratch cleanup, input gathering,
//! version descriptor stamping, toolchain invocation, archiving, checksum and
//! optional publication.

mod archive;
mod checksum;
mod gather;
mod toolchain;
mod version;

pub use gather::DICTIONARY_ARCHIVES;
pub use toolchain::{CommandRunner, ProcessRunner, SPEC_GENERATOR, ToolCommand};
pub use version::parse_version;

use crate::packager::error::{ErrorExt, Result};
use crate::packager::marker::{self, HttpMarker, MarkerSource};
use crate::packager::publish::{CosUploader, Uploader};
use crate::packager::settings::Settings;
use crate::packager::utils::fs;
use std::path::PathBuf;

/// Inputs of a single build invocation.
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    /// Release version. When absent (or empty) the current value is read
    /// from the release-tracking file.
    pub version: Option<String>,

    /// Bypass the "already released" short-circuit.
    pub force: bool,

    /// Publish the archive and overwrite the remote marker after a
    /// successful build.
    pub upload: bool,
}

/// Result of a build invocation.
#[derive(Debug)]
pub enum BuildOutcome {
    /// The requested version is already the published latest; nothing was
    /// built and no side effects occurred.
    UpToDate {
        /// The version that is already released
        version: String,
    },

    /// A release archive was produced.
    Built(BuiltArtifact),
}

/// Metadata of a produced release archive.
#[derive(Debug)]
pub struct BuiltArtifact {
    /// Version the archive was built for
    pub version: String,
    /// Path of the archive on disk
    pub archive_path: PathBuf,
    /// Archive size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the archive
    pub checksum: String,
    /// Whether the archive and marker were published
    pub uploaded: bool,
}

/// Main release pipeline orchestrator.
///
/// Coordinates the release sequence against a [`Settings`] instance.
/// Collaborators (marker source, toolchain runner, uploader) default to the
/// production implementations and can be substituted for tests.
///
/// # Examples
///
/// ```no_run
/// use amiya_packager::packager::{BuildOptions, Packager, SettingsBuilder};
///
/// # async fn example() -> amiya_packager::packager::Result<()> {
/// let packager = Packager::new(SettingsBuilder::new().build());
/// let outcome = packager
///     .build(&BuildOptions {
///         version: Some("v6.0.1".into()),
///         force: false,
///         upload: false,
///     })
///     .await?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
pub struct Packager {
    settings: Settings,
    marker: Box<dyn MarkerSource>,
    runner: Box<dyn CommandRunner>,
    uploader: Option<Box<dyn Uploader>>,
}

impl Packager {
    /// Creates a packager with production collaborators.
    pub fn new(settings: Settings) -> Self {
        let marker = Box::new(HttpMarker::new(settings.marker_url()));
        Self {
            settings,
            marker,
            runner: Box::new(ProcessRunner),
            uploader: None,
        }
    }

    /// Substitutes the marker source.
    pub fn with_marker_source(mut self, marker: Box<dyn MarkerSource>) -> Self {
        self.marker = marker;
        self
    }

    /// Substitutes the toolchain command runner.
    pub fn with_command_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Substitutes the upload client.
    ///
    /// Without an explicit uploader, publication constructs a [`CosUploader`]
    /// from the environment at publish time.
    pub fn with_uploader(mut self, uploader: Box<dyn Uploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Returns a reference to the packager settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the release pipeline.
    ///
    /// Performs no side effects at all when the requested version is already
    /// the published latest and `force` is off. On any toolchain failure the
    /// pipeline aborts before archiving; the scratch tree is left on disk for
    /// debugging and no archive is produced.
    pub async fn build(&self, options: &BuildOptions) -> Result<BuildOutcome> {
        let settings = &self.settings;

        // Resolve the version, falling back to the release-tracking file
        let version = match options.version.as_deref() {
            Some(version) if !version.is_empty() => version.to_string(),
            _ => marker::read_release_file(&settings.release_file()).await?,
        };

        // Freshness check; fetch failure means "no prior release"
        let latest = match self.marker.fetch_latest().await {
            Ok(latest) => latest,
            Err(e) => {
                log::warn!("Marker fetch failed, assuming no prior release: {e}");
                String::new()
            }
        };

        if latest == version && !options.force {
            log::info!("{version} is already released, not a new release");
            return Ok(BuildOutcome::UpToDate { version });
        }

        log::info!(
            "Building {} for {}",
            settings.setup_name(&version),
            settings.platform()
        );

        // Clean scratch space so every build starts from a known-empty state
        fs::create_dir_all(&settings.dist_dir(), true).await?;
        fs::create_dir_all(&settings.tokenizer_dir(), true).await?;

        gather::gather(settings).await?;

        // Fails on a malformed version before any toolchain invocation
        version::write_version_descriptor(settings, &version).await?;

        for command in toolchain::plan(settings, &version) {
            self.runner.run(&command, settings.package_dir()).await?;
        }

        let archive_path = settings.archive_path(&version);
        archive::create_archive(&settings.dist_dir(), &archive_path).await?;

        let metadata = tokio::fs::metadata(&archive_path)
            .await
            .fs_context("reading artifact metadata", &archive_path)?;
        let checksum = checksum::calculate_sha256(&archive_path).await?;
        log::info!(
            "Created {} ({} bytes, sha256 {})",
            archive_path.display(),
            metadata.len(),
            checksum
        );

        // The version descriptor is transient; dist and the archive remain
        fs::remove_file(&settings.version_file()).await?;

        let uploaded = if options.upload {
            self.publish(&version).await?;
            true
        } else {
            false
        };

        Ok(BuildOutcome::Built(BuiltArtifact {
            version,
            archive_path,
            size: metadata.len(),
            checksum,
            uploaded,
        }))
    }

    /// Publishes the archive and overwrites the remote marker with the
    /// release-tracking file contents.
    async fn publish(&self, version: &str) -> Result<()> {
        let settings = &self.settings;

        let default_uploader;
        let uploader: &dyn Uploader = match &self.uploader {
            Some(uploader) => uploader.as_ref(),
            None => {
                default_uploader = CosUploader::from_env(settings.remote_base().to_string())?;
                &default_uploader
            }
        };

        let archive_name = settings.archive_name(version);
        uploader
            .upload_file(
                &settings.archive_path(version),
                &settings.archive_key(&archive_name),
            )
            .await?;
        uploader
            .upload_file(&settings.release_file(), &settings.marker_key())
            .await?;

        Ok(())
    }
}

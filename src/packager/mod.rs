//! Release packaging for the AmiyaBot application.
//!
//! Produces a platform-specific release archive (application executable,
//! configuration, framework assets and data dictionaries) and optionally
//! publishes it, together with a "latest version" marker, to object storage.

pub mod error;
pub mod marker;
pub mod pipeline;
pub mod publish;
pub mod settings;
pub mod utils;

// Re-export commonly used types
pub use error::{Error, Result};
pub use marker::{HttpMarker, MarkerSource};
pub use pipeline::{
    BuildOptions, BuildOutcome, BuiltArtifact, CommandRunner, DICTIONARY_ARCHIVES, Packager,
    ProcessRunner, ToolCommand,
};
pub use publish::{CosUploader, Uploader};
pub use settings::{PackageSettings, Platform, Settings, SettingsBuilder, TOKENIZER_DATA_DIR};

//! Configuration structures for release packaging.
//!
//! Provides the explicit configuration struct constructed once at startup and
//! threaded through every pipeline operation, replacing process-wide platform
//! globals so tests can substitute platform variants without process restart.

mod builder;
mod core;
mod package;
mod platform;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::{Settings, TOKENIZER_DATA_DIR};
pub use package::PackageSettings;
pub use platform::Platform;

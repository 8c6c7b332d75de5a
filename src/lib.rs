//! Release packager and publish pipeline for the AmiyaBot QQ chatbot.
//!
//! This library provides the release pipeline for producing distributable
//! archives of the application:
//! - Freshness gating against a remote "latest version" marker
//! - Bundle assembly (executable, configuration, framework assets, data
//!   dictionaries)
//! - Native bundler toolchain invocation with checked exit statuses
//! - Deterministic archive creation and optional publication to object
//!   storage
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};

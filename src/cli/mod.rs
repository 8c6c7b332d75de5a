//! Command line interface for the release packager.

mod args;

pub use args::Args;

use crate::error::Result;
use crate::packager::{BuildOptions, BuildOutcome, Packager, SettingsBuilder};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    let project_root = std::env::current_dir()?;
    let settings = SettingsBuilder::new().project_root(project_root).build();
    let packager = Packager::new(settings);

    let outcome = packager
        .build(&BuildOptions {
            version: args.version,
            force: args.force,
            upload: args.upload,
        })
        .await?;

    match outcome {
        BuildOutcome::UpToDate { version } => {
            println!("not new release ({version}).");
        }
        BuildOutcome::Built(artifact) => {
            println!(
                "built {} ({} bytes, sha256 {})",
                artifact.archive_path.display(),
                artifact.size,
                artifact.checksum
            );
            if artifact.uploaded {
                println!("published {}", artifact.version);
            }
        }
    }

    Ok(0)
}

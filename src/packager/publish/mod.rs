//! Artifact publication to object storage.
//!
//! Publishing a release uploads the built archive under a platform-namespaced
//! key and overwrites the remote "latest version" marker with the contents of
//! the local release-tracking file.

mod cos;

pub use cos::CosUploader;

use crate::packager::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Object storage upload client.
///
/// The collaborator interface the pipeline publishes through; substitutable
/// in tests.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Uploads a local file under the given remote key.
    async fn upload_file(&self, local_path: &Path, remote_key: &str) -> Result<()>;
}

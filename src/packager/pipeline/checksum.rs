//! Artifact checksum calculation.

use crate::packager::error::{ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates the SHA-256 checksum of an artifact file.
///
/// Reads the file in 8KB chunks to handle large archives efficiently.
///
/// # Returns
///
/// Hex-encoded SHA-256 hash (64 characters).
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening artifact for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading artifact for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_file_hashes_to_known_value() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("empty.zip");
        tokio::fs::write(&path, b"").await.expect("write");

        let checksum = calculate_sha256(&path).await.expect("hash");
        assert_eq!(
            checksum,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[tokio::test]
    async fn checksum_changes_with_content() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let a = tmp.path().join("a.zip");
        let b = tmp.path().join("b.zip");
        tokio::fs::write(&a, b"first").await.expect("write");
        tokio::fs::write(&b, b"second").await.expect("write");

        let hash_a = calculate_sha256(&a).await.expect("hash");
        let hash_b = calculate_sha256(&b).await.expect("hash");
        assert_ne!(hash_a, hash_b);
        assert_eq!(hash_a.len(), 64);
    }
}

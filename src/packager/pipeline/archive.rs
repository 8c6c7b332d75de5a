//! Release archive creation.
//!
//! Walks the populated distribution directory and writes every file into the
//! release zip, using the path relative to the distribution root as the entry
//! name. Entry order is deterministic (sorted walk).

use crate::packager::error::{Error, ErrorExt, Result};
use std::path::Path;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Creates the release archive from the distribution directory.
///
/// Every regular file below `dist_dir` is written to `archive_path` with its
/// dist-relative path (with `/` separators) as the entry name.
pub async fn create_archive(dist_dir: &Path, archive_path: &Path) -> Result<()> {
    let dist = dist_dir.to_path_buf();
    let archive = archive_path.to_path_buf();

    // Zip writing is blocking work, keep it off the async workers
    tokio::task::spawn_blocking(move || -> Result<()> {
        let file = std::fs::File::create(&archive).fs_context("creating archive", &archive)?;
        let mut writer = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        // Sort by path for deterministic entry ordering
        let mut entries: Vec<_> = walkdir::WalkDir::new(&dist)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .collect();
        entries.sort_by_key(|e| e.path().to_path_buf());

        for entry in entries {
            let rel_path = entry
                .path()
                .strip_prefix(&dist)
                .map_err(|e| Error::GenericError(e.to_string()))?;
            let name = rel_path
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            writer.start_file(name, options)?;
            let mut source = std::fs::File::open(entry.path())
                .fs_context("opening file for archiving", entry.path())?;
            std::io::copy(&mut source, &mut writer)
                .fs_context("writing archive entry", entry.path())?;
        }

        writer.finish()?;
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Archive task panicked: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[tokio::test]
    async fn archive_entries_mirror_the_distribution_tree() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dist = tmp.path().join("dist");
        tokio::fs::create_dir_all(dist.join("dictionary"))
            .await
            .expect("mkdir");
        tokio::fs::create_dir_all(dist.join("config"))
            .await
            .expect("mkdir");
        tokio::fs::write(dist.join("config/server.yaml"), b"host: 0.0.0.0")
            .await
            .expect("write");
        tokio::fs::write(dist.join("dictionary/idf.zip"), b"idf")
            .await
            .expect("write");

        let archive = tmp.path().join("release.zip");
        create_archive(&dist, &archive).await.expect("archive");

        let file = std::fs::File::open(&archive).expect("open");
        let mut pack = zip::ZipArchive::new(file).expect("read archive");
        let names: BTreeSet<String> = (0..pack.len())
            .map(|i| pack.by_index(i).expect("entry").name().to_string())
            .collect();

        let expected: BTreeSet<String> =
            ["config/server.yaml".to_string(), "dictionary/idf.zip".to_string()]
                .into_iter()
                .collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn empty_directories_produce_no_entries() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dist = tmp.path().join("dist");
        tokio::fs::create_dir_all(dist.join("empty"))
            .await
            .expect("mkdir");

        let archive = tmp.path().join("release.zip");
        create_archive(&dist, &archive).await.expect("archive");

        let file = std::fs::File::open(&archive).expect("open");
        let pack = zip::ZipArchive::new(file).expect("read archive");
        assert_eq!(pack.len(), 0);
    }
}

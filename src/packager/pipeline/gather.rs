//! Bundle input gathering.
//!
//! Copies everything the distributable needs into the scratch tree: the
//! tokenizer base dictionary, the application configuration, the bot
//! framework's bundled assets and the fixed set of NLP data archives.
//! Every copy is verbatim; a missing source is a hard failure.

use crate::packager::error::Result;
use crate::packager::settings::Settings;
use crate::packager::utils::fs::{copy_dir, copy_file, create_dir_all};

/// Bundle manifest: the NLP data archives every release must ship.
///
/// Each name must exist in the source dependency's dictionary directory at
/// build time.
pub const DICTIONARY_ARCHIVES: [&str; 14] = [
    "china_location.zip",
    "chinese_char_dictionary.zip",
    "chinese_idiom.zip",
    "chinese_word_dictionary.zip",
    "idf.zip",
    "pinyin_phrase.zip",
    "sentiment_words.zip",
    "char_distribution.zip",
    "word_distribution.zip",
    "word_topic_weight.zip",
    "topic_word_weight.zip",
    "phone_location.zip",
    "xiehouyu.zip",
    "pornography.zip",
];

/// Copies all bundle inputs into the scratch tree.
///
/// Expects the distribution and tokenizer scratch directories to exist (the
/// pipeline recreates them beforehand).
pub async fn gather(settings: &Settings) -> Result<()> {
    let dist = settings.dist_dir();
    let site_packages = settings.site_packages();

    // Tokenizer base dictionary, bundled into the executable as extra data
    let dict_source = site_packages.join("jieba/dict.txt");
    log::info!("moving {}", dict_source.display());
    copy_file(&dict_source, &settings.tokenizer_dir().join("dict.txt")).await?;

    // Application configuration, shipped next to the executable
    let config_source = settings.config_dir();
    log::info!("moving {}", config_source.display());
    copy_dir(&config_source, &dist.join("config")).await?;

    // Assets shipped by the bot framework dependency
    let assets_source = site_packages.join("amiyabot/_assets");
    log::info!("moving {}", assets_source.display());
    copy_dir(&assets_source, &dist.join("_assets")).await?;

    // NLP data archives, into a dictionary subfolder created on first use
    let dictionary_dir = dist.join("dictionary");
    for item in DICTIONARY_ARCHIVES {
        if !dictionary_dir.exists() {
            create_dir_all(&dictionary_dir, false).await?;
        }
        let source = site_packages.join("jionlp/dictionary").join(item);
        log::info!("moving {}", source.display());
        copy_file(&source, &dictionary_dir.join(item)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::settings::{Platform, SettingsBuilder};

    async fn seed_sources(root: &std::path::Path, platform: Platform) {
        let site_packages = root.join(platform.site_packages());
        tokio::fs::create_dir_all(site_packages.join("jieba"))
            .await
            .expect("mkdir");
        tokio::fs::write(site_packages.join("jieba/dict.txt"), b"dict")
            .await
            .expect("write");
        tokio::fs::create_dir_all(site_packages.join("amiyabot/_assets/face"))
            .await
            .expect("mkdir");
        tokio::fs::write(site_packages.join("amiyabot/_assets/face/amiya.png"), b"png")
            .await
            .expect("write");
        let dictionary = site_packages.join("jionlp/dictionary");
        tokio::fs::create_dir_all(&dictionary).await.expect("mkdir");
        for item in DICTIONARY_ARCHIVES {
            tokio::fs::write(dictionary.join(item), b"zip").await.expect("write");
        }
        tokio::fs::create_dir_all(root.join("config")).await.expect("mkdir");
        tokio::fs::write(root.join("config/talking.yaml"), b"call: []")
            .await
            .expect("write");
    }

    #[tokio::test]
    async fn gather_populates_the_scratch_tree() {
        let tmp = tempfile::tempdir().expect("tempdir");
        seed_sources(tmp.path(), Platform::Linux).await;

        let settings = SettingsBuilder::new()
            .platform(Platform::Linux)
            .project_root(tmp.path())
            .build();
        create_dir_all(&settings.dist_dir(), true).await.expect("dist");
        create_dir_all(&settings.tokenizer_dir(), true)
            .await
            .expect("tokenizer");

        gather(&settings).await.expect("gather");

        assert!(settings.tokenizer_dir().join("dict.txt").is_file());
        assert!(settings.dist_dir().join("config/talking.yaml").is_file());
        assert!(settings.dist_dir().join("_assets/face/amiya.png").is_file());
        for item in DICTIONARY_ARCHIVES {
            assert!(settings.dist_dir().join("dictionary").join(item).is_file());
        }
    }

    #[tokio::test]
    async fn missing_dictionary_archive_is_fatal() {
        let tmp = tempfile::tempdir().expect("tempdir");
        seed_sources(tmp.path(), Platform::Linux).await;

        let settings = SettingsBuilder::new()
            .platform(Platform::Linux)
            .project_root(tmp.path())
            .build();
        tokio::fs::remove_file(
            settings
                .site_packages()
                .join("jionlp/dictionary/xiehouyu.zip"),
        )
        .await
        .expect("remove");

        create_dir_all(&settings.dist_dir(), true).await.expect("dist");
        create_dir_all(&settings.tokenizer_dir(), true)
            .await
            .expect("tokenizer");

        assert!(gather(&settings).await.is_err());
    }
}

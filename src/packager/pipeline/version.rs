//! Version string parsing and version descriptor generation.
//!
//! Generates the version resource descriptor consumed by the native bundler
//! on Windows, rendered from a template with the numeric file version parsed
//! out of the release's semantic version string.

use crate::packager::error::{Error, Result};
use crate::packager::settings::{PackageSettings, Settings};
use handlebars::Handlebars;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Fixed pattern the release version string must carry.
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"v(\d+)\.(\d+)\.(\d+)").expect("version pattern is valid")
});

/// Version descriptor template for the native bundler's `--version-file` input.
const VERSION_DESCRIPTOR_TEMPLATE: &str = r#"# UTF-8
VSVersionInfo(
    ffi=FixedFileInfo(
        filevers=({{file_ver}}, 0),
        mask=0x3f,
        flags=0x0,
        OS=0x4,
        fileType=0x1,
        subtype=0x0,
        date=(0, 0)
    ),
    kids=[
        StringFileInfo(
            [
                StringTable(
                    u'040904B0',
                    [
                        StringStruct(u'CompanyName', u'{{company}}'),
                        StringStruct(u'ProductName', u'{{display_name}}'),
                        StringStruct(u'ProductVersion', u'{{file_version}}'),
                        StringStruct(u'FileDescription', u'{{description}}'),
                        StringStruct(u'FileVersion', u'{{file_version}}'),
                        StringStruct(u'OriginalFilename', u'{{original_filename}}'),
                        StringStruct(u'LegalCopyright', u'{{copyright}}'),
                    ]
                )
            ]
        ),
        VarFileInfo([VarStruct(u'Translation', [2052, 1200])])
    ]
)
"#;

/// Parses the three numeric components out of a `v<major>.<minor>.<patch>` string.
///
/// # Errors
///
/// Returns [`Error::MalformedVersion`] if the string does not match the
/// fixed pattern.
pub fn parse_version(version: &str) -> Result<(u32, u32, u32)> {
    let captures = VERSION_PATTERN
        .captures(version)
        .ok_or_else(|| Error::MalformedVersion(version.to_string()))?;

    let component = |index: usize| -> Result<u32> {
        captures[index]
            .parse::<u32>()
            .map_err(|_| Error::MalformedVersion(version.to_string()))
    };

    Ok((component(1)?, component(2)?, component(3)?))
}

/// Renders the version descriptor for a release.
pub fn render_version_descriptor(package: &PackageSettings, version: &str) -> Result<String> {
    let (major, minor, patch) = parse_version(version)?;

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let mut data = BTreeMap::new();
    data.insert("file_ver", format!("{major}, {minor}, {patch}"));
    data.insert("file_version", version.to_string());
    data.insert("company", package.company.clone());
    data.insert("display_name", package.display_name.clone());
    data.insert("description", package.description.clone());
    data.insert("original_filename", package.original_filename.clone());
    data.insert("copyright", package.copyright.clone());

    handlebars
        .register_template_string("version.txt", VERSION_DESCRIPTOR_TEMPLATE)
        .map_err(|e| Error::Template(format!("failed to register version template: {e}")))?;

    handlebars
        .render("version.txt", &data)
        .map_err(|e| Error::Template(format!("failed to render version template: {e}")))
}

/// Renders and writes the version descriptor into the scratch directory.
///
/// The descriptor is transient build input; the pipeline removes it after
/// the archive is produced.
pub async fn write_version_descriptor(settings: &Settings, version: &str) -> Result<()> {
    use crate::packager::error::ErrorExt;

    let descriptor = render_version_descriptor(settings.package_settings(), version)?;
    let path = settings.version_file();
    tokio::fs::write(&path, descriptor)
        .await
        .fs_context("writing version descriptor", &path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_version() {
        assert_eq!(parse_version("v1.2.3").expect("parse"), (1, 2, 3));
        assert_eq!(parse_version("v6.0.12").expect("parse"), (6, 0, 12));
    }

    #[test]
    fn rejects_version_without_prefix() {
        assert!(matches!(
            parse_version("1.2.3"),
            Err(Error::MalformedVersion(_))
        ));
    }

    #[test]
    fn rejects_incomplete_version() {
        assert!(parse_version("v1.2").is_err());
        assert!(parse_version("release").is_err());
    }

    #[test]
    fn descriptor_carries_numeric_file_version() {
        let package = PackageSettings::default();
        let descriptor = render_version_descriptor(&package, "v1.2.3").expect("render");

        assert!(descriptor.contains("filevers=(1, 2, 3, 0)"));
        assert!(descriptor.contains("StringStruct(u'ProductVersion', u'v1.2.3')"));
        assert!(descriptor.contains("StringStruct(u'CompanyName', u'AmiyaBot')"));
        assert!(descriptor.contains("StringStruct(u'OriginalFilename', u'AmiyaBot.exe')"));
    }
}

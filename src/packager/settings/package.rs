//! Product metadata and configuration.

/// Product metadata stamped into release artifacts.
///
/// Contains the product information used for archive naming and for the
/// version descriptor consumed by the native bundler on Windows.
///
/// # Examples
///
/// ```no_run
/// use amiya_packager::packager::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "AmiyaBot".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct PackageSettings {
    /// Product name used in artifact file names.
    pub product_name: String,

    /// Human-readable product name shown in the executable's version resource.
    pub display_name: String,

    /// Brief description of the application.
    pub description: String,

    /// Company name shown in the executable's version resource.
    pub company: String,

    /// Copyright line shown in the executable's version resource.
    pub copyright: String,

    /// Original file name recorded in the executable's version resource.
    pub original_filename: String,

    /// Homepage URL for the application.
    pub homepage: String,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            product_name: "AmiyaBot".into(),
            display_name: "《明日方舟》QQ机器人".into(),
            description: "《明日方舟》QQ机器人，https://www.amiyabot.com".into(),
            company: "AmiyaBot".into(),
            copyright: "Github AmiyaBot 组织版权所有".into(),
            original_filename: "AmiyaBot.exe".into(),
            homepage: "https://www.amiyabot.com".into(),
        }
    }
}

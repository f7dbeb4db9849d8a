//! Loading and saving `docs.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::SiteConfig;
use crate::validate::{Diagnostics, Severity};

/// Default config file name.
pub const CONFIG_FILE: &str = "docs.toml";

/// Configuration file structure (docs.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    pub site: SiteConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

/// `[content]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Directory holding documentation pages, relative to the project root
    pub dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("src/content/docs"),
        }
    }
}

/// `[check]` section: how strictly content problems are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Pages no sidebar entry points at
    pub orphan_pages: Level,
    /// Links inside pages that resolve to no page
    pub internal_links: Level,
    /// Sidebar entries pointing at draft pages
    pub drafts: Level,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            orphan_pages: Level::Warn,
            internal_links: Level::Warn,
            drafts: Level::Warn,
        }
    }
}

/// Reporting level for an optional check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    #[default]
    Warn,
    Ignore,
}

impl Level {
    /// Severity to report at, or `None` when the check is disabled.
    pub fn severity(self) -> Option<Severity> {
        match self {
            Level::Error => Some(Severity::Error),
            Level::Warn => Some(Severity::Warning),
            Level::Ignore => None,
        }
    }
}

/// Errors that can occur when loading or writing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {0}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("{0}")]
    Validation(Diagnostics),
}

impl DocsConfig {
    /// Wrap a site configuration with default `[content]` and `[check]` sections.
    pub fn new(site: SiteConfig) -> Self {
        Self {
            site,
            content: ContentConfig::default(),
            check: CheckConfig::default(),
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        source.parse()
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::parse(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Run structural validation on the site section.
    pub fn validate(&self) -> Diagnostics {
        crate::validate::validate(&self.site)
    }
}

impl FromStr for DocsConfig {
    type Err = ConfigError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(source)?)
    }
}

impl SiteConfig {
    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SidebarGroup, SocialLink};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const PGXCLI: &str = r#"
[site]
title = "pgxcli"
base_url = "/pgxcli"
stylesheets = ["./src/styles/custom.css"]

[[site.social]]
label = "GitHub"
href = "https://github.com/balaji01-4d/pgxcli"
icon = "github"

[[site.sidebar]]
label = "Introduction"
items = [{ label = "Getting Started", slug = "guides/getting-started" }]

[[site.sidebar]]
label = "Reference"

[[site.sidebar.items]]
label = "CLI Reference"
slug = "reference/cli-reference"

[check]
orphan_pages = "ignore"
"#;

    fn pgxcli_site() -> SiteConfig {
        let mut site = SiteConfig::new("pgxcli");
        site.base_url = Some("/pgxcli".to_string());
        site.stylesheets = vec!["./src/styles/custom.css".to_string()];
        site.social = vec![SocialLink::new(
            "GitHub",
            "https://github.com/balaji01-4d/pgxcli",
            "github",
        )];
        site.sidebar = vec![
            SidebarGroup::new("Introduction").item("Getting Started", "guides/getting-started"),
            SidebarGroup::new("Reference").item("CLI Reference", "reference/cli-reference"),
        ];
        site
    }

    #[test]
    fn parses_full_config() {
        let config = DocsConfig::parse(PGXCLI).unwrap();

        assert_eq!(config.site, pgxcli_site());
        assert_eq!(config.content, ContentConfig::default());
        assert_eq!(config.check.orphan_pages, Level::Ignore);
        assert_eq!(config.check.internal_links, Level::Warn);
    }

    #[test]
    fn optional_fields_default() {
        let config = DocsConfig::parse("[site]\ntitle = \"pgxcli\"\n").unwrap();

        assert_eq!(config.site.base_url, None);
        assert!(config.site.stylesheets.is_empty());
        assert!(config.site.social.is_empty());
        assert!(config.site.sidebar.is_empty());
        assert_eq!(config.content.dir, PathBuf::from("src/content/docs"));
    }

    #[test]
    fn parses_through_from_str() {
        let config: DocsConfig = "[site]\ntitle = \"pgxcli\"\n\n[check]\ndrafts = \"error\"\n"
            .parse()
            .unwrap();

        assert_eq!(config.site.title, "pgxcli");
        assert_eq!(config.check.drafts, Level::Error);
        assert!(matches!(
            "[site]\n".parse::<DocsConfig>(),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn rejects_missing_title() {
        let result = DocsConfig::parse("[site]\nbase_url = \"/\"\n");

        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = DocsConfig::parse("[site]\ntitle = \"x\"\ntitel = \"typo\"\n");

        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = DocsConfig::parse(PGXCLI).unwrap();

        let text = config.to_toml_string().unwrap();
        let reparsed = DocsConfig::parse(&text).unwrap();

        assert_eq!(reparsed, config);
    }

    #[test]
    fn site_round_trips_through_json() {
        let site = pgxcli_site();

        let json = site.to_json_string().unwrap();
        let reparsed: SiteConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(reparsed, site);
    }

    #[test]
    fn load_reports_missing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("docs.toml");

        let result = DocsConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::Io(p, _)) if p == path));
    }

    #[test]
    fn loads_from_disk() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, PGXCLI).unwrap();

        let config = DocsConfig::load(&path).unwrap();

        assert_eq!(config.site.title, "pgxcli");
    }
}

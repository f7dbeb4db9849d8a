//! Site configuration data model.

use serde::{Deserialize, Serialize};

/// Documentation site configuration handed to the site generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title
    pub title: String,

    /// Base URL or path the site is deployed under (e.g. "/pgxcli")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Custom stylesheets, relative to the project root
    #[serde(default)]
    pub stylesheets: Vec<String>,

    /// Social links shown in the site header
    #[serde(default)]
    pub social: Vec<SocialLink>,

    /// Sidebar navigation groups
    #[serde(default)]
    pub sidebar: Vec<SidebarGroup>,
}

/// A link to an external profile or repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
    /// Icon identifier understood by the generator (e.g. "github")
    pub icon: String,
}

/// A labelled group of sidebar entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarGroup {
    pub label: String,
    #[serde(default)]
    pub items: Vec<SidebarItem>,
}

/// A sidebar entry pointing at a documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarItem {
    pub label: String,
    /// Page path relative to the content directory, without extension
    pub slug: String,
}

impl SiteConfig {
    /// Create an empty configuration with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            base_url: None,
            stylesheets: Vec::new(),
            social: Vec::new(),
            sidebar: Vec::new(),
        }
    }

    /// Find a sidebar group by label.
    pub fn group(&self, label: &str) -> Option<&SidebarGroup> {
        self.sidebar.iter().find(|g| g.label == label)
    }

    /// Iterate over every sidebar entry with its group, in declaration order.
    pub fn items(&self) -> impl Iterator<Item = (&SidebarGroup, &SidebarItem)> {
        self.sidebar
            .iter()
            .flat_map(|group| group.items.iter().map(move |item| (group, item)))
    }

    /// Iterate over every sidebar slug in declaration order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.items().map(|(_, item)| item.slug.as_str())
    }

    /// Base path with surrounding slashes, e.g. "/pgxcli/". Defaults to "/".
    ///
    /// Absolute URLs contribute only their path component.
    pub fn base_path(&self) -> String {
        let raw = self.base_url.as_deref().unwrap_or("/");
        let path = match url::Url::parse(raw) {
            Ok(parsed) if parsed.has_host() => parsed.path().to_string(),
            _ => raw.to_string(),
        };

        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        }
    }
}

impl SidebarGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            items: Vec::new(),
        }
    }

    /// Append an entry, builder style.
    pub fn item(mut self, label: impl Into<String>, slug: impl Into<String>) -> Self {
        self.items.push(SidebarItem::new(label, slug));
        self
    }
}

impl SidebarItem {
    pub fn new(label: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            slug: slug.into(),
        }
    }
}

impl SocialLink {
    pub fn new(
        label: impl Into<String>,
        href: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            icon: icon.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SiteConfig {
        let mut config = SiteConfig::new("pgxcli");
        config.sidebar = vec![
            SidebarGroup::new("Introduction").item("Getting Started", "guides/getting-started"),
            SidebarGroup::new("Reference")
                .item("CLI Reference", "reference/cli-reference")
                .item("Configuration", "reference/configuration"),
        ];
        config
    }

    #[test]
    fn finds_group_by_label() {
        let config = sample();

        let group = config.group("Reference").unwrap();
        assert_eq!(group.items.len(), 2);
        assert!(config.group("Missing").is_none());
    }

    #[test]
    fn iterates_slugs_in_declaration_order() {
        let config = sample();

        let slugs: Vec<_> = config.slugs().collect();
        assert_eq!(
            slugs,
            vec![
                "guides/getting-started",
                "reference/cli-reference",
                "reference/configuration"
            ]
        );
    }

    #[test]
    fn items_carry_their_group() {
        let config = sample();

        let (group, item) = config.items().nth(1).unwrap();
        assert_eq!(group.label, "Reference");
        assert_eq!(item.label, "CLI Reference");
    }

    #[test]
    fn normalizes_base_path() {
        let mut config = SiteConfig::new("pgxcli");
        assert_eq!(config.base_path(), "/");

        config.base_url = Some("/pgxcli".to_string());
        assert_eq!(config.base_path(), "/pgxcli/");

        config.base_url = Some("docs/".to_string());
        assert_eq!(config.base_path(), "/docs/");

        config.base_url = Some("https://example.github.io/pgxcli".to_string());
        assert_eq!(config.base_path(), "/pgxcli/");
    }
}

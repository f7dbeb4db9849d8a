//! Frontmatter extraction and parsing.

use serde::Deserialize;

/// Parsed frontmatter from a documentation page.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Page title (required)
    pub title: String,

    /// Page description for SEO
    #[serde(default)]
    pub description: Option<String>,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,

    /// Draft pages are excluded from production builds
    #[serde(default)]
    pub draft: bool,

    /// Sidebar presentation hints
    #[serde(default)]
    pub sidebar: SidebarMeta,
}

/// The `sidebar:` block of a page's frontmatter.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SidebarMeta {
    /// Label override
    #[serde(default)]
    pub label: Option<String>,

    /// Order in autogenerated groups (lower = first)
    #[serde(default)]
    pub order: Option<i32>,

    /// Page is intentionally left out of the sidebar
    #[serde(default)]
    pub hidden: bool,
}

/// Extract frontmatter from page content.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    let Some(after_open) = trimmed.strip_prefix("---") else {
        return Ok((None, source));
    };

    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: Frontmatter = serde_yaml::from_str(yaml_content)
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}

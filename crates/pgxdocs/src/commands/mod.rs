//! CLI subcommands and the project state they share.

pub mod check;
pub mod export;
pub mod init;
pub mod sidebar;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pgxdocs_config::{Diagnostics, DocsConfig, Severity};
use pgxdocs_content::{check_stylesheets, resolve, PageIndex};

/// A loaded docs.toml and the directory it lives in.
pub struct Project {
    pub root: PathBuf,
    pub config: DocsConfig,
}

impl Project {
    /// Load the project described by a config file.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config = DocsConfig::load(config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;

        Ok(Self {
            root: project_root(config_path),
            config,
        })
    }

    /// Location of the content directory.
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.config.content.dir)
    }

    /// Scan the content directory.
    pub fn scan(&self) -> Result<PageIndex> {
        let dir = self.content_dir();
        PageIndex::scan(&dir).with_context(|| format!("Failed to scan {}", dir.display()))
    }

    /// Structural validation only.
    pub fn validate(&self) -> Diagnostics {
        self.config.validate()
    }

    /// Full check: structure, stylesheets, pages and slug resolution.
    pub fn diagnose(&self) -> Result<(PageIndex, Diagnostics)> {
        let mut diag = self.validate();
        diag.extend(check_stylesheets(&self.config.site, &self.root));

        let index = self.scan()?;
        diag.extend(index.problems().clone());
        diag.extend(resolve(&self.config.site, &index, &self.config.check));

        Ok((index, diag))
    }
}

fn project_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Log every diagnostic at its severity.
pub fn report(diag: &Diagnostics) {
    for item in diag.iter() {
        match item.severity {
            Severity::Error => tracing::error!("{}", item),
            Severity::Warning => tracing::warn!("{}", item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    pub(crate) fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn root_defaults_to_current_directory() {
        assert_eq!(project_root(Path::new("docs.toml")), PathBuf::from("."));
        assert_eq!(
            project_root(Path::new("site/docs.toml")),
            PathBuf::from("site")
        );
    }

    #[test]
    fn diagnoses_project() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(
            root,
            "docs.toml",
            r#"
[site]
title = "pgxcli"
stylesheets = ["./missing.css"]

[[site.sidebar]]
label = "Introduction"
items = [
  { label = "Getting Started", slug = "guides/getting-started" },
  { label = "Install", slug = "guides/install" },
]
"#,
        );
        write(
            root,
            "src/content/docs/guides/getting-started.md",
            "---\ntitle: Getting Started\n---\n",
        );

        let project = Project::load(&root.join("docs.toml")).unwrap();
        let (index, diag) = project.diagnose().unwrap();

        assert_eq!(index.len(), 1);
        let fields: Vec<_> = diag.errors().map(|d| d.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["site.stylesheets[0]", "site.sidebar[0].items[1].slug"]
        );
    }

    #[test]
    fn missing_content_dir_is_an_error() {
        let temp = tempdir().unwrap();
        write(temp.path(), "docs.toml", "[site]\ntitle = \"pgxcli\"\n");

        let project = Project::load(&temp.path().join("docs.toml")).unwrap();

        assert!(project.diagnose().is_err());
    }
}

//! Documentation page discovery.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use pgxdocs_config::{Diagnostic, Diagnostics, Severity};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::frontmatter::{extract_frontmatter, Frontmatter};
use crate::links::extract_links;

/// File extensions recognised as documentation pages.
pub const PAGE_EXTENSIONS: &[&str] = &["md", "mdx"];

/// A documentation page found in the content directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Path relative to the content directory
    pub relative_path: PathBuf,

    /// Slug the page is served under
    pub slug: String,

    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Link destinations found in the body
    pub links: Vec<String>,
}

impl Page {
    /// Page title from frontmatter.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter.as_ref().map(|f| f.title.as_str())
    }

    pub fn is_draft(&self) -> bool {
        self.frontmatter.as_ref().is_some_and(|f| f.draft)
    }

    /// Page opted out of the sidebar.
    pub fn is_hidden(&self) -> bool {
        self.frontmatter.as_ref().is_some_and(|f| f.sidebar.hidden)
    }
}

/// Errors that prevent the content directory from being scanned at all.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Content directory not found: {0}")]
    NotFound(PathBuf),
}

/// All pages of the site, keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    pages: BTreeMap<String, Page>,
    problems: Diagnostics,
}

impl PageIndex {
    /// Scan a content directory for pages.
    ///
    /// Pages that cannot be read or parsed are recorded as problems rather
    /// than aborting the scan.
    pub fn scan(dir: &Path) -> Result<Self, ContentError> {
        if !dir.is_dir() {
            return Err(ContentError::NotFound(dir.to_path_buf()));
        }

        let mut index = Self::default();
        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    index.problems.push(walk_problem(dir, &e));
                    continue;
                }
            };
            let path = entry.path();

            if !entry.file_type().is_file() || !is_page(path) {
                continue;
            }

            paths.push(path.to_path_buf());
        }

        let parsed: Vec<Result<Page, Diagnostic>> =
            paths.par_iter().map(|path| load_page(dir, path)).collect();

        for result in parsed {
            match result {
                Ok(page) => index.insert(page),
                Err(problem) => index.problems.push(problem),
            }
        }

        tracing::debug!("Indexed {} pages from {}", index.len(), dir.display());

        Ok(index)
    }

    /// Add a page, recording a problem if its slug is already taken.
    pub fn insert(&mut self, page: Page) {
        if page.frontmatter.is_none() {
            self.problems.push(Diagnostic::new(
                Severity::Error,
                page.relative_path.display().to_string(),
                "page has no frontmatter title",
            ));
        }

        if let Some(existing) = self.pages.get(&page.slug) {
            self.problems.push(
                Diagnostic::new(
                    Severity::Error,
                    page.relative_path.display().to_string(),
                    format!(
                        "slug '{}' is already used by {}",
                        page.slug,
                        existing.relative_path.display()
                    ),
                )
                .with_hint("set a distinct `slug` in the frontmatter of one page"),
            );
            return;
        }

        self.pages.insert(page.slug.clone(), page);
    }

    pub fn get(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.pages.contains_key(slug)
    }

    /// Pages in slug order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Problems found while reading pages.
    pub fn problems(&self) -> &Diagnostics {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn is_page(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| PAGE_EXTENSIONS.contains(&ext))
}

fn walk_problem(root: &Path, error: &walkdir::Error) -> Diagnostic {
    let field = match error.path() {
        Some(path) => path.strip_prefix(root).unwrap_or(path).display().to_string(),
        None => root.display().to_string(),
    };
    Diagnostic::new(Severity::Error, field, error.to_string())
}

fn load_page(root: &Path, path: &Path) -> Result<Page, Diagnostic> {
    let relative_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    let field = relative_path.display().to_string();

    let source = fs::read_to_string(path)
        .map_err(|e| Diagnostic::new(Severity::Error, field.clone(), e.to_string()))?;

    let (frontmatter, body) = extract_frontmatter(&source)
        .map_err(|e| Diagnostic::new(Severity::Error, field.clone(), e.to_string()))?;

    let slug = match frontmatter.as_ref().and_then(|f| f.slug.as_deref()) {
        Some(custom) => custom.trim_matches('/').to_string(),
        None => slug_for_path(&relative_path),
    };

    Ok(Page {
        relative_path,
        slug,
        links: extract_links(body),
        frontmatter,
    })
}

/// Derive the slug for a page from its path relative to the content directory.
///
/// `guides/Getting Started.mdx` becomes `guides/getting-started`; an `index`
/// page takes its directory's slug, so the root index is the empty slug.
pub fn slug_for_path(relative: &Path) -> String {
    let mut segments: Vec<String> = relative
        .with_extension("")
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(slugify_segment(&part.to_string_lossy())),
            _ => None,
        })
        .collect();

    if segments.last().is_some_and(|last| last == "index") {
        segments.pop();
    }

    segments.join("/")
}

fn slugify_segment(segment: &str) -> String {
    segment
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

//! Structural validation of the site configuration.
//!
//! Problems are collected into [`Diagnostics`] rather than reported one at a
//! time, so a single run shows everything that needs fixing.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::load::ConfigError;
use crate::model::{SidebarGroup, SiteConfig, SocialLink};

static ICON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid icon pattern"));

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A single problem found in the configuration or content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Field path (e.g. "site.sidebar[0].items[1].slug") or page path
    pub field: String,
    pub message: String,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}] {}", self.severity, self.field, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {}", hint)?;
        }
        Ok(())
    }
}

/// Collected diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::new(Severity::Error, field, message));
    }

    pub fn error_with_hint(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(Diagnostic::new(Severity::Error, field, message).with_hint(hint));
    }

    pub fn warn(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::new(Severity::Warning, field, message));
    }

    /// Append every diagnostic from another report.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    /// Promote every warning to an error.
    pub fn promote_warnings(&mut self) {
        for item in &mut self.items {
            item.severity = Severity::Error;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fail if any error was collected. Warnings never fail.
    pub fn into_result(self) -> Result<Self, ConfigError> {
        if self.has_errors() {
            Err(ConfigError::Validation(self))
        } else {
            Ok(self)
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors().count();
        let warnings = self.warnings().count();
        writeln!(
            f,
            "config validation found {} error(s), {} warning(s):",
            errors, warnings
        )?;
        for item in &self.items {
            writeln!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// Validate the structure of a site configuration.
pub fn validate(site: &SiteConfig) -> Diagnostics {
    let mut diag = Diagnostics::new();

    if site.title.trim().is_empty() {
        diag.error("site.title", "title must not be empty");
    }

    if let Some(base) = &site.base_url {
        if !is_valid_base(base) {
            let message = format!("'{}' is neither an absolute path nor an http(s) URL", base);
            if base.contains(':') {
                diag.error("site.base_url", message);
            } else {
                diag.error_with_hint(
                    "site.base_url",
                    message,
                    format!("use \"/{}\"", base.trim_matches('/')),
                );
            }
        }
    }

    for (i, path) in site.stylesheets.iter().enumerate() {
        if path.trim().is_empty() {
            diag.error(format!("site.stylesheets[{}]", i), "stylesheet path must not be empty");
        }
    }

    validate_social(&site.social, &mut diag);
    validate_sidebar(&site.sidebar, &mut diag);

    diag
}

fn is_valid_base(base: &str) -> bool {
    if base.starts_with('/') {
        return !base.chars().any(char::is_whitespace);
    }
    matches!(url::Url::parse(base), Ok(u) if matches!(u.scheme(), "http" | "https"))
}

fn validate_social(links: &[SocialLink], diag: &mut Diagnostics) {
    let mut seen = HashSet::new();

    for (i, link) in links.iter().enumerate() {
        let field = format!("site.social[{}]", i);

        if link.label.trim().is_empty() {
            diag.error(format!("{}.label", field), "label must not be empty");
        } else if !seen.insert(link.label.trim()) {
            diag.warn(
                format!("{}.label", field),
                format!("social label '{}' is used more than once", link.label),
            );
        }

        if let Err(e) = url::Url::parse(&link.href) {
            diag.error(
                format!("{}.href", field),
                format!("'{}' is not a valid URL: {}", link.href, e),
            );
        }

        if link.icon.is_empty() {
            diag.error(format!("{}.icon", field), "icon must not be empty");
        } else if !ICON.is_match(&link.icon) {
            diag.error(
                format!("{}.icon", field),
                format!("'{}' is not a valid icon identifier", link.icon),
            );
        }
    }
}

fn validate_sidebar(groups: &[SidebarGroup], diag: &mut Diagnostics) {
    let mut labels: HashMap<&str, usize> = HashMap::new();
    let mut slugs: HashMap<&str, String> = HashMap::new();

    for (g, group) in groups.iter().enumerate() {
        let field = format!("site.sidebar[{}]", g);
        let label = group.label.trim();

        if label.is_empty() {
            diag.error(format!("{}.label", field), "group label must not be empty");
        } else if let Some(first) = labels.get(label) {
            diag.error(
                format!("{}.label", field),
                format!(
                    "group label '{}' duplicates site.sidebar[{}]",
                    group.label, first
                ),
            );
        } else {
            labels.insert(label, g);
        }

        if group.items.is_empty() {
            diag.warn(field.clone(), format!("group '{}' has no items", group.label));
        }

        for (i, item) in group.items.iter().enumerate() {
            let item_field = format!("{}.items[{}]", field, i);

            if item.label.trim().is_empty() {
                diag.error(format!("{}.label", item_field), "label must not be empty");
            }

            let slug_field = format!("{}.slug", item_field);
            match check_slug(&item.slug) {
                Err(problem) => diag.push(problem.into_diagnostic(slug_field, &item.slug)),
                Ok(()) => {
                    if let Some(first) = slugs.get(item.slug.as_str()) {
                        diag.warn(
                            slug_field,
                            format!("slug '{}' is already listed at {}", item.slug, first),
                        );
                    } else {
                        slugs.insert(&item.slug, slug_field);
                    }
                }
            }
        }
    }
}

/// Why a slug is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugProblem {
    Empty,
    LeadingSlash,
    TrailingSlash,
    EmptySegment,
    DotSegment,
    Whitespace,
    Extension,
}

impl SlugProblem {
    fn into_diagnostic(self, field: String, slug: &str) -> Diagnostic {
        let (message, hint) = match self {
            SlugProblem::Empty => ("slug must not be empty".to_string(), None),
            SlugProblem::LeadingSlash => (
                format!("slug '{}' must be relative", slug),
                Some(format!("use \"{}\"", slug.trim_start_matches('/'))),
            ),
            SlugProblem::TrailingSlash => (
                format!("slug '{}' ends with '/'", slug),
                Some(format!("use \"{}\"", slug.trim_end_matches('/'))),
            ),
            SlugProblem::EmptySegment => (format!("slug '{}' contains '//'", slug), None),
            SlugProblem::DotSegment => (
                format!("slug '{}' contains a '.' or '..' segment", slug),
                None,
            ),
            SlugProblem::Whitespace => (format!("slug '{}' contains whitespace", slug), None),
            SlugProblem::Extension => (
                format!("slug '{}' includes a file extension", slug),
                Some(format!("use \"{}\"", strip_page_extension(slug))),
            ),
        };

        let diagnostic = Diagnostic::new(Severity::Error, field, message);
        match hint {
            Some(hint) => diagnostic.with_hint(hint),
            None => diagnostic,
        }
    }
}

/// Check that a slug is a well-formed relative page path.
pub fn check_slug(slug: &str) -> Result<(), SlugProblem> {
    if slug.is_empty() {
        return Err(SlugProblem::Empty);
    }
    if slug.chars().any(char::is_whitespace) {
        return Err(SlugProblem::Whitespace);
    }
    if slug.starts_with('/') {
        return Err(SlugProblem::LeadingSlash);
    }
    if slug.ends_with('/') {
        return Err(SlugProblem::TrailingSlash);
    }
    for segment in slug.split('/') {
        match segment {
            "" => return Err(SlugProblem::EmptySegment),
            "." | ".." => return Err(SlugProblem::DotSegment),
            _ => {}
        }
    }
    if strip_page_extension(slug).len() != slug.len() {
        return Err(SlugProblem::Extension);
    }
    Ok(())
}

fn strip_page_extension(slug: &str) -> &str {
    slug.strip_suffix(".mdx")
        .or_else(|| slug.strip_suffix(".md"))
        .unwrap_or(slug)
}

//! Resolution of the sidebar and page links against the page index.

use std::collections::HashSet;
use std::path::Path;

use pgxdocs_config::{check_slug, CheckConfig, Diagnostic, Diagnostics, Severity, SiteConfig};

use crate::links::resolve_link;
use crate::pages::PageIndex;

/// Resolve every sidebar slug and internal link against the pages on disk.
pub fn resolve(site: &SiteConfig, index: &PageIndex, check: &CheckConfig) -> Diagnostics {
    let mut diag = Diagnostics::new();
    let mut referenced = HashSet::new();

    for (g, group) in site.sidebar.iter().enumerate() {
        for (i, item) in group.items.iter().enumerate() {
            // Malformed slugs are reported by structural validation.
            if check_slug(&item.slug).is_err() {
                continue;
            }

            let field = format!("site.sidebar[{}].items[{}].slug", g, i);
            referenced.insert(item.slug.as_str());

            match index.get(&item.slug) {
                Some(page) => {
                    if page.is_draft() {
                        if let Some(severity) = check.drafts.severity() {
                            diag.push(Diagnostic::new(
                                severity,
                                field,
                                format!(
                                    "'{}' points at draft page {}",
                                    item.label,
                                    page.relative_path.display()
                                ),
                            ));
                        }
                    }
                }
                None => {
                    let mut missing = Diagnostic::new(
                        Severity::Error,
                        field,
                        format!("no page found for slug '{}'", item.slug),
                    );
                    if let Some(candidate) = suggest(&item.slug, index) {
                        missing = missing.with_hint(format!("did you mean \"{}\"?", candidate));
                    }
                    diag.push(missing);
                }
            }
        }
    }

    if let Some(severity) = check.orphan_pages.severity() {
        for page in index.pages() {
            if page.slug.is_empty() || page.is_hidden() || referenced.contains(page.slug.as_str())
            {
                continue;
            }
            diag.push(
                Diagnostic::new(
                    severity,
                    page.relative_path.display().to_string(),
                    format!("page '{}' is not listed in the sidebar", page.slug),
                )
                .with_hint("add it to a sidebar group or set `sidebar.hidden: true`"),
            );
        }
    }

    if let Some(severity) = check.internal_links.severity() {
        let base = site.base_path();
        for page in index.pages() {
            for link in &page.links {
                let Some(target) = resolve_link(link, &page.slug, &base) else {
                    continue;
                };
                if !index.contains(&target) {
                    diag.push(Diagnostic::new(
                        severity,
                        page.relative_path.display().to_string(),
                        format!("link '{}' points at missing page '{}'", link, target),
                    ));
                }
            }
        }
    }

    diag
}

/// Check that configured stylesheets exist relative to the project root.
pub fn check_stylesheets(site: &SiteConfig, root: &Path) -> Diagnostics {
    let mut diag = Diagnostics::new();

    for (i, stylesheet) in site.stylesheets.iter().enumerate() {
        if stylesheet.trim().is_empty() {
            continue;
        }
        let path = root.join(stylesheet);
        if !path.is_file() {
            diag.error(
                format!("site.stylesheets[{}]", i),
                format!("stylesheet not found: {}", path.display()),
            );
        }
    }

    diag
}

/// Find an existing slug the author probably meant.
fn suggest<'a>(slug: &str, index: &'a PageIndex) -> Option<&'a str> {
    if let Some(trimmed) = slug.strip_suffix("/index").or_else(|| {
        if slug == "index" {
            Some("")
        } else {
            None
        }
    }) {
        if index.contains(trimmed) {
            return index.slugs().find(|s| *s == trimmed);
        }
    }

    index.slugs().find(|s| s.eq_ignore_ascii_case(slug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::{Frontmatter, SidebarMeta};
    use crate::pages::Page;
    use pgxdocs_config::{Level, SidebarGroup};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn page(slug: &str, links: &[&str]) -> Page {
        Page {
            relative_path: PathBuf::from(format!("{}.md", if slug.is_empty() { "index" } else { slug })),
            slug: slug.to_string(),
            frontmatter: Some(Frontmatter {
                title: slug.to_string(),
                ..Default::default()
            }),
            links: links.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn site() -> SiteConfig {
        let mut site = SiteConfig::new("pgxcli");
        site.sidebar = vec![
            SidebarGroup::new("Introduction").item("Getting Started", "guides/getting-started"),
            SidebarGroup::new("Reference").item("CLI Reference", "reference/cli-reference"),
        ];
        site
    }

    fn index(pages: Vec<Page>) -> PageIndex {
        let mut index = PageIndex::default();
        for page in pages {
            index.insert(page);
        }
        index
    }

    fn summary(diag: &Diagnostics) -> Vec<(Severity, String)> {
        diag.iter().map(|d| (d.severity, d.field.clone())).collect()
    }

    #[test]
    fn resolves_complete_site() {
        let index = index(vec![
            page("", &["/guides/getting-started/"]),
            page("guides/getting-started", &["../../reference/cli-reference/"]),
            page("reference/cli-reference", &["https://www.postgresql.org/docs/"]),
        ]);

        let diag = resolve(&site(), &index, &CheckConfig::default());

        assert!(diag.is_empty(), "unexpected diagnostics: {}", diag);
    }

    #[test]
    fn reports_missing_page_with_hint() {
        let index = index(vec![
            page("guides/getting-started", &[]),
            page("reference", &[]),
        ]);
        let mut site = site();
        site.sidebar[1].items[0].slug = "reference/index".to_string();

        let diag = resolve(&site, &index, &CheckConfig::default());

        let error = diag.errors().next().unwrap();
        assert_eq!(error.field, "site.sidebar[1].items[0].slug");
        assert_eq!(error.hint.as_deref(), Some("did you mean \"reference\"?"));
    }

    #[test]
    fn suggests_case_insensitive_match() {
        let index = index(vec![page("guides/getting-started", &[])]);

        assert_eq!(
            suggest("Guides/Getting-Started", &index),
            Some("guides/getting-started")
        );
        assert_eq!(suggest("guides/install", &index), None);
    }

    #[test]
    fn skips_malformed_slugs() {
        let index = index(vec![
            page("guides/getting-started", &[]),
            page("reference/cli-reference", &[]),
        ]);
        let mut site = site();
        site.sidebar[0].items.push(pgxdocs_config::SidebarItem::new("Bad", "/abs"));

        let diag = resolve(&site, &index, &CheckConfig::default());

        assert!(diag.is_empty());
    }

    #[test]
    fn reports_orphans_unless_hidden_or_ignored() {
        let mut hidden = page("internal/roadmap", &[]);
        if let Some(fm) = hidden.frontmatter.as_mut() {
            fm.sidebar = SidebarMeta {
                hidden: true,
                ..Default::default()
            };
        }
        let index = index(vec![
            page("", &[]),
            page("guides/getting-started", &[]),
            page("guides/troubleshooting", &[]),
            page("reference/cli-reference", &[]),
            hidden,
        ]);

        let diag = resolve(&site(), &index, &CheckConfig::default());
        assert_eq!(
            summary(&diag),
            vec![(Severity::Warning, "guides/troubleshooting.md".to_string())]
        );

        let check = CheckConfig {
            orphan_pages: Level::Ignore,
            ..Default::default()
        };
        assert!(resolve(&site(), &index, &check).is_empty());
    }

    #[test]
    fn reports_drafts_at_configured_level() {
        let mut draft = page("reference/cli-reference", &[]);
        if let Some(fm) = draft.frontmatter.as_mut() {
            fm.draft = true;
        }
        let index = index(vec![page("guides/getting-started", &[]), draft]);
        let check = CheckConfig {
            drafts: Level::Error,
            ..Default::default()
        };

        let diag = resolve(&site(), &index, &check);

        assert_eq!(
            summary(&diag),
            vec![(
                Severity::Error,
                "site.sidebar[1].items[0].slug".to_string()
            )]
        );
    }

    #[test]
    fn reports_broken_internal_links() {
        let index = index(vec![
            page(
                "guides/getting-started",
                &["/pgxcli/reference/cli-reference/", "/pgxcli/reference/missing/"],
            ),
            page("reference/cli-reference", &["../../guides/getting-started/#install"]),
        ]);
        let mut site = site();
        site.base_url = Some("/pgxcli".to_string());

        let diag = resolve(&site, &index, &CheckConfig::default());

        assert_eq!(diag.len(), 1);
        let warning = diag.warnings().next().unwrap();
        assert_eq!(warning.field, "guides/getting-started.md");
        assert!(warning.message.contains("reference/missing"));
    }

    #[test]
    fn checks_stylesheets_exist() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("src/styles")).unwrap();
        fs::write(temp.path().join("src/styles/custom.css"), "body {}").unwrap();
        let mut site = site();
        site.stylesheets = vec![
            "./src/styles/custom.css".to_string(),
            "./src/styles/missing.css".to_string(),
        ];

        let diag = check_stylesheets(&site, temp.path());

        assert_eq!(
            summary(&diag),
            vec![(Severity::Error, "site.stylesheets[1]".to_string())]
        );
    }
}

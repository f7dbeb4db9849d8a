//! Sidebar tree command.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use pgxdocs_config::SiteConfig;
use pgxdocs_content::PageIndex;

use crate::commands::Project;

/// Run the sidebar command.
pub async fn run(config_path: &Path) -> Result<()> {
    let project = Project::load(config_path)?;

    let index = match project.scan() {
        Ok(index) => Some(index),
        Err(e) => {
            tracing::warn!("{:#}", e);
            None
        }
    };

    print!("{}", render_tree(&project.config.site, index.as_ref()));

    Ok(())
}

/// Render the sidebar as an indented tree, marking each entry's page state
/// when an index is available.
pub fn render_tree(site: &SiteConfig, index: Option<&PageIndex>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} ({})", site.title, site.base_path());

    for group in &site.sidebar {
        let _ = writeln!(out, "{}", group.label);

        for item in &group.items {
            let state = match index.map(|i| i.get(&item.slug)) {
                None => "",
                Some(None) => "  [missing]",
                Some(Some(page)) if page.is_draft() => "  [draft]",
                Some(Some(_)) => "",
            };
            let _ = writeln!(out, "  {} -> {}{}", item.label, item.slug, state);
        }
    }

    out
}

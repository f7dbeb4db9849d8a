//! Scaffold the pgxcli documentation site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pgxdocs_config::DocsConfig;

use crate::commands::{report, Project};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing pgxcli docs...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    } else {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create project directory")?;
            }
        }
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    // Pages follow whatever config is on disk, which may predate this run.
    let project = Project::load(config_path)?;
    let diag = project.validate();
    report(&diag);
    diag.into_result()?;

    let content_dir = project.content_dir();
    fs::create_dir_all(&content_dir).context("Failed to create content directory")?;

    for (slug, title, body) in starter_pages(&project.config) {
        let file = if slug.is_empty() {
            "index.mdx".to_string()
        } else {
            format!("{}.md", slug)
        };
        let path = content_dir.join(&file);

        if path.exists() && !yes {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, format!("---\ntitle: {}\n---\n\n{}", title, body))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'pgxdocs check' to validate the sidebar.");

    Ok(())
}

/// The index page plus one page per sidebar entry: (slug, title, body).
fn starter_pages(config: &DocsConfig) -> Vec<(String, String, String)> {
    let mut pages = vec![(
        String::new(),
        yaml_string(&config.site.title),
        DEFAULT_INDEX.to_string(),
    )];

    for (_, item) in config.site.items() {
        if pages.iter().any(|(slug, _, _)| *slug == item.slug) {
            continue;
        }
        let body = match item.slug.as_str() {
            "guides/getting-started" => DEFAULT_GETTING_STARTED.to_string(),
            "reference/cli-reference" => DEFAULT_CLI_REFERENCE.to_string(),
            _ => format!("# {}\n", item.label),
        };
        pages.push((item.slug.clone(), yaml_string(&item.label), body));
    }

    pages
}

/// Quote a title when YAML would otherwise misread it.
fn yaml_string(value: &str) -> String {
    let plain = value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | '(' | ')'));
    if plain && !value.is_empty() {
        value.to_string()
    } else {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

const DEFAULT_CONFIG: &str = r#"# pgxcli documentation site

[site]
title = "pgxcli"
# base_url = "/pgxcli"
# stylesheets = ["./src/styles/custom.css"]

[[site.social]]
label = "GitHub"
href = "https://github.com/balaji01-4d/pgxcli"
icon = "github"

[[site.sidebar]]
label = "Introduction"
items = [
  { label = "Getting Started", slug = "guides/getting-started" },
]

[[site.sidebar]]
label = "Reference"
items = [
  { label = "CLI Reference", slug = "reference/cli-reference" },
]

[content]
# Directory holding documentation pages
dir = "src/content/docs"

[check]
# error | warn | ignore
orphan_pages = "warn"
internal_links = "warn"
drafts = "warn"
"#;

const DEFAULT_INDEX: &str = r#"# pgxcli

An interactive PostgreSQL command-line client for querying and managing databases.

- [Getting Started](/guides/getting-started/)
- [CLI Reference](/reference/cli-reference/)
"#;

const DEFAULT_GETTING_STARTED: &str = r#"# Getting Started

## Connecting

Pass the database and user as positional arguments:

```bash
pgxcli mydb myuser
```

or use flags:

```bash
pgxcli --host localhost --port 5432 --dbname mydb --user myuser
```

See the [CLI Reference](../../reference/cli-reference/) for every option.
"#;

const DEFAULT_CLI_REFERENCE: &str = r#"# CLI Reference

```
pgxcli [DBNAME] [USERNAME] [flags]
```

| Flag | Description |
|------|-------------|
| `-h, --host` | Host address of the PostgreSQL server |
| `-p, --port` | Port the server listens on (default 5432) |
| `-u, --username` / `-U, --user` | Username to connect as |
| `-d, --dbname` | Database name to connect to |
| `-W, --password` | Force a password prompt |
| `-w, --no-password` | Never prompt for a password |
| `--debug` | Enable verbose debug logging |

When `--dbname` is given, a single positional argument is taken as the user.
"#;

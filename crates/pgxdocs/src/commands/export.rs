//! Configuration export command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pgxdocs_config::{export, Format};

use crate::commands::{report, Project};

/// Run the export command.
pub async fn run(
    config_path: &Path,
    format: Format,
    output: Option<PathBuf>,
    skip_check: bool,
) -> Result<()> {
    let project = Project::load(config_path)?;

    let diag = if skip_check {
        project.validate()
    } else {
        project.diagnose()?.1
    };
    report(&diag);
    diag.into_result()?;

    let rendered = export(&project.config.site, format)?;

    match output {
        Some(path) => {
            let target = output_path(&path, format);
            if let Some(parent) = target.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
            }
            fs::write(&target, rendered)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            tracing::info!("Exported {} config to {}", format, target.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// A directory output receives the format's conventional file name.
fn output_path(path: &Path, format: Format) -> PathBuf {
    if path.is_dir() {
        path.join(format.file_name())
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::write;
    use tempfile::tempdir;

    const CONFIG: &str = r#"
[site]
title = "pgxcli"

[[site.social]]
label = "GitHub"
href = "https://github.com/balaji01-4d/pgxcli"
icon = "github"

[[site.sidebar]]
label = "Introduction"
items = [{ label = "Getting Started", slug = "guides/getting-started" }]
"#;

    #[test]
    fn directory_output_uses_format_file_name() {
        let temp = tempdir().unwrap();

        assert_eq!(
            output_path(temp.path(), Format::Starlight),
            temp.path().join("astro.config.mjs")
        );
        assert_eq!(
            output_path(&temp.path().join("out.json"), Format::Json),
            temp.path().join("out.json")
        );
    }

    #[tokio::test]
    async fn writes_starlight_config() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(root, "docs.toml", CONFIG);
        write(
            root,
            "src/content/docs/guides/getting-started.md",
            "---\ntitle: Getting Started\n---\n",
        );

        run(
            &root.join("docs.toml"),
            Format::Starlight,
            Some(root.to_path_buf()),
            false,
        )
        .await
        .unwrap();

        let written = fs::read_to_string(root.join("astro.config.mjs")).unwrap();
        assert!(written.contains("title: \"pgxcli\""));
        assert!(written.contains("slug: \"guides/getting-started\""));
    }

    #[tokio::test]
    async fn refuses_to_export_unresolved_sidebar() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write(root, "docs.toml", CONFIG);
        fs::create_dir_all(root.join("src/content/docs")).unwrap();
        let out = root.join("site.json");

        let result = run(&root.join("docs.toml"), Format::Json, Some(out.clone()), false).await;

        assert!(result.is_err());
        assert!(!out.exists());

        run(&root.join("docs.toml"), Format::Json, Some(out.clone()), true)
            .await
            .unwrap();
        assert!(out.exists());
    }
}

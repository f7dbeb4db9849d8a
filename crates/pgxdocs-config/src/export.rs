//! Export the site configuration in a form the site generator consumes.

use std::fmt;
use std::str::FromStr;

use minijinja::Environment;
use serde::Serialize;

use crate::load::ConfigError;
use crate::model::SiteConfig;

/// Output format for [`export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Toml,
    /// Astro Starlight `astro.config.mjs`
    Starlight,
}

impl Format {
    /// Conventional file name for this format.
    pub fn file_name(self) -> &'static str {
        match self {
            Format::Json => "site.json",
            Format::Toml => "site.toml",
            Format::Starlight => "astro.config.mjs",
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "starlight" | "astro" => Ok(Self::Starlight),
            other => Err(format!(
                "unknown format '{}' (expected json, toml or starlight)",
                other
            )),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("json"),
            Format::Toml => f.write_str("toml"),
            Format::Starlight => f.write_str("starlight"),
        }
    }
}

/// Render the configuration in the requested format.
pub fn export(site: &SiteConfig, format: Format) -> Result<String, ConfigError> {
    match format {
        Format::Json => site.to_json_string(),
        Format::Toml => site.to_toml_string(),
        Format::Starlight => render_starlight(site),
    }
}

/// Template context. Every string is pre-encoded as a JS string literal.
#[derive(Serialize)]
struct StarlightContext {
    site: Option<String>,
    base: Option<String>,
    title: String,
    custom_css: Vec<String>,
    social: Vec<StarlightSocial>,
    sidebar: Vec<StarlightGroup>,
}

#[derive(Serialize)]
struct StarlightSocial {
    label: String,
    href: String,
    icon: String,
}

#[derive(Serialize)]
struct StarlightGroup {
    label: String,
    items: Vec<StarlightItem>,
}

#[derive(Serialize)]
struct StarlightItem {
    label: String,
    slug: String,
}

fn js(value: &str) -> Result<String, ConfigError> {
    serde_json::to_string(value).map_err(|e| ConfigError::Serialize(e.to_string()))
}

fn render_starlight(site: &SiteConfig) -> Result<String, ConfigError> {
    let origin = site
        .base_url
        .as_deref()
        .and_then(|raw| url::Url::parse(raw).ok())
        .filter(|u| u.has_host())
        .map(|u| u.origin().ascii_serialization());

    let base_path = site.base_path();
    let base = match base_path.trim_end_matches('/') {
        "" => None,
        path => Some(js(path)?),
    };

    let context = StarlightContext {
        site: origin.as_deref().map(js).transpose()?,
        base,
        title: js(&site.title)?,
        custom_css: site
            .stylesheets
            .iter()
            .map(|s| js(s))
            .collect::<Result<_, _>>()?,
        social: site
            .social
            .iter()
            .map(|link| {
                Ok(StarlightSocial {
                    label: js(&link.label)?,
                    href: js(&link.href)?,
                    icon: js(&link.icon)?,
                })
            })
            .collect::<Result<_, ConfigError>>()?,
        sidebar: site
            .sidebar
            .iter()
            .map(|group| {
                Ok(StarlightGroup {
                    label: js(&group.label)?,
                    items: group
                        .items
                        .iter()
                        .map(|item| {
                            Ok(StarlightItem {
                                label: js(&item.label)?,
                                slug: js(&item.slug)?,
                            })
                        })
                        .collect::<Result<_, ConfigError>>()?,
                })
            })
            .collect::<Result<_, ConfigError>>()?,
    };

    let mut env = Environment::new();
    env.add_template("astro.config.mjs", STARLIGHT_TEMPLATE)
        .map_err(|e| ConfigError::Serialize(e.to_string()))?;

    let mut rendered = env
        .get_template("astro.config.mjs")
        .and_then(|tmpl| tmpl.render(&context))
        .map_err(|e| ConfigError::Serialize(e.to_string()))?;
    rendered.push('\n');

    Ok(rendered)
}

const STARLIGHT_TEMPLATE: &str = r#"// @ts-check
import { defineConfig } from 'astro/config';
import starlight from '@astrojs/starlight';

// https://astro.build/config
export default defineConfig({
{%- if site %}
	site: {{ site }},
{%- endif %}
{%- if base %}
	base: {{ base }},
{%- endif %}
	integrations: [
		starlight({
			title: {{ title }},
{%- if custom_css %}
			customCss: [{% for css in custom_css %}{{ css }}{% if not loop.last %}, {% endif %}{% endfor %}],
{%- endif %}
			social: [
{%- for link in social %}
				{
					label: {{ link.label }},
					href: {{ link.href }},
					icon: {{ link.icon }},
				},
{%- endfor %}
			],
			sidebar: [
{%- for group in sidebar %}
				{
					label: {{ group.label }},
					items: [
{%- for item in group.items %}
						{ label: {{ item.label }}, slug: {{ item.slug }} },
{%- endfor %}
					],
				},
{%- endfor %}
			],
		}),
	],
});"#;

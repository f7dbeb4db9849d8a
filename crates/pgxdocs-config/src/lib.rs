//! Documentation site configuration for pgxcli.
//!
//! This crate models the site configuration (title, base URL, stylesheets,
//! social links and sidebar navigation), loads it from `docs.toml`, validates
//! its structure, and exports it for the site generator.

pub mod export;
pub mod load;
pub mod model;
pub mod validate;

pub use export::{export, Format};
pub use load::{CheckConfig, ConfigError, ContentConfig, DocsConfig, Level, CONFIG_FILE};
pub use model::{SidebarGroup, SidebarItem, SiteConfig, SocialLink};
pub use validate::{check_slug, validate, Diagnostic, Diagnostics, Severity, SlugProblem};

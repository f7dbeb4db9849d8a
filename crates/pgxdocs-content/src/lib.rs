//! Documentation content for the pgxcli docs site.
//!
//! Discovers pages in the content directory, reads their frontmatter and
//! links, and resolves the sidebar configuration against them.

pub mod frontmatter;
pub mod links;
pub mod pages;
pub mod resolve;

pub use frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError, SidebarMeta};
pub use links::{extract_links, resolve_link};
pub use pages::{slug_for_path, ContentError, Page, PageIndex};
pub use resolve::{check_stylesheets, resolve};

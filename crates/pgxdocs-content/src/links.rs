//! Link extraction from page bodies.

use pulldown_cmark::{Event, Options, Parser, Tag};

/// Collect every link destination in a markdown body, in document order.
pub fn extract_links(body: &str) -> Vec<String> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    Parser::new_ext(body, options)
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. }) => Some(dest_url.to_string()),
            _ => None,
        })
        .collect()
}

/// Resolve a link destination to the slug of the page it targets.
///
/// `page_slug` is the slug of the page containing the link and `base` the
/// site base path ("/" or "/pgxcli/"). Returns `None` for links that leave
/// the site: external URLs, fragments on the same page, assets, and
/// absolute paths outside the base.
pub fn resolve_link(dest: &str, page_slug: &str, base: &str) -> Option<String> {
    let path = dest.split(['#', '?']).next().unwrap_or("");

    if path.is_empty() || path.starts_with("//") || has_scheme(path) {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    let relative = if let Some(absolute) = path.strip_prefix('/') {
        let base_inner = base.trim_matches('/');
        if base_inner.is_empty() {
            absolute
        } else {
            let rest = absolute.strip_prefix(base_inner)?;
            if !(rest.is_empty() || rest.starts_with('/')) {
                return None;
            }
            rest
        }
    } else {
        // Pages are served as directories, so relative links start from the page itself.
        segments.extend(page_slug.split('/').filter(|s| !s.is_empty()));
        path
    };

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.last().is_some_and(|last| is_asset(last)) {
        return None;
    }

    let slug = segments.join("/").to_lowercase();
    let slug = match slug.strip_suffix("index") {
        Some(rest) if rest.is_empty() || rest.ends_with('/') => rest.trim_end_matches('/'),
        _ => slug.as_str(),
    };

    Some(slug.to_string())
}

fn has_scheme(path: &str) -> bool {
    match path.find(':') {
        Some(pos) => path[..pos]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        None => false,
    }
}

fn is_asset(segment: &str) -> bool {
    matches!(segment.rsplit_once('.'), Some((stem, ext)) if !stem.is_empty() && !ext.is_empty())
}

//! Viewer routes and their mapping to markdown documents.

use std::path::{Component, Path};

use crate::config::ViewerConfig;
use crate::error::LinkError;

/// Current location of the viewer, split into path segments.
///
/// A route has the form `<prefix><tail>`. The tail is kept as the ordered
/// list of its `/`-separated segments; an empty tail is a single empty
/// segment, which is where the landing page lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext<'a> {
    route: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> RouteContext<'a> {
    /// Splits route into segments after removing the viewer prefix.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::RoutingContext`] if route does not start with
    /// `prefix`.
    pub fn parse(route: &'a str, prefix: &str) -> Result<Self, LinkError> {
        let tail = route
            .strip_prefix(prefix)
            .ok_or_else(|| LinkError::RoutingContext {
                route: route.to_string(),
                prefix: prefix.to_string(),
            })?;

        Ok(Self {
            route,
            segments: tail.split('/').collect(),
        })
    }

    /// Full route this context was parsed from.
    pub fn route(&self) -> &'a str {
        self.route
    }

    /// Path segments following the prefix.
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Route tail, segments joined back with `/`.
    pub fn tail(&self) -> String {
        self.segments.join("/")
    }

    /// Whether this is the bare prefix.
    pub fn is_landing(&self) -> bool {
        matches!(self.segments.as_slice(), [""])
    }

    /// Replaces the last `drop` segments with `replacement`.
    ///
    /// `drop` counts the current page slot plus every parent step, so a
    /// sibling link drops one segment and `../x` drops two.
    ///
    /// Returns `None` if fewer than `drop` segments exist.
    pub fn splice(&self, drop: usize, replacement: &'a str) -> Option<Vec<&'a str>> {
        let keep = self.segments.len().checked_sub(drop)?;
        let mut spliced = self.segments[..keep].to_vec();
        spliced.push(replacement);
        Some(spliced)
    }
}

/// Returns the markdown document a route displays.
///
/// Mirrors what the viewer fetches: `<asset_root><tail>.md`. The landing
/// route has no document of its own and yields `None`.
///
/// # Errors
///
/// Returns [`LinkError::RoutingContext`] for routes outside the viewer.
pub fn document_path(route: &str, config: &ViewerConfig) -> Result<Option<String>, LinkError> {
    let context = RouteContext::parse(route, config.prefix())?;
    if context.is_landing() {
        return Ok(None);
    }

    Ok(Some(format!("{}{}.md", config.asset_root(), context.tail())))
}

/// Returns the route displaying a markdown document.
///
/// # Arguments
///
/// * `relative_path`: Document path relative to the docs directory
/// * `config`: Viewer routing constants
///
/// # Returns
///
/// `<prefix><path without .md>` with components joined by `/`, or `None`
/// if the path leaves the docs directory or is not valid UTF8
pub fn route_for_document(relative_path: &Path, config: &ViewerConfig) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative_path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    let last = parts.pop()?;
    parts.push(strip_markdown_extension(last).unwrap_or(last));

    Some(format!("{}{}", config.prefix(), parts.join("/")))
}

/// Strips a trailing `.md` extension, compared case-insensitively.
pub(crate) fn strip_markdown_extension(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(3)?;
    let (stem, extension) = (name.get(..split)?, name.get(split..)?);
    extension.eq_ignore_ascii_case(".md").then_some(stem)
}

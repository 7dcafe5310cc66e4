//! Link resolution against viewer routes.

use log::debug;

use crate::config::ViewerConfig;
use crate::error::LinkError;
use crate::route::{RouteContext, strip_markdown_extension};

/// Namespace a resolved reference lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Another markdown document, addressed through the viewer prefix.
    Document,
    /// Static file, addressed through the asset root.
    Asset,
}

/// Reference from rendered markdown, classified for resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'r> {
    /// `http:` or `https:` URL, left untouched.
    External(&'r str),
    /// Path starting with `/`, appended to the target namespace as is.
    SiteAbsolute { path: &'r str, kind: TargetKind },
    /// Path relative to the directory of the current page.
    Relative {
        path: &'r str,
        parents: usize,
        kind: TargetKind,
    },
}

impl<'r> Reference<'r> {
    /// Classifies a raw reference.
    ///
    /// The `.md` suffix is removed from document targets. For relative
    /// paths a single leading `./` is removed first, then every leading
    /// `../` is counted and removed.
    pub fn classify(reference: &'r str) -> Self {
        if is_external(reference) {
            return Self::External(reference);
        }

        let (path, kind) = match strip_markdown_extension(reference) {
            Some(stem) => (stem, TargetKind::Document),
            None => (reference, TargetKind::Asset),
        };

        if let Some(path) = path.strip_prefix('/') {
            return Self::SiteAbsolute { path, kind };
        }

        let mut path = path.strip_prefix("./").unwrap_or(path);
        let mut parents = 0;
        while let Some(rest) = path.strip_prefix("../") {
            parents += 1;
            path = rest;
        }

        Self::Relative {
            path,
            parents,
            kind,
        }
    }
}

/// Resolves markdown references to viewer routes and asset paths.
///
/// Document links (`guide/intro.md`) become routes under the viewer prefix
/// (`/#/help/guide/intro`); any other file becomes a path under the asset
/// root (`/docs/guide/logo.png`). Relative references resolve against the
/// directory containing the current page.
#[derive(Debug, Clone)]
pub struct LinkResolver<'c> {
    config: &'c ViewerConfig,
}

impl<'c> LinkResolver<'c> {
    /// Creates resolver for the given viewer configuration.
    pub fn new(config: &'c ViewerConfig) -> Self {
        Self { config }
    }

    /// Viewer configuration this resolver resolves into.
    pub fn config(&self) -> &'c ViewerConfig {
        self.config
    }

    /// Resolves reference as seen from `current_route`.
    ///
    /// Handles different reference types:
    /// - External URLs (http://, https://) remain unchanged
    /// - Site-absolute paths (/x/y.md) append to the target namespace
    /// - Relative paths replace the current page segment, one more segment
    ///   per leading `../`
    ///
    /// Query strings and fragments are not interpreted and stay in the
    /// last path segment.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::RoutingContext`] if `current_route` is outside
    /// the viewer prefix, and [`LinkError::PathUnderflow`] if a relative
    /// reference climbs above the help root.
    pub fn resolve(&self, reference: &str, current_route: &str) -> Result<String, LinkError> {
        let resolved = match Reference::classify(reference) {
            Reference::External(url) => return Ok(url.to_string()),
            Reference::SiteAbsolute { path, kind } => {
                RouteContext::parse(current_route, self.config.prefix())?;
                format!("{}{}", self.base(kind), path)
            }
            Reference::Relative {
                path,
                parents,
                kind,
            } => {
                let route = RouteContext::parse(current_route, self.config.prefix())?;
                // The page's own segment goes too: links are relative to its directory.
                let segments = route.splice(parents + 1, path).ok_or_else(|| {
                    LinkError::PathUnderflow {
                        reference: reference.to_string(),
                        route: current_route.to_string(),
                    }
                })?;
                format!("{}{}", self.base(kind), segments.join("/"))
            }
        };

        debug!("Resolved {} from {} to {}", reference, current_route, resolved);
        Ok(resolved)
    }

    fn base(&self, kind: TargetKind) -> &'c str {
        match kind {
            TargetKind::Document => self.config.prefix(),
            TargetKind::Asset => self.config.asset_root(),
        }
    }
}

/// Resolves a single reference with explicit routing constants.
///
/// Convenience wrapper around [`LinkResolver::resolve`] for callers that
/// hold the prefix and asset root as plain strings.
///
/// # Errors
///
/// See [`LinkResolver::resolve`].
pub fn resolve(
    reference: &str,
    prefix: &str,
    asset_root: &str,
    current_route: &str,
) -> Result<String, LinkError> {
    let config = ViewerConfig::new(prefix, asset_root);
    LinkResolver::new(&config).resolve(reference, current_route)
}

fn is_external(reference: &str) -> bool {
    let scheme_end = match reference.find(':') {
        Some(end) => end,
        None => return false,
    };
    let scheme = &reference[..scheme_end];
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}

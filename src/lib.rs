//! Single-page help viewer generator for markdown document trees.

mod assets;
pub mod components;
mod config;
mod error;
mod markdown;
pub mod pages;
mod route;
pub mod site;

pub use assets::write_viewer_assets;
pub use config::{Config, DEFAULT_ASSET_ROOT, DEFAULT_PREFIX, DEFAULT_TOC_FILE, ViewerConfig};
pub use error::LinkError;
pub use markdown::{
    ContentLinkRewriter, Landing, LinkResolver, MarkdownRenderer, Reference, TargetKind, resolve,
};
pub use route::{RouteContext, document_path, route_for_document};
pub use site::{BuildReport, DocSet, HelpPage, build};

//! Markdown rendering for the help viewer.
//!
//! This module renders help documents with comrak (GFM extensions) and
//! rewrites every link and image of a document so it resolves against the
//! viewer route the document is displayed at.

mod links;
mod renderer;
mod rewrite;
mod toc;

pub use links::{LinkResolver, Reference, TargetKind, resolve};
pub use renderer::MarkdownRenderer;
pub use rewrite::ContentLinkRewriter;
pub use toc::Landing;

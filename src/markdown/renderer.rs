//! Markdown rendering with GitHub Flavored Markdown support.

use anyhow::{Context, Result};
use comrak::nodes::{AstNode, NodeCodeBlock, NodeHtmlBlock, NodeValue};
use comrak::{Arena, Options};
use log::debug;
use maud::{PreEscaped, html};
use std::path::Path;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::toc::{Landing, detach_navigation};
use super::{ContentLinkRewriter, LinkResolver};
use crate::config::ViewerConfig;

/// Renders help documents to HTML for display at a viewer route.
///
/// Provides GFM extensions including tables, strikethrough, autolinks,
/// task lists, and description lists. Every link and image of a
/// document is resolved against the route it is shown at before the HTML
/// is produced. Fenced code blocks naming a known language are highlighted
/// with syntect using CSS classes.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
    syntax_set: SyntaxSet,
    config: ViewerConfig,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with GitHub Flavored Markdown options.
    ///
    /// Configures all GFM extensions:
    /// - Tables, strikethrough, autolinks, task lists
    /// - Smart punctuation for quotes and dashes
    /// - Raw HTML passes through (help documents are trusted)
    ///
    /// # Arguments
    ///
    /// * `config`: Routing constants links are resolved into
    pub fn new(config: ViewerConfig) -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        // Footnote anchors are emitted while formatting, after links are
        // resolved, and would escape the viewer's hash routes.
        options.extension.footnotes = false;
        options.extension.description_lists = true;

        options.parse.smart = true;

        options.render.unsafe_ = true;

        Self {
            options,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            config,
        }
    }

    /// Routing constants of this renderer.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Renders markdown content for display at `route`.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    /// * `route`: Viewer route the document is shown at
    ///
    /// # Returns
    ///
    /// Rendered HTML with resolved links and highlighted code blocks
    ///
    /// # Errors
    ///
    /// Returns error if a reference cannot be resolved (the underlying
    /// [`crate::LinkError`] is kept as source) or highlighting fails.
    pub fn render(&self, content: &str, route: &str) -> Result<String> {
        let arena = Arena::new();
        let root = comrak::parse_document(&arena, content, &self.options);

        self.rewrite_links(root, route)?;
        self.highlight_code_blocks(root)?;

        self.format(root)
    }

    /// Renders the landing document and splits off its navigation list.
    ///
    /// Links are resolved against the landing route, the bare prefix.
    ///
    /// # Errors
    ///
    /// Returns error if a reference cannot be resolved or highlighting fails.
    pub fn render_landing(&self, content: &str) -> Result<Landing> {
        let arena = Arena::new();
        let root = comrak::parse_document(&arena, content, &self.options);

        self.rewrite_links(root, self.config.landing_route())?;
        self.highlight_code_blocks(root)?;

        let navigation = detach_navigation(root)
            .map(|list| self.format(list))
            .transpose()?;
        let body = self.format(root)?;

        Ok(Landing::new(navigation, body))
    }

    /// Renders markdown file at given path for display at `route`.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or rendering fails
    pub fn render_file(&self, path: impl AsRef<Path>, route: &str) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
        self.render(&content, route)
    }

    fn rewrite_links<'n>(&self, root: &'n AstNode<'n>, route: &str) -> Result<()> {
        let resolver = LinkResolver::new(&self.config);
        let count = ContentLinkRewriter::new(&resolver)
            .rewrite(root, route)
            .with_context(|| format!("Failed to resolve links for {}", route))?;

        debug!("Rewrote {} references for {}", count, route);
        Ok(())
    }

    /// Replaces fenced code blocks of known languages with highlighted HTML.
    ///
    /// Blocks without a language or with one syntect does not know are left
    /// for comrak to render as plain escaped code.
    fn highlight_code_blocks<'n>(&self, root: &'n AstNode<'n>) -> Result<()> {
        for node in root.descendants() {
            let mut data = node.data.borrow_mut();
            let highlighted = match &data.value {
                NodeValue::CodeBlock(block) => self.highlight_block(block)?,
                _ => None,
            };

            if let Some(literal) = highlighted {
                data.value = NodeValue::HtmlBlock(NodeHtmlBlock {
                    block_type: 0,
                    literal,
                });
            }
        }

        Ok(())
    }

    fn highlight_block(&self, block: &NodeCodeBlock) -> Result<Option<String>> {
        let Some(language) = block.info.split_whitespace().next() else {
            return Ok(None);
        };
        let Some(syntax) = self
            .syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language))
        else {
            return Ok(None);
        };

        let code = self
            .highlight_code(&block.literal, syntax)
            .with_context(|| format!("Failed to highlight {} code block", language))?;

        let markup = html! {
            pre {
                code class=(format!("language-{}", language)) { (PreEscaped(code)) }
            }
        };

        Ok(Some(format!("{}\n", markup.into_string())))
    }

    /// Highlights code with syntect using CSS classes.
    ///
    /// The class prefix is "hljs-" to match highlight.js CSS conventions in
    /// the bundled stylesheet.
    fn highlight_code(&self, code: &str, syntax: &SyntaxReference) -> Result<String> {
        if code.is_empty() {
            return Ok(String::new());
        }

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed { prefix: "hljs-" },
        );

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for syntax highlighting")?;
        }

        Ok(generator.finalize())
    }

    fn format<'n>(&self, node: &'n AstNode<'n>) -> Result<String> {
        let mut output = Vec::new();
        comrak::format_html(node, &self.options, &mut output).context("Failed to format HTML")?;
        String::from_utf8(output).context("Rendered HTML is not valid UTF8")
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

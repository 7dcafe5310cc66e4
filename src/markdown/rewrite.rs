//! Rewriting of link and image references in parsed markdown.

use comrak::nodes::{AstNode, NodeValue};

use super::LinkResolver;
use crate::error::LinkError;

/// Rewrites every hyperlink target and image source of a document.
///
/// Operates on the comrak tree before it is formatted: link and image
/// nodes get their URL replaced, and `<a href>` / `<img src>` tags inside
/// raw HTML are rewritten in place. Nothing else in the tree changes.
pub struct ContentLinkRewriter<'r, 'c> {
    resolver: &'r LinkResolver<'c>,
}

impl<'r, 'c> ContentLinkRewriter<'r, 'c> {
    /// Creates rewriter delegating every reference to `resolver`.
    pub fn new(resolver: &'r LinkResolver<'c>) -> Self {
        Self { resolver }
    }

    /// Resolves all references under `root` against `current_route`.
    ///
    /// Nodes are visited once each, in document order. The first reference
    /// that fails to resolve aborts the pass and its error is returned as
    /// is; the tree may then be partially rewritten and must be discarded.
    ///
    /// # Arguments
    ///
    /// * `root`: Parsed document (or any subtree of it)
    /// * `current_route`: Route the document is displayed at
    ///
    /// # Returns
    ///
    /// Number of references rewritten
    ///
    /// # Errors
    ///
    /// Returns the [`LinkError`] of the first unresolvable reference.
    pub fn rewrite<'a>(
        &self,
        root: &'a AstNode<'a>,
        current_route: &str,
    ) -> Result<usize, LinkError> {
        let mut rewritten = 0;

        for node in root.descendants() {
            let mut data = node.data.borrow_mut();
            match &mut data.value {
                NodeValue::Link(link) | NodeValue::Image(link) => {
                    link.url = self.resolver.resolve(&link.url, current_route)?;
                    rewritten += 1;
                }
                NodeValue::HtmlInline(literal) => {
                    let (html, count) = self.rewrite_raw_html(literal, current_route)?;
                    *literal = html;
                    rewritten += count;
                }
                NodeValue::HtmlBlock(block) => {
                    let (html, count) = self.rewrite_raw_html(&block.literal, current_route)?;
                    block.literal = html;
                    rewritten += count;
                }
                _ => {}
            }
        }

        Ok(rewritten)
    }

    /// Rewrites `href` of `<a>` and `src` of `<img>` tags in raw HTML.
    ///
    /// Attribute values must be quoted. Unquoted values, closing tags and
    /// other tags are copied unchanged. Quoted values may contain `>` and whitespace
    /// without ending the tag or starting another attribute.
    fn rewrite_raw_html(
        &self,
        html: &str,
        current_route: &str,
    ) -> Result<(String, usize), LinkError> {
        let lower = html.to_ascii_lowercase();
        let mut result = String::with_capacity(html.len());
        let mut count = 0;
        let mut pos = 0;

        while let Some(offset) = lower[pos..].find('<') {
            let tag_start = pos + offset;
            let Some(tag) = Tag::parse(&lower, tag_start)
                .filter(|tag| tag.name.starts_with(|c: char| c.is_ascii_alphabetic()))
            else {
                result.push_str(&html[pos..=tag_start]);
                pos = tag_start + 1;
                continue;
            };

            let target = match tag.name {
                "a" => tag.value_of("href"),
                "img" => tag.value_of("src"),
                _ => None,
            };

            let Some((value_start, value_end)) = target else {
                result.push_str(&html[pos..=tag.end]);
                pos = tag.end + 1;
                continue;
            };

            let resolved = self
                .resolver
                .resolve(&html[value_start..value_end], current_route)?;

            result.push_str(&html[pos..value_start]);
            result.push_str(&resolved);
            result.push_str(&html[value_end..=tag.end]);
            count += 1;
            pos = tag.end + 1;
        }

        result.push_str(&html[pos..]);
        Ok((result, count))
    }
}

/// Start tag scanned from lowercased raw HTML.
///
/// Offsets index the scanned string, so they apply unchanged to the
/// original text it was lowercased from.
struct Tag<'t> {
    name: &'t str,
    attributes: Vec<(&'t str, Option<(usize, usize)>)>,
    end: usize,
}

impl<'t> Tag<'t> {
    /// Scans the tag opened by the `<` at `start`.
    ///
    /// Returns `None` when the tag is never closed or a quoted value runs to
    /// the end of the input.
    fn parse(lower: &'t str, start: usize) -> Option<Self> {
        let bytes = lower.as_bytes();
        let name_end = scan_name(bytes, start + 1);
        let mut tag = Self {
            name: &lower[start + 1..name_end],
            attributes: Vec::new(),
            end: 0,
        };

        let mut i = name_end;
        loop {
            while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
                i += 1;
            }
            match bytes.get(i).copied()? {
                b'>' => {
                    tag.end = i;
                    return Some(tag);
                }
                b'=' | b'"' | b'\'' => {
                    i += 1;
                    continue;
                }
                _ => {}
            }

            let attr_start = i;
            i = scan_name(bytes, i);
            let name = &lower[attr_start..i];

            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if bytes.get(i) != Some(&b'=') {
                tag.attributes.push((name, None));
                continue;
            }
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            let value = match bytes.get(i).copied()? {
                quote @ (b'"' | b'\'') => {
                    let value_start = i + 1;
                    let value_end = value_start + lower[value_start..].find(quote as char)?;
                    i = value_end + 1;
                    Some((value_start, value_end))
                }
                _ => {
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                        i += 1;
                    }
                    None
                }
            };
            tag.attributes.push((name, value));
        }
    }

    /// Byte range of the quoted value of `attr`, without its quotes.
    fn value_of(&self, attr: &str) -> Option<(usize, usize)> {
        self.attributes
            .iter()
            .find(|(name, _)| *name == attr)
            .and_then(|(_, value)| *value)
    }
}

fn scan_name(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len()
        && !bytes[i].is_ascii_whitespace()
        && !matches!(bytes[i], b'>' | b'/' | b'=')
    {
        i += 1;
    }
    i
}

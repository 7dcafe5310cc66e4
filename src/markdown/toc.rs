//! Landing page split into navigation and body.

use comrak::nodes::{AstNode, ListType, NodeValue};

/// Rendered landing document.
///
/// The first bullet list of the landing document becomes the navigation
/// pane; everything else is shown when the viewer sits at the bare prefix.
/// Built once per site and handed to the layout explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Landing {
    navigation: Option<String>,
    body: String,
}

impl Landing {
    /// Creates landing content from rendered parts.
    pub fn new(navigation: Option<String>, body: String) -> Self {
        Self { navigation, body }
    }

    /// Rendered navigation list, if the landing document had one.
    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }

    /// Rendered landing content without the navigation list.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Detaches the first bullet list of the document and returns it.
///
/// Search is in document order, so a bullet list nested in an ordered
/// list is found if no earlier bullet list exists.
pub(crate) fn detach_navigation<'a>(root: &'a AstNode<'a>) -> Option<&'a AstNode<'a>> {
    let list = root.descendants().find(|node| {
        matches!(
            &node.data.borrow().value,
            NodeValue::List(list) if matches!(list.list_type, ListType::Bullet)
        )
    })?;

    list.detach();
    Some(list)
}

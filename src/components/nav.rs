//! Navigation pane component

use maud::{Markup, PreEscaped, html};

/// Renders the table of contents pane
///
/// Holds the navigation list taken from the landing document. When the
/// landing document has no list, the pane keeps a single link back to the
/// landing route so the viewer stays navigable.
///
/// # Arguments
///
/// * `navigation`: Rendered navigation list, links already resolved
/// * `landing_route`: Route of the landing page
/// * `title`: Label of the fallback landing link
///
/// # Returns
///
/// Navigation pane markup with id `toc`
pub fn toc_pane(navigation: Option<&str>, landing_route: &str, title: &str) -> Markup {
    html! {
        nav id="toc" {
            @if let Some(list) = navigation {
                (PreEscaped(list))
            } @else {
                ul {
                    li { a href=(landing_route) { (title) } }
                }
            }
        }
    }
}

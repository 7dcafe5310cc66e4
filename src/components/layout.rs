//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

use crate::assets::{SCRIPT, STYLESHEET};

/// Wraps viewer content with standard HTML structure
///
/// Provides DOCTYPE, html, head and body. The viewer prefix is exposed on
/// the body as `data-help-prefix` so the router script can tell the landing
/// route apart from document routes.
///
/// # Arguments
///
/// * `title`: Page title text
/// * `prefix`: Route prefix of the viewer
/// * `body`: Viewer markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(title: &str, prefix: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(STYLESHEET);
            }
            body data-help-prefix=(prefix) {
                header class="viewer-header" { (title) }
                (body)
                script src=(SCRIPT) {}
            }
        }
    }
}

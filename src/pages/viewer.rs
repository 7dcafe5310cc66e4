//! Single-page help viewer generation

use maud::{Markup, PreEscaped, html};

use crate::components::layout::page_wrapper;
use crate::components::nav::toc_pane;
use crate::config::ViewerConfig;
use crate::markdown::Landing;
use crate::site::HelpPage;

/// Data container for viewer page generation
pub struct ViewerPageData<'a> {
    pub title: &'a str,
    pub config: &'a ViewerConfig,
    pub landing: &'a Landing,
    pub pages: &'a [HelpPage],
}

/// Generates the viewer page holding every rendered help document
///
/// The landing content and each document become a `help-page` element
/// keyed by its route in `data-route`. Only the landing content is visible
/// initially; the router script swaps pages on hash changes and falls back
/// to the `help-missing` notice for unknown routes.
///
/// # Arguments
///
/// * `data`: Viewer page data container with all required fields
///
/// # Returns
///
/// Complete HTML markup for `index.html`
pub fn generate(data: ViewerPageData<'_>) -> Markup {
    let landing_route = data.config.landing_route();

    page_wrapper(
        data.title,
        data.config.prefix(),
        html! {
            div class="viewer" {
                (toc_pane(data.landing.navigation(), landing_route, data.title))
                main id="contents" {
                    section class="help-page" data-route=(landing_route) {
                        (PreEscaped(data.landing.body()))
                    }
                    @for page in data.pages {
                        article class="help-page" data-route=(page.route()) hidden {
                            (PreEscaped(page.html()))
                        }
                    }
                    section id="help-missing" class="help-missing" hidden {
                        h1 { "Page not found" }
                        p {
                            "No help page exists at "
                            code id="help-missing-route" {}
                        }
                    }
                }
            }
        },
    )
}

//! Integration tests for link resolution and rewriting.
//!
//! Exercises the public resolver, route and renderer API the way the site
//! builder combines them.

use anyhow::Result;
use mdhelp::{
    LinkError, LinkResolver, MarkdownRenderer, RouteContext, ViewerConfig, document_path, resolve,
    route_for_document,
};
use std::path::Path;

const PREFIX: &str = "/#/help/";
const ROOT: &str = "/docs/";

/// Tests the documented resolution examples end to end.
#[test]
fn test_resolution_examples() -> Result<()> {
    // Arrange
    let cases = [
        ("guide/logo.jpg", "/#/help/page1", "/docs/guide/logo.jpg"),
        (
            "../guide/assets/logo.jpg",
            "/#/help/guide/foo",
            "/docs/guide/assets/logo.jpg",
        ),
        ("foo/bar/index.md", "/#/help/root", "/#/help/foo/bar/index"),
        ("/x/y.md", "/#/help/deep/er/page", "/#/help/x/y"),
        ("https://example.com/a.md", "/not/help", "https://example.com/a.md"),
    ];

    // Act & Assert
    for (reference, route, expected) in cases {
        let resolved = resolve(reference, PREFIX, ROOT, route)?;
        assert_eq!(
            resolved, expected,
            "Resolving {} from {}",
            reference, route
        );
    }

    Ok(())
}

/// Tests that resolution is exact at every depth of a route.
#[test]
fn test_parent_steps_at_each_depth() {
    // Arrange
    let config = ViewerConfig::default();
    let resolver = LinkResolver::new(&config);
    let route = "/#/help/a/b/c";

    // Act & Assert
    assert_eq!(resolver.resolve("x.md", route).as_deref(), Ok("/#/help/a/b/x"));
    assert_eq!(resolver.resolve("../x.md", route).as_deref(), Ok("/#/help/a/x"));
    assert_eq!(resolver.resolve("../../x.md", route).as_deref(), Ok("/#/help/x"));
    assert!(matches!(
        resolver.resolve("../../../x.md", route),
        Err(LinkError::PathUnderflow { .. })
    ));
}

/// Tests that every non-external reference checks the route.
#[test]
fn test_route_outside_prefix_is_contract_violation() {
    // Arrange
    let references = ["page.md", "/abs.md", "img.png", "./here.png", "../up.md"];

    // Act & Assert
    for reference in references {
        let result = resolve(reference, PREFIX, ROOT, "/#/helpdesk/page");
        assert!(
            matches!(result, Err(LinkError::RoutingContext { .. })),
            "{} should fail with a routing error, got {:?}",
            reference,
            result
        );
    }
}

/// Tests that a document's route resolves back to its own source path.
#[test]
fn test_document_route_round_trip() {
    // Arrange
    let config = ViewerConfig::default();
    let source = Path::new("guide/advanced/tuning.md");

    // Act
    let route = route_for_document(source, &config).expect("Should route");
    let fetched = document_path(&route, &config).expect("Should map");

    // Assert
    assert_eq!(route, "/#/help/guide/advanced/tuning");
    assert_eq!(fetched.as_deref(), Some("/docs/guide/advanced/tuning.md"));
    assert_eq!(
        RouteContext::parse(&route, config.prefix())
            .expect("Should parse")
            .segments(),
        &["guide", "advanced", "tuning"]
    );
}

/// Tests that links inside a rendered document resolve relative to its route.
#[test]
fn test_renderer_resolves_relative_to_route() -> Result<()> {
    // Arrange
    let renderer = MarkdownRenderer::new(ViewerConfig::new("/manual/#/", "/static/"));
    let markdown = "[Sibling](sibling.md) [Parent](../index.md) ![Pic](pics/a.png)";

    // Act
    let html = renderer.render(markdown, "/manual/#/topics/page")?;

    // Assert
    assert!(html.contains("href=\"/manual/#/topics/sibling\""), "Got: {}", html);
    assert!(html.contains("href=\"/manual/#/index\""), "Got: {}", html);
    assert!(html.contains("src=\"/static/topics/pics/a.png\""), "Got: {}", html);

    Ok(())
}

/// Tests that a single bad reference fails the whole document.
#[test]
fn test_renderer_fails_whole_document() {
    // Arrange
    let renderer = MarkdownRenderer::default();
    let markdown = "[ok](ok.md)\n\n[bad](../../nope.md)\n\n[also ok](fine.md)";

    // Act
    let result = renderer.render(markdown, "/#/help/page");

    // Assert
    let err = result.expect_err("Should fail");
    assert!(matches!(
        err.downcast_ref::<LinkError>(),
        Some(LinkError::PathUnderflow { reference, .. }) if reference == "../../nope.md"
    ));
}

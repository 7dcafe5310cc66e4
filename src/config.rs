//! Command line and viewer configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

/// Default route prefix marking a location inside the help viewer.
pub const DEFAULT_PREFIX: &str = "/#/help/";

/// Default site path static assets are served from.
pub const DEFAULT_ASSET_ROOT: &str = "/docs/";

/// Default landing document holding the table of contents.
pub const DEFAULT_TOC_FILE: &str = "_toc.md";

/// Routing constants of the help viewer.
///
/// Fixed at startup and passed by reference to everything that resolves
/// links. Document links resolve under `prefix`, asset links under
/// `asset_root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    prefix: String,
    asset_root: String,
}

impl ViewerConfig {
    /// Creates viewer configuration from route prefix and asset root.
    ///
    /// # Arguments
    ///
    /// * `prefix`: Route namespace of the viewer, e.g. `/#/help/`
    /// * `asset_root`: Site path serving static assets, e.g. `/docs/`
    pub fn new(prefix: impl Into<String>, asset_root: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            asset_root: asset_root.into(),
        }
    }

    /// Route namespace of the viewer.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Site path serving static assets.
    pub fn asset_root(&self) -> &str {
        &self.asset_root
    }

    /// Route of the landing page: the bare prefix.
    pub fn landing_route(&self) -> &str {
        &self.prefix
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_ASSET_ROOT)
    }
}

/// Command line configuration for mdhelp.
#[derive(Debug, Clone, Parser)]
#[command(name = "mdhelp", version, about, long_about = None)]
pub struct Config {
    /// Directory containing the markdown documents
    #[arg(default_value = "docs")]
    pub docs: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Route prefix of the help viewer
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Site path static assets are served from
    #[arg(long, default_value = DEFAULT_ASSET_ROOT)]
    pub asset_root: String,

    /// Page title
    #[arg(long, default_value = "Help")]
    pub title: String,

    /// Landing document, relative to the docs directory
    #[arg(long, default_value = DEFAULT_TOC_FILE)]
    pub toc: PathBuf,

    /// Open the generated viewer in a browser
    ///
    /// Pages and navigation work from the local file; images and other docs
    /// files under the asset root load only when the output directory is
    /// served at the site root.
    #[arg(long)]
    pub open: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the docs directory does not exist or the routing
    /// constants are empty.
    pub fn validate(&self) -> Result<()> {
        if !self.docs.is_dir() {
            bail!("Docs directory does not exist: {}", self.docs.display());
        }
        if self.prefix.is_empty() {
            bail!("Route prefix must not be empty");
        }
        if self.asset_root.is_empty() {
            bail!("Asset root must not be empty");
        }

        Ok(())
    }

    /// Returns the routing constants selected on the command line.
    pub fn viewer(&self) -> ViewerConfig {
        ViewerConfig::new(&self.prefix, &self.asset_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(docs: &str, prefix: &str, asset_root: &str) -> Config {
        Config {
            docs: PathBuf::from(docs),
            output: PathBuf::from("dist"),
            prefix: prefix.to_string(),
            asset_root: asset_root.to_string(),
            title: "Help".to_string(),
            toc: PathBuf::from(DEFAULT_TOC_FILE),
            open: false,
        }
    }

    #[test]
    fn test_viewer_config_defaults() {
        // Arrange & Act
        let viewer = ViewerConfig::default();

        // Assert
        assert_eq!(viewer.prefix(), "/#/help/");
        assert_eq!(viewer.asset_root(), "/docs/");
        assert_eq!(viewer.landing_route(), "/#/help/");
    }

    #[test]
    fn test_cli_defaults() {
        // Arrange & Act
        let config = <Config as Parser>::try_parse_from(["mdhelp"]).expect("Should parse");

        // Assert
        assert_eq!(config.docs, PathBuf::from("docs"));
        assert_eq!(config.output, PathBuf::from("dist"));
        assert_eq!(config.viewer(), ViewerConfig::default());
        assert_eq!(config.toc, PathBuf::from("_toc.md"));
        assert!(!config.open);
    }

    #[test]
    fn test_cli_overrides_routing_constants() {
        // Arrange & Act
        let config = <Config as Parser>::try_parse_from([
            "mdhelp",
            "manual",
            "-o",
            "site",
            "--prefix",
            "/#/manual/",
            "--asset-root",
            "/static/",
        ])
        .expect("Should parse");

        // Assert
        assert_eq!(config.docs, PathBuf::from("manual"));
        assert_eq!(config.output, PathBuf::from("site"));
        assert_eq!(config.viewer().prefix(), "/#/manual/");
        assert_eq!(config.viewer().asset_root(), "/static/");
    }

    #[test]
    fn test_validate_existing_directory() {
        // Arrange
        let config = config_with(".", DEFAULT_PREFIX, DEFAULT_ASSET_ROOT);

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_ok(), "Current directory should be valid");
    }

    #[test]
    fn test_validate_missing_directory() {
        // Arrange
        let config = config_with("/nonexistent/mdhelp/docs", DEFAULT_PREFIX, DEFAULT_ASSET_ROOT);

        // Act
        let result = config.validate();

        // Assert
        let err_msg = result.expect_err("Missing docs should fail").to_string();
        assert!(err_msg.contains("does not exist"), "Got: {}", err_msg);
    }

    #[test]
    fn test_validate_empty_prefix() {
        // Arrange
        let config = config_with(".", "", DEFAULT_ASSET_ROOT);

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_err(), "Empty prefix should be rejected");
    }
}

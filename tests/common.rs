//! Shared test utilities for integration tests.
//!
//! Provides helpers for creating temporary docs trees and build
//! configurations used across multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use mdhelp::{Config, DEFAULT_ASSET_ROOT, DEFAULT_PREFIX, DEFAULT_TOC_FILE};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes file below `root`, creating parent directories.
///
/// # Errors
///
/// Returns error if directory creation or writing fails
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Creates temporary docs tree with landing page, nested guides and assets.
///
/// Layout:
/// - `_toc.md`: navigation list plus welcome text and logo
/// - `getting-started.md`
/// - `guide/overview.md`, `guide/advanced/tuning.md`
/// - `guide/assets/diagram.png`, `logo.png`
///
/// # Errors
///
/// Returns error if any file cannot be written
pub fn create_docs_tree() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let root = dir.path();

    write_file(
        root,
        "_toc.md",
        "# Contents\n\n\
         - [Getting started](getting-started.md)\n\
         - [Overview](guide/overview.md)\n  \
           - [Tuning](guide/advanced/tuning.md)\n\n\
         Welcome to the manual. ![Logo](logo.png)\n",
    )?;
    write_file(
        root,
        "getting-started.md",
        "# Getting started\n\nNext read the [overview](guide/overview.md).\n",
    )?;
    write_file(
        root,
        "guide/overview.md",
        "# Overview\n\n\
         ![Diagram](assets/diagram.png)\n\n\
         See [tuning](./advanced/tuning.md), [home](../getting-started.md) \
         and [the site](https://example.com/help).\n",
    )?;
    write_file(
        root,
        "guide/advanced/tuning.md",
        "# Tuning\n\n\
         <img src=\"../assets/diagram.png\" width=\"200\">\n\n\
         Back to [overview](../overview.md) or [start](/getting-started.md).\n",
    )?;
    write_file(root, "guide/assets/diagram.png", "diagram")?;
    write_file(root, "logo.png", "logo")?;

    Ok(dir)
}

/// Creates build configuration reading `docs` and writing to `output`.
pub fn config_for(docs: &Path, output: &Path) -> Config {
    Config {
        docs: docs.to_path_buf(),
        output: output.to_path_buf(),
        prefix: DEFAULT_PREFIX.to_string(),
        asset_root: DEFAULT_ASSET_ROOT.to_string(),
        title: "Manual".to_string(),
        toc: PathBuf::from(DEFAULT_TOC_FILE),
        open: false,
    }
}

//! Bundled viewer assets

use anyhow::{Context, Result};
use std::{fs, path::Path};

const HELP_CSS: &str = include_str!("../assets/help.css");
const VIEWER_JS: &str = include_str!("../assets/viewer.js");

/// Site path of the viewer stylesheet, relative to `index.html`.
pub const STYLESHEET: &str = "assets/help.css";

/// Site path of the viewer script, relative to `index.html`.
pub const SCRIPT: &str = "assets/viewer.js";

/// Writes stylesheet and router script to the assets directory
pub fn write_viewer_assets(assets_dir: &Path) -> Result<()> {
    fs::create_dir_all(assets_dir).with_context(|| {
        format!(
            "Failed to create assets directory: {}",
            assets_dir.display()
        )
    })?;

    write_asset(assets_dir, "help.css", HELP_CSS)?;
    write_asset(assets_dir, "viewer.js", VIEWER_JS)?;
    Ok(())
}

fn write_asset(dir: &Path, name: &str, content: &str) -> Result<()> {
    fs::write(dir.join(name), content)
        .with_context(|| format!("Failed to write viewer asset: {}", name))?;
    Ok(())
}

use anyhow::{Context, Result};
use log::info;
use mdhelp::Config;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    info!(
        "Building help viewer from {} into {}",
        config.docs.display(),
        config.output.display()
    );

    let report = mdhelp::build(&config).context("Failed to build help viewer")?;

    println!(
        "Generated: {} ({} pages{})",
        report.index.display(),
        report.pages,
        if report.has_navigation {
            ""
        } else {
            ", no navigation"
        }
    );
    println!("Copied {} docs files", report.copied_files);

    if config.open {
        if report.copied_files > 0 {
            println!(
                "Note: docs files under {} load only when {} is served over HTTP",
                config.asset_root,
                config.output.display()
            );
        }
        open::that(&report.index)
            .with_context(|| format!("Failed to open {}", report.index.display()))?;
    }

    Ok(())
}

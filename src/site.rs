//! Help site assembly from a docs directory.

use anyhow::{Context, Result, bail};
use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::assets::{SCRIPT, STYLESHEET, write_viewer_assets};
use crate::config::{Config, ViewerConfig};
use crate::markdown::{Landing, MarkdownRenderer};
use crate::pages::viewer::{self, ViewerPageData};
use crate::route::{route_for_document, strip_markdown_extension};

/// Files found in a docs directory.
///
/// Paths are relative to the docs root and sorted by name. The landing
/// document is kept apart from the regular documents.
#[derive(Debug, Clone)]
pub struct DocSet {
    root: PathBuf,
    landing: Option<PathBuf>,
    documents: Vec<PathBuf>,
    assets: Vec<PathBuf>,
}

impl DocSet {
    /// Scans docs directory recursively, skipping hidden entries.
    ///
    /// # Arguments
    ///
    /// * `root`: Docs directory
    /// * `landing`: Landing document path relative to `root`
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be traversed.
    pub fn scan(root: impl AsRef<Path>, landing: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let landing = landing.as_ref();

        let mut set = Self {
            root: root.to_path_buf(),
            landing: None,
            documents: Vec::new(),
            assets: Vec::new(),
        };

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry =
                entry.with_context(|| format!("Failed to scan docs directory {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .context("Scanned file outside docs directory")?
                .to_path_buf();

            if relative == landing {
                set.landing = Some(relative);
            } else if is_markdown(&relative) {
                set.documents.push(relative);
            } else {
                set.assets.push(relative);
            }
        }

        Ok(set)
    }

    /// Docs directory this set was scanned from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Landing document, if present.
    pub fn landing(&self) -> Option<&Path> {
        self.landing.as_deref()
    }

    /// Markdown documents other than the landing document.
    pub fn documents(&self) -> &[PathBuf] {
        &self.documents
    }

    /// Non-markdown files.
    pub fn assets(&self) -> &[PathBuf] {
        &self.assets
    }

    /// Every scanned file: landing document, documents, then assets.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.landing()
            .into_iter()
            .chain(self.documents.iter().map(PathBuf::as_path))
            .chain(self.assets.iter().map(PathBuf::as_path))
    }
}

/// Help document rendered for its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpPage {
    route: String,
    source: PathBuf,
    html: String,
}

impl HelpPage {
    /// Creates page from route, source path and rendered HTML.
    pub fn new(route: String, source: PathBuf, html: String) -> Self {
        Self {
            route,
            source,
            html,
        }
    }

    /// Viewer route showing this page.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Source document relative to the docs directory.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Rendered HTML with resolved links.
    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Outcome of a site build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub index: PathBuf,
    pub pages: usize,
    pub copied_files: usize,
    pub has_navigation: bool,
}

/// Renders the landing document, or empty landing content if absent.
///
/// # Errors
///
/// Returns error if the landing document cannot be read or rendered.
pub fn render_landing(docs: &DocSet, renderer: &MarkdownRenderer<'_>) -> Result<Landing> {
    let Some(landing) = docs.landing() else {
        warn!("No landing document in {}", docs.root().display());
        eprintln!(
            "Warning: No landing document found in {}, navigation will be empty",
            docs.root().display()
        );
        return Ok(Landing::default());
    };

    let path = docs.root().join(landing);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read landing document {}", path.display()))?;

    renderer
        .render_landing(&content)
        .with_context(|| format!("Failed to render landing document {}", landing.display()))
}

/// Renders every document of the set at its route.
///
/// Documents whose path cannot form a route, and documents mapping to a
/// route already taken, are skipped with a warning.
///
/// # Errors
///
/// Returns error naming the source file if a document cannot be read or
/// one of its references cannot be resolved.
pub fn render_pages(docs: &DocSet, renderer: &MarkdownRenderer<'_>) -> Result<Vec<HelpPage>> {
    let mut pages = Vec::with_capacity(docs.documents().len());
    let mut routes = HashSet::new();

    for document in docs.documents() {
        let Some(route) = route_for_document(document, renderer.config()) else {
            eprintln!(
                "Warning: Skipping document with unroutable path: {}",
                document.display()
            );
            continue;
        };

        if !routes.insert(route.clone()) {
            eprintln!(
                "Warning: Skipping {}, route {} is already taken",
                document.display(),
                route
            );
            continue;
        }

        let html = renderer
            .render_file(docs.root().join(document), &route)
            .with_context(|| format!("Failed to render help document {}", document.display()))?;

        info!("Rendered {} at {}", document.display(), route);
        pages.push(HelpPage::new(route, document.clone(), html));
    }

    Ok(pages)
}

/// Output directory serving files under `asset_root`.
///
/// Only site paths (`/docs/`) map to a directory; an asset root on another
/// host, or one climbing with `..`, yields `None`.
pub fn asset_output_dir(output: &Path, asset_root: &str) -> Option<PathBuf> {
    if !asset_root.starts_with('/') || asset_root.starts_with("//") {
        return None;
    }

    let mut dir = output.to_path_buf();
    for segment in asset_root.split('/').filter(|s| !s.is_empty()) {
        if segment == ".." || segment == "." {
            return None;
        }
        dir.push(segment);
    }
    Some(dir)
}

/// Copies every scanned file below the asset output directory.
///
/// Documents are copied along with the other assets so the source of each
/// page stays reachable at `<asset_root><path>`.
///
/// # Returns
///
/// Number of files copied
///
/// # Errors
///
/// Returns error if a directory cannot be created or a file cannot be copied.
pub fn copy_docs(docs: &DocSet, target: &Path) -> Result<usize> {
    let mut copied = 0;
    for file in docs.files() {
        let destination = target.join(file);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::copy(docs.root().join(file), &destination)
            .with_context(|| format!("Failed to copy {}", file.display()))?;
        copied += 1;
    }

    Ok(copied)
}

/// Fails if copying the docs into `target` would overwrite a generated file.
///
/// Paths are compared ignoring ASCII case, so the check also holds on
/// case-insensitive filesystems.
///
/// # Errors
///
/// Returns error naming the first docs file that lands on a generated path.
pub fn check_output_collisions(
    docs: &DocSet,
    target: &Path,
    generated: &[PathBuf],
) -> Result<()> {
    for file in docs.files() {
        let destination = target.join(file);
        if let Some(taken) = generated.iter().find(|path| same_path(path, &destination)) {
            bail!(
                "Docs file {} would overwrite generated {}, choose another asset root",
                file.display(),
                taken.display()
            );
        }
    }

    Ok(())
}

/// Builds the complete help viewer described by the command line.
///
/// Renders the landing document and every help document, writes
/// `index.html` with the bundled stylesheet and script, and copies the docs
/// tree below the asset root.
///
/// # Errors
///
/// Returns error if scanning, rendering or writing fails. Any unresolvable
/// reference fails the build.
pub fn build(config: &Config) -> Result<BuildReport> {
    let viewer_config: ViewerConfig = config.viewer();
    let docs = DocSet::scan(&config.docs, &config.toc)?;
    let renderer = MarkdownRenderer::new(viewer_config.clone());

    let landing = render_landing(&docs, &renderer)?;
    let pages = render_pages(&docs, &renderer)?;

    let index = config.output.join("index.html");
    let docs_target = asset_output_dir(&config.output, viewer_config.asset_root());
    if let Some(target) = &docs_target {
        let generated = [
            index.clone(),
            config.output.join(STYLESHEET),
            config.output.join(SCRIPT),
        ];
        check_output_collisions(&docs, target, &generated)?;
    }

    fs::create_dir_all(&config.output).context("Failed to create output directory")?;
    write_viewer_assets(&config.output.join("assets"))?;

    let html = viewer::generate(ViewerPageData {
        title: &config.title,
        config: &viewer_config,
        landing: &landing,
        pages: &pages,
    });

    fs::write(&index, html.into_string())
        .with_context(|| format!("Failed to write viewer page to {}", index.display()))?;
    info!("Wrote {}", index.display());

    let copied_files = match &docs_target {
        Some(target) => copy_docs(&docs, target)?,
        None => {
            warn!("Asset root {} is not a site path", viewer_config.asset_root());
            eprintln!(
                "Warning: Asset root {} is not a site path, docs were not copied",
                viewer_config.asset_root()
            );
            0
        }
    };

    Ok(BuildReport {
        index,
        pages: pages.len(),
        copied_files,
        has_navigation: landing.navigation().is_some(),
    })
}

fn same_path(a: &Path, b: &Path) -> bool {
    a.components().count() == b.components().count()
        && a.components()
            .zip(b.components())
            .all(|(x, y)| x.as_os_str().eq_ignore_ascii_case(y.as_os_str()))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(strip_markdown_extension)
        .is_some()
}

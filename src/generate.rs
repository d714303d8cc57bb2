//! Profile page generation.
//!
//! Renders the finalized [`Document`] to an HTML body, substitutes it into the
//! user's template, and writes the page and stylesheet to the output
//! directory.
//!
//! ## Page Structure
//!
//! ```text
//! header.profile-header          name, masked contact links, location
//! section.section                one per document section
//!   h2                           section title
//!   div.entry                    one per row, blocks flattened in order
//!     div.label                  row title
//!     div.value                  formatted text, raw HTML, or a table
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html      # Template with {{name}} and {{content}} filled
//! ├── style.css       # Copied stylesheet
//! └── favicon.ico     # Anything under assets/, copied as-is
//! ```
//!
//! ## Escaping
//!
//! Maud's interpolation leaves `'` alone, so every piece of author text goes
//! through [`escape_html`] or [`format`] and enters the tree as `PreEscaped`.
//! Raw HTML rows are the only unescaped author content.
//!
//! ## No Partial Output
//!
//! [`prepare`] reads and renders everything in memory. The output directory
//! is only created by [`PreparedSite::write`], so any load or render failure
//! leaves the filesystem untouched.

use crate::config::{self, ConfigError, MarkerConfig, SiteConfig};
use crate::format::{escape_html, format};
use crate::load::{self, LoadError, Secrets};
use crate::obfuscate::{mask_email, mask_phone, obfuscated_payload};
use crate::types::{Document, Row, RowValue, Section};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("template is missing marker(s): {}", .0.join(", "))]
    MissingMarkers(Vec<String>),
    #[error("stylesheet path has no file name: {0}")]
    Stylesheet(String),
    #[error("asset {0} would be overwritten by the generated {1}")]
    AssetCollision(PathBuf, &'static str),
}

const REVEAL_JS: &str = include_str!("../static/reveal.js");

// ============================================================================
// HTML Components
// ============================================================================

/// Author text escaped once and marked safe for the tree.
fn text(value: &str) -> PreEscaped<String> {
    PreEscaped(escape_html(value))
}

/// A titled entry: escaped label plus an already-rendered value.
pub fn labeled_entry(title: &str, value: Markup) -> Markup {
    html! {
        div.entry {
            div.label { (text(title)) }
            div.value { (value) }
        }
    }
}

/// Grid rendered as `<table>`, each cell formatted.
fn render_table(grid: &[Vec<String>]) -> Markup {
    html! {
        table {
            @for cells in grid {
                tr {
                    @for cell in cells {
                        td { (PreEscaped(format(cell))) }
                    }
                }
            }
        }
    }
}

/// Render one row as a labeled entry.
pub fn render_row(row: &Row) -> Markup {
    let value = match &row.value {
        RowValue::Table(grid) => render_table(grid),
        RowValue::Plain(body) => PreEscaped(format(body)),
        RowValue::RawHtml(body) => PreEscaped(body.clone()),
    };
    labeled_entry(&row.title, value)
}

/// Render a section: title heading followed by every row of every block.
pub fn generate_section(section: &Section) -> Markup {
    html! {
        section.section {
            h2 { (text(&section.title)) }
            @for row in section.rows() {
                (render_row(row))
            }
        }
    }
}

/// Contact link showing `masked` and carrying the obfuscated full value.
fn contact_link(kind: &str, value: &str, masked: &str) -> Markup {
    html! {
        a.pii href="#" data-kind=(kind) data-pii=(text(&obfuscated_payload(value))) {
            (text(masked))
        }
    }
}

/// Render the profile header: name, masked email and phone, location.
pub fn generate_header(document: &Document) -> Markup {
    let contact = &document.contact;
    html! {
        header.profile-header {
            h1 { (text(&document.name)) }
            ul.contact {
                li.email { (contact_link("email", &contact.email, &mask_email(&contact.email))) }
                li.phone { (contact_link("phone", &contact.phone, &mask_phone(&contact.phone))) }
                li.location { (text(&contact.location)) }
            }
        }
    }
}

/// Render the full page body: header, then sections in document order.
pub fn generate_content(document: &Document) -> Markup {
    html! {
        (generate_header(document))
        @for section in &document.sections {
            (generate_section(section))
        }
    }
}

// ============================================================================
// Template substitution
// ============================================================================

/// Template with markers replaced, plus the markers that were not found.
#[derive(Debug)]
pub struct FilledTemplate {
    pub html: String,
    pub missing_markers: Vec<String>,
}

/// Replace every occurrence of the content and name markers.
///
/// Inserted values are never rescanned, so a profile that happens to contain
/// marker text is written literally. A missing marker is a silent no-op here;
/// the caller decides whether that is fatal.
pub fn fill_template(
    template: &str,
    markers: &MarkerConfig,
    name: &str,
    content: &str,
) -> FilledTemplate {
    let missing_markers = [&markers.content, &markers.name]
        .into_iter()
        .filter(|m| !template.contains(m.as_str()))
        .cloned()
        .collect();
    let html = template
        .split(markers.content.as_str())
        .map(|part| part.replace(&markers.name, name))
        .collect::<Vec<_>>()
        .join(content);
    FilledTemplate {
        html,
        missing_markers,
    }
}

/// Render `document` into `template` according to `config`.
pub fn render_page(
    document: &Document,
    template: &str,
    config: &SiteConfig,
) -> Result<FilledTemplate, BuildError> {
    let content = generate_content(document).into_string();
    let filled = fill_template(
        template,
        &config.markers,
        &escape_html(&document.name),
        &content,
    );
    if !filled.missing_markers.is_empty() {
        if config.strict_markers {
            return Err(BuildError::MissingMarkers(filled.missing_markers));
        }
        log::warn!(
            "template is missing marker(s) {}; output left unsubstituted there",
            filled.missing_markers.join(", ")
        );
    }
    Ok(filled)
}

/// A minimal template containing both default markers and the reveal script.
///
/// Used by the `gen-template` CLI command.
pub fn stock_template() -> String {
    let markers = MarkerConfig::default();
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (PreEscaped(&markers.name)) }
                link rel="stylesheet" href="style.css";
            }
            body {
                main.profile {
                    (PreEscaped(&markers.content))
                }
                script { (PreEscaped(REVEAL_JS)) }
            }
        }
    };
    page.into_string()
}

// ============================================================================
// Build
// ============================================================================

/// Per-section row count, for CLI output.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSummary {
    pub title: String,
    pub rows: usize,
}

/// A fully rendered site held in memory, not yet written.
#[derive(Debug)]
pub struct PreparedSite {
    pub page: FilledTemplate,
    pub output_file: String,
    pub stylesheet_name: String,
    stylesheet: Vec<u8>,
    /// Asset files as (absolute source, path relative to assets dir).
    assets: Vec<(PathBuf, PathBuf)>,
    pub sections: Vec<SectionSummary>,
}

/// What [`PreparedSite::write`] put on disk.
#[derive(Debug)]
pub struct BuildReport {
    pub page_path: PathBuf,
    pub stylesheet_path: PathBuf,
    pub assets: Vec<PathBuf>,
    pub sections: Vec<SectionSummary>,
    pub missing_markers: Vec<String>,
}

/// Load config and inputs from `source_dir`, render the page, and read the
/// stylesheet and asset list. Nothing is written.
pub fn prepare(source_dir: &Path, secrets: Secrets) -> Result<PreparedSite, BuildError> {
    let config = config::load_config(source_dir)?;
    let inputs = load::load_inputs(source_dir, &config, secrets)?;
    let document = &inputs.document;
    let page = render_page(document, &inputs.template, &config)?;

    let stylesheet_name = Path::new(&config.stylesheet)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| BuildError::Stylesheet(config.stylesheet.clone()))?;
    let stylesheet = fs::read(source_dir.join(&config.stylesheet))?;

    let assets = collect_assets(&source_dir.join(&config.assets_dir))?;
    check_asset_collisions(&assets, &config.output_file, &stylesheet_name)?;
    log::debug!(
        "rendered {} section(s), {} row(s), {} asset(s)",
        document.sections.len(),
        document.row_count(),
        assets.len()
    );

    Ok(PreparedSite {
        page,
        output_file: config.output_file,
        stylesheet_name,
        stylesheet,
        assets,
        sections: document
            .sections
            .iter()
            .map(|s| SectionSummary {
                title: s.title.clone(),
                rows: s.row_count(),
            })
            .collect(),
    })
}

/// Assets land in the output root next to the page and stylesheet; neither
/// may shadow one of them.
fn check_asset_collisions(
    assets: &[(PathBuf, PathBuf)],
    output_file: &str,
    stylesheet_name: &str,
) -> Result<(), BuildError> {
    for (_, relative) in assets {
        if relative == Path::new(output_file) {
            return Err(BuildError::AssetCollision(relative.clone(), "page"));
        }
        if relative == Path::new(stylesheet_name) {
            return Err(BuildError::AssetCollision(relative.clone(), "stylesheet"));
        }
    }
    Ok(())
}

fn collect_assets(assets_dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>, BuildError> {
    if !assets_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut assets = Vec::new();
    for entry in WalkDir::new(assets_dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            let relative = entry
                .path()
                .strip_prefix(assets_dir)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| PathBuf::from(entry.file_name()));
            assets.push((entry.path().to_path_buf(), relative));
        }
    }
    Ok(assets)
}

impl PreparedSite {
    /// Create `output_dir` if needed and write page, stylesheet and assets.
    pub fn write(self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        fs::create_dir_all(output_dir)?;

        let mut copied = Vec::with_capacity(self.assets.len());
        for (src, relative) in &self.assets {
            let dst = output_dir.join(relative);
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(src, &dst)?;
            copied.push(relative.clone());
        }

        let stylesheet_path = output_dir.join(&self.stylesheet_name);
        fs::write(&stylesheet_path, &self.stylesheet)?;

        let page_path = output_dir.join(&self.output_file);
        fs::write(&page_path, &self.page.html)?;
        log::debug!("wrote {}", page_path.display());

        Ok(BuildReport {
            page_path,
            stylesheet_path,
            assets: copied,
            sections: self.sections,
            missing_markers: self.page.missing_markers,
        })
    }
}

/// Run the whole pipeline: prepare in memory, then write to `output_dir`.
pub fn build(
    source_dir: &Path,
    output_dir: &Path,
    secrets: Secrets,
) -> Result<BuildReport, BuildError> {
    prepare(source_dir, secrets)?.write(output_dir)
}

// ============================================================================
// Tests
// ============================================================================

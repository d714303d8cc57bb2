//! # Profile Page
//!
//! A single-page static site generator for personal profiles. A JSON document
//! describes the name, contact details and sectioned content; an HTML template
//! supplies the page shell. The output is one self-contained HTML page plus
//! its stylesheet.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load      config.toml + data.json + template.html + PII_* env  →  Document
//! 2. Render    Document  →  HTML body (header, sections, rows)
//! 3. Fill      template + body + name  →  page
//! 4. Write     page + stylesheet + assets  →  dist/
//! ```
//!
//! Steps 1 to 3 happen entirely in memory. A failure at any point leaves the
//! output directory untouched.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading over stock defaults, validation |
//! | [`load`] | Contact secrets from the environment, document and template reading |
//! | [`types`] | Data model: `Document`, `Section`, `Block`, `Row`, `RowValue` |
//! | [`format`] | HTML escaping and the `*bold*` / `_italic_` / newline markup |
//! | [`obfuscate`] | Masked contact strings and the shifted code-point payload |
//! | [`generate`] | Maud rendering, template substitution, and the build itself |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Contact Details From the Environment
//!
//! The data file is meant to be committed. Email and phone come from
//! `PII_EMAIL` and `PII_PHONE` and are merged into the document by
//! [`types::Document::finalize`]; values in the file are ignored.
//!
//! ## Cosmetic Obfuscation
//!
//! The page shows `***@example.com` and `+39 *** *** 7212`. The real values
//! are embedded as JSON arrays of code points shifted by seven, decoded by a
//! few lines of script when the visitor clicks. It stops address harvesters
//! that pattern-match on raw HTML, nothing more.
//!
//! ## Explicit Row Kinds
//!
//! Rows are `table`, `plain`, `html`, or legacy `text`. Legacy text rows are
//! classified once at load: a `<` anywhere means raw HTML. Rendering only
//! looks at [`types::RowValue`].

pub mod config;
pub mod format;
pub mod generate;
pub mod load;
pub mod obfuscate;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

//! Profile data model.
//!
//! The JSON document deserializes into [`DocumentSource`]. Contact email and
//! phone are never taken from the file: [`Document::finalize`] merges them in
//! from [`Secrets`](crate::load::Secrets) and the result is read-only for the
//! rest of the build.

use crate::load::Secrets;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Profile document as read from disk, before secrets are merged in.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSource {
    pub name: String,
    #[serde(default)]
    pub contact: ContactSource,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Contact fields trusted from the document. Email and phone keys, if present
/// in the file, are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSource {
    #[serde(default)]
    pub location: String,
}

/// Finalized, immutable document ready for rendering.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub contact: Contact,
    pub sections: Vec<Section>,
}

impl Document {
    /// Build the finalized document from the on-disk source and the
    /// externally supplied contact secrets.
    pub fn finalize(source: DocumentSource, secrets: Secrets) -> Self {
        Self {
            name: source.name,
            contact: Contact {
                email: secrets.email,
                phone: secrets.phone,
                location: source.contact.location,
            },
            sections: source.sections,
        }
    }

    /// Total row count across all sections and blocks.
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(Section::row_count).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.blocks.iter().flat_map(|b| b.rows.iter())
    }

    pub fn row_count(&self) -> usize {
        self.blocks.iter().map(|b| b.rows.len()).sum()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// A labeled entry inside a block.
///
/// The value's interpretation is carried by [`RowValue`]; nothing downstream
/// inspects the payload to decide how to render it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawRow")]
pub struct Row {
    pub title: String,
    pub value: RowValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    /// Text run through the formatter (escaping, bold, italic, line breaks).
    Plain(String),
    /// Pre-rendered HTML emitted verbatim.
    RawHtml(String),
    /// Grid of cells, outer sequence is table rows.
    Table(Vec<Vec<String>>),
}

impl RowValue {
    /// Classify an untyped (`"text"`) string payload.
    ///
    /// Any `<` is taken to mean the author supplied markup. A literal `<`
    /// meant as text therefore goes out unescaped; use `"type": "plain"` to
    /// force formatting.
    pub fn from_legacy_text(text: String) -> Self {
        if text.contains('<') {
            RowValue::RawHtml(text)
        } else {
            RowValue::Plain(text)
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RowValue::Plain(_) => "plain",
            RowValue::RawHtml(_) => "html",
            RowValue::Table(_) => "table",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RowError {
    #[error("row '{0}': table value must be an array of arrays")]
    NotAGrid(String),
    #[error("row '{0}': table cells must be strings, numbers or booleans")]
    BadCell(String),
    #[error("row '{0}': value must be a string, number or boolean")]
    NotText(String),
}

/// Row shape as it appears in the JSON document.
#[derive(Debug, Deserialize)]
struct RawRow {
    title: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    value: Value,
}

impl TryFrom<RawRow> for Row {
    type Error = RowError;

    fn try_from(raw: RawRow) -> Result<Self, Self::Error> {
        let title = raw.title;
        let value = match raw.kind.as_deref() {
            Some("table") => RowValue::Table(parse_grid(&title, raw.value)?),
            Some("html") => RowValue::RawHtml(text_of(&title, raw.value)?),
            Some("plain") => RowValue::Plain(text_of(&title, raw.value)?),
            _ => RowValue::from_legacy_text(text_of(&title, raw.value)?),
        };
        Ok(Row { title, value })
    }
}

/// Textual form of a scalar JSON value. Numbers and booleans keep their
/// literal spelling, `null` is empty.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn text_of(title: &str, value: Value) -> Result<String, RowError> {
    scalar_text(value).ok_or_else(|| RowError::NotText(title.to_string()))
}

fn parse_grid(title: &str, value: Value) -> Result<Vec<Vec<String>>, RowError> {
    let Value::Array(rows) = value else {
        return Err(RowError::NotAGrid(title.to_string()));
    };
    rows.into_iter()
        .map(|row| {
            let Value::Array(cells) = row else {
                return Err(RowError::NotAGrid(title.to_string()));
            };
            cells
                .into_iter()
                .map(|cell| scalar_text(cell).ok_or_else(|| RowError::BadCell(title.to_string())))
                .collect()
        })
        .collect()
}

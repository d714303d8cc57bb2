//! Shared test utilities for the profile-page test suite.
//!
//! Provides row and document builders plus an on-disk fixture profile.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_profile(tmp.path());
//! let report = build(tmp.path(), &tmp.path().join("dist"), secrets()).unwrap();
//! ```

use std::fs;
use std::path::Path;

use crate::load::Secrets;
use crate::types::{Contact, Document, Row, RowValue, Section};

// =========================================================================
// Builders
// =========================================================================

pub fn secrets() -> Secrets {
    Secrets {
        email: "jane@example.com".to_string(),
        phone: "+39 345 123 7212".to_string(),
    }
}

pub fn plain_row(title: &str, value: &str) -> Row {
    Row {
        title: title.to_string(),
        value: RowValue::Plain(value.to_string()),
    }
}

pub fn table_row(title: &str, grid: &[&[&str]]) -> Row {
    Row {
        title: title.to_string(),
        value: RowValue::Table(
            grid.iter()
                .map(|cells| cells.iter().map(|c| c.to_string()).collect())
                .collect(),
        ),
    }
}

/// Finalized document for "Jane Doe" in Rome with the given sections.
pub fn document_with(sections: Vec<Section>) -> Document {
    let secrets = secrets();
    Document {
        name: "Jane Doe".to_string(),
        contact: Contact {
            email: secrets.email,
            phone: secrets.phone,
            location: "Rome, Italy".to_string(),
        },
        sections,
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

pub const FIXTURE_DATA: &str = r#"{
  "name": "Jane Doe",
  "contact": { "email": "ignored@example.com", "phone": "000", "location": "Rome, Italy" },
  "sections": [
    {
      "title": "Skills",
      "blocks": [
        {
          "rows": [
            { "title": "Skill", "type": "text", "value": "Go" },
            { "title": "Grid", "type": "table", "value": [["a", "b"], ["c", "d"]] }
          ]
        }
      ]
    }
  ]
}
"#;

pub const FIXTURE_TEMPLATE: &str =
    "<!DOCTYPE html><html><head><title>{{name}}</title></head><body>{{content}}</body></html>\n";

/// Write `data.json`, `template.html` and `style.css` into `dir`.
pub fn write_profile(dir: &Path) {
    fs::write(dir.join("data.json"), FIXTURE_DATA).unwrap();
    fs::write(dir.join("template.html"), FIXTURE_TEMPLATE).unwrap();
    fs::write(dir.join("style.css"), "body { margin: 0; }\n").unwrap();
}

//! Input loading: profile document, template, and contact secrets.
//!
//! Email and phone are supplied through the environment so they never live in
//! the data file. Both must be present and non-blank or nothing is built.

use crate::config::SiteConfig;
use crate::types::{Document, DocumentSource};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EMAIL_VAR: &str = "PII_EMAIL";
pub const PHONE_VAR: &str = "PII_PHONE";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("missing required environment variable(s): {}", .0.join(", "))]
    MissingSecrets(Vec<&'static str>),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid profile document {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Contact values that must not come from the data document.
#[derive(Debug, Clone, PartialEq)]
pub struct Secrets {
    pub email: String,
    pub phone: String,
}

impl Secrets {
    /// Read `PII_EMAIL` and `PII_PHONE` from the process environment.
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve secrets through an arbitrary lookup. Blank values count as
    /// missing; every missing key is reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        match (fetch(EMAIL_VAR), fetch(PHONE_VAR)) {
            (Some(email), Some(phone)) => Ok(Self { email, phone }),
            (email, phone) => {
                let mut missing = Vec::new();
                if email.is_none() {
                    missing.push(EMAIL_VAR);
                }
                if phone.is_none() {
                    missing.push(PHONE_VAR);
                }
                Err(LoadError::MissingSecrets(missing))
            }
        }
    }
}

/// Everything a build needs, read fully into memory.
#[derive(Debug)]
pub struct Inputs {
    pub document: Document,
    pub template: String,
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse the JSON profile document at `path`.
pub fn load_document_source(path: &Path) -> Result<DocumentSource, LoadError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| LoadError::Document {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the document and template named by `config` from `source_dir` and
/// merge in `secrets`.
///
/// Secrets are taken as an argument so the caller can fail on them before any
/// file is opened.
pub fn load_inputs(
    source_dir: &Path,
    config: &SiteConfig,
    secrets: Secrets,
) -> Result<Inputs, LoadError> {
    let data_path = source_dir.join(&config.data);
    let source = load_document_source(&data_path)?;
    log::debug!(
        "loaded {} with {} section(s)",
        data_path.display(),
        source.sections.len()
    );
    let template = read(&source_dir.join(&config.template))?;
    Ok(Inputs {
        document: Document::finalize(source, secrets),
        template,
    })
}

//! CLI output formatting for build and check.
//!
//! Output is an inventory of what was rendered: sections with their row
//! counts, then the files written. Each command has a `format_*` function
//! (returns `Vec<String>`, no I/O) and a `print_*` wrapper that writes to
//! stdout.
//!
//! ## Build
//!
//! ```text
//! Sections
//! 001 Experience (4 rows)
//! 002 Skills (2 rows)
//!
//! Files
//!     index.html
//!     style.css
//!     favicon.ico
//!
//! Generated 2 sections, 6 rows, 1 asset
//! ```

use crate::generate::{BuildReport, SectionSummary};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn section_lines(sections: &[SectionSummary]) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];
    for (i, section) in sections.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            section.title,
            plural(section.rows, "row")
        ));
    }
    lines
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format build output: section inventory, written files, totals.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = section_lines(&report.sections);

    lines.push(String::new());
    lines.push("Files".to_string());
    lines.push(format!("    {}", file_name(&report.page_path)));
    lines.push(format!("    {}", file_name(&report.stylesheet_path)));
    for asset in &report.assets {
        lines.push(format!("    {}", asset.display()));
    }

    if !report.missing_markers.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Warning: template has no {}",
            report.missing_markers.join(", ")
        ));
    }

    let rows: usize = report.sections.iter().map(|s| s.rows).sum();
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(report.sections.len(), "section"),
        plural(rows, "row"),
        plural(report.assets.len(), "asset")
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

/// Format check output: section inventory and marker status.
pub fn format_check_output(sections: &[SectionSummary], missing_markers: &[String]) -> Vec<String> {
    let mut lines = section_lines(sections);
    lines.push(String::new());
    if missing_markers.is_empty() {
        lines.push("Template: all markers present".to_string());
    } else {
        lines.push(format!("Template: missing {}", missing_markers.join(", ")));
    }
    lines
}

pub fn print_check_output(sections: &[SectionSummary], missing_markers: &[String]) {
    for line in format_check_output(sections, missing_markers) {
        println!("{}", line);
    }
}

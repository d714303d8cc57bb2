//! Inline text formatting for row values and table cells.
//!
//! A deliberately tiny markup: `*bold*`, `_italic_` and newlines. Escaping runs
//! first so the only tags in the output are the ones this module inserts.
//!
//! | Input         | Output                |
//! |---------------|-----------------------|
//! | `*Rust*`      | `<strong>Rust</strong>` |
//! | `_2019_`      | `<em>2019</em>`       |
//! | `a\nb`        | `a<br>b`              |
//! | `a < b`       | `a &lt; b`            |
//!
//! Delimiter runs cannot span a second delimiter of the same kind, so
//! `*a* and *b*` yields two bold spans and same-kind markers never nest.
//! Underscores inside identifiers (`snake_case_name`) are read as italics.

use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("bold pattern is valid"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_]+)_").expect("italic pattern is valid"));

/// Escape the five HTML metacharacters.
///
/// Not idempotent: escaping `&amp;` again yields `&amp;amp;`. Callers escape
/// raw text exactly once.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render author text as an HTML fragment: escape, then bold, italic and
/// line breaks, in that order.
pub fn format(text: &str) -> String {
    let escaped = escape_html(text);
    let bold = BOLD.replace_all(&escaped, "<strong>${1}</strong>");
    let italic = ITALIC.replace_all(&bold, "<em>${1}</em>");
    italic.replace('\n', "<br>")
}

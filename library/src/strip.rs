//! Removal of the Project Gutenberg license header and footer.

use std::sync::LazyLock;

use regex::Regex;

static START_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*\* ?START OF .*PROJECT GUTENBERG.*\*\*\*[^\n]*(\n|$)")
        .expect("valid start marker regex")
});

static END_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*\* ?END OF .*PROJECT GUTENBERG.*\*\*\*").expect("valid end marker regex")
});

/// Strip everything up to and including the `*** START OF ... ***` line, and
/// everything from the `*** END OF ... ***` line onward.
///
/// Markers are matched at line starts only, so a book quoting the marker text
/// mid-line is left intact. Text without markers is returned unchanged.
#[must_use]
pub fn strip_gutenberg_boilerplate(text: &str) -> &str {
    let mut body = text;

    if let Some(m) = START_MARKER.find(body) {
        body = &body[m.end()..];
    }
    if let Some(m) = END_MARKER.find(body) {
        body = &body[..m.start()];
    }

    body
}

//! Truncation of a paragraph that does not fit the remaining budget.

use bop_measure::{Measurer, TokenCount};
use bop_types::{MeasureMode, PARAGRAPH_SEPARATOR, SEPARATOR_CHARS, take_chars};

/// Truncate `paragraph` to fit `remaining` budget units, separator included.
///
/// In `chars` mode the result is a character prefix followed by the separator,
/// exactly `remaining` characters long. In `tokens` mode whole words are kept
/// greedily while their summed cost fits, then joined with single spaces.
///
/// Returns an empty string when nothing fits: `remaining < 2` in `chars`
/// mode, or no first word fits in `tokens` mode. With exactly 2 characters
/// left the result is the bare separator.
pub fn split_partial<C: TokenCount>(
    paragraph: &str,
    remaining: usize,
    measurer: &Measurer<C>,
) -> String {
    split_partial_sized(paragraph, remaining, measurer).0
}

/// [`split_partial`] plus the budget the result consumes.
pub(crate) fn split_partial_sized<C: TokenCount>(
    paragraph: &str,
    remaining: usize,
    measurer: &Measurer<C>,
) -> (String, usize) {
    match measurer.mode() {
        MeasureMode::Chars => {
            if remaining < SEPARATOR_CHARS {
                return (String::new(), 0);
            }
            let prefix = take_chars(paragraph, remaining - SEPARATOR_CHARS);
            let mut out = String::with_capacity(prefix.len() + PARAGRAPH_SEPARATOR.len());
            out.push_str(prefix);
            out.push_str(PARAGRAPH_SEPARATOR);
            let used = bop_types::char_len(prefix) + SEPARATOR_CHARS;
            (out, used)
        }
        MeasureMode::Tokens => {
            let mut kept: Vec<&str> = Vec::new();
            let mut used = 0usize;
            for word in paragraph.split_whitespace() {
                let cost = measurer.word_size(word);
                if used + cost > remaining {
                    break;
                }
                used += cost;
                kept.push(word);
            }
            if kept.is_empty() {
                return (String::new(), 0);
            }
            let mut out = kept.join(" ");
            out.push_str(PARAGRAPH_SEPARATOR);
            (out, used)
        }
    }
}

//! Core domain types for bop.
//!
//! This crate is intentionally pure: no IO, no async, no token counting.
//! Everything here is a value type whose invariants hold by construction.
//!
//! - [`Paragraph`]: trimmed, non-empty unit of source text
//! - [`MeasureMode`]: the unit a size budget is expressed in
//! - [`TargetBudget`]: a positive size paired with its mode
//! - [`parse_size`]: `"100k"` / `"1.5m"` style size strings

mod budget;
mod size;
mod text;

use thiserror::Error;

pub use budget::{BudgetError, MeasureMode, TargetBudget};
pub use size::{SizeParseError, parse_size};
pub use text::{char_len, format_number, take_chars};

/// Separator appended after every paragraph in generated text.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Length of [`PARAGRAPH_SEPARATOR`] in characters.
pub const SEPARATOR_CHARS: usize = 2;

// ============================================================================
// Paragraph
// ============================================================================

/// A paragraph of source text: trimmed of surrounding whitespace and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Paragraph(String);

#[derive(Debug, Error)]
#[error("paragraph must not be empty")]
pub struct EmptyParagraphError;

impl Paragraph {
    /// Trim `value` and wrap it, rejecting whitespace-only input.
    pub fn new(value: impl AsRef<str>) -> Result<Self, EmptyParagraphError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            Err(EmptyParagraphError)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Paragraph {
    type Error = EmptyParagraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Paragraph {
    type Error = EmptyParagraphError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Paragraph> for String {
    fn from(value: Paragraph) -> Self {
        value.0
    }
}

impl std::ops::Deref for Paragraph {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for Paragraph {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Paragraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

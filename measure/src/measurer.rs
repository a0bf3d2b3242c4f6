//! Mode-aware paragraph measurement.
//!
//! The three callers measure slightly different things:
//!
//! | Caller | `chars` | `tokens` |
//! |--------|---------|----------|
//! | pool sizing ([`Measurer::pool_size`]) | paragraph characters | paragraph tokens |
//! | accumulation ([`Measurer::step_size`]) | paragraph characters + separator | paragraph tokens |
//! | partial split ([`Measurer::word_size`]) | n/a | tokens of `word + " "` |

use bop_types::{MeasureMode, SEPARATOR_CHARS, char_len};

use crate::token_counter::TokenCount;

#[derive(Debug, Clone, Copy)]
pub struct Measurer<C> {
    mode: MeasureMode,
    counter: C,
}

impl<C: TokenCount> Measurer<C> {
    pub fn new(mode: MeasureMode, counter: C) -> Self {
        Self { mode, counter }
    }

    #[must_use]
    pub fn mode(&self) -> MeasureMode {
        self.mode
    }

    #[must_use]
    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Size of a paragraph when totalling the pool. The separator is not counted.
    #[must_use]
    pub fn pool_size(&self, paragraph: &str) -> usize {
        self.text_size(paragraph)
    }

    /// Size a paragraph consumes from the budget when appended to the output.
    ///
    /// In `chars` mode this reserves room for the paragraph separator.
    #[must_use]
    pub fn step_size(&self, paragraph: &str) -> usize {
        match self.mode {
            MeasureMode::Chars => char_len(paragraph) + SEPARATOR_CHARS,
            MeasureMode::Tokens => self.counter.count(paragraph),
        }
    }

    /// Token cost of one word of a truncated paragraph, measured with its trailing space.
    #[must_use]
    pub fn word_size(&self, word: &str) -> usize {
        let mut spaced = String::with_capacity(word.len() + 1);
        spaced.push_str(word);
        spaced.push(' ');
        self.counter.count(&spaced)
    }

    /// Size of arbitrary text in this measurer's mode.
    #[must_use]
    pub fn text_size(&self, text: &str) -> usize {
        match self.mode {
            MeasureMode::Chars => char_len(text),
            MeasureMode::Tokens => self.counter.count(text),
        }
    }
}

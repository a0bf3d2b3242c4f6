//! Token counting using tiktoken.
//!
//! Counts use the `cl100k_base` encoding. The count of a concatenation is not
//! guaranteed to equal the sum of the counts of its parts; budget accounting
//! sums per-paragraph counts.

use std::sync::OnceLock;
use tiktoken_rs::{CoreBPE, cl100k_base};

/// The tiktoken encoder is expensive to initialize (loads vocabulary data),
/// so we create it once and reuse it across all `TokenCounter` instances.
static ENCODER: OnceLock<Option<CoreBPE>> = OnceLock::new();

fn get_encoder() -> Option<&'static CoreBPE> {
    ENCODER.get_or_init(|| cl100k_base().ok()).as_ref()
}

/// A deterministic token oracle: same text, same count.
pub trait TokenCount {
    fn count(&self, text: &str) -> usize;
}

/// Thread-safe token counter using tiktoken's `cl100k_base` encoding.
///
/// Uses a singleton encoder instance for efficiency.
///
/// # Example
///
/// ```
/// use bop_measure::{TokenCount, TokenCounter};
///
/// let counter = TokenCounter::new();
/// assert!(counter.count("Hello, world!") > 0);
/// ```
#[derive(Clone, Copy)]
pub struct TokenCounter {
    encoder: Option<&'static CoreBPE>,
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("encoder", &self.encoder.as_ref().map(|_| "<CoreBPE>"))
            .finish()
    }
}

impl TokenCounter {
    #[must_use]
    pub fn new() -> Self {
        let encoder = get_encoder();
        if encoder.is_none() {
            tracing::error!(
                "Failed to initialize tiktoken cl100k_base encoder. Falling back to byte-length estimates."
            );
        }

        Self { encoder }
    }
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCount for TokenCounter {
    fn count(&self, text: &str) -> usize {
        match self.encoder {
            Some(encoder) => encoder.encode_ordinary(text).len(),
            None => text.len(),
        }
    }
}

/// Counts whitespace-delimited words. Cheap, exact and additive, which makes
/// it the counter of choice for tests that assert precise token totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCounter;

impl TokenCount for WordCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

impl<T: TokenCount + ?Sized> TokenCount for &T {
    fn count(&self, text: &str) -> usize {
        (**self).count(text)
    }
}

#[cfg(test)]
mod tests {
    use super::{TokenCount, TokenCounter, WordCounter};

    #[test]
    fn count_empty_string() {
        let counter = TokenCounter::new();
        assert_eq!(counter.count(""), 0);
    }

    #[test]
    fn count_simple_text() {
        let counter = TokenCounter::new();

        assert!(counter.count("Hello") >= 1);
        assert!(counter.count("Hello, world!") >= 1);
    }

    #[test]
    fn count_longer_text() {
        let counter = TokenCounter::new();

        let tokens = counter.count("The quick brown fox jumps over the lazy dog.");

        assert!(tokens >= 5);
        assert!(tokens <= 20);
    }

    #[test]
    fn multiple_counters_share_encoder() {
        let counter1 = TokenCounter::new();
        let counter2 = TokenCounter::default();

        let text = "It is a truth universally acknowledged";
        assert_eq!(counter1.count(text), counter2.count(text));
    }

    #[test]
    fn consistent_token_counts() {
        let counter = TokenCounter::new();
        let text = "Call me Ishmael. Some years ago, never mind how long precisely.";

        assert_eq!(counter.count(text), counter.count(text));
    }

    #[test]
    fn word_counter_counts_words() {
        assert_eq!(WordCounter.count(""), 0);
        assert_eq!(WordCounter.count("one"), 1);
        assert_eq!(WordCounter.count("one two\nthree\t four "), 4);
    }

    #[test]
    fn reference_delegates() {
        let counter = WordCounter;
        let by_ref: &dyn TokenCount = &counter;
        assert_eq!(by_ref.count("a b c"), 3);
    }
}

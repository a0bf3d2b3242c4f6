//! Size measurement for bop budgets.
//!
//! A budget is counted either in characters or in tokens. The token oracle is
//! behind the [`TokenCount`] trait so callers (and tests) can swap the real
//! tiktoken encoder for a deterministic stand-in.

mod measurer;
mod token_counter;

pub use measurer::Measurer;
pub use token_counter::{TokenCount, TokenCounter, WordCounter};

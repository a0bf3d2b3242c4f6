//! Size budget invariant types.
//!
//! A [`TargetBudget`] is always positive; zero is rejected at construction so
//! the assembly core never has to re-check it.

use thiserror::Error;

/// Unit a size budget is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeasureMode {
    /// Unicode scalar values.
    #[default]
    Chars,
    /// Language-model tokens.
    Tokens,
}

impl MeasureMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chars => "chars",
            Self::Tokens => "tokens",
        }
    }
}

impl std::fmt::Display for MeasureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("target size must be greater than zero")]
    Zero,
    #[error("target size {size} is too large for this platform")]
    TooLarge { size: u64 },
}

/// Validated target size: a positive integer paired with its [`MeasureMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetBudget {
    size: usize,
    mode: MeasureMode,
}

impl TargetBudget {
    pub fn new(size: u64, mode: MeasureMode) -> Result<Self, BudgetError> {
        if size == 0 {
            return Err(BudgetError::Zero);
        }
        let size = usize::try_from(size).map_err(|_| BudgetError::TooLarge { size })?;
        Ok(Self { size, mode })
    }

    #[must_use]
    pub const fn size(self) -> usize {
        self.size
    }

    #[must_use]
    pub const fn mode(self) -> MeasureMode {
        self.mode
    }

    /// Pool size at which the builder stops fetching sources: `size × factor`.
    #[must_use]
    pub fn pool_threshold(self, factor: f64) -> f64 {
        self.size as f64 * factor
    }
}

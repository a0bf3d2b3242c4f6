//! Cyclic paragraph accumulation under a size budget.

use bop_measure::{Measurer, TokenCount};
use bop_types::{PARAGRAPH_SEPARATOR, TargetBudget};

use crate::error::AssembleError;
use crate::partial::split_partial_sized;
use crate::pool::Pool;
use crate::start::StartIndex;

/// Output of one accumulation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulated {
    pub text: String,
    /// Pool index the walk started from.
    pub start: usize,
    /// Budget consumed, in the budget's mode. Never exceeds the target.
    pub size: usize,
    /// Whole paragraphs appended.
    pub whole: usize,
    /// Whether the text is a truncated first paragraph.
    pub partial: bool,
}

/// Walk `pool` from a chosen start, appending whole paragraphs while they fit.
///
/// The walk stops at the first paragraph that would overflow the target, or
/// after one full cycle through the pool. If the very first paragraph already
/// overflows, a truncated fragment of it is returned instead (possibly empty).
///
/// # Errors
///
/// [`AssembleError::EmptyPool`] when the pool has no paragraphs.
pub fn accumulate<C, S>(
    pool: &Pool,
    budget: TargetBudget,
    counter: &C,
    start: &mut S,
) -> Result<Accumulated, AssembleError>
where
    C: TokenCount,
    S: StartIndex + ?Sized,
{
    if pool.is_empty() {
        return Err(AssembleError::EmptyPool);
    }

    let measurer = Measurer::new(budget.mode(), counter);
    let target = budget.size();
    let len = pool.len();
    let start = start.pick(len) % len;
    tracing::debug!(start, pool_len = len, target, mode = %budget.mode(), "Starting accumulation");

    let mut text = String::new();
    let mut accumulated = 0usize;
    let mut whole = 0usize;
    let mut partial = false;
    let mut cursor = start;

    for paragraph in pool.paragraphs()[start..]
        .iter()
        .chain(&pool.paragraphs()[..start])
    {
        let size = measurer.step_size(paragraph);

        if accumulated + size > target {
            if whole == 0 {
                let (fragment, used) =
                    split_partial_sized(paragraph, target - accumulated, &measurer);
                tracing::debug!(
                    index = cursor,
                    paragraph_size = size,
                    remaining = target - accumulated,
                    kept = used,
                    "First paragraph overflows, truncating"
                );
                partial = !fragment.is_empty();
                accumulated += used;
                text = fragment;
            } else {
                tracing::debug!(
                    index = cursor,
                    paragraph_size = size,
                    accumulated,
                    "Next paragraph overflows, stopping"
                );
            }
            break;
        }

        text.push_str(paragraph);
        text.push_str(PARAGRAPH_SEPARATOR);
        accumulated += size;
        whole += 1;
        tracing::debug!(index = cursor, paragraph_size = size, accumulated, "Appended paragraph");

        cursor = (cursor + 1) % len;
    }

    if whole == len {
        tracing::debug!(accumulated, target, "Pool exhausted before reaching target");
    }

    Ok(Accumulated {
        text,
        start,
        size: accumulated,
        whole,
        partial,
    })
}

//! Size-bounded text assembly from a pool of paragraphs.
//!
//! # Pipeline
//!
//! ```text
//! SourceSupplier --> PoolBuilder --> Pool --> accumulate --> String
//!                                               |
//!                                               +--> split_partial (first paragraph too big)
//! ```
//!
//! 1. **Pool building** ([`PoolBuilder`]) pulls raw source texts until the
//!    measured pool is at least `target × pool_factor`.
//! 2. **Accumulation** ([`accumulate`]) walks the pool cyclically from a
//!    randomly chosen start, appending whole paragraphs while they fit.
//! 3. **Partial split** ([`split_partial`]) truncates the first paragraph when
//!    even that one does not fit.
//!
//! # Invariant
//!
//! The budget consumed by the output never exceeds the target. Undershoot is
//! accepted when the pool runs out; overshoot never is.

mod accumulate;
mod error;
mod generator;
mod partial;
mod pool;
mod start;

pub use accumulate::{Accumulated, accumulate};
pub use error::{AssembleError, SourceError};
pub use generator::{Generated, Generator};
pub use partial::split_partial;
pub use pool::{Pool, PoolBuilder, SourceSupplier, split_paragraphs};
pub use start::{FixedStart, RandomStart, StartIndex};

//! Paragraph pool and the builder that fills it from sources.

use std::future::Future;

use bop_measure::{Measurer, TokenCount};
use bop_types::{Paragraph, TargetBudget};

use crate::error::{AssembleError, SourceError};

/// Supplies raw source texts, one per call.
///
/// Sources are independent draws: the same text may be returned more than once.
pub trait SourceSupplier {
    type Error: Into<SourceError>;

    fn next_source(&mut self) -> impl Future<Output = Result<String, Self::Error>>;
}

/// Split raw text on blank lines into trimmed, non-empty paragraphs.
///
/// `\r\n` line endings are normalised first so Windows-encoded sources split
/// the same way as Unix ones.
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    let normalized;
    let text = if text.contains('\r') {
        normalized = text.replace("\r\n", "\n");
        normalized.as_str()
    } else {
        text
    };

    text.split("\n\n")
        .filter_map(|chunk| Paragraph::new(chunk).ok())
        .collect()
}

/// Ordered, append-only sequence of paragraphs.
///
/// Indices are stable once assigned; growth never reorders existing entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    paragraphs: Vec<Paragraph>,
    sources: usize,
}

impl Pool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            sources: 0,
        }
    }

    /// Append the paragraphs of one source.
    pub fn push_source(&mut self, paragraphs: Vec<Paragraph>) {
        self.paragraphs.extend(paragraphs);
        self.sources += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    #[must_use]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Number of sources appended through [`Pool::push_source`].
    #[must_use]
    pub fn sources(&self) -> usize {
        self.sources
    }
}

/// Fetches sources until the pool is large enough for a budget.
#[derive(Debug, Clone, Copy)]
pub struct PoolBuilder {
    pool_factor: f64,
    max_sources: usize,
}

impl Default for PoolBuilder {
    fn default() -> Self {
        Self {
            pool_factor: Self::DEFAULT_POOL_FACTOR,
            max_sources: Self::DEFAULT_MAX_SOURCES,
        }
    }
}

impl PoolBuilder {
    pub const DEFAULT_POOL_FACTOR: f64 = 1.2;
    pub const DEFAULT_MAX_SOURCES: usize = 64;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Headroom over the target the pool must reach. Values below 1.0 are raised to 1.0.
    pub fn with_pool_factor(mut self, factor: f64) -> Self {
        self.pool_factor = if factor.is_finite() {
            factor.max(1.0)
        } else {
            Self::DEFAULT_POOL_FACTOR
        };
        self
    }

    /// Ceiling on source fetches for one build. Zero is raised to one.
    pub fn with_max_sources(mut self, max_sources: usize) -> Self {
        self.max_sources = max_sources.max(1);
        self
    }

    #[must_use]
    pub fn pool_factor(&self) -> f64 {
        self.pool_factor
    }

    #[must_use]
    pub fn max_sources(&self) -> usize {
        self.max_sources
    }

    /// Fetch sources until the pool's measured size reaches `target × pool_factor`.
    ///
    /// Sources yielding no paragraphs are tolerated; the loop simply fetches again.
    /// Fetch errors end the build immediately.
    pub async fn build<S, C>(
        &self,
        supplier: &mut S,
        budget: TargetBudget,
        counter: &C,
    ) -> Result<Pool, AssembleError>
    where
        S: SourceSupplier,
        C: TokenCount,
    {
        let measurer = Measurer::new(budget.mode(), counter);
        let threshold = budget.pool_threshold(self.pool_factor);
        let mut pool = Pool::new();
        let mut measured = 0usize;

        loop {
            if pool.sources() >= self.max_sources {
                return Err(AssembleError::SourcesExhausted {
                    attempts: pool.sources(),
                    measured,
                    required: threshold.ceil() as usize,
                });
            }

            let text = supplier
                .next_source()
                .await
                .map_err(|e| AssembleError::Source {
                    attempts: pool.sources() + 1,
                    source: e.into(),
                })?;

            let paragraphs = split_paragraphs(&text);
            let added: usize = paragraphs.iter().map(|p| measurer.pool_size(p)).sum();
            tracing::debug!(
                source_chars = text.len(),
                paragraphs = paragraphs.len(),
                measured = added,
                "Source split into paragraphs"
            );

            measured += added;
            pool.push_source(paragraphs);

            if measured as f64 >= threshold {
                break;
            }
            tracing::debug!(
                measured,
                required = threshold,
                "Pool below threshold, fetching another source"
            );
        }

        tracing::debug!(
            paragraphs = pool.len(),
            sources = pool.sources(),
            measured,
            mode = %budget.mode(),
            "Pool ready"
        );
        Ok(pool)
    }
}

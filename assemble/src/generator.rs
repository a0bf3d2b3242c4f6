use bop_measure::TokenCount;
use bop_types::TargetBudget;

use crate::accumulate::accumulate;
use crate::error::AssembleError;
use crate::pool::{Pool, PoolBuilder, SourceSupplier};
use crate::start::StartIndex;

/// Text produced by one [`Generator::generate`] call, with pool statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub text: String,
    pub start: usize,
    pub pool_len: usize,
    pub sources: usize,
    /// Budget consumed, in the budget's mode.
    pub size: usize,
    pub partial: bool,
}

/// Pool building followed by accumulation.
///
/// The pool is request-scoped: each call builds a fresh one.
#[derive(Debug, Clone)]
pub struct Generator<C> {
    counter: C,
    builder: PoolBuilder,
}

impl<C: TokenCount> Generator<C> {
    pub fn new(counter: C) -> Self {
        Self {
            counter,
            builder: PoolBuilder::default(),
        }
    }

    #[must_use]
    pub fn with_builder(mut self, builder: PoolBuilder) -> Self {
        self.builder = builder;
        self
    }

    #[must_use]
    pub fn builder(&self) -> &PoolBuilder {
        &self.builder
    }

    /// Build a pool and accumulate from it in one step.
    pub async fn generate<S, I>(
        &self,
        supplier: &mut S,
        budget: TargetBudget,
        start: &mut I,
    ) -> Result<Generated, AssembleError>
    where
        S: SourceSupplier,
        I: StartIndex + ?Sized,
    {
        let pool = self.build_pool(supplier, budget).await?;
        self.assemble(&pool, budget, start)
    }

    pub async fn build_pool<S: SourceSupplier>(
        &self,
        supplier: &mut S,
        budget: TargetBudget,
    ) -> Result<Pool, AssembleError> {
        self.builder.build(supplier, budget, &self.counter).await
    }

    /// Accumulate from an already built pool.
    pub fn assemble<I: StartIndex + ?Sized>(
        &self,
        pool: &Pool,
        budget: TargetBudget,
        start: &mut I,
    ) -> Result<Generated, AssembleError> {
        let out = accumulate(pool, budget, &self.counter, start)?;

        tracing::debug!(
            sources = pool.sources(),
            paragraphs = pool.len(),
            start = out.start,
            size = out.size,
            partial = out.partial,
            "Generated text"
        );

        Ok(Generated {
            text: out.text,
            start: out.start,
            pool_len: pool.len(),
            sources: pool.sources(),
            size: out.size,
            partial: out.partial,
        })
    }
}

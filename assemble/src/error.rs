use thiserror::Error;

/// Boxed error from a source supplier.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("paragraph pool is empty")]
    EmptyPool,
    #[error("failed to fetch source #{attempts}")]
    Source {
        attempts: usize,
        #[source]
        source: SourceError,
    },
    #[error(
        "gave up after {attempts} sources: pool measures {measured}, needs at least {required}"
    )]
    SourcesExhausted {
        attempts: usize,
        measured: usize,
        required: usize,
    },
}

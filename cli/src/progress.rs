use std::io::Write;

use bop_assemble::SourceSupplier;

/// Prints one `.` to stderr for every source fetched after the first.
///
/// The caller prints the leading "Fetching text..." itself.
pub struct Progress<S> {
    inner: S,
    fetched: usize,
}

impl<S> Progress<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, fetched: 0 }
    }

    pub fn fetched(&self) -> usize {
        self.fetched
    }
}

impl<S: SourceSupplier> SourceSupplier for Progress<S> {
    type Error = S::Error;

    async fn next_source(&mut self) -> Result<String, S::Error> {
        if self.fetched > 0 {
            // Dots are cosmetic; a closed stderr must not abort the fetch.
            let mut stderr = std::io::stderr().lock();
            let _ = stderr.write_all(b".");
            let _ = stderr.flush();
        }
        self.fetched += 1;
        self.inner.next_source().await
    }
}

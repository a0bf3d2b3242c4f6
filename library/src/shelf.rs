use bop_assemble::SourceSupplier;

use crate::catalog::{Book, CATALOG};
use crate::error::FetchError;
use crate::fetch::Library;

/// Supplies a uniformly random book per draw. Repeats are allowed.
#[derive(Debug)]
pub struct RandomShelf<'a> {
    library: &'a Library,
    books: &'a [Book],
    drawn: Vec<&'a str>,
}

impl<'a> RandomShelf<'a> {
    /// Shelf over the built-in catalog.
    pub fn new(library: &'a Library) -> Self {
        Self::with_books(library, CATALOG)
    }

    pub fn with_books(library: &'a Library, books: &'a [Book]) -> Self {
        Self {
            library,
            books,
            drawn: Vec::new(),
        }
    }

    /// Slugs drawn so far, in order.
    #[must_use]
    pub fn drawn(&self) -> &[&'a str] {
        &self.drawn
    }

    fn pick(&self) -> Result<&'a Book, FetchError> {
        if self.books.is_empty() {
            return Err(FetchError::EmptyCatalog);
        }
        Ok(&self.books[rand::random_range(0..self.books.len())])
    }
}

impl SourceSupplier for RandomShelf<'_> {
    type Error = FetchError;

    async fn next_source(&mut self) -> Result<String, FetchError> {
        let book = self.pick()?;
        tracing::debug!(book = book.slug, title = book.title, "Drew source");
        self.drawn.push(book.slug);
        self.library.fetch(book).await
    }
}

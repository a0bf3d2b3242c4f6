//! Source acquisition from Project Gutenberg.
//!
//! [`Library::fetch`] returns a book's text with the Gutenberg license
//! boilerplate removed. The first fetch of a book downloads it from the
//! configured mirror and stores it in a [`SourceCache`]; later fetches read the
//! cached copy back verbatim. [`RandomShelf`] plugs the library into the
//! assembly pipeline as a source supplier.

mod cache;
mod catalog;
mod error;
mod fetch;
mod shelf;
mod strip;

pub use cache::SourceCache;
pub use catalog::{Book, CATALOG, find_book};
pub use error::FetchError;
pub use fetch::{DEFAULT_MIRROR, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, Library, LibrarySettings};
pub use shelf::RandomShelf;
pub use strip::strip_gutenberg_boilerplate;

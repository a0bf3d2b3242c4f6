//! Shared test utilities and fixtures
//!
//! A mock Gutenberg mirror serving synthetic books in the real file layout,
//! license header and footer included.

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use bop_library::{Book, CATALOG, Library, LibrarySettings, SourceCache};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

/// Paragraphs of a synthetic book: `"{slug} paragraph {i}: ..."`.
pub fn book_paragraphs(book: &Book, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{} paragraph {i}: it was a dark and stormy night.", book.slug))
        .collect()
}

/// Wrap a body in Gutenberg's license header and footer.
pub fn gutenberg_file(book: &Book, body: &str) -> String {
    let title = book.title.to_uppercase();
    format!(
        "The Project Gutenberg eBook of {title}\n\
         \n\
         This eBook is for the use of anyone anywhere.\n\
         \n\
         *** START OF THE PROJECT GUTENBERG EBOOK {title} ***\n\
         \n\
         {body}\n\
         \n\
         *** END OF THE PROJECT GUTENBERG EBOOK {title} ***\n\
         \n\
         Updated editions will replace the previous one.\n"
    )
}

/// Serve `book` with `paragraphs` synthetic paragraphs, expecting `fetches` downloads.
pub async fn mount_book(
    server: &MockServer,
    book: &Book,
    paragraphs: usize,
    fetches: impl Into<Times>,
) {
    let body = book_paragraphs(book, paragraphs).join("\n\n");
    Mock::given(method("GET"))
        .and(path(format!("/{}", book.text_path())))
        .respond_with(ResponseTemplate::new(200).set_body_string(gutenberg_file(book, &body)))
        .expect(fetches)
        .mount(server)
        .await;
}

/// Mirror serving every catalog book, each downloadable at most once.
pub async fn start_mirror(paragraphs: usize) -> MockServer {
    let server = MockServer::start().await;
    for book in CATALOG {
        mount_book(&server, book, paragraphs, 0..=1).await;
    }
    server
}

pub fn library(server: &MockServer, cache_dir: &Path) -> Library {
    let settings = LibrarySettings::new(&server.uri())
        .expect("mock server uri is a valid mirror")
        .with_user_agent("bop-tests")
        .with_timeout(Duration::from_secs(5));
    Library::new(SourceCache::new(cache_dir), settings).expect("client builds")
}

//! Source cache behaviour across library instances.

use bop_library::{FetchError, find_book};

use crate::common::{library, mount_book};

#[tokio::test]
async fn cache_survives_a_new_library() {
    let server = wiremock::MockServer::start().await;
    let book = find_book("dracula").unwrap();
    mount_book(&server, book, 3, 1).await;
    let cache = tempfile::tempdir().unwrap();

    let first = library(&server, cache.path()).fetch(book).await.unwrap();
    let second = library(&server, cache.path()).fetch(book).await.unwrap();

    assert_eq!(first, second);
    assert!(first.contains("dracula paragraph 2"));
    assert!(!first.contains("START OF"));
}

#[tokio::test]
async fn clearing_forces_a_fresh_download() {
    let server = wiremock::MockServer::start().await;
    let book = find_book("emma").unwrap();
    mount_book(&server, book, 3, 2).await;
    let cache = tempfile::tempdir().unwrap();
    let library = library(&server, cache.path());

    library.fetch(book).await.unwrap();
    assert!(!library.cache().is_empty());

    assert_eq!(library.cache().ensure_clean().unwrap(), 1);
    assert!(library.cache().is_empty());

    library.fetch(book).await.unwrap();
    assert!(!library.cache().is_empty());
}

#[tokio::test]
async fn server_errors_propagate() {
    let server = wiremock::MockServer::start().await;
    let book = find_book("anthem").unwrap();
    let cache = tempfile::tempdir().unwrap();

    let err = library(&server, cache.path()).fetch(book).await.unwrap_err();

    assert!(matches!(err, FetchError::Http { status: 404, .. }), "{err:?}");
    assert!(err.to_string().contains("/cache/epub/1250/pg1250.txt"));
}

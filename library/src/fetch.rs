//! HTTP acquisition of book texts through the cache.

use std::time::Duration;

use url::Url;

use crate::cache::SourceCache;
use crate::catalog::Book;
use crate::error::FetchError;
use crate::strip::strip_gutenberg_boilerplate;

pub const DEFAULT_MIRROR: &str = "https://www.gutenberg.org";
pub const DEFAULT_USER_AGENT: &str = concat!("bop/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a [`Library`].
#[derive(Debug, Clone)]
pub struct LibrarySettings {
    mirror: Url,
    pub user_agent: String,
    pub timeout: Duration,
}

impl LibrarySettings {
    /// Settings for `mirror` with the default user agent and timeout.
    ///
    /// The mirror path is treated as a directory, so `https://host/gutenberg`
    /// and `https://host/gutenberg/` resolve books the same way.
    pub fn new(mirror: &str) -> Result<Self, FetchError> {
        let mut url = Url::parse(mirror).map_err(|source| FetchError::InvalidUrl {
            url: mirror.to_string(),
            source,
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            mirror: url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn mirror(&self) -> &Url {
        &self.mirror
    }

    /// Full URL of `book`'s plain-text edition on this mirror.
    pub fn book_url(&self, book: &Book) -> Result<Url, FetchError> {
        let path = book.text_path();
        self.mirror
            .join(&path)
            .map_err(|source| FetchError::InvalidUrl { url: path, source })
    }
}

/// Source acquisition: cached texts are returned verbatim, misses are fetched once.
#[derive(Debug, Clone)]
pub struct Library {
    client: reqwest::Client,
    cache: SourceCache,
    settings: LibrarySettings,
}

impl Library {
    pub fn new(cache: SourceCache, settings: LibrarySettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(settings.timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            cache,
            settings,
        })
    }

    #[must_use]
    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    #[must_use]
    pub fn settings(&self) -> &LibrarySettings {
        &self.settings
    }

    /// Text of `book` with Gutenberg boilerplate removed.
    ///
    /// Only the first call for a given book touches the network; the cleaned
    /// text is cached and later calls read it back unchanged.
    pub async fn fetch(&self, book: &Book) -> Result<String, FetchError> {
        if let Some(text) = self.cache.read(book.slug)? {
            tracing::debug!(book = book.slug, chars = text.len(), "Cache hit");
            return Ok(text);
        }

        let url = self.settings.book_url(book)?;
        tracing::debug!(book = book.slug, url = %url, "Cache miss, downloading");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let raw = response.text().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;
        let text = strip_gutenberg_boilerplate(&raw);
        tracing::debug!(
            book = book.slug,
            downloaded = raw.len(),
            kept = text.len(),
            "Downloaded source"
        );

        self.cache.write(book.slug, text)?;
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{Library, LibrarySettings};
    use crate::cache::SourceCache;
    use crate::catalog::Book;
    use crate::error::FetchError;

    const EMMA: Book = Book::new(158, "emma", "Emma");

    fn gutenberg_body(body: &str) -> String {
        format!(
            "Header\n*** START OF THE PROJECT GUTENBERG EBOOK EMMA ***\n{body}\n*** END OF THE PROJECT GUTENBERG EBOOK EMMA ***\nFooter\n"
        )
    }

    fn library(server: &MockServer, cache: &std::path::Path) -> Library {
        let settings = LibrarySettings::new(&server.uri())
            .unwrap()
            .with_user_agent("bop-test/1.0")
            .with_timeout(Duration::from_secs(5));
        Library::new(SourceCache::new(cache), settings).unwrap()
    }

    #[tokio::test]
    async fn second_fetch_is_served_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cache/epub/158/pg158.txt"))
            .and(header("user-agent", "bop-test/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(gutenberg_body("Emma.")))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let library = library(&server, dir.path());

        let first = library.fetch(&EMMA).await.unwrap();
        let second = library.fetch(&EMMA).await.unwrap();

        assert_eq!(first, "Emma.\n");
        assert_eq!(first, second);
        assert!(dir.path().join("emma.txt").exists());
    }

    #[tokio::test]
    async fn http_error_is_surfaced_and_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let library = library(&server, dir.path());

        let err = library.fetch(&EMMA).await.unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 404, .. }), "{err:?}");
        assert!(library.cache().is_empty());
    }

    #[tokio::test]
    async fn unreachable_mirror_is_a_network_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LibrarySettings::new("http://127.0.0.1:1")
            .unwrap()
            .with_timeout(Duration::from_secs(2));
        let library = Library::new(SourceCache::new(dir.path()), settings).unwrap();

        let err = library.fetch(&EMMA).await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn mirror_with_path_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gutenberg/cache/epub/158/pg158.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Plain text."))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let settings = LibrarySettings::new(&format!("{}/gutenberg", server.uri())).unwrap();
        let library = Library::new(SourceCache::new(dir.path()), settings).unwrap();

        assert_eq!(library.fetch(&EMMA).await.unwrap(), "Plain text.");
    }

    #[test]
    fn invalid_mirror_is_rejected() {
        let err = LibrarySettings::new("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn book_url_uses_mirror() {
        let settings = LibrarySettings::new("https://www.gutenberg.org").unwrap();
        assert_eq!(
            settings.book_url(&EMMA).unwrap().as_str(),
            "https://www.gutenberg.org/cache/epub/158/pg158.txt"
        );
    }
}

//! Config file -> resolved settings -> working library.

use std::path::Path;

use bop_config::{BopConfig, ResolvedConfig};
use bop_library::{Library, LibrarySettings, SourceCache, find_book};

use crate::common::mount_book;

#[tokio::test]
async fn config_file_points_library_at_mirror_and_cache() {
    let server = wiremock::MockServer::start().await;
    let book = find_book("little_women").unwrap();
    mount_book(&server, book, 4, 1).await;

    let home = tempfile::tempdir().unwrap();
    let config_path = home.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[cache]\ndir = \"~/texts\"\n\n[library]\nmirror = \"{}\"\ntimeout_seconds = 5\n",
            server.uri()
        ),
    )
    .unwrap();

    let config = BopConfig::load_from(&config_path).unwrap();
    let resolved = ResolvedConfig::resolve_with(config.as_ref(), Some(home.path()), None);
    assert_eq!(resolved.cache_dir, home.path().join("texts"));

    let settings = LibrarySettings::new(&resolved.mirror)
        .unwrap()
        .with_timeout(resolved.timeout);
    let library = Library::new(SourceCache::new(&resolved.cache_dir), settings).unwrap();

    let text = library.fetch(book).await.unwrap();
    assert!(text.contains("little_women paragraph 0"));
    assert!(home.path().join("texts").join("little_women.txt").exists());
}

#[test]
fn missing_config_resolves_to_defaults() {
    let home = tempfile::tempdir().unwrap();
    let config = BopConfig::load_from(&home.path().join("config.toml")).unwrap();
    let resolved = ResolvedConfig::resolve_with(config.as_ref(), Some(home.path()), None);

    assert_eq!(
        resolved.cache_dir,
        home.path().join(".booksonpaste").join("cache")
    );
    assert_eq!(resolved.default_file, Path::new("bop-output.txt"));
    assert_eq!(resolved.max_sources, 64);
}

//! Write-once plain-text cache, one file per book.
//!
//! Layout: `{root}/{slug}.txt`. Cached content is immutable per slug, so
//! concurrent writers of the same file are harmless: the atomic rename makes
//! the last writer win with a complete file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bop_utils::{AtomicWriteOptions, FileSyncPolicy, atomic_write_with_options};

use crate::error::FetchError;

const CACHE_EXTENSION: &str = "txt";

#[derive(Debug, Clone)]
pub struct SourceCache {
    root: PathBuf,
}

impl SourceCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{slug}.{CACHE_EXTENSION}"))
    }

    /// Cached text for `slug`, or `None` on a miss.
    pub fn read(&self, slug: &str) -> Result<Option<String>, FetchError> {
        let path = self.path_for(slug);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(FetchError::Cache { path, source }),
        }
    }

    /// Persist `text` for `slug`, creating the cache directory if needed.
    pub fn write(&self, slug: &str, text: &str) -> Result<(), FetchError> {
        let path = self.path_for(slug);
        let options = AtomicWriteOptions {
            file_sync: FileSyncPolicy::SkipSync,
        };
        atomic_write_with_options(&path, text.as_bytes(), options)
            .map_err(|source| FetchError::Cache { path, source })
    }

    /// True when the directory is missing or holds no cached texts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.cached_files().is_ok_and(|files| !files.is_empty())
    }

    /// Remove every cached text. Other files in the directory are left alone.
    ///
    /// Returns the number of files removed.
    pub fn clear(&self) -> Result<usize, FetchError> {
        let files = match self.cached_files() {
            Ok(files) => files,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(FetchError::Cache {
                    path: self.root.clone(),
                    source,
                });
            }
        };

        let mut removed = 0;
        for path in files {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(FetchError::Cache { path, source }),
            }
        }
        tracing::debug!(root = %self.root.display(), removed, "Cleared source cache");
        Ok(removed)
    }

    /// Clear the cache and make sure its directory exists.
    pub fn ensure_clean(&self) -> Result<usize, FetchError> {
        let removed = self.clear()?;
        fs::create_dir_all(&self.root).map_err(|source| FetchError::Cache {
            path: self.root.clone(),
            source,
        })?;
        Ok(removed)
    }

    fn cached_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == CACHE_EXTENSION) {
                files.push(path);
            }
        }
        Ok(files)
    }
}

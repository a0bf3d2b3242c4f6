//! `~/.booksonpaste/config.toml` loading.
//!
//! [`BopConfig`] mirrors the file: every field is optional. [`ResolvedConfig`]
//! applies defaults and environment overrides and is what the rest of the
//! program consumes.
//!
//! ```toml
//! [cache]
//! dir = "~/.cache/bop"
//!
//! [library]
//! mirror = "https://www.gutenberg.org"
//! user_agent = "bop/0.1"
//! timeout_seconds = 30
//!
//! [generate]
//! max_sources = 64
//! pool_factor = 1.2
//!
//! [output]
//! default_file = "bop-output.txt"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use bop_assemble::PoolBuilder;
use serde::Deserialize;
use thiserror::Error;

/// Overrides the cache directory from the config file.
pub const CACHE_DIR_ENV: &str = "BOP_CACHE_DIR";

const APP_DIR: &str = ".booksonpaste";
const CONFIG_FILE: &str = "config.toml";
const CACHE_SUBDIR: &str = "cache";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BopConfig {
    pub cache: Option<CacheConfig>,
    pub library: Option<LibraryConfig>,
    pub generate: Option<GenerateConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Directory for downloaded texts. `~/` is expanded.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Base URL of the Gutenberg mirror.
    pub mirror: Option<String>,
    pub user_agent: Option<String>,
    /// Request timeout in seconds. Default: 30.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Maximum sources fetched for one generation. Default: 64.
    pub max_sources: Option<usize>,
    /// Pool headroom over the target. Default: 1.2. Minimum: 1.0.
    pub pool_factor: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// File written by `--file` when no path is given.
    pub default_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl BopConfig {
    /// Load the user's config file. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(Some(config))
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR).join(CONFIG_FILE))
}

/// Concrete settings with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub cache_dir: PathBuf,
    pub mirror: String,
    /// `None` keeps the library's default user agent.
    pub user_agent: Option<String>,
    pub timeout: Duration,
    pub max_sources: usize,
    pub pool_factor: f64,
    pub default_file: PathBuf,
}

impl ResolvedConfig {
    pub const DEFAULT_MIRROR: &'static str = bop_library::DEFAULT_MIRROR;
    pub const DEFAULT_TIMEOUT_SECS: u64 = bop_library::DEFAULT_TIMEOUT.as_secs();
    pub const DEFAULT_MAX_SOURCES: usize = PoolBuilder::DEFAULT_MAX_SOURCES;
    pub const DEFAULT_POOL_FACTOR: f64 = PoolBuilder::DEFAULT_POOL_FACTOR;
    pub const DEFAULT_OUTPUT_FILE: &'static str = "bop-output.txt";

    /// Resolve against the real home directory and `BOP_CACHE_DIR`.
    #[must_use]
    pub fn resolve(config: Option<&BopConfig>) -> Self {
        let env_cache = std::env::var_os(CACHE_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::resolve_with(config, dirs::home_dir().as_deref(), env_cache)
    }

    /// Resolve with explicit home directory and cache override.
    #[must_use]
    pub fn resolve_with(
        config: Option<&BopConfig>,
        home: Option<&Path>,
        env_cache_dir: Option<PathBuf>,
    ) -> Self {
        let cache = config.and_then(|c| c.cache.as_ref());
        let library = config.and_then(|c| c.library.as_ref());
        let generate = config.and_then(|c| c.generate.as_ref());
        let output = config.and_then(|c| c.output.as_ref());

        let app_dir = home.map_or_else(|| PathBuf::from(APP_DIR), |h| h.join(APP_DIR));
        let cache_dir = env_cache_dir
            .or_else(|| cache.and_then(|c| c.dir.as_deref()).map(|d| expand_home(d, home)))
            .unwrap_or_else(|| app_dir.join(CACHE_SUBDIR));

        let mirror = library
            .and_then(|l| l.mirror.clone())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_MIRROR.to_string());
        let user_agent = library
            .and_then(|l| l.user_agent.clone())
            .filter(|ua| !ua.trim().is_empty());
        let timeout = Duration::from_secs(
            library
                .and_then(|l| l.timeout_seconds)
                .filter(|&secs| secs > 0)
                .unwrap_or(Self::DEFAULT_TIMEOUT_SECS),
        );

        let max_sources = match generate.and_then(|g| g.max_sources) {
            Some(0) => {
                tracing::warn!("generate.max_sources must be at least 1; using 1");
                1
            }
            Some(n) => n,
            None => Self::DEFAULT_MAX_SOURCES,
        };
        let pool_factor = match generate.and_then(|g| g.pool_factor) {
            Some(f) if f.is_finite() && f >= 1.0 => f,
            Some(f) => {
                tracing::warn!(
                    pool_factor = f,
                    "generate.pool_factor must be a finite number >= 1.0; using default"
                );
                Self::DEFAULT_POOL_FACTOR
            }
            None => Self::DEFAULT_POOL_FACTOR,
        };

        let default_file = output
            .and_then(|o| o.default_file.clone())
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_OUTPUT_FILE));

        Self {
            cache_dir,
            mirror,
            user_agent,
            timeout,
            max_sources,
            pool_factor,
            default_file,
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self::resolve_with(None, dirs::home_dir().as_deref(), None)
    }
}

fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

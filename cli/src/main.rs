//! bop - copy size-bounded text from public-domain classics.
//!
//! ```text
//! main() -> Cli::parse -> run()
//!             |
//!             +--> --clear: SourceCache::ensure_clean
//!             +--> Library + RandomShelf -> Generator -> deliver -> summary
//! ```
//!
//! Generation runs on a current-thread runtime racing Ctrl-C. Progress and the
//! summary go to stderr so stdout only ever carries generated text.

mod progress;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bop_assemble::{FixedStart, Generator, PoolBuilder, RandomStart};
use bop_config::{BopConfig, ResolvedConfig};
use bop_library::{Library, LibrarySettings, RandomShelf, SourceCache};
use bop_measure::{TokenCount, TokenCounter};
use bop_sinks::{Destination, SinkError, deliver, format_summary};
use bop_types::{MeasureMode, TargetBudget, char_len, parse_size};

use crate::progress::Progress;

const DEBUG_FILTER: &str = "warn,bop=debug,bop_assemble=debug,bop_library=debug,bop_measure=debug,bop_sinks=debug,bop_config=debug,bop_utils=debug";

#[derive(Debug, Parser)]
#[command(
    name = "bop",
    about = "BooksOnPaste (bop) - Generate text from classic books",
    version,
    after_help = "Examples:
  bop 100k               Copy 100,000 characters to clipboard
  bop -t 1m              Copy 1 million tokens to clipboard
  bop 50k -s             Output 50k characters to stdout
  bop -t 100 -f out.txt  Write 100 tokens to file
  bop 1m --new           Clear cache and generate new text
  bop --gen 100k         Just generate text without copying/saving
  bop --clear            Clear the cache without generating text
  bop 100k --debug       Show detailed progress information"
)]
struct Cli {
    /// Amount of text to generate (e.g. 100, 100k, 1m)
    #[arg(value_parser = parse_size, required_unless_present = "clear")]
    size: Option<u64>,

    /// Count in tokens instead of characters
    #[arg(short, long)]
    tokens: bool,

    /// Output to stdout instead of clipboard
    #[arg(short, long)]
    stdout: bool,

    /// Output to file (optional filename)
    #[arg(short, long, value_name = "PATH", num_args = 0..=1)]
    file: Option<Option<PathBuf>>,

    /// Clear cache and fetch new text
    #[arg(short, long)]
    new: bool,

    /// Just generate and display text without copying
    #[arg(short, long)]
    r#gen: bool,

    /// Clear the cache without generating text
    #[arg(short, long)]
    clear: bool,

    /// Show detailed progress information
    #[arg(short, long)]
    debug: bool,

    /// Start from this paragraph index instead of a random one
    #[arg(long, hide = true)]
    start: Option<usize>,
}

impl Cli {
    fn mode(&self) -> MeasureMode {
        if self.tokens {
            MeasureMode::Tokens
        } else {
            MeasureMode::Chars
        }
    }

    fn destination(&self, default_file: &Path) -> Destination {
        match &self.file {
            Some(Some(path)) => Destination::File(path.clone()),
            Some(None) => Destination::File(default_file.to_path_buf()),
            None if self.r#gen || self.stdout => Destination::Stdout,
            None => Destination::Clipboard,
        }
    }
}

fn init_tracing(debug: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { DEBUG_FILTER } else { "warn" }));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .with(env_filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: failed to start async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = runtime.block_on(async {
        tokio::select! {
            result = run(cli) => Some(result),
            Ok(()) = tokio::signal::ctrl_c() => None,
        }
    });

    match outcome {
        Some(Ok(())) => ExitCode::SUCCESS,
        Some(Err(err)) if is_broken_pipe(&err) => ExitCode::SUCCESS,
        Some(Err(err)) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
        None => {
            eprintln!("\nOperation cancelled.");
            ExitCode::FAILURE
        }
    }
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<SinkError>()
        .is_some_and(SinkError::is_broken_pipe)
}

fn load_config() -> ResolvedConfig {
    let config = match BopConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err}; using defaults");
            None
        }
    };
    ResolvedConfig::resolve(config.as_ref())
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config();
    let cache = SourceCache::new(&config.cache_dir);

    if cli.clear {
        clear_cache(&cache)?;
        return Ok(());
    }

    let size = cli
        .size
        .context("size argument is required unless using --clear")?;
    if cli.new {
        clear_cache(&cache)?;
    }

    let budget = TargetBudget::new(size, cli.mode())?;

    let mut settings = LibrarySettings::new(&config.mirror)?.with_timeout(config.timeout);
    if let Some(user_agent) = &config.user_agent {
        settings = settings.with_user_agent(user_agent);
    }
    let library = Library::new(cache, settings)?;

    let counter = TokenCounter::new();
    let generator = Generator::new(counter).with_builder(
        PoolBuilder::new()
            .with_pool_factor(config.pool_factor)
            .with_max_sources(config.max_sources),
    );

    eprint!("Fetching text...");
    let mut shelf = Progress::new(RandomShelf::new(&library));
    let pool = generator.build_pool(&mut shelf, budget).await;
    eprintln!();
    let pool = pool.context("failed to gather source text")?;
    tracing::debug!(
        sources = shelf.fetched(),
        paragraphs = pool.len(),
        "Source pool ready"
    );

    eprintln!("Generating...");
    let generated = match cli.start {
        Some(index) => generator.assemble(&pool, budget, &mut FixedStart(index))?,
        None => generator.assemble(&pool, budget, &mut RandomStart)?,
    };

    let text = generated.text;
    let chars = char_len(&text);
    let tokens = counter.count(&text);
    let destination = cli.destination(&config.default_file);

    match deliver(&text, &destination) {
        Ok(()) => eprintln!("{}", format_summary(chars, tokens, &destination)),
        Err(SinkError::Clipboard(err)) => {
            tracing::debug!(error = %err, "Clipboard unavailable");
            eprintln!("Failed to copy to clipboard, outputting to stdout:");
            deliver(&text, &Destination::Stdout)?;
            eprintln!("{}", format_summary(chars, tokens, &Destination::Stdout));
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

fn clear_cache(cache: &SourceCache) -> Result<()> {
    cache
        .ensure_clean()
        .with_context(|| format!("failed to clear cache at {}", cache.root().display()))?;
    eprintln!("Cache cleared.");
    Ok(())
}

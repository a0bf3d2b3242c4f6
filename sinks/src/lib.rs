//! Delivery of generated text and the one-line summary printed afterwards.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bop_types::format_number;
use bop_utils::{AtomicWriteOptions, FileSyncPolicy, atomic_write_with_options};
use thiserror::Error;

/// Where generated text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Clipboard,
    File(PathBuf),
    Stdout,
}

impl Destination {
    /// Summary icon for this destination.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Destination::Clipboard => "📋",
            Destination::File(_) => "📄",
            Destination::Stdout => "＞",
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to copy to clipboard")]
    Clipboard(#[source] arboard::Error),
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write to stdout")]
    Stdout(#[source] io::Error),
}

impl SinkError {
    /// True when stdout's reader went away, e.g. `bop 1k -s | head -1`.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, SinkError::Stdout(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

/// Send `text` to `destination`.
///
/// Clipboard failures are returned, not retried elsewhere; callers decide
/// whether to fall back to stdout.
pub fn deliver(text: &str, destination: &Destination) -> Result<(), SinkError> {
    match destination {
        Destination::Clipboard => copy_to_clipboard(text),
        Destination::File(path) => write_file(path, text),
        Destination::Stdout => write_stream(&mut io::stdout().lock(), text),
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<(), SinkError> {
    arboard::Clipboard::new()
        .and_then(|mut cb| cb.set_text(text))
        .map_err(SinkError::Clipboard)?;
    tracing::debug!(bytes = text.len(), "Copied to clipboard");
    Ok(())
}

/// Write `text` to `path` as UTF-8. The file is replaced atomically.
pub fn write_file(path: &Path, text: &str) -> Result<(), SinkError> {
    let options = AtomicWriteOptions {
        file_sync: FileSyncPolicy::SyncAll,
    };
    atomic_write_with_options(path, text.as_bytes(), options).map_err(|source| {
        SinkError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Wrote output file");
    Ok(())
}

/// Write `text` and a trailing newline to `out`, then flush.
pub fn write_stream<W: Write + ?Sized>(out: &mut W, text: &str) -> Result<(), SinkError> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.write_all(b"\n"))
        .and_then(|()| out.flush())
        .map_err(SinkError::Stdout)
}

/// `"📋 1,000 characters (200 tokens)"`.
#[must_use]
pub fn format_summary(chars: usize, tokens: usize, destination: &Destination) -> String {
    format!(
        "{} {} characters ({} tokens)",
        destination.icon(),
        format_number(chars),
        format_number(tokens)
    )
}

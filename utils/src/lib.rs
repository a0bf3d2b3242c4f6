//! Shared infrastructure utilities for bop.
//!
//! - **`atomic_write`**: crash-safe file persistence (temp + rename), used by the
//!   source cache and the file sink so readers never observe a half-written file.

pub mod atomic_write;

pub use atomic_write::{AtomicWriteOptions, FileSyncPolicy, atomic_write_with_options};

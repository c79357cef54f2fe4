//! Virtual file store abstraction for aish.
//!
//! The interpreter never touches real storage. Everything file-shaped goes
//! through the async [`FileStore`] capability; hosts plug in whatever backend
//! they have. [`MemoryFs`] is a complete in-memory implementation used by
//! unit tests and the demo host.

mod memory;

pub use memory::MemoryFs;

use aish_types::error::Result;
use async_trait::async_trait;

/// Asynchronous file storage capability consumed by the interpreter.
///
/// Operations return display-ready text: `list` produces a formatted
/// listing, `write` and `delete` produce one-line confirmations. Paths are
/// absolute; relative-path resolution is the caller's concern.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Read a file as text.
    async fn read(&self, path: &str) -> Result<String>;

    /// Write text to a file, returning a confirmation line.
    async fn write(&self, path: &str, content: &str) -> Result<String>;

    /// List a directory's entries, one per line, directories suffixed `/`.
    async fn list(&self, path: &str) -> Result<String>;

    /// Delete a file or empty directory, returning a confirmation line.
    async fn delete(&self, path: &str) -> Result<String>;

    /// Search file names for a query string.
    ///
    /// Part of the capability surface for hosts that expose it; no
    /// interpreter command currently invokes it.
    async fn search(&self, query: &str) -> Result<String>;
}

//! Demo content for the in-memory file store.

use aish_types::error::Result;
use aish_vfs::{FileStore, MemoryFs};

/// Seed the store with a small home directory and system files.
pub async fn populate_demo_fs(fs: &MemoryFs) -> Result<()> {
    fs.mkdir("/home/user")?;
    fs.mkdir("/home/user/programs")?;
    fs.mkdir("/etc")?;
    fs.mkdir("/tmp")?;

    fs.write(
        "/home/user/readme.txt",
        "Welcome to aish.\n\
         Type 'help' for commands, or just ask a question.",
    )
    .await?;
    fs.write(
        "/home/user/programs/hello.bas",
        "10 PRINT \"HELLO FROM AISH\"\n20 END",
    )
    .await?;
    fs.write("/etc/motd", "aish demo session").await?;
    fs.write("/etc/version", env!("CARGO_PKG_VERSION")).await?;

    Ok(())
}

//! Virtual file tree abstraction.
//!
//! The shell never touches host paths directly. A [`VirtualPathResolver`]
//! maps slash-rooted virtual paths onto physical paths under a sandbox root,
//! and a [`Vfs`] backend answers existence, listing, and read queries for
//! those physical paths. [`HostVfs`] talks to the real file system;
//! [`MemoryVfs`] keeps everything in memory for tests.

pub mod archive;
mod host;
mod memory;
mod resolver;

use std::path::Path;

use sandsh_types::error::Result;

pub use host::HostVfs;
pub use memory::MemoryVfs;
pub use resolver::{ParentPolicy, VirtualPathResolver, normalize_virtual, parent_of};

/// Kind of a file tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
}

/// Metadata for a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfsMetadata {
    pub kind: EntryKind,
    pub size: u64,
}

/// Read-only file system queries over physical paths.
pub trait Vfs {
    /// List the immediate children of a directory, in backend order.
    fn readdir(&self, path: &Path) -> Result<Vec<VfsEntry>>;

    /// Read a whole file.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Query metadata for a path.
    fn stat(&self, path: &Path) -> Result<VfsMetadata>;

    fn exists(&self, path: &Path) -> bool {
        self.stat(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.stat(path)
            .is_ok_and(|meta| meta.kind == EntryKind::Directory)
    }
}

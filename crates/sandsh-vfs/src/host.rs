//! Host-backed VFS over the extracted sandbox directory.

use std::fs;
use std::path::Path;

use sandsh_types::error::{Result, ShellError};

use crate::{EntryKind, Vfs, VfsEntry, VfsMetadata};

/// A [`Vfs`] that queries the real file system.
///
/// Paths are used as given; confining them to the sandbox is the resolver's
/// job.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostVfs;

impl HostVfs {
    pub fn new() -> Self {
        Self
    }
}

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

impl Vfs for HostVfs {
    fn readdir(&self, path: &Path) -> Result<Vec<VfsEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            // Follow symlinks so a linked directory lists as a directory.
            let meta = fs::metadata(entry.path()).or_else(|_| entry.metadata())?;
            entries.push(VfsEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind: kind_of(meta.file_type()),
                size: if meta.is_dir() { 0 } else { meta.len() },
            });
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        if path.is_dir() {
            return Err(ShellError::Vfs(format!(
                "is a directory: {}",
                path.display()
            )));
        }
        Ok(fs::read(path)?)
    }

    fn stat(&self, path: &Path) -> Result<VfsMetadata> {
        let meta = fs::metadata(path)?;
        Ok(VfsMetadata {
            kind: kind_of(meta.file_type()),
            size: if meta.is_dir() { 0 } else { meta.len() },
        })
    }
}

//! In-memory VFS implementation.
//!
//! Useful for unit tests that should not touch the disk. The tree lives in a
//! `BTreeMap<String, Node>` keyed by normalized `/`-separated paths, so a
//! resolver rooted at `/` maps virtual paths onto keys one to one.

use std::collections::BTreeMap;
use std::path::{Component, Path};

use sandsh_types::error::{Result, ShellError};

use crate::{EntryKind, Vfs, VfsEntry, VfsMetadata};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// A fully in-memory file tree.
#[derive(Debug)]
pub struct MemoryVfs {
    nodes: BTreeMap<String, Node>,
}

impl MemoryVfs {
    /// Create a tree containing only the root directory.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        Self { nodes }
    }

    /// Create a directory and any missing parents.
    pub fn mkdir(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let key = normalize(path.as_ref());
        match self.nodes.get(&key) {
            Some(Node::Dir) => return Ok(()),
            Some(Node::File(_)) => {
                return Err(ShellError::Vfs(format!("file exists: {key}")));
            },
            None => {},
        }
        let par = parent(&key).to_string();
        if par != key {
            self.mkdir(&par)?;
        }
        self.nodes.insert(key, Node::Dir);
        Ok(())
    }

    /// Create or replace a file. The parent directory must exist.
    pub fn write(&mut self, path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
        let key = normalize(path.as_ref());
        let par = parent(&key);
        if !matches!(self.nodes.get(par), Some(Node::Dir)) {
            return Err(ShellError::Vfs(format!(
                "parent directory does not exist: {par}"
            )));
        }
        if matches!(self.nodes.get(&key), Some(Node::Dir)) {
            return Err(ShellError::Vfs(format!("is a directory: {key}")));
        }
        self.nodes.insert(key, Node::File(data.to_vec()));
        Ok(())
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a path into a map key: `/`-separated, rooted, `.` dropped and
/// `..` applied lexically (never above the root).
fn normalize(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            },
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {},
        }
    }
    format!("/{}", parts.join("/"))
}

/// Return the parent of a normalized key.
fn parent(key: &str) -> &str {
    match key.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &key[..i],
    }
}

impl Vfs for MemoryVfs {
    fn readdir(&self, path: &Path) -> Result<Vec<VfsEntry>> {
        let key = normalize(path);
        match self.nodes.get(&key) {
            Some(Node::Dir) => {},
            Some(Node::File(_)) => {
                return Err(ShellError::Vfs(format!("not a directory: {key}")));
            },
            None => return Err(ShellError::Vfs(format!("no such directory: {key}"))),
        }

        let prefix = if key == "/" {
            key.clone()
        } else {
            format!("{key}/")
        };

        // Keys are sorted, so direct children form a contiguous run after
        // the prefix.
        let mut entries = Vec::new();
        for (child, node) in self.nodes.range(prefix.clone()..) {
            if !child.starts_with(&prefix) {
                break;
            }
            let rest = &child[prefix.len()..];
            if rest.is_empty() || rest.contains('/') {
                continue;
            }
            entries.push(VfsEntry {
                name: rest.to_string(),
                kind: match node {
                    Node::Dir => EntryKind::Directory,
                    Node::File(_) => EntryKind::File,
                },
                size: match node {
                    Node::File(data) => data.len() as u64,
                    Node::Dir => 0,
                },
            });
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let key = normalize(path);
        match self.nodes.get(&key) {
            Some(Node::File(data)) => Ok(data.clone()),
            Some(Node::Dir) => Err(ShellError::Vfs(format!("is a directory: {key}"))),
            None => Err(ShellError::Vfs(format!("no such file: {key}"))),
        }
    }

    fn stat(&self, path: &Path) -> Result<VfsMetadata> {
        let key = normalize(path);
        match self.nodes.get(&key) {
            Some(Node::File(data)) => Ok(VfsMetadata {
                kind: EntryKind::File,
                size: data.len() as u64,
            }),
            Some(Node::Dir) => Ok(VfsMetadata {
                kind: EntryKind::Directory,
                size: 0,
            }),
            None => Err(ShellError::Vfs(format!("no such path: {key}"))),
        }
    }
}

//! Virtual path resolution.
//!
//! Virtual paths are `/`-separated and rooted at `/` regardless of the host.
//! Resolution onto the sandbox root is lexical; the only file system access
//! is the existence checks delegated to a [`Vfs`].

use std::path::PathBuf;

use sandsh_types::error::{Result, ShellError};

use crate::{EntryKind, Vfs};

/// How `..` navigation treats the parent directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParentPolicy {
    /// Move to the parent without checking that it exists.
    #[default]
    Permissive,
    /// Move to the parent only if it is an existing directory.
    Verify,
}

/// Maps virtual paths onto physical paths under a sandbox root.
#[derive(Debug, Clone)]
pub struct VirtualPathResolver {
    root: PathBuf,
    parent_policy: ParentPolicy,
}

impl VirtualPathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            parent_policy: ParentPolicy::default(),
        }
    }

    pub fn with_parent_policy(mut self, policy: ParentPolicy) -> Self {
        self.parent_policy = policy;
        self
    }

    /// Map `target` (or `cwd` itself when `target` is `None`) onto a
    /// physical path.
    ///
    /// Absolute targets resolve from the sandbox root, relative targets from
    /// `cwd`. Empty segments are dropped; `.` and `..` are kept as-is.
    pub fn resolve_physical(&self, cwd: &str, target: Option<&str>) -> PathBuf {
        let mut path = self.root.clone();
        match target {
            None => push_segments(&mut path, cwd),
            Some(t) if t.starts_with('/') => push_segments(&mut path, t),
            Some(t) => {
                push_segments(&mut path, cwd);
                push_segments(&mut path, t);
            },
        }
        path
    }

    /// Like [`resolve_physical`](Self::resolve_physical), but `None` when the
    /// `..` segments would climb above the sandbox root.
    fn contained_physical(&self, cwd: &str, target: Option<&str>) -> Option<PathBuf> {
        let base = match target {
            Some(t) if t.starts_with('/') => "",
            _ => cwd,
        };
        let segments = base.split('/').chain(target.unwrap_or("").split('/'));
        let mut depth = 0usize;
        for segment in segments {
            match segment {
                "" | "." => {},
                ".." => depth = depth.checked_sub(1)?,
                _ => depth += 1,
            }
        }
        Some(self.resolve_physical(cwd, target))
    }

    /// Compute the directory `cd target` moves to from `cwd`.
    pub fn navigate(&self, vfs: &dyn Vfs, cwd: &str, target: &str) -> Result<String> {
        if target == ".." {
            let parent = parent_of(cwd);
            if self.parent_policy == ParentPolicy::Verify
                && !vfs.is_dir(&self.resolve_physical(&parent, None))
            {
                return Err(ShellError::DirectoryNotFound(target.to_string()));
            }
            log::debug!("navigate {cwd} -> {parent} (parent)");
            return Ok(parent);
        }

        let is_dir = self
            .contained_physical(cwd, Some(target))
            .is_some_and(|physical| vfs.is_dir(&physical));
        if !is_dir {
            return Err(ShellError::DirectoryNotFound(target.to_string()));
        }

        let joined = if target.starts_with('/') {
            format!("/{}", target.trim_matches('/'))
        } else {
            format!("{cwd}/{target}")
        };
        let next = normalize_virtual(&joined);
        log::debug!("navigate {cwd} -> {next}");
        Ok(next)
    }

    /// List the entry names of the directory `cwd` names.
    pub fn list_physical(&self, vfs: &dyn Vfs, cwd: &str) -> Result<Vec<String>> {
        self.list(vfs, cwd, None)
    }

    /// List the entry names of `target` (or `cwd` when `None`).
    ///
    /// Errors name the path the way the caller spelled it.
    pub fn list(&self, vfs: &dyn Vfs, cwd: &str, target: Option<&str>) -> Result<Vec<String>> {
        let shown = target.unwrap_or(cwd);
        let physical = self
            .contained_physical(cwd, target)
            .ok_or_else(|| ShellError::PathNotFound(shown.to_string()))?;
        let meta = vfs
            .stat(&physical)
            .map_err(|_| ShellError::PathNotFound(shown.to_string()))?;
        if meta.kind != EntryKind::Directory {
            return Err(ShellError::NotADirectory(shown.to_string()));
        }
        Ok(vfs
            .readdir(&physical)?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    /// Read the file `file` names relative to `cwd`.
    pub fn read_file(&self, vfs: &dyn Vfs, cwd: &str, file: &str) -> Result<Vec<u8>> {
        let physical = self
            .contained_physical(cwd, Some(file))
            .ok_or_else(|| ShellError::FileNotFound(file.to_string()))?;
        let meta = vfs
            .stat(&physical)
            .map_err(|_| ShellError::FileNotFound(file.to_string()))?;
        if meta.kind == EntryKind::Directory {
            return Err(ShellError::IsADirectory(file.to_string()));
        }
        vfs.read(&physical)
    }
}

fn push_segments(path: &mut PathBuf, virtual_path: &str) {
    for segment in virtual_path.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
}

/// Parent of a virtual directory. The parent of `/` is `/`.
pub fn parent_of(cwd: &str) -> String {
    let trimmed = cwd.trim_end_matches('/');
    let parent = match trimmed.rfind('/') {
        Some(i) => trimmed[..i].trim_end_matches('/'),
        None => "",
    };
    if parent.is_empty() {
        "/".to_string()
    } else {
        parent.to_string()
    }
}

/// Collapse `.`, `..`, and repeated separators in a virtual path.
pub fn normalize_virtual(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

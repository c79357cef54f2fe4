//! In-memory file store implementation.
//!
//! The entire tree lives in a `BTreeMap<String, Node>` where keys are
//! normalized absolute paths. Used by unit tests and the demo host.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Mutex;

use aish_types::error::{AishError, Result};
use async_trait::async_trait;

use crate::FileStore;

#[derive(Debug, Clone)]
enum Node {
    File(String),
    Dir,
}

/// A fully in-memory file store.
///
/// Interior mutability lets the store sit behind an `Arc<dyn FileStore>`
/// shared with the interpreter; the lock is never held across an await.
#[derive(Debug)]
pub struct MemoryFs {
    nodes: Mutex<BTreeMap<String, Node>>,
}

impl MemoryFs {
    /// Create a new store with only the root directory.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        Self {
            nodes: Mutex::new(nodes),
        }
    }

    /// Create a directory, creating missing parents as needed.
    ///
    /// The `mkdir` shell command is acknowledged without a capability call;
    /// this method exists for hosts seeding demo content and for tests.
    pub fn mkdir(&self, path: &str) -> Result<()> {
        let path = normalize(path).into_owned();
        let mut nodes = self.nodes.lock().expect("vfs lock poisoned");
        mkdir_inner(&mut nodes, &path);
        Ok(())
    }

    /// True when a file or directory exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        let path = normalize(path);
        let nodes = self.nodes.lock().expect("vfs lock poisoned");
        nodes.contains_key(path.as_ref())
    }
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

fn mkdir_inner(nodes: &mut BTreeMap<String, Node>, path: &str) {
    if nodes.contains_key(path) {
        return;
    }
    let par = parent(path).to_string();
    if par != path {
        mkdir_inner(nodes, &par);
    }
    nodes.insert(path.to_string(), Node::Dir);
}

/// Check whether a path is already in normal form (starts with `/`, no `//`,
/// no trailing `/` unless root).
fn is_normalized(path: &str) -> bool {
    if !path.starts_with('/') {
        return false;
    }
    if path.len() > 1 && path.ends_with('/') {
        return false;
    }
    !path.contains("//")
}

/// Normalize a path: ensure leading `/`, collapse `//`, strip trailing `/`
/// (except for root). Returns the input unchanged (zero-alloc) when already
/// in normal form.
fn normalize(path: &str) -> Cow<'_, str> {
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }
    let path_str = if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    };
    let mut result = String::with_capacity(path_str.len());
    let mut prev_slash = false;
    for ch in path_str.chars() {
        if ch == '/' {
            if !prev_slash {
                result.push(ch);
            }
            prev_slash = true;
        } else {
            result.push(ch);
            prev_slash = false;
        }
    }
    if result.len() > 1 && result.ends_with('/') {
        result.pop();
    }
    Cow::Owned(result)
}

/// Return the parent of a normalized path.
fn parent(path: &str) -> &str {
    if path == "/" {
        return "/";
    }
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => "/",
    }
}

#[async_trait]
impl FileStore for MemoryFs {
    async fn read(&self, path: &str) -> Result<String> {
        let path = normalize(path);
        let nodes = self.nodes.lock().expect("vfs lock poisoned");
        match nodes.get(path.as_ref()) {
            Some(Node::File(content)) => Ok(content.clone()),
            Some(Node::Dir) => Err(AishError::Vfs(format!("is a directory: {path}"))),
            None => Err(AishError::Vfs(format!("no such file: {path}"))),
        }
    }

    async fn write(&self, path: &str, content: &str) -> Result<String> {
        let path = normalize(path).into_owned();
        let mut nodes = self.nodes.lock().expect("vfs lock poisoned");
        let par = parent(&path);
        if !nodes.contains_key(par) {
            return Err(AishError::Vfs(format!(
                "parent directory does not exist: {par}"
            )));
        }
        if matches!(nodes.get(&path), Some(Node::Dir)) {
            return Err(AishError::Vfs(format!("is a directory: {path}")));
        }
        let bytes = content.len();
        nodes.insert(path.clone(), Node::File(content.to_string()));
        Ok(format!("Wrote {bytes} bytes to {path}"))
    }

    async fn list(&self, path: &str) -> Result<String> {
        let path = normalize(path);
        let nodes = self.nodes.lock().expect("vfs lock poisoned");
        match nodes.get(path.as_ref()) {
            Some(Node::Dir) => {},
            Some(Node::File(_)) => {
                return Err(AishError::Vfs(format!("not a directory: {path}")));
            },
            None => {
                return Err(AishError::Vfs(format!("no such directory: {path}")));
            },
        }

        let prefix = if path.as_ref() == "/" {
            "/".to_string()
        } else {
            format!("{path}/")
        };

        // BTreeMap iteration is sorted by key, so entries come out in
        // lexicographic order; range narrows the scan to the subtree.
        let mut lines = Vec::new();
        for (key, node) in nodes.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            // Direct child only: non-empty name with no `/` after the prefix.
            let rest = &key[prefix.len()..];
            if !rest.is_empty() && !rest.contains('/') {
                match node {
                    Node::Dir => lines.push(format!("{rest}/")),
                    Node::File(_) => lines.push(rest.to_string()),
                }
            }
        }
        if lines.is_empty() {
            return Ok("(empty)".to_string());
        }
        Ok(lines.join("\n"))
    }

    async fn delete(&self, path: &str) -> Result<String> {
        let path = normalize(path).into_owned();
        let mut nodes = self.nodes.lock().expect("vfs lock poisoned");
        if path == "/" {
            return Err(AishError::Vfs("cannot remove root".to_string()));
        }
        match nodes.get(&path) {
            Some(Node::Dir) => {
                let prefix = format!("{path}/");
                let has_children = nodes
                    .range(prefix.clone()..)
                    .next()
                    .is_some_and(|(k, _)| k.starts_with(&prefix));
                if has_children {
                    return Err(AishError::Vfs(format!("directory not empty: {path}")));
                }
            },
            Some(Node::File(_)) => {},
            None => {
                return Err(AishError::Vfs(format!("no such file: {path}")));
            },
        }
        nodes.remove(&path);
        Ok(format!("Deleted {path}"))
    }

    async fn search(&self, query: &str) -> Result<String> {
        let nodes = self.nodes.lock().expect("vfs lock poisoned");
        let matches: Vec<&str> = nodes
            .iter()
            .filter(|(path, node)| {
                matches!(node, Node::File(_))
                    && path.rsplit('/').next().is_some_and(|name| name.contains(query))
            })
            .map(|(path, _)| path.as_str())
            .collect();
        if matches.is_empty() {
            return Ok(format!("No matches for: {query}"));
        }
        Ok(matches.join("\n"))
    }
}

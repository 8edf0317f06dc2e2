//! The node store and its tree operations.
//!
//! All mutations are synchronous and atomic over a single
//! `BTreeMap<NodeId, FileNode>`: an operation either completes or returns
//! an error without touching the map. Ancestry walks are cycle-guarded
//! and fail closed instead of looping.

use std::collections::{BTreeMap, BTreeSet};

use aero_types::error::{AeroError, Result};
use aero_types::id::NodeId;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::node::{FileNode, NodeKind, copy_name, extension_of};

/// A fully in-memory file-system store.
///
/// The store exclusively owns every [`FileNode`]; queries hand out
/// borrowed reads only.
#[derive(Debug, Clone)]
pub struct FileStore {
    nodes: BTreeMap<NodeId, FileNode>,
    root: NodeId,
    next_id: u64,
    /// Logical creation clock (monotonic per store, not wall time).
    clock: u64,
}

/// Plain serializable form of a [`FileStore`] for best-effort persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsSnapshot {
    pub nodes: Vec<FileNode>,
    pub root: NodeId,
    pub next_id: u64,
    pub clock: u64,
}

impl FileStore {
    /// Create a store containing only a root folder with the given name.
    pub fn new(root_name: &str) -> Self {
        let root = NodeId(1);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            FileNode {
                id: root,
                parent: None,
                name: root_name.to_string(),
                kind: NodeKind::Folder,
                content: None,
                created_at: 0,
                size: None,
                extension: None,
                trashed: false,
                readonly: false,
            },
        );
        Self {
            nodes,
            root,
            next_id: 2,
            clock: 1,
        }
    }

    /// The root folder's id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of nodes, trashed included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- Queries --------------------------------------------------------------

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&FileNode> {
        self.nodes.get(&id)
    }

    /// Non-trashed direct children of `parent`, in stable (id) order.
    pub fn contents(&self, parent: NodeId) -> Result<Vec<&FileNode>> {
        let node = self.require(parent)?;
        if !node.is_folder() {
            return Err(AeroError::InvalidOperation(format!(
                "not a folder: {parent}"
            )));
        }
        Ok(self
            .nodes
            .values()
            .filter(|n| n.parent == Some(parent) && !n.trashed)
            .collect())
    }

    /// Every node currently carrying the trashed flag (the trash view).
    pub fn trash_contents(&self) -> Vec<&FileNode> {
        self.nodes.values().filter(|n| n.trashed).collect()
    }

    /// The ordered ancestor chain from the root to `id`, inclusive.
    ///
    /// Terminates even on a corrupted structure: a revisited id is an
    /// [`AeroError::Fault`], never an unbounded walk.
    pub fn path_of(&self, id: NodeId) -> Result<Vec<&FileNode>> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if !seen.insert(cur) {
                return Err(AeroError::Fault(format!("cycle in ancestry of {id}")));
            }
            let node = self
                .get(cur)
                .ok_or_else(|| AeroError::Fault(format!("dangling parent reference: {cur}")))?;
            chain.push(node);
            current = node.parent;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Resolve a single path segment relative to `current`.
    ///
    /// Supports `""`/`.` (self), `..` (parent; a root resolves to itself),
    /// and a case-insensitive match against a non-trashed child name.
    /// Multi-segment paths are the caller's business.
    pub fn resolve(&self, current: NodeId, segment: &str) -> Option<NodeId> {
        let node = self.get(current)?;
        match segment {
            "" | "." => Some(current),
            ".." => Some(node.parent.unwrap_or(current)),
            name => self
                .nodes
                .values()
                .find(|n| {
                    n.parent == Some(current) && !n.trashed && n.name.eq_ignore_ascii_case(name)
                })
                .map(|n| n.id),
        }
    }

    /// Query-time trash cascade: a node is effectively trashed if it or
    /// any ancestor carries the flag. Fails closed (treats a detected
    /// cycle as trashed).
    pub fn is_effectively_trashed(&self, id: NodeId) -> bool {
        let mut seen = BTreeSet::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if !seen.insert(cur) {
                warn!("cycle detected while checking trash state of {id}");
                return true;
            }
            match self.get(cur) {
                Some(node) if node.trashed => return true,
                Some(node) => current = node.parent,
                None => return false,
            }
        }
        false
    }

    /// Whether `ancestor` appears on `id`'s ancestor chain (or is `id`
    /// itself). Fails closed on a detected cycle.
    fn is_self_or_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut seen = BTreeSet::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            if !seen.insert(cur) {
                warn!("cycle detected while walking ancestry of {id}");
                return true;
            }
            current = self.get(cur).and_then(|n| n.parent);
        }
        false
    }

    // -- Mutations ------------------------------------------------------------

    /// Create a file under `parent`. `content` defaults to empty.
    pub fn create_file(
        &mut self,
        parent: NodeId,
        name: &str,
        content: Option<&str>,
    ) -> Result<NodeId> {
        self.check_create_parent(parent)?;
        check_name(name)?;
        let text = content.unwrap_or_default().to_string();
        let id = self.alloc_id();
        let stamp = self.tick();
        self.nodes.insert(
            id,
            FileNode {
                id,
                parent: Some(parent),
                name: name.to_string(),
                kind: NodeKind::File,
                size: Some(text.len() as u64),
                content: Some(text),
                created_at: stamp,
                extension: extension_of(name),
                trashed: false,
                readonly: false,
            },
        );
        debug!("created file {id} ({name}) under {parent}");
        Ok(id)
    }

    /// Create a folder under `parent`.
    pub fn create_folder(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.check_create_parent(parent)?;
        check_name(name)?;
        let id = self.alloc_id();
        let stamp = self.tick();
        self.nodes.insert(
            id,
            FileNode {
                id,
                parent: Some(parent),
                name: name.to_string(),
                kind: NodeKind::Folder,
                content: None,
                created_at: stamp,
                size: None,
                extension: None,
                trashed: false,
                readonly: false,
            },
        );
        debug!("created folder {id} ({name}) under {parent}");
        Ok(id)
    }

    /// Replace a file's content (and size). Refused for folders and
    /// read-only files.
    pub fn write_file(&mut self, id: NodeId, content: &str) -> Result<()> {
        let node = self.require(id)?;
        if !node.is_file() {
            return Err(AeroError::InvalidOperation(format!(
                "cannot write to a folder: {id}"
            )));
        }
        if node.readonly {
            return Err(AeroError::InvalidOperation(format!("read-only: {id}")));
        }
        let node = self.require_mut(id)?;
        node.size = Some(content.len() as u64);
        node.content = Some(content.to_string());
        Ok(())
    }

    /// Rename a node in place. Duplicate sibling names are permitted.
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<()> {
        check_name(new_name)?;
        let node = self.require(id)?;
        if node.readonly {
            return Err(AeroError::InvalidOperation(format!("read-only: {id}")));
        }
        let is_file = node.is_file();
        let node = self.require_mut(id)?;
        node.name = new_name.to_string();
        node.extension = if is_file { extension_of(new_name) } else { None };
        Ok(())
    }

    /// Reparent a node under `new_parent`.
    ///
    /// Moving a node under itself or any of its own descendants would
    /// create a cycle and is refused without touching the tree.
    pub fn move_node(&mut self, id: NodeId, new_parent: NodeId) -> Result<()> {
        self.require(id)?;
        let parent = self.require(new_parent)?;
        if !parent.is_folder() {
            return Err(AeroError::InvalidOperation(format!(
                "not a folder: {new_parent}"
            )));
        }
        if self.is_effectively_trashed(new_parent) {
            return Err(AeroError::InvalidOperation(format!(
                "parent is trashed: {new_parent}"
            )));
        }
        if self.is_self_or_ancestor(id, new_parent) {
            return Err(AeroError::InvalidOperation(format!(
                "cannot move {id} under itself or its descendant {new_parent}"
            )));
        }
        let node = self.require_mut(id)?;
        node.parent = Some(new_parent);
        Ok(())
    }

    /// Duplicate a single node (not its children) under `new_parent` with
    /// a fresh identity and a `" - Copy"` name marker.
    pub fn copy_node(&mut self, id: NodeId, new_parent: NodeId) -> Result<NodeId> {
        let source = self.require(id)?.clone();
        self.check_create_parent(new_parent)?;
        let new_id = self.alloc_id();
        let stamp = self.tick();
        let name = copy_name(&source.name);
        self.nodes.insert(
            new_id,
            FileNode {
                id: new_id,
                parent: Some(new_parent),
                name,
                created_at: stamp,
                trashed: false,
                ..source
            },
        );
        Ok(new_id)
    }

    /// Simulate archiving: flip a folder into a file with a `.zip` name
    /// suffix and extension. Children are not materialized into any
    /// archive format; they simply become unreachable through listings
    /// until the node is extracted again.
    pub fn zip_node(&mut self, id: NodeId) -> Result<()> {
        let node = self.require(id)?;
        if !node.is_folder() {
            return Err(AeroError::InvalidOperation(format!(
                "only folders can be zipped: {id}"
            )));
        }
        if id == self.root {
            return Err(AeroError::InvalidOperation("cannot zip the root".into()));
        }
        let node = self.require_mut(id)?;
        node.kind = NodeKind::File;
        node.name = format!("{}.zip", node.name);
        node.extension = Some("zip".to_string());
        Ok(())
    }

    /// Reverse [`zip_node`](Self::zip_node): restore folder kind, strip
    /// the `.zip` suffix, clear the synthetic extension.
    pub fn extract_node(&mut self, id: NodeId) -> Result<()> {
        let node = self.require(id)?;
        if !node.is_file() || node.extension.as_deref() != Some("zip") {
            return Err(AeroError::InvalidOperation(format!(
                "not a zip archive: {id}"
            )));
        }
        let node = self.require_mut(id)?;
        node.kind = NodeKind::Folder;
        if let Some(stripped) = node.name.strip_suffix(".zip") {
            node.name = stripped.to_string();
        }
        node.extension = None;
        node.content = None;
        node.size = None;
        Ok(())
    }

    /// Delete a node. Soft delete (default) marks only the targeted node
    /// trashed; descendants keep their flags but disappear from listings
    /// through the query-time cascade. Permanent delete removes the node
    /// and its entire subtree from the store.
    pub fn delete(&mut self, id: NodeId, permanent: bool) -> Result<()> {
        self.require(id)?;
        if id == self.root {
            return Err(AeroError::InvalidOperation("cannot delete the root".into()));
        }
        if permanent {
            let subtree = self.subtree_ids(id);
            debug!("permanently deleting {id} and {} descendants", subtree.len() - 1);
            for nid in subtree {
                self.nodes.remove(&nid);
            }
        } else {
            debug!("trashing {id}");
            self.require_mut(id)?.trashed = true;
        }
        Ok(())
    }

    /// Clear a node's trashed flag.
    pub fn restore(&mut self, id: NodeId) -> Result<()> {
        self.require_mut(id)?.trashed = false;
        Ok(())
    }

    /// Permanently remove every node carrying the trashed flag (each with
    /// its subtree). Returns how many nodes were removed.
    pub fn empty_trash(&mut self) -> usize {
        let flagged: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|n| n.trashed)
            .map(|n| n.id)
            .collect();
        let mut removed = 0;
        for id in flagged {
            // A flagged node may already be gone as part of an earlier
            // flagged ancestor's subtree.
            if !self.nodes.contains_key(&id) {
                continue;
            }
            for nid in self.subtree_ids(id) {
                self.nodes.remove(&nid);
                removed += 1;
            }
        }
        debug!("emptied trash: {removed} nodes removed");
        removed
    }

    // -- Snapshots ------------------------------------------------------------

    /// Plain serializable form of the whole store.
    pub fn to_snapshot(&self) -> FsSnapshot {
        FsSnapshot {
            nodes: self.nodes.values().cloned().collect(),
            root: self.root,
            next_id: self.next_id,
            clock: self.clock,
        }
    }

    /// Rebuild a store from a snapshot, validating structural integrity.
    pub fn from_snapshot(snap: FsSnapshot) -> Result<Self> {
        let mut nodes = BTreeMap::new();
        for node in snap.nodes {
            nodes.insert(node.id, node);
        }
        match nodes.get(&snap.root) {
            Some(root) if root.is_folder() => {},
            Some(_) => {
                return Err(AeroError::Snapshot("root is not a folder".into()));
            },
            None => {
                return Err(AeroError::Snapshot("root node missing".into()));
            },
        }
        for node in nodes.values() {
            if let Some(parent) = node.parent
                && !nodes.contains_key(&parent)
            {
                return Err(AeroError::Snapshot(format!(
                    "node {} references missing parent {parent}",
                    node.id
                )));
            }
        }
        Ok(Self {
            nodes,
            root: snap.root,
            next_id: snap.next_id,
            clock: snap.clock,
        })
    }

    // -- Private helpers ------------------------------------------------------

    fn require(&self, id: NodeId) -> Result<&FileNode> {
        self.get(id)
            .ok_or_else(|| AeroError::NotFound(format!("{id}")))
    }

    fn require_mut(&mut self, id: NodeId) -> Result<&mut FileNode> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| AeroError::NotFound(format!("{id}")))
    }

    /// Validate that `parent` can receive new children.
    fn check_create_parent(&self, parent: NodeId) -> Result<()> {
        let node = self.require(parent)?;
        if !node.is_folder() {
            return Err(AeroError::InvalidOperation(format!(
                "parent is not a folder: {parent}"
            )));
        }
        if self.is_effectively_trashed(parent) {
            return Err(AeroError::InvalidOperation(format!(
                "parent is trashed: {parent}"
            )));
        }
        Ok(())
    }

    /// `id` plus every descendant.
    fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = vec![id];
        let mut frontier = vec![id];
        while let Some(current) = frontier.pop() {
            for node in self.nodes.values() {
                if node.parent == Some(current) {
                    result.push(node.id);
                    frontier.push(node.id);
                }
            }
        }
        result
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn tick(&mut self) -> u64 {
        let t = self.clock;
        self.clock += 1;
        t
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new("C:")
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AeroError::InvalidOperation("empty name".into()));
    }
    Ok(())
}

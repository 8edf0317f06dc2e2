//! File-system node model.

use aero_types::id::NodeId;
use serde::{Deserialize, Serialize};

/// What a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// One entry in the virtual file system tree.
///
/// The store owns every node; callers only ever see borrowed reads. A
/// plain serde-serializable record so the whole tree can be persisted as
/// a best-effort snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: NodeId,
    /// Parent folder, `None` for a root.
    pub parent: Option<NodeId>,
    pub name: String,
    pub kind: NodeKind,
    /// Textual content (files only; folders never carry content).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Logical creation stamp (monotonic per store, not wall time).
    pub created_at: u64,
    /// Content size in bytes (files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Extension derived from the name (files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Soft-delete flag. Trashed nodes are hidden from listings but kept
    /// for restore until permanently deleted.
    #[serde(default)]
    pub trashed: bool,
    /// Read-only nodes refuse rename and content writes.
    #[serde(default)]
    pub readonly: bool,
}

impl FileNode {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }
}

/// Derive the extension from a file name (`"todo.txt"` -> `Some("txt")`).
///
/// Leading dots don't count: `".profile"` has no extension.
pub(crate) fn extension_of(name: &str) -> Option<String> {
    let dot = name.rfind('.')?;
    if dot == 0 || dot + 1 == name.len() {
        return None;
    }
    Some(name[dot + 1..].to_ascii_lowercase())
}

/// The marker appended to duplicated node names.
pub(crate) const COPY_MARKER: &str = " - Copy";

/// Name for a duplicate of `name`, marked once.
pub(crate) fn copy_name(name: &str) -> String {
    if name.ends_with(COPY_MARKER) {
        name.to_string()
    } else {
        format!("{name}{COPY_MARKER}")
    }
}

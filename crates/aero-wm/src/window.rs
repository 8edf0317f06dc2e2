//! Window records.

use aero_types::geometry::{Point, Rect, Size};
use aero_types::id::{NodeId, WindowId};
use serde::{Deserialize, Serialize};

use crate::app::AppKind;

/// Parameters supplied at launch and retained for relaunch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchParams {
    /// File-system node being edited, if the app was opened on a file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<NodeId>,
    /// Display name of that file, folded into the window title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// The window manager's state for one open application instance.
///
/// A plain serializable record: no live references, no callbacks, so the
/// whole window list can be persisted as a best-effort snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app: AppKind,
    pub title: String,
    /// Simulated process id shown by task-manager style chrome.
    pub pid: u32,
    pub minimized: bool,
    pub maximized: bool,
    pub crashed: bool,
    pub always_on_top: bool,
    /// Picture-in-picture. Implies `always_on_top`; both are set and
    /// cleared together.
    pub pip: bool,
    /// Owning virtual desktop (index into the manager's desktop list).
    pub desktop: usize,
    /// Raw stacking rank; higher is more front within its band.
    pub z: u32,
    pub pos: Point,
    pub size: Size,
    /// The single saved-geometry slot shared by maximize, snap and PiP.
    /// Set on entering a layout mode, consumed and cleared on leaving it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore: Option<Rect>,
    /// Launch parameters retained for relaunch-after-crash.
    #[serde(default)]
    pub params: LaunchParams,
}

impl WindowRecord {
    /// The window's current rectangle.
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Whether the window is in any exclusive layout mode.
    pub fn in_layout_mode(&self) -> bool {
        self.maximized || self.pip
    }
}

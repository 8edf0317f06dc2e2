//! Window lifecycle, geometry, focus and desktop management.

use aero_types::config::DeskConfig;
use aero_types::error::{AeroError, Result};
use aero_types::geometry::{Point, Rect, Size};
use aero_types::id::WindowId;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::app::AppKind;
use crate::window::{LaunchParams, WindowRecord};

/// Which half of the work area a snap targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapSide {
    Left,
    Right,
}

/// Geometry used when a restore slot is empty (a window maximized before
/// it ever had a normal rectangle, e.g. straight out of a snapshot).
const FALLBACK_RESTORE: Rect = Rect::new(100, 100, 800, 600);

/// The window manager.
///
/// Owns every [`WindowRecord`] and the desktop list. Operations that
/// reference an unknown window id are silent no-ops; a crashed window
/// accepts only `close` and `relaunch`.
#[derive(Debug, Clone)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    focused: Option<WindowId>,
    desktops: Vec<String>,
    active_desktop: usize,
    next_id: u64,
    next_pid: u32,
    config: DeskConfig,
}

/// Plain serializable form of the manager for best-effort persistence.
/// The desk configuration is not part of the snapshot; the host supplies
/// it again on restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WmSnapshot {
    pub windows: Vec<WindowRecord>,
    pub focused: Option<WindowId>,
    pub desktops: Vec<String>,
    pub active_desktop: usize,
    pub next_id: u64,
    pub next_pid: u32,
}

impl WindowManager {
    pub fn new(config: DeskConfig) -> Self {
        Self {
            windows: Vec::new(),
            focused: None,
            desktops: vec!["Desktop 1".to_string()],
            active_desktop: 0,
            next_id: 1,
            next_pid: 1000,
            config,
        }
    }

    // -- Queries --------------------------------------------------------------

    /// All window records, in launch order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// The currently focused window, if any.
    pub fn focused_id(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn active_desktop(&self) -> usize {
        self.active_desktop
    }

    pub fn desktops(&self) -> &[String] {
        &self.desktops
    }

    /// Windows assigned to a desktop, launch order.
    pub fn windows_on(&self, desktop: usize) -> Vec<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| w.desktop == desktop)
            .collect()
    }

    /// Non-minimized windows on a desktop, back-to-front.
    ///
    /// Two bands: normal windows ordered by raw z rank, then always-on-top
    /// windows ordered by raw z rank. This is the only ordering rule.
    pub fn stacking_order(&self, desktop: usize) -> Vec<WindowId> {
        let band = |on_top: bool| {
            let mut ws: Vec<&WindowRecord> = self
                .windows
                .iter()
                .filter(|w| w.desktop == desktop && !w.minimized && w.always_on_top == on_top)
                .collect();
            ws.sort_by_key(|w| w.z);
            ws.into_iter().map(|w| w.id).collect::<Vec<_>>()
        };
        let mut order = band(false);
        order.extend(band(true));
        order
    }

    /// The desktop area available to windows (screen minus taskbar).
    pub fn work_area(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.config.screen_width,
            self.config.work_area_height(),
        )
    }

    // -- Lifecycle ------------------------------------------------------------

    /// Open a new window for `app` on the active desktop.
    ///
    /// Geometry cascades from screen center by the number of already-open
    /// windows, clamped so the window never opens above the visible top
    /// edge. The new window becomes focused.
    pub fn launch(&mut self, app: AppKind, params: LaunchParams) -> WindowId {
        let spec = app.spec();
        let count = self.windows.len() as i32;
        let step = self.config.cascade_step;
        let x = (self.config.screen_width as i32 / 2 - spec.default_size.w as i32 / 2
            + count * step)
            .max(0);
        let y = (self.config.screen_height as i32 / 2 - spec.default_size.h as i32 / 2
            + count * step)
            .max(0);

        let id = WindowId(self.next_id);
        self.next_id += 1;
        let pid = self.next_pid;
        self.next_pid += 1;
        let z = self.next_z();

        let title = match &params.file_name {
            Some(name) => format!("{name} - {}", spec.title),
            None => spec.title.to_string(),
        };

        info!("launch {app}: {id} (pid {pid}) on desktop {}", self.active_desktop);
        self.windows.push(WindowRecord {
            id,
            app,
            title,
            pid,
            minimized: false,
            maximized: false,
            crashed: false,
            always_on_top: false,
            pip: false,
            desktop: self.active_desktop,
            z,
            pos: Point::new(x, y),
            size: spec.default_size,
            restore: None,
            params,
        });
        self.focused = Some(id);
        id
    }

    /// Remove a window. If it was focused, focus becomes undefined (no
    /// automatic refocus -- a deliberate product decision).
    pub fn close(&mut self, id: WindowId) {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != id);
        if self.windows.len() != before {
            debug!("close {id}");
            if self.focused == Some(id) {
                self.focused = None;
            }
        }
    }

    /// Raise a window to the front of its band and give it focus.
    pub fn focus(&mut self, id: WindowId) {
        let z = self.next_z();
        let Some(w) = self.find_mut(id) else { return };
        if w.crashed {
            return;
        }
        w.z = z;
        w.minimized = false;
        self.focused = Some(id);
    }

    pub fn minimize(&mut self, id: WindowId) {
        let Some(w) = self.find_mut(id) else { return };
        if w.crashed {
            return;
        }
        w.minimized = true;
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Toggle maximize. Entering saves the current rectangle in the
    /// restore slot and fills the work area; leaving restores from the
    /// slot and clears it.
    pub fn maximize(&mut self, id: WindowId) {
        let work = self.work_area();
        let z = self.next_z();
        let Some(w) = self.find_mut(id) else { return };
        if w.crashed {
            return;
        }
        if w.maximized {
            exit_layout_mode(w);
        } else {
            // Leaving PiP first keeps the slot pointing at a normal rect.
            exit_layout_mode(w);
            w.restore = Some(w.rect());
            w.pos = Point::new(0, 0);
            w.size = work.size;
            w.maximized = true;
        }
        w.minimized = false;
        w.z = z;
        self.focused = Some(id);
    }

    /// Snap a window to the left or right half of the work area.
    pub fn snap(&mut self, id: WindowId, side: SnapSide) {
        let work = self.work_area();
        let z = self.next_z();
        let Some(w) = self.find_mut(id) else { return };
        if w.crashed {
            return;
        }
        exit_layout_mode(w);
        w.restore = Some(w.rect());
        let half = work.size.w / 2;
        w.size = Size::new(half, work.size.h);
        w.pos = match side {
            SnapSide::Left => Point::new(0, 0),
            SnapSide::Right => Point::new(half as i32, 0),
        };
        w.minimized = false;
        w.z = z;
        self.focused = Some(id);
    }

    /// Toggle picture-in-picture: a small always-on-top rectangle pinned
    /// to the bottom-right corner of the work area. Only PiP-capable
    /// apps enter; the flags are set and cleared together.
    pub fn toggle_pip(&mut self, id: WindowId) {
        let pip_size = Size::new(self.config.pip_width, self.config.pip_height);
        let margin = self.config.pip_margin as i32;
        let pip_pos = Point::new(
            self.config.screen_width as i32 - pip_size.w as i32 - margin,
            self.config.work_area_height() as i32 - pip_size.h as i32 - margin,
        );
        let Some(w) = self.find_mut(id) else { return };
        if w.crashed {
            return;
        }
        if w.pip {
            exit_layout_mode(w);
        } else {
            if !w.app.spec().pip_capable {
                debug!("{} is not PiP-capable", w.app);
                return;
            }
            exit_layout_mode(w);
            w.restore = Some(w.rect());
            w.pos = pip_pos;
            w.size = pip_size;
            w.pip = true;
            w.always_on_top = true;
        }
    }

    /// Flip always-on-top. Guarded to a no-op while PiP is active (PiP
    /// owns the flag for its duration).
    pub fn toggle_always_on_top(&mut self, id: WindowId) {
        let Some(w) = self.find_mut(id) else { return };
        if w.crashed || w.pip {
            return;
        }
        w.always_on_top = !w.always_on_top;
    }

    /// Direct position mutation during a drag.
    pub fn update_position(&mut self, id: WindowId, x: i32, y: i32) {
        let Some(w) = self.find_mut(id) else { return };
        if w.crashed {
            return;
        }
        w.pos = Point::new(x, y);
    }

    /// Direct size mutation during a resize. Clamps to the configured
    /// floor (a smaller floor while in PiP mode).
    pub fn update_size(&mut self, id: WindowId, width: u32, height: u32) {
        let normal_floor = (self.config.min_window_width, self.config.min_window_height);
        let pip_floor = (self.config.pip_min_width, self.config.pip_min_height);
        let Some(w) = self.find_mut(id) else { return };
        if w.crashed {
            return;
        }
        let (floor_w, floor_h) = if w.pip { pip_floor } else { normal_floor };
        w.size = Size::new(width.max(floor_w), height.max(floor_h));
    }

    /// Mark a window crashed. The record stays (visible, inert); only
    /// `close` and `relaunch` transition out.
    pub fn crash(&mut self, id: WindowId) {
        let Some(w) = self.find_mut(id) else { return };
        info!("crash {id} ({})", w.app);
        w.crashed = true;
    }

    /// Close a window and launch a fresh instance of the same app with
    /// the same launch parameters.
    pub fn relaunch(&mut self, id: WindowId) -> Option<WindowId> {
        let w = self.get(id)?;
        let (app, params) = (w.app, w.params.clone());
        self.close(id);
        Some(self.launch(app, params))
    }

    /// Remove every window (session end).
    pub fn clear(&mut self) {
        self.windows.clear();
        self.focused = None;
    }

    // -- Desktops -------------------------------------------------------------

    /// Make a desktop active. Window records are untouched; the focus
    /// pointer is dropped if it no longer refers to a window on the
    /// active desktop.
    pub fn switch_desktop(&mut self, index: usize) {
        if index >= self.desktops.len() {
            return;
        }
        self.active_desktop = index;
        if let Some(id) = self.focused
            && self.get(id).is_none_or(|w| w.desktop != index)
        {
            self.focused = None;
        }
    }

    /// Append a new desktop and return its index. Desktops are
    /// append-only; deleting one would dangle window assignments.
    pub fn add_desktop(&mut self) -> usize {
        self.desktops.push(format!("Desktop {}", self.desktops.len() + 1));
        self.desktops.len() - 1
    }

    /// Reassign a window to another desktop.
    pub fn move_to_desktop(&mut self, id: WindowId, index: usize) {
        if index >= self.desktops.len() {
            return;
        }
        let active = self.active_desktop;
        let Some(w) = self.find_mut(id) else { return };
        if w.crashed {
            return;
        }
        w.desktop = index;
        if self.focused == Some(id) && index != active {
            self.focused = None;
        }
    }

    // -- Snapshots ------------------------------------------------------------

    pub fn to_snapshot(&self) -> WmSnapshot {
        WmSnapshot {
            windows: self.windows.clone(),
            focused: self.focused,
            desktops: self.desktops.clone(),
            active_desktop: self.active_desktop,
            next_id: self.next_id,
            next_pid: self.next_pid,
        }
    }

    /// Rebuild a manager from a snapshot, validating desktop references.
    pub fn from_snapshot(config: DeskConfig, snap: WmSnapshot) -> Result<Self> {
        if snap.desktops.is_empty() {
            return Err(AeroError::Snapshot("no desktops".into()));
        }
        if snap.active_desktop >= snap.desktops.len() {
            return Err(AeroError::Snapshot(format!(
                "active desktop {} out of range",
                snap.active_desktop
            )));
        }
        for w in &snap.windows {
            if w.desktop >= snap.desktops.len() {
                return Err(AeroError::Snapshot(format!(
                    "window {} references missing desktop {}",
                    w.id, w.desktop
                )));
            }
        }
        Ok(Self {
            windows: snap.windows,
            focused: snap.focused,
            desktops: snap.desktops,
            active_desktop: snap.active_desktop,
            next_id: snap.next_id,
            next_pid: snap.next_pid,
            config,
        })
    }

    // -- Private helpers ------------------------------------------------------

    fn find_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    fn next_z(&self) -> u32 {
        self.windows.iter().map(|w| w.z).max().unwrap_or(0) + 1
    }
}

/// Restore normal-equivalent geometry bookkeeping before entering a new
/// layout mode (or when leaving the current one). Consumes the slot.
fn exit_layout_mode(w: &mut WindowRecord) {
    if !w.in_layout_mode() {
        return;
    }
    let r = w.restore.take().unwrap_or(FALLBACK_RESTORE);
    w.pos = r.pos;
    w.size = r.size;
    w.maximized = false;
    if w.pip {
        w.pip = false;
        w.always_on_top = false;
    }
}

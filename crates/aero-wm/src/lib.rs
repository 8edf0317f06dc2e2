//! Window manager for aero.
//!
//! Owns the window records of every open application instance and the
//! algorithms on top of them: focus stacking, snap-to-half geometry,
//! maximize/restore with a saved-geometry slot, picture-in-picture, and
//! virtual-desktop partitioning. All operations are synchronous mutations
//! of an owned collection; operations on unknown window ids are silent
//! no-ops so late-arriving UI events never raise.

mod app;
mod manager;
mod window;

pub use app::{AppKind, AppSpec};
pub use manager::{SnapSide, WindowManager, WmSnapshot};
pub use window::{LaunchParams, WindowRecord};
